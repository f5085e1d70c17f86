/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single field-rule failure. One submission can carry many of these;
/// the pipeline never stops at the first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("field '{field}': {message}")]
pub struct Violation {
    pub field: String,
    pub message: String,
    pub invalid_value: Option<String>,
}

#[derive(Debug)]
pub enum CoreError {
    /// The acting user lacks the action bit on the resource.
    Unauthorized,
    /// The id is absent from storage, the ownership chain does not lead to
    /// the acting user, or a required parent reference is unset. The shape
    /// is identical in all three cases so that foreign entities stay
    /// indistinguishable from missing ones.
    EntityNotFound(String),
    /// The complete set of field-rule violations for the submission.
    Validation(Vec<Violation>),
    /// Composite natural-key collision; names every key field.
    Duplicate(Vec<String>),
    Database(DbErr),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::Unauthorized => write!(f, "Unauthorized"),
            CoreError::EntityNotFound(resource) => write!(f, "{} not found", resource),
            CoreError::Validation(violations) => {
                write!(f, "Validation failed: ")?;
                for (i, violation) in violations.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", violation)?;
                }
                Ok(())
            }
            CoreError::Duplicate(fields) => {
                write!(f, "Duplicate entity on fields: {}", fields.join(", "))
            }
            CoreError::Database(err) => write!(f, "Database error: {}", err),
        }
    }
}

impl std::error::Error for CoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CoreError::Database(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbErr> for CoreError {
    fn from(err: DbErr) -> Self {
        CoreError::Database(err)
    }
}

impl CoreError {
    pub fn not_found(resource: &str) -> Self {
        CoreError::EntityNotFound(resource.to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::EntityNotFound(_))
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, CoreError::Unauthorized)
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
