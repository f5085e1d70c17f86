/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use std::sync::Arc;

use super::error::{CoreError, CoreResult};
use super::ownership::{resolve_owner, EntityRef};
use super::permission::{action_bit, effective_permissions, Action, Resource};
use super::types::*;

/// Allow/deny decision for one operation. Admins are always allowed and
/// short-circuit before any lookup. A missing action bit denies with
/// Unauthorized; a supplied target whose ownership chain fails or leads to
/// another user denies with EntityNotFound, so a foreign entity never
/// announces its existence through the deny shape.
pub async fn authorize(
    state: Arc<ServerState>,
    user: &MUser,
    resource: Resource,
    action: Action,
    target: Option<EntityRef>,
) -> CoreResult<()> {
    if user.admin {
        return Ok(());
    }

    let mask = effective_permissions(Arc::clone(&state), user, resource).await?;

    if !action_bit(mask, action) {
        return Err(CoreError::Unauthorized);
    }

    if let Some(target) = target {
        require_owner(state, user, target).await?;
    }

    Ok(())
}

/// Ownership gate alone: the target must resolve to the acting user.
pub async fn require_owner(
    state: Arc<ServerState>,
    user: &MUser,
    target: EntityRef,
) -> CoreResult<()> {
    if user.admin {
        return Ok(());
    }

    let owner = resolve_owner(state, target).await?;

    if owner.id != user.id {
        return Err(CoreError::not_found(target.resource().name()));
    }

    Ok(())
}

/// Gate for an owned entity referenced by a save/update (a packet naming
/// its device, a device naming its project). Requires the Find bit on the
/// referenced resource; once that bit is present, an owner mismatch still
/// reads as EntityNotFound, never Unauthorized.
pub async fn authorize_reference(
    state: Arc<ServerState>,
    user: &MUser,
    target: EntityRef,
) -> CoreResult<()> {
    authorize(state, user, target.resource(), Action::Find, Some(target)).await
}
