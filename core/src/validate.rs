/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use super::consts::{DENY_PATTERNS, MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH};
use super::error::Violation;
use super::types::*;

/// Configurable blocklist for the malicious-markup rule. Patterns are held
/// lowercased; matching is case-insensitive substring.
#[derive(Debug, Clone)]
pub struct DenyPatterns(Vec<String>);

impl Default for DenyPatterns {
    fn default() -> Self {
        DenyPatterns(DENY_PATTERNS.iter().map(|s| s.to_string()).collect())
    }
}

impl DenyPatterns {
    /// Built-in patterns plus any comma-separated additions from the CLI.
    pub fn from_cli(cli: &Cli) -> Self {
        let mut patterns = DenyPatterns::default();

        if let Some(extra) = &cli.deny_patterns {
            for pattern in extra.split(',') {
                let pattern = pattern.trim().to_lowercase();
                if !pattern.is_empty() && !patterns.0.contains(&pattern) {
                    patterns.0.push(pattern);
                }
            }
        }

        patterns
    }

    pub fn matches(&self, value: &str) -> bool {
        let value = value.to_lowercase();
        self.0.iter().any(|pattern| value.contains(pattern))
    }
}

fn violation(field: &str, message: &str, invalid_value: Option<&str>) -> Violation {
    Violation {
        field: field.to_string(),
        message: message.to_string(),
        invalid_value: invalid_value.map(|value| value.to_string()),
    }
}

/// Required strings fail two independent rules on null (non-null and
/// non-empty) and one on empty, so a null input reports two violations.
pub fn required_string(field: &str, value: Option<&str>, violations: &mut Vec<Violation>) {
    match value {
        None => {
            violations.push(violation(field, "must not be null", None));
            violations.push(violation(field, "must not be empty", None));
        }
        Some(s) if s.is_empty() => {
            violations.push(violation(field, "must not be empty", Some(s)));
        }
        _ => {}
    }
}

pub fn required_value<T>(field: &str, value: Option<&T>, violations: &mut Vec<Violation>) {
    if value.is_none() {
        violations.push(violation(field, "must not be null", None));
    }
}

pub fn max_length(field: &str, value: Option<&str>, max: usize, violations: &mut Vec<Violation>) {
    if let Some(s) = value {
        if s.chars().count() > max {
            violations.push(violation(
                field,
                &format!("length must be at most {}", max),
                Some(s),
            ));
        }
    }
}

pub fn no_forbidden_markup(
    field: &str,
    value: Option<&str>,
    patterns: &DenyPatterns,
    violations: &mut Vec<Violation>,
) {
    if let Some(s) = value {
        if patterns.matches(s) {
            violations.push(violation(field, "contains forbidden markup", Some(s)));
        }
    }
}

fn checked_text(
    field: &str,
    value: Option<&str>,
    max: usize,
    patterns: &DenyPatterns,
    violations: &mut Vec<Violation>,
) {
    max_length(field, value, max, violations);
    no_forbidden_markup(field, value, patterns, violations);
}

pub fn validate_project(data: &ProjectData, patterns: &DenyPatterns) -> Vec<Violation> {
    let mut violations = Vec::new();

    required_string("name", data.name.as_deref(), &mut violations);
    checked_text(
        "name",
        data.name.as_deref(),
        MAX_NAME_LENGTH,
        patterns,
        &mut violations,
    );
    checked_text(
        "description",
        data.description.as_deref(),
        MAX_DESCRIPTION_LENGTH,
        patterns,
        &mut violations,
    );

    violations
}

pub fn validate_device(data: &DeviceData, patterns: &DenyPatterns) -> Vec<Violation> {
    let mut violations = Vec::new();

    required_string("device_name", data.device_name.as_deref(), &mut violations);
    checked_text(
        "device_name",
        data.device_name.as_deref(),
        MAX_NAME_LENGTH,
        patterns,
        &mut violations,
    );

    for (field, value) in [
        ("brand", data.brand.as_deref()),
        ("model", data.model.as_deref()),
        ("firmware_version", data.firmware_version.as_deref()),
        ("software_version", data.software_version.as_deref()),
    ] {
        checked_text(field, value, MAX_NAME_LENGTH, patterns, &mut violations);
    }

    checked_text(
        "description",
        data.description.as_deref(),
        MAX_DESCRIPTION_LENGTH,
        patterns,
        &mut violations,
    );

    violations
}

pub fn validate_packet(data: &PacketData, patterns: &DenyPatterns) -> Vec<Violation> {
    let mut violations = Vec::new();

    required_string("name", data.name.as_deref(), &mut violations);
    checked_text(
        "name",
        data.name.as_deref(),
        MAX_NAME_LENGTH,
        patterns,
        &mut violations,
    );

    required_string("version", data.version.as_deref(), &mut violations);
    checked_text(
        "version",
        data.version.as_deref(),
        MAX_NAME_LENGTH,
        patterns,
        &mut violations,
    );

    required_value("packet_type", data.packet_type.as_ref(), &mut violations);
    required_value("format", data.format.as_ref(), &mut violations);
    required_value("serialization", data.serialization.as_ref(), &mut violations);
    required_value("traffic_plan", data.traffic_plan.as_ref(), &mut violations);

    required_string(
        "timestamp_field",
        data.timestamp_field.as_deref(),
        &mut violations,
    );
    checked_text(
        "timestamp_field",
        data.timestamp_field.as_deref(),
        MAX_NAME_LENGTH,
        patterns,
        &mut violations,
    );

    required_string(
        "timestamp_format",
        data.timestamp_format.as_deref(),
        &mut violations,
    );
    checked_text(
        "timestamp_format",
        data.timestamp_format.as_deref(),
        MAX_NAME_LENGTH,
        patterns,
        &mut violations,
    );

    violations
}

pub fn validate_packet_field(data: &PacketFieldData, patterns: &DenyPatterns) -> Vec<Violation> {
    let mut violations = Vec::new();

    required_string("name", data.name.as_deref(), &mut violations);
    checked_text(
        "name",
        data.name.as_deref(),
        MAX_NAME_LENGTH,
        patterns,
        &mut violations,
    );

    checked_text(
        "description",
        data.description.as_deref(),
        MAX_DESCRIPTION_LENGTH,
        patterns,
        &mut violations,
    );

    required_value("field_type", data.field_type.as_ref(), &mut violations);
    required_value("multiplicity", data.multiplicity.as_ref(), &mut violations);

    checked_text(
        "unit",
        data.unit.as_deref(),
        MAX_NAME_LENGTH,
        patterns,
        &mut violations,
    );
    no_forbidden_markup("value", data.value.as_deref(), patterns, &mut violations);

    violations
}

pub fn validate_user(data: &UserData, patterns: &DenyPatterns) -> Vec<Violation> {
    let mut violations = Vec::new();

    required_string("username", data.username.as_deref(), &mut violations);
    checked_text(
        "username",
        data.username.as_deref(),
        MAX_NAME_LENGTH,
        patterns,
        &mut violations,
    );

    violations
}

pub fn validate_role(data: &RoleData, patterns: &DenyPatterns) -> Vec<Violation> {
    let mut violations = Vec::new();

    required_string("name", data.name.as_deref(), &mut violations);
    checked_text(
        "name",
        data.name.as_deref(),
        MAX_NAME_LENGTH,
        patterns,
        &mut violations,
    );
    checked_text(
        "description",
        data.description.as_deref(),
        MAX_DESCRIPTION_LENGTH,
        patterns,
        &mut violations,
    );

    violations
}
