/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Tests for the validation pipeline

extern crate meridian_core;
use meridian_core::types::{Cli, DeviceData, PacketData, ProjectData};
use meridian_core::validate::*;

fn test_cli(deny_patterns: Option<String>) -> Cli {
    Cli {
        log_level: "info".to_string(),
        database_url: None,
        database_url_file: None,
        deny_patterns,
        disable_registration: false,
    }
}

#[test]
fn test_null_required_string_yields_two_violations() {
    let data = ProjectData {
        name: None,
        description: None,
    };

    let violations = validate_project(&data, &DenyPatterns::default());

    assert_eq!(violations.len(), 2);
    assert!(violations.iter().all(|v| v.field == "name"));
    assert_eq!(violations[0].message, "must not be null");
    assert_eq!(violations[1].message, "must not be empty");
}

#[test]
fn test_empty_required_string_yields_one_violation() {
    let data = ProjectData {
        name: Some("".to_string()),
        description: None,
    };

    let violations = validate_project(&data, &DenyPatterns::default());

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].field, "name");
    assert_eq!(violations[0].message, "must not be empty");
}

#[test]
fn test_overlong_value_echoed_verbatim() {
    let long_name = "a".repeat(256);
    let data = ProjectData {
        name: Some(long_name.clone()),
        description: None,
    };

    let violations = validate_project(&data, &DenyPatterns::default());

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].field, "name");
    assert_eq!(violations[0].message, "length must be at most 255");
    assert_eq!(violations[0].invalid_value.as_deref(), Some(long_name.as_str()));
}

#[test]
fn test_deny_patterns_reject_markup() {
    let patterns = DenyPatterns::default();

    for value in [
        "click javascript:alert(1)",
        "vbscript:MsgBox",
        "hello <script>alert(1)</script>",
        "</script> trailing",
    ] {
        let data = ProjectData {
            name: Some(value.to_string()),
            description: None,
        };

        let violations = validate_project(&data, &patterns);
        assert_eq!(violations.len(), 1, "expected rejection for {value}");
        assert_eq!(violations[0].message, "contains forbidden markup");
    }
}

#[test]
fn test_deny_patterns_are_case_insensitive() {
    let patterns = DenyPatterns::default();

    let data = ProjectData {
        name: Some("JaVaScRiPt:alert(1)".to_string()),
        description: None,
    };

    let violations = validate_project(&data, &patterns);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].message, "contains forbidden markup");
}

#[test]
fn test_deny_patterns_extended_from_cli() {
    let cli = test_cli(Some("onload=, onerror=".to_string()));
    let patterns = DenyPatterns::from_cli(&cli);

    assert!(patterns.matches("<img onload=steal()>"));
    assert!(patterns.matches("<img ONERROR=steal()>"));
    assert!(!DenyPatterns::default().matches("<img onload=steal()>"));
}

#[test]
fn test_packet_pipeline_never_short_circuits() {
    let violations = validate_packet(&PacketData::default(), &DenyPatterns::default());

    // name 2, version 2, four enums 1 each, both timestamp strings 2 each
    assert_eq!(violations.len(), 12);

    for field in [
        "name",
        "version",
        "packet_type",
        "format",
        "serialization",
        "traffic_plan",
        "timestamp_field",
        "timestamp_format",
    ] {
        assert!(
            violations.iter().any(|v| v.field == field),
            "missing violation for {field}"
        );
    }
}

#[test]
fn test_enum_fields_report_null_once() {
    let data = PacketData {
        device: Some(1),
        name: Some("temperature".to_string()),
        packet_type: None,
        format: None,
        serialization: None,
        version: Some("1".to_string()),
        traffic_plan: None,
        timestamp_field: Some("timestamp".to_string()),
        timestamp_format: Some("unix".to_string()),
        unix_timestamp: Some(true),
    };

    let violations = validate_packet(&data, &DenyPatterns::default());

    assert_eq!(violations.len(), 4);
    assert!(violations.iter().all(|v| v.message == "must not be null"));
}

#[test]
fn test_valid_device_passes() {
    let data = DeviceData {
        project: Some(7),
        device_name: Some("gw-0042".to_string()),
        brand: Some("Acme".to_string()),
        model: None,
        firmware_version: Some("2.4.1".to_string()),
        software_version: None,
        description: Some("Gateway in the north field".to_string()),
    };

    let violations = validate_device(&data, &DenyPatterns::default());
    assert!(violations.is_empty());
}
