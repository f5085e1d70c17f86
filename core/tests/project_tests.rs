/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Tests for project operations

extern crate meridian_core;

use chrono::NaiveDate;
use entity::*;
use meridian_core::error::CoreError;
use meridian_core::pagination::PageRequest;
use meridian_core::project::*;
use meridian_core::types::{Cli, ProjectData, ServerState};
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

fn naive_date() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn test_state(db: DatabaseConnection) -> Arc<ServerState> {
    Arc::new(ServerState {
        db,
        cli: Cli {
            log_level: "info".to_string(),
            database_url: None,
            database_url_file: None,
            deny_patterns: None,
            disable_registration: false,
        },
    })
}

fn admin_user() -> user::Model {
    user::Model {
        id: 1,
        entity_version: 1,
        username: "admin".to_string(),
        admin: true,
        created_at: naive_date(),
        updated_at: naive_date(),
    }
}

fn test_project(id: i64, owner: i64, entity_version: i64) -> project::Model {
    project::Model {
        id,
        entity_version,
        name: format!("project-{id}"),
        description: String::new(),
        owner,
        created_at: naive_date(),
        updated_at: naive_date(),
    }
}

fn test_device(id: i64, project: i64) -> device::Model {
    device::Model {
        id,
        entity_version: 1,
        project,
        device_name: format!("device-{id}"),
        brand: None,
        model: None,
        firmware_version: None,
        software_version: None,
        description: None,
        created_at: naive_date(),
        updated_at: naive_date(),
    }
}

fn test_packet(id: i64, device: i64) -> packet::Model {
    use entity::packet::{PacketFormat, PacketSerialization, PacketType, TrafficPlan};

    packet::Model {
        id,
        entity_version: 1,
        device,
        name: format!("packet-{id}"),
        packet_type: PacketType::Input,
        format: PacketFormat::Json,
        serialization: PacketSerialization::None,
        version: "1".to_string(),
        traffic_plan: TrafficPlan::Low,
        timestamp_field: "timestamp".to_string(),
        timestamp_format: "unix".to_string(),
        unix_timestamp: true,
        created_at: naive_date(),
        updated_at: naive_date(),
    }
}

fn count_row(total: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("num_items", Value::BigInt(Some(total)))])
}

#[tokio::test]
async fn test_save_project_reports_all_violations() {
    // validation runs before any duplicate probe, so the mock stays empty
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let state = test_state(db);

    let err = save_project(state, &admin_user(), ProjectData::default())
        .await
        .unwrap_err();

    match err {
        CoreError::Validation(violations) => {
            assert_eq!(violations.len(), 2);
            assert!(violations.iter().all(|v| v.field == "name"));
        }
        other => panic!("expected validation failure, got {other}"),
    }
}

#[tokio::test]
async fn test_save_project_duplicate_names_key_fields() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![test_project(7, 1, 1)]])
        .into_connection();
    let state = test_state(db);

    let data = ProjectData {
        name: Some("project-7".to_string()),
        description: None,
    };

    let err = save_project(state, &admin_user(), data).await.unwrap_err();

    match err {
        CoreError::Duplicate(fields) => {
            assert_eq!(fields, vec!["name".to_string(), "owner".to_string()]);
        }
        other => panic!("expected duplicate, got {other}"),
    }
}

#[tokio::test]
async fn test_update_project_increments_entity_version() {
    let before = test_project(7, 1, 3);
    let mut after = before.clone();
    after.entity_version = 4;
    after.name = "renamed".to_string();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![before]])
        .append_query_results([Vec::<project::Model>::new()])
        .append_query_results([vec![after]])
        .into_connection();
    let state = test_state(db);

    let data = ProjectData {
        name: Some("renamed".to_string()),
        description: None,
    };

    let project = update_project(state, &admin_user(), 7, data).await.unwrap();

    assert_eq!(project.entity_version, 4);
    assert_eq!(project.name, "renamed");
}

#[tokio::test]
async fn test_find_all_projects_paginates() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![count_row(21)]])
        .append_query_results([vec![test_project(21, 1, 1)]])
        .into_connection();
    let state = test_state(db);

    let page = find_all_projects(
        state,
        &admin_user(),
        PageRequest {
            delta: Some(0),
            page: Some(3),
        },
    )
    .await
    .unwrap();

    assert_eq!(page.results.len(), 1);
    assert_eq!(page.delta, 10);
    assert_eq!(page.current_page, 3);
    assert_eq!(page.num_pages, 3);
    assert_eq!(page.next_page, 1);
}

#[tokio::test]
async fn test_delete_project_cascades_children_first() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![test_device(5, 7), test_device(6, 7)]])
        .append_query_results([vec![
            test_packet(42, 5),
            test_packet(43, 5),
            test_packet(44, 6),
        ]])
        .append_exec_results([
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 6,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 3,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 2,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
        ])
        .into_connection();
    let state = test_state(db);

    delete_project(state, &admin_user(), 7).await.unwrap();
}
