/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Tests for the authorization evaluator

extern crate meridian_core;

use chrono::NaiveDate;
use entity::packet::{PacketFormat, PacketSerialization, PacketType, TrafficPlan};
use entity::*;
use meridian_core::authorization::{authorize, authorize_reference};
use meridian_core::ownership::EntityRef;
use meridian_core::permission::{with_action_bit, Action, Resource};
use meridian_core::types::{Cli, ServerState};
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
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

fn test_user(id: i64, admin: bool) -> user::Model {
    user::Model {
        id,
        entity_version: 1,
        username: format!("user-{id}"),
        admin,
        created_at: naive_date(),
        updated_at: naive_date(),
    }
}

fn test_link(id: i64, user: i64, role: i64) -> user_role::Model {
    user_role::Model { id, user, role }
}

fn test_permission(role: i64, resource: Resource, action_ids: i64) -> permission::Model {
    permission::Model {
        id: role,
        entity_version: 1,
        role,
        resource: resource.name().to_string(),
        action_ids,
        created_at: naive_date(),
        updated_at: naive_date(),
    }
}

fn test_project(id: i64, owner: i64) -> project::Model {
    project::Model {
        id,
        entity_version: 1,
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

#[tokio::test]
async fn test_admin_is_allowed_without_lookups() {
    // an exhausted mock errors on any query, so Ok proves the short-circuit
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let state = test_state(db);
    let admin = test_user(1, true);

    authorize(
        state,
        &admin,
        Resource::Project,
        Action::Remove,
        Some(EntityRef::Project(7)),
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn test_missing_action_bit_denies_unauthorized() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![test_link(1, 3, 5)]])
        .append_query_results([vec![test_permission(
            5,
            Resource::Packet,
            with_action_bit(0, Action::Find, true),
        )]])
        .into_connection();

    let state = test_state(db);
    let user = test_user(3, false);

    let err = authorize(state, &user, Resource::Packet, Action::Save, None)
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_no_roles_denies_unauthorized() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<user_role::Model>::new()])
        .into_connection();

    let state = test_state(db);
    let user = test_user(3, false);

    let err = authorize(state, &user, Resource::Project, Action::Find, None)
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_foreign_target_denies_entity_not_found() {
    // the packet's chain resolves to user 99, not the acting user 3; the
    // action bit is present, so the deny shape must be EntityNotFound
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![test_link(1, 3, 5)]])
        .append_query_results([vec![test_permission(
            5,
            Resource::Packet,
            with_action_bit(0, Action::Update, true),
        )]])
        .append_query_results([vec![test_packet(42, 5)]])
        .append_query_results([vec![test_device(5, 7)]])
        .append_query_results([vec![test_project(7, 99)]])
        .append_query_results([vec![test_user(99, false)]])
        .into_connection();

    let state = test_state(db);
    let user = test_user(3, false);

    let err = authorize(
        state,
        &user,
        Resource::Packet,
        Action::Update,
        Some(EntityRef::Packet(42)),
    )
    .await
    .unwrap_err();

    assert!(err.is_not_found());
    assert!(!err.is_unauthorized());
}

#[tokio::test]
async fn test_reference_without_find_bit_denies_unauthorized() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![test_link(1, 3, 5)]])
        .append_query_results([vec![test_permission(
            5,
            Resource::Device,
            with_action_bit(0, Action::Save, true),
        )]])
        .into_connection();

    let state = test_state(db);
    let user = test_user(3, false);

    let err = authorize_reference(state, &user, EntityRef::Device(5))
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_foreign_reference_denies_entity_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![test_link(1, 3, 5)]])
        .append_query_results([vec![test_permission(
            5,
            Resource::Device,
            with_action_bit(0, Action::Find, true),
        )]])
        .append_query_results([vec![test_device(5, 7)]])
        .append_query_results([vec![test_project(7, 99)]])
        .append_query_results([vec![test_user(99, false)]])
        .into_connection();

    let state = test_state(db);
    let user = test_user(3, false);

    let err = authorize_reference(state, &user, EntityRef::Device(5))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}
