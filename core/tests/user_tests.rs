/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Tests for user registration, role assignment and role lifecycle

extern crate meridian_core;

use chrono::NaiveDate;
use entity::*;
use meridian_core::consts::{BASE_ROLE_ADMIN_ID, BASE_ROLE_REGISTERED_ID};
use meridian_core::error::CoreError;
use meridian_core::role::{delete_role, save_role};
use meridian_core::types::{Cli, RoleData, ServerState, UserData};
use meridian_core::user::*;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
use std::sync::Arc;

fn naive_date() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn test_state_with(db: DatabaseConnection, disable_registration: bool) -> Arc<ServerState> {
    Arc::new(ServerState {
        db,
        cli: Cli {
            log_level: "info".to_string(),
            database_url: None,
            database_url_file: None,
            deny_patterns: None,
            disable_registration,
        },
    })
}

fn test_state(db: DatabaseConnection) -> Arc<ServerState> {
    test_state_with(db, false)
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

fn test_role(id: i64) -> role::Model {
    role::Model {
        id,
        entity_version: 1,
        name: format!("role-{id}"),
        description: String::new(),
        created_at: naive_date(),
        updated_at: naive_date(),
    }
}

#[tokio::test]
async fn test_register_user_assigns_default_role() {
    let registered = user::Model {
        id: 10,
        entity_version: 1,
        username: "mres".to_string(),
        admin: false,
        created_at: naive_date(),
        updated_at: naive_date(),
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<user::Model>::new()])
        .append_query_results([vec![registered]])
        .append_query_results([vec![user_role::Model {
            id: 1,
            user: 10,
            role: BASE_ROLE_REGISTERED_ID,
        }]])
        .into_connection();
    let state = test_state(db);

    let data = UserData {
        username: Some("mres".to_string()),
        admin: false,
    };

    let user = register_user(state, data).await.unwrap();

    assert_eq!(user.id, 10);
    assert_eq!(user.username, "mres");
}

#[tokio::test]
async fn test_register_user_disabled() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let state = test_state_with(db, true);

    let data = UserData {
        username: Some("mres".to_string()),
        admin: false,
    };

    let err = register_user(state, data).await.unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_register_user_duplicate_username() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![test_user(3, false)]])
        .into_connection();
    let state = test_state(db);

    let data = UserData {
        username: Some("user-3".to_string()),
        admin: false,
    };

    let err = register_user(state, data).await.unwrap_err();

    match err {
        CoreError::Duplicate(fields) => assert_eq!(fields, vec!["username".to_string()]),
        other => panic!("expected duplicate, got {other}"),
    }
}

#[tokio::test]
async fn test_add_role_to_user_is_idempotent() {
    let existing = user_role::Model {
        id: 8,
        user: 3,
        role: 5,
    };

    // user, role, then the already-present link; an insert would run the
    // mock dry
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![test_user(3, false)]])
        .append_query_results([vec![test_role(5)]])
        .append_query_results([vec![existing.clone()]])
        .into_connection();
    let state = test_state(db);

    let link = add_role_to_user(state, &test_user(1, true), 3, 5)
        .await
        .unwrap();

    assert_eq!(link, existing);
}

#[tokio::test]
async fn test_save_role_duplicate_name() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![test_role(5)]])
        .into_connection();
    let state = test_state(db);

    let data = RoleData {
        name: Some("role-5".to_string()),
        description: None,
    };

    let err = save_role(state, &test_user(1, true), data)
        .await
        .unwrap_err();

    match err {
        CoreError::Duplicate(fields) => assert_eq!(fields, vec!["name".to_string()]),
        other => panic!("expected duplicate, got {other}"),
    }
}

#[tokio::test]
async fn test_builtin_roles_cannot_be_deleted() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let state = test_state(db);

    let err = delete_role(Arc::clone(&state), &test_user(1, true), BASE_ROLE_REGISTERED_ID)
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());

    let err = delete_role(state, &test_user(1, true), BASE_ROLE_ADMIN_ID)
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
}
