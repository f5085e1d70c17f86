/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Tests for user and role entities

use chrono::NaiveDate;
use entity::*;
use sea_orm::{entity::prelude::*, ColumnTrait, DatabaseBackend, MockDatabase, QueryFilter};

fn naive_date() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

#[tokio::test]
async fn test_user_entity_basic() -> Result<(), DbErr> {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user::Model {
            id: 3,
            entity_version: 1,
            username: "mres".to_owned(),
            admin: false,
            created_at: naive_date(),
            updated_at: naive_date(),
        }]])
        .into_connection();

    let result = user::Entity::find()
        .filter(user::Column::Username.eq("mres"))
        .one(&db)
        .await?;

    assert!(result.is_some());
    let user = result.unwrap();
    assert_eq!(user.id, 3);
    assert!(!user.admin);

    Ok(())
}

#[tokio::test]
async fn test_user_role_link() -> Result<(), DbErr> {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![
            user_role::Model {
                id: 1,
                user: 3,
                role: 1,
            },
            user_role::Model {
                id: 2,
                user: 3,
                role: 5,
            },
        ]])
        .into_connection();

    let links = user_role::Entity::find()
        .filter(user_role::Column::User.eq(3))
        .all(&db)
        .await?;

    assert_eq!(links.len(), 2);
    assert_eq!(links[0].role, 1);
    assert_eq!(links[1].role, 5);

    Ok(())
}
