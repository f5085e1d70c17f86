/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Tests for project entity

use chrono::NaiveDate;
use entity::*;
use sea_orm::{entity::prelude::*, DatabaseBackend, MockDatabase};

#[tokio::test]
async fn test_project_entity_basic() -> Result<(), DbErr> {
    let naive_date = NaiveDate::from_ymd_opt(2026, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![project::Model {
            id: 7,
            entity_version: 1,
            name: "field-trial".to_owned(),
            description: "Soil sensors, north field".to_owned(),
            owner: 3,
            created_at: naive_date,
            updated_at: naive_date,
        }]])
        .into_connection();

    let result = project::Entity::find_by_id(7).one(&db).await?;

    assert!(result.is_some());
    let project = result.unwrap();
    assert_eq!(project.name, "field-trial");
    assert_eq!(project.owner, 3);
    assert_eq!(project.entity_version, 1);

    Ok(())
}
