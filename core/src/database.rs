/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::{Context, Result};
use chrono::Utc;
use migration::Migrator;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectOptions, Database, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter,
};
use sea_orm_migration::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use tracing::log::LevelFilter;

use super::consts::{
    BASE_ROLE_ADMIN_ID, BASE_ROLE_ADMIN_NAME, BASE_ROLE_REGISTERED_ID, BASE_ROLE_REGISTERED_NAME,
};
use super::error::{CoreError, CoreResult};
use super::permission::{full_mask, Resource};
use super::types::*;

pub async fn connect_db(cli: &Cli) -> Result<DatabaseConnection> {
    let db_url = if let Some(file) = &cli.database_url_file {
        std::fs::read_to_string(file).context("Failed to read database url from file")?
    } else if let Some(url) = &cli.database_url {
        url.clone()
    } else {
        anyhow::bail!("No database url provided")
    };

    let mut opt = ConnectOptions::new(db_url);

    if cli.log_level == "debug" {
        opt.sqlx_logging(true)
            .sqlx_logging_level(LevelFilter::Debug);
    } else {
        opt.sqlx_logging(false);
    }

    opt.max_connections(100)
        .min_connections(5)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(8))
        .max_lifetime(Duration::from_secs(8));

    let db = Database::connect(opt)
        .await
        .context("Failed to connect to database")?;
    Migrator::up(&db, None)
        .await
        .context("Failed to run database migrations")?;
    update_db(&db).await.context("Failed to update database")?;
    Ok(db)
}

/// Guarantees the built-in roles and their default grants exist. The
/// default role receives full grants on the owned resources; the admin
/// role gets every bit on every resource.
async fn update_db(db: &DatabaseConnection) -> Result<(), DbErr> {
    let now = Utc::now().naive_utc();

    let base_role_registered = ERole::find_by_id(BASE_ROLE_REGISTERED_ID).one(db).await?;

    if base_role_registered.is_none() {
        let arole = ARole {
            id: Set(BASE_ROLE_REGISTERED_ID),
            entity_version: Set(1),
            name: Set(BASE_ROLE_REGISTERED_NAME.to_string()),
            description: Set("Default role assigned to every registered user".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        arole.insert(db).await?;
        tracing::info!("Created base role {}", BASE_ROLE_REGISTERED_NAME);
    }

    let base_role_admin = ERole::find_by_id(BASE_ROLE_ADMIN_ID).one(db).await?;

    if base_role_admin.is_none() {
        let arole = ARole {
            id: Set(BASE_ROLE_ADMIN_ID),
            entity_version: Set(1),
            name: Set(BASE_ROLE_ADMIN_NAME.to_string()),
            description: Set("Full access to every resource".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        arole.insert(db).await?;
        tracing::info!("Created base role {}", BASE_ROLE_ADMIN_NAME);
    }

    let registered_grants = [
        Resource::Project,
        Resource::Device,
        Resource::Packet,
        Resource::PacketField,
    ];

    for resource in registered_grants {
        ensure_permission(db, BASE_ROLE_REGISTERED_ID, resource).await?;
    }

    let admin_grants = [
        Resource::Project,
        Resource::Device,
        Resource::Packet,
        Resource::PacketField,
        Resource::User,
        Resource::Role,
        Resource::Permission,
    ];

    for resource in admin_grants {
        ensure_permission(db, BASE_ROLE_ADMIN_ID, resource).await?;
    }

    Ok(())
}

async fn ensure_permission(
    db: &DatabaseConnection,
    role_id: i64,
    resource: Resource,
) -> Result<(), DbErr> {
    let existing = EPermission::find()
        .filter(
            Condition::all()
                .add(CPermission::Role.eq(role_id))
                .add(CPermission::Resource.eq(resource.name())),
        )
        .one(db)
        .await?;

    if existing.is_some() {
        return Ok(());
    }

    let now = Utc::now().naive_utc();
    let apermission = APermission {
        entity_version: Set(1),
        role: Set(role_id),
        resource: Set(resource.name().to_string()),
        action_ids: Set(full_mask(resource)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    apermission.insert(db).await?;
    Ok(())
}

/// Lookups shared by the resolver and the per-resource operations. A
/// transient id (0) never hits the database and reads as not found.
pub async fn get_user(state: Arc<ServerState>, id: i64) -> CoreResult<MUser> {
    if id <= 0 {
        return Err(CoreError::not_found(Resource::User.name()));
    }

    EUser::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| CoreError::not_found(Resource::User.name()))
}

pub async fn get_role(state: Arc<ServerState>, id: i64) -> CoreResult<MRole> {
    if id <= 0 {
        return Err(CoreError::not_found(Resource::Role.name()));
    }

    ERole::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| CoreError::not_found(Resource::Role.name()))
}

pub async fn get_project(state: Arc<ServerState>, id: i64) -> CoreResult<MProject> {
    if id <= 0 {
        return Err(CoreError::not_found(Resource::Project.name()));
    }

    EProject::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| CoreError::not_found(Resource::Project.name()))
}

pub async fn get_device(state: Arc<ServerState>, id: i64) -> CoreResult<MDevice> {
    if id <= 0 {
        return Err(CoreError::not_found(Resource::Device.name()));
    }

    EDevice::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| CoreError::not_found(Resource::Device.name()))
}

pub async fn get_packet(state: Arc<ServerState>, id: i64) -> CoreResult<MPacket> {
    if id <= 0 {
        return Err(CoreError::not_found(Resource::Packet.name()));
    }

    EPacket::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| CoreError::not_found(Resource::Packet.name()))
}

pub async fn get_packet_field(state: Arc<ServerState>, id: i64) -> CoreResult<MPacketField> {
    if id <= 0 {
        return Err(CoreError::not_found(Resource::PacketField.name()));
    }

    EPacketField::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| CoreError::not_found(Resource::PacketField.name()))
}
