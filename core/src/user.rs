/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, TransactionTrait,
};
use std::sync::Arc;

use super::authorization::authorize;
use super::consts::BASE_ROLE_REGISTERED_ID;
use super::database::{get_role, get_user};
use super::error::{CoreError, CoreResult};
use super::permission::{Action, Resource};
use super::types::*;
use super::validate::{validate_user, DenyPatterns};

pub async fn check_duplicate_user(
    state: Arc<ServerState>,
    username: &str,
    exclude: Option<i64>,
) -> CoreResult<()> {
    let mut condition = Condition::all().add(CUser::Username.eq(username));

    if let Some(id) = exclude {
        condition = condition.add(CUser::Id.ne(id));
    }

    let existing = EUser::find().filter(condition).one(&state.db).await?;

    if existing.is_some() {
        return Err(CoreError::Duplicate(vec!["username".to_string()]));
    }

    Ok(())
}

/// Self-service registration. The new user and the assignment of the
/// default role commit together; every registered user holds the default
/// role from the moment it exists.
pub async fn register_user(state: Arc<ServerState>, data: UserData) -> CoreResult<MUser> {
    if state.cli.disable_registration {
        return Err(CoreError::Unauthorized);
    }

    let patterns = DenyPatterns::from_cli(&state.cli);
    let violations = validate_user(&data, &patterns);
    if !violations.is_empty() {
        return Err(CoreError::Validation(violations));
    }

    let username = data.username.unwrap_or_default();
    check_duplicate_user(Arc::clone(&state), &username, None).await?;

    let now = Utc::now().naive_utc();
    let txn = state.db.begin().await?;

    let auser = AUser {
        entity_version: Set(1),
        username: Set(username),
        admin: Set(data.admin),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let user = auser.insert(&txn).await?;

    let auser_role = AUserRole {
        user: Set(user.id),
        role: Set(BASE_ROLE_REGISTERED_ID),
        ..Default::default()
    };

    auser_role.insert(&txn).await?;
    txn.commit().await?;

    tracing::info!("Registered user {} ({})", user.username, user.id);

    Ok(user)
}

/// Removes the user together with all of its role assignments, the default
/// role included.
pub async fn remove_user(state: Arc<ServerState>, user: &MUser, user_id: i64) -> CoreResult<()> {
    authorize(
        Arc::clone(&state),
        user,
        Resource::User,
        Action::Remove,
        None,
    )
    .await?;

    let target = get_user(Arc::clone(&state), user_id).await?;

    let txn = state.db.begin().await?;

    EUserRole::delete_many()
        .filter(CUserRole::User.eq(target.id))
        .exec(&txn)
        .await?;

    EUser::delete_many()
        .filter(CUser::Id.eq(target.id))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    tracing::info!("Removed user {}", target.id);

    Ok(())
}

pub async fn find_user(state: Arc<ServerState>, user: &MUser, user_id: i64) -> CoreResult<MUser> {
    authorize(
        Arc::clone(&state),
        user,
        Resource::User,
        Action::Find,
        None,
    )
    .await?;

    get_user(state, user_id).await
}

pub async fn add_role_to_user(
    state: Arc<ServerState>,
    user: &MUser,
    user_id: i64,
    role_id: i64,
) -> CoreResult<MUserRole> {
    authorize(
        Arc::clone(&state),
        user,
        Resource::Role,
        Action::Update,
        None,
    )
    .await?;

    let target = get_user(Arc::clone(&state), user_id).await?;
    let role = get_role(Arc::clone(&state), role_id).await?;

    let existing = EUserRole::find()
        .filter(
            Condition::all()
                .add(CUserRole::User.eq(target.id))
                .add(CUserRole::Role.eq(role.id)),
        )
        .one(&state.db)
        .await?;

    if let Some(user_role) = existing {
        return Ok(user_role);
    }

    let auser_role = AUserRole {
        user: Set(target.id),
        role: Set(role.id),
        ..Default::default()
    };

    let user_role = auser_role.insert(&state.db).await?;

    tracing::info!("Assigned role {} to user {}", role.name, target.id);

    Ok(user_role)
}

pub async fn remove_role_from_user(
    state: Arc<ServerState>,
    user: &MUser,
    user_id: i64,
    role_id: i64,
) -> CoreResult<()> {
    authorize(
        Arc::clone(&state),
        user,
        Resource::Role,
        Action::Update,
        None,
    )
    .await?;

    let target = get_user(Arc::clone(&state), user_id).await?;
    let role = get_role(Arc::clone(&state), role_id).await?;

    EUserRole::delete_many()
        .filter(
            Condition::all()
                .add(CUserRole::User.eq(target.id))
                .add(CUserRole::Role.eq(role.id)),
        )
        .exec(&state.db)
        .await?;

    tracing::info!("Removed role {} from user {}", role.name, target.id);

    Ok(())
}
