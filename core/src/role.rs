/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use std::sync::Arc;

use super::authorization::authorize;
use super::consts::{BASE_ROLE_ADMIN_ID, BASE_ROLE_REGISTERED_ID};
use super::database::get_role;
use super::error::{CoreError, CoreResult};
use super::pagination::{window, Page, PageRequest};
use super::permission::{Action, Resource};
use super::types::*;
use super::validate::{validate_role, DenyPatterns};

pub async fn check_duplicate_role(
    state: Arc<ServerState>,
    name: &str,
    exclude: Option<i64>,
) -> CoreResult<()> {
    let mut condition = Condition::all().add(CRole::Name.eq(name));

    if let Some(id) = exclude {
        condition = condition.add(CRole::Id.ne(id));
    }

    let existing = ERole::find().filter(condition).one(&state.db).await?;

    if existing.is_some() {
        return Err(CoreError::Duplicate(vec!["name".to_string()]));
    }

    Ok(())
}

pub async fn save_role(state: Arc<ServerState>, user: &MUser, data: RoleData) -> CoreResult<MRole> {
    authorize(Arc::clone(&state), user, Resource::Role, Action::Save, None).await?;

    let patterns = DenyPatterns::from_cli(&state.cli);
    let violations = validate_role(&data, &patterns);
    if !violations.is_empty() {
        return Err(CoreError::Validation(violations));
    }

    let name = data.name.unwrap_or_default();
    check_duplicate_role(Arc::clone(&state), &name, None).await?;

    let now = Utc::now().naive_utc();
    let arole = ARole {
        entity_version: Set(1),
        name: Set(name),
        description: Set(data.description.unwrap_or_default()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let role = arole.insert(&state.db).await?;

    tracing::info!("Created role {} ({})", role.name, role.id);

    Ok(role)
}

pub async fn update_role(
    state: Arc<ServerState>,
    user: &MUser,
    role_id: i64,
    data: RoleData,
) -> CoreResult<MRole> {
    authorize(
        Arc::clone(&state),
        user,
        Resource::Role,
        Action::Update,
        None,
    )
    .await?;

    let patterns = DenyPatterns::from_cli(&state.cli);
    let violations = validate_role(&data, &patterns);
    if !violations.is_empty() {
        return Err(CoreError::Validation(violations));
    }

    let role = get_role(Arc::clone(&state), role_id).await?;

    let name = data.name.unwrap_or_default();
    check_duplicate_role(Arc::clone(&state), &name, Some(role_id)).await?;

    let mut arole = role.clone().into_active_model();
    arole.name = Set(name);
    arole.description = Set(data.description.unwrap_or_default());
    arole.entity_version = Set(role.entity_version + 1);
    arole.updated_at = Set(Utc::now().naive_utc());

    Ok(arole.update(&state.db).await?)
}

pub async fn find_role(state: Arc<ServerState>, user: &MUser, role_id: i64) -> CoreResult<MRole> {
    authorize(Arc::clone(&state), user, Resource::Role, Action::Find, None).await?;

    get_role(state, role_id).await
}

pub async fn find_all_roles(
    state: Arc<ServerState>,
    user: &MUser,
    request: PageRequest,
) -> CoreResult<Page<MRole>> {
    authorize(
        Arc::clone(&state),
        user,
        Resource::Role,
        Action::FindAll,
        None,
    )
    .await?;

    let query = ERole::find();

    let total = query.clone().count(&state.db).await?;
    let window = window(request, total);

    let results = query
        .order_by_asc(CRole::Id)
        .offset(window.offset)
        .limit(window.delta)
        .all(&state.db)
        .await?;

    Ok(window.finish(results))
}

/// Removes the role together with its permission records and user
/// assignments, atomically. The built-in roles cannot be removed.
pub async fn delete_role(state: Arc<ServerState>, user: &MUser, role_id: i64) -> CoreResult<()> {
    authorize(
        Arc::clone(&state),
        user,
        Resource::Role,
        Action::Remove,
        None,
    )
    .await?;

    if role_id == BASE_ROLE_REGISTERED_ID || role_id == BASE_ROLE_ADMIN_ID {
        return Err(CoreError::Unauthorized);
    }

    let role = get_role(Arc::clone(&state), role_id).await?;

    let txn = state.db.begin().await?;

    EPermission::delete_many()
        .filter(CPermission::Role.eq(role.id))
        .exec(&txn)
        .await?;

    EUserRole::delete_many()
        .filter(CUserRole::Role.eq(role.id))
        .exec(&txn)
        .await?;

    ERole::delete_many()
        .filter(CRole::Id.eq(role.id))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    tracing::info!("Deleted role {} ({})", role.name, role.id);

    Ok(())
}
