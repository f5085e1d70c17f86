/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use std::sync::Arc;

use super::authorization::{authorize, require_owner};
use super::database::get_project;
use super::error::{CoreError, CoreResult};
use super::lifecycle::delete_project_tree;
use super::ownership::EntityRef;
use super::pagination::{window, Page, PageRequest};
use super::permission::{Action, Resource};
use super::types::*;
use super::validate::{validate_project, DenyPatterns};

/// Detects a (name, owner) collision among persisted projects, optionally
/// excluding the row being updated. A hit names every key field.
pub async fn check_duplicate_project(
    state: Arc<ServerState>,
    name: &str,
    owner: i64,
    exclude: Option<i64>,
) -> CoreResult<()> {
    let mut condition = Condition::all()
        .add(CProject::Name.eq(name))
        .add(CProject::Owner.eq(owner));

    if let Some(id) = exclude {
        condition = condition.add(CProject::Id.ne(id));
    }

    let existing = EProject::find().filter(condition).one(&state.db).await?;

    if existing.is_some() {
        return Err(CoreError::Duplicate(vec![
            "name".to_string(),
            "owner".to_string(),
        ]));
    }

    Ok(())
}

pub async fn save_project(
    state: Arc<ServerState>,
    user: &MUser,
    data: ProjectData,
) -> CoreResult<MProject> {
    authorize(
        Arc::clone(&state),
        user,
        Resource::Project,
        Action::Save,
        None,
    )
    .await?;

    let patterns = DenyPatterns::from_cli(&state.cli);
    let violations = validate_project(&data, &patterns);
    if !violations.is_empty() {
        return Err(CoreError::Validation(violations));
    }

    let name = data.name.unwrap_or_default();
    check_duplicate_project(Arc::clone(&state), &name, user.id, None).await?;

    let now = Utc::now().naive_utc();
    let aproject = AProject {
        entity_version: Set(1),
        name: Set(name),
        description: Set(data.description.unwrap_or_default()),
        owner: Set(user.id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let project = aproject.insert(&state.db).await?;

    tracing::info!("Created project {} for user {}", project.id, user.id);

    Ok(project)
}

pub async fn update_project(
    state: Arc<ServerState>,
    user: &MUser,
    project_id: i64,
    data: ProjectData,
) -> CoreResult<MProject> {
    authorize(
        Arc::clone(&state),
        user,
        Resource::Project,
        Action::Update,
        None,
    )
    .await?;

    let patterns = DenyPatterns::from_cli(&state.cli);
    let violations = validate_project(&data, &patterns);
    if !violations.is_empty() {
        return Err(CoreError::Validation(violations));
    }

    require_owner(Arc::clone(&state), user, EntityRef::Project(project_id)).await?;

    let project = get_project(Arc::clone(&state), project_id).await?;

    let name = data.name.unwrap_or_default();
    check_duplicate_project(Arc::clone(&state), &name, project.owner, Some(project_id)).await?;

    let mut aproject = project.clone().into_active_model();
    aproject.name = Set(name);
    aproject.description = Set(data.description.unwrap_or_default());
    aproject.entity_version = Set(project.entity_version + 1);
    aproject.updated_at = Set(Utc::now().naive_utc());

    Ok(aproject.update(&state.db).await?)
}

pub async fn find_project(
    state: Arc<ServerState>,
    user: &MUser,
    project_id: i64,
) -> CoreResult<MProject> {
    authorize(
        Arc::clone(&state),
        user,
        Resource::Project,
        Action::Find,
        Some(EntityRef::Project(project_id)),
    )
    .await?;

    get_project(state, project_id).await
}

/// Ordered, paginated listing; visibility is restricted to the acting
/// user's own projects unless the user is an admin.
pub async fn find_all_projects(
    state: Arc<ServerState>,
    user: &MUser,
    request: PageRequest,
) -> CoreResult<Page<MProject>> {
    authorize(
        Arc::clone(&state),
        user,
        Resource::Project,
        Action::FindAll,
        None,
    )
    .await?;

    let mut query = EProject::find();
    if !user.admin {
        query = query.filter(CProject::Owner.eq(user.id));
    }

    let total = query.clone().count(&state.db).await?;
    let window = window(request, total);

    let results = query
        .order_by_asc(CProject::Id)
        .offset(window.offset)
        .limit(window.delta)
        .all(&state.db)
        .await?;

    Ok(window.finish(results))
}

pub async fn delete_project(
    state: Arc<ServerState>,
    user: &MUser,
    project_id: i64,
) -> CoreResult<()> {
    authorize(
        Arc::clone(&state),
        user,
        Resource::Project,
        Action::Remove,
        Some(EntityRef::Project(project_id)),
    )
    .await?;

    delete_project_tree(state, project_id).await
}
