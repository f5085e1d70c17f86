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

use super::authorization::{authorize, authorize_reference, require_owner};
use super::database::get_device;
use super::error::{CoreError, CoreResult};
use super::lifecycle::delete_device_tree;
use super::ownership::EntityRef;
use super::pagination::{window, Page, PageRequest};
use super::permission::{Action, Resource};
use super::types::*;
use super::validate::{validate_device, DenyPatterns};

/// Device names are unique across the whole installation; a collision
/// names the single key field.
pub async fn check_duplicate_device(
    state: Arc<ServerState>,
    device_name: &str,
    exclude: Option<i64>,
) -> CoreResult<()> {
    let mut condition = Condition::all().add(CDevice::DeviceName.eq(device_name));

    if let Some(id) = exclude {
        condition = condition.add(CDevice::Id.ne(id));
    }

    let existing = EDevice::find().filter(condition).one(&state.db).await?;

    if existing.is_some() {
        return Err(CoreError::Duplicate(vec!["device_name".to_string()]));
    }

    Ok(())
}

fn project_ref(data: &DeviceData) -> CoreResult<i64> {
    match data.project {
        Some(id) if id > 0 => Ok(id),
        _ => Err(CoreError::not_found(Resource::Project.name())),
    }
}

pub async fn save_device(
    state: Arc<ServerState>,
    user: &MUser,
    data: DeviceData,
) -> CoreResult<MDevice> {
    authorize(
        Arc::clone(&state),
        user,
        Resource::Device,
        Action::Save,
        None,
    )
    .await?;

    let project_id = project_ref(&data)?;

    let patterns = DenyPatterns::from_cli(&state.cli);
    let violations = validate_device(&data, &patterns);
    if !violations.is_empty() {
        return Err(CoreError::Validation(violations));
    }

    authorize_reference(Arc::clone(&state), user, EntityRef::Project(project_id)).await?;

    let device_name = data.device_name.unwrap_or_default();
    check_duplicate_device(Arc::clone(&state), &device_name, None).await?;

    let now = Utc::now().naive_utc();
    let adevice = ADevice {
        entity_version: Set(1),
        project: Set(project_id),
        device_name: Set(device_name),
        brand: Set(data.brand),
        model: Set(data.model),
        firmware_version: Set(data.firmware_version),
        software_version: Set(data.software_version),
        description: Set(data.description),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let device = adevice.insert(&state.db).await?;

    tracing::info!("Created device {} in project {}", device.id, project_id);

    Ok(device)
}

pub async fn update_device(
    state: Arc<ServerState>,
    user: &MUser,
    device_id: i64,
    data: DeviceData,
) -> CoreResult<MDevice> {
    authorize(
        Arc::clone(&state),
        user,
        Resource::Device,
        Action::Update,
        None,
    )
    .await?;

    let project_id = project_ref(&data)?;

    let patterns = DenyPatterns::from_cli(&state.cli);
    let violations = validate_device(&data, &patterns);
    if !violations.is_empty() {
        return Err(CoreError::Validation(violations));
    }

    require_owner(Arc::clone(&state), user, EntityRef::Device(device_id)).await?;
    authorize_reference(Arc::clone(&state), user, EntityRef::Project(project_id)).await?;

    let device = get_device(Arc::clone(&state), device_id).await?;

    let device_name = data.device_name.unwrap_or_default();
    check_duplicate_device(Arc::clone(&state), &device_name, Some(device_id)).await?;

    let mut adevice = device.clone().into_active_model();
    adevice.project = Set(project_id);
    adevice.device_name = Set(device_name);
    adevice.brand = Set(data.brand);
    adevice.model = Set(data.model);
    adevice.firmware_version = Set(data.firmware_version);
    adevice.software_version = Set(data.software_version);
    adevice.description = Set(data.description);
    adevice.entity_version = Set(device.entity_version + 1);
    adevice.updated_at = Set(Utc::now().naive_utc());

    Ok(adevice.update(&state.db).await?)
}

pub async fn find_device(
    state: Arc<ServerState>,
    user: &MUser,
    device_id: i64,
) -> CoreResult<MDevice> {
    authorize(
        Arc::clone(&state),
        user,
        Resource::Device,
        Action::Find,
        Some(EntityRef::Device(device_id)),
    )
    .await?;

    get_device(state, device_id).await
}

/// Ordered, paginated listing of a project's devices. The parent project
/// must resolve to the acting user.
pub async fn find_devices_by_project(
    state: Arc<ServerState>,
    user: &MUser,
    project_id: i64,
    request: PageRequest,
) -> CoreResult<Page<MDevice>> {
    authorize(
        Arc::clone(&state),
        user,
        Resource::Device,
        Action::FindAll,
        Some(EntityRef::Project(project_id)),
    )
    .await?;

    let query = EDevice::find().filter(CDevice::Project.eq(project_id));

    let total = query.clone().count(&state.db).await?;
    let window = window(request, total);

    let results = query
        .order_by_asc(CDevice::Id)
        .offset(window.offset)
        .limit(window.delta)
        .all(&state.db)
        .await?;

    Ok(window.finish(results))
}

pub async fn delete_device(
    state: Arc<ServerState>,
    user: &MUser,
    device_id: i64,
) -> CoreResult<()> {
    authorize(
        Arc::clone(&state),
        user,
        Resource::Device,
        Action::Remove,
        Some(EntityRef::Device(device_id)),
    )
    .await?;

    delete_device_tree(state, device_id).await
}
