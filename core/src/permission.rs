/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, IntoActiveModel, QueryFilter,
};
use std::sync::Arc;

use super::authorization::authorize;
use super::database::get_role;
use super::error::{CoreError, CoreResult};
use super::types::*;

/// Verbs an operation can require. Each occupies one bit in the
/// per-resource bitmask stored on a permission record.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Find = 0,
    FindAll = 1,
    Save = 2,
    Update = 3,
    Remove = 4,
    /// Listing the packets of a device; specific to the device resource.
    ListPackets = 5,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Resource {
    Project,
    Device,
    Packet,
    PacketField,
    User,
    Role,
    Permission,
}

const CRUD_ACTIONS: [Action; 5] = [
    Action::Find,
    Action::FindAll,
    Action::Save,
    Action::Update,
    Action::Remove,
];

const DEVICE_ACTIONS: [Action; 6] = [
    Action::Find,
    Action::FindAll,
    Action::Save,
    Action::Update,
    Action::Remove,
    Action::ListPackets,
];

impl Resource {
    pub fn name(&self) -> &'static str {
        match self {
            Resource::Project => "project",
            Resource::Device => "device",
            Resource::Packet => "packet",
            Resource::PacketField => "packet_field",
            Resource::User => "user",
            Resource::Role => "role",
            Resource::Permission => "permission",
        }
    }

    /// The registry of verbs this resource supports.
    pub fn actions(&self) -> &'static [Action] {
        match self {
            Resource::Device => &DEVICE_ACTIONS,
            _ => &CRUD_ACTIONS,
        }
    }

    /// Owned resources sit on an ownership chain ending at a project owner;
    /// their visibility is restricted to that owner.
    pub fn owned(&self) -> bool {
        matches!(
            self,
            Resource::Project | Resource::Device | Resource::Packet | Resource::PacketField
        )
    }
}

pub fn action_bit(action_ids: i64, action: Action) -> bool {
    action_ids & (1 << action as i64) != 0
}

pub fn with_action_bit(action_ids: i64, action: Action, value: bool) -> i64 {
    if value {
        action_ids | (1 << action as i64)
    } else {
        action_ids & !(1 << action as i64)
    }
}

/// Bitmask with every registered action of the resource set.
pub fn full_mask(resource: Resource) -> i64 {
    resource
        .actions()
        .iter()
        .fold(0, |mask, action| with_action_bit(mask, *action, true))
}

/// ORs the action into the single live (role, resource) record, inserting
/// it if the pair has no record yet. Never creates a second record for the
/// same pair.
pub async fn grant_permission(
    state: Arc<ServerState>,
    role: &MRole,
    resource: Resource,
    action: Action,
) -> CoreResult<MPermission> {
    let existing = EPermission::find()
        .filter(
            Condition::all()
                .add(CPermission::Role.eq(role.id))
                .add(CPermission::Resource.eq(resource.name())),
        )
        .one(&state.db)
        .await?;

    let now = Utc::now().naive_utc();

    let permission = match existing {
        Some(permission) => {
            if action_bit(permission.action_ids, action) {
                return Ok(permission);
            }

            let mut apermission = permission.clone().into_active_model();
            apermission.action_ids = Set(with_action_bit(permission.action_ids, action, true));
            apermission.entity_version = Set(permission.entity_version + 1);
            apermission.updated_at = Set(now);
            apermission.update(&state.db).await?
        }
        None => {
            let apermission = APermission {
                entity_version: Set(1),
                role: Set(role.id),
                resource: Set(resource.name().to_string()),
                action_ids: Set(with_action_bit(0, action, true)),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };

            apermission.insert(&state.db).await?
        }
    };

    tracing::debug!(
        "Granted {:?} on {} to role {}",
        action,
        resource.name(),
        role.name
    );

    Ok(permission)
}

/// Clears the action bit on the (role, resource) record if one exists.
pub async fn revoke_permission(
    state: Arc<ServerState>,
    role: &MRole,
    resource: Resource,
    action: Action,
) -> CoreResult<()> {
    let existing = EPermission::find()
        .filter(
            Condition::all()
                .add(CPermission::Role.eq(role.id))
                .add(CPermission::Resource.eq(resource.name())),
        )
        .one(&state.db)
        .await?;

    let Some(permission) = existing else {
        return Ok(());
    };

    if !action_bit(permission.action_ids, action) {
        return Ok(());
    }

    let mut apermission = permission.clone().into_active_model();
    apermission.action_ids = Set(with_action_bit(permission.action_ids, action, false));
    apermission.entity_version = Set(permission.entity_version + 1);
    apermission.updated_at = Set(Utc::now().naive_utc());
    apermission.update(&state.db).await?;

    tracing::debug!(
        "Revoked {:?} on {} from role {}",
        action,
        resource.name(),
        role.name
    );

    Ok(())
}

/// The user's effective bitmask for the resource: the OR across the masks
/// contributed by every role the user holds.
pub async fn effective_permissions(
    state: Arc<ServerState>,
    user: &MUser,
    resource: Resource,
) -> CoreResult<i64> {
    let role_ids = EUserRole::find()
        .filter(CUserRole::User.eq(user.id))
        .all(&state.db)
        .await?
        .iter()
        .map(|user_role| user_role.role)
        .collect::<Vec<i64>>();

    if role_ids.is_empty() {
        return Ok(0);
    }

    let mask = EPermission::find()
        .filter(
            Condition::all()
                .add(CPermission::Role.is_in(role_ids))
                .add(CPermission::Resource.eq(resource.name())),
        )
        .all(&state.db)
        .await?
        .iter()
        .fold(0, |mask, permission| mask | permission.action_ids);

    Ok(mask)
}

pub async fn has_permission(
    state: Arc<ServerState>,
    user: &MUser,
    resource: Resource,
    action: Action,
) -> CoreResult<bool> {
    if user.admin {
        return Ok(true);
    }

    let mask = effective_permissions(state, user, resource).await?;
    Ok(action_bit(mask, action))
}

/// Permission management on behalf of an acting user.
pub async fn grant_permission_to_role(
    state: Arc<ServerState>,
    user: &MUser,
    role_id: i64,
    resource: Resource,
    action: Action,
) -> CoreResult<MPermission> {
    authorize(
        Arc::clone(&state),
        user,
        Resource::Permission,
        Action::Update,
        None,
    )
    .await?;

    if !resource.actions().contains(&action) {
        return Err(CoreError::not_found("action"));
    }

    let role = get_role(Arc::clone(&state), role_id).await?;
    grant_permission(state, &role, resource, action).await
}

pub async fn revoke_permission_from_role(
    state: Arc<ServerState>,
    user: &MUser,
    role_id: i64,
    resource: Resource,
    action: Action,
) -> CoreResult<()> {
    authorize(
        Arc::clone(&state),
        user,
        Resource::Permission,
        Action::Update,
        None,
    )
    .await?;

    let role = get_role(Arc::clone(&state), role_id).await?;
    revoke_permission(state, &role, resource, action).await
}
