/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use std::sync::Arc;

use super::database::{get_device, get_packet, get_packet_field, get_project, get_user};
use super::error::CoreResult;
use super::permission::Resource;
use super::types::*;

/// Reference to a persisted owned entity by id.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EntityRef {
    Project(i64),
    Device(i64),
    Packet(i64),
    PacketField(i64),
}

impl EntityRef {
    pub fn id(&self) -> i64 {
        match self {
            EntityRef::Project(id)
            | EntityRef::Device(id)
            | EntityRef::Packet(id)
            | EntityRef::PacketField(id) => *id,
        }
    }

    pub fn resource(&self) -> Resource {
        match self {
            EntityRef::Project(_) => Resource::Project,
            EntityRef::Device(_) => Resource::Device,
            EntityRef::Packet(_) => Resource::Packet,
            EntityRef::PacketField(_) => Resource::PacketField,
        }
    }
}

/// Walks the stored parent references up to the project owner. Every hop
/// goes through a fresh lookup on the current snapshot; a transient id or a
/// missing row anywhere in the chain fails the whole resolution with
/// EntityNotFound.
pub async fn resolve_owner(state: Arc<ServerState>, entity: EntityRef) -> CoreResult<MUser> {
    let project = resolve_project(Arc::clone(&state), entity).await?;
    get_user(state, project.owner).await
}

/// Resolves the project at the top of the entity's parent chain.
pub async fn resolve_project(state: Arc<ServerState>, entity: EntityRef) -> CoreResult<MProject> {
    match entity {
        EntityRef::Project(id) => get_project(state, id).await,
        EntityRef::Device(id) => {
            let device = get_device(Arc::clone(&state), id).await?;
            get_project(state, device.project).await
        }
        EntityRef::Packet(id) => {
            let packet = get_packet(Arc::clone(&state), id).await?;
            let device = get_device(Arc::clone(&state), packet.device).await?;
            get_project(state, device.project).await
        }
        EntityRef::PacketField(id) => {
            let field = get_packet_field(Arc::clone(&state), id).await?;
            let packet = get_packet(Arc::clone(&state), field.packet).await?;
            let device = get_device(Arc::clone(&state), packet.device).await?;
            get_project(state, device.project).await
        }
    }
}
