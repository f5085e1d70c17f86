/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::Utc;
use entity::packet::{PacketFormat, PacketSerialization, PacketType, TrafficPlan};
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use std::sync::Arc;

use super::authorization::{authorize, authorize_reference, require_owner};
use super::database::get_packet;
use super::error::{CoreError, CoreResult};
use super::lifecycle::delete_packet_tree;
use super::ownership::EntityRef;
use super::pagination::{window, Page, PageRequest};
use super::permission::{Action, Resource};
use super::types::*;
use super::validate::{validate_packet, DenyPatterns};

/// The packet natural key is (name, device, version). A collision reports
/// all three field names, never a subset, regardless of which field
/// coincided with which other record.
pub async fn check_duplicate_packet(
    state: Arc<ServerState>,
    name: &str,
    device_id: i64,
    version: &str,
    exclude: Option<i64>,
) -> CoreResult<()> {
    let mut condition = Condition::all()
        .add(CPacket::Name.eq(name))
        .add(CPacket::Device.eq(device_id))
        .add(CPacket::Version.eq(version));

    if let Some(id) = exclude {
        condition = condition.add(CPacket::Id.ne(id));
    }

    let existing = EPacket::find().filter(condition).one(&state.db).await?;

    if existing.is_some() {
        return Err(CoreError::Duplicate(vec![
            "name".to_string(),
            "device".to_string(),
            "version".to_string(),
        ]));
    }

    Ok(())
}

fn device_ref(data: &PacketData) -> CoreResult<i64> {
    match data.device {
        Some(id) if id > 0 => Ok(id),
        _ => Err(CoreError::not_found(Resource::Device.name())),
    }
}

pub async fn save_packet(
    state: Arc<ServerState>,
    user: &MUser,
    data: PacketData,
) -> CoreResult<MPacket> {
    authorize(
        Arc::clone(&state),
        user,
        Resource::Packet,
        Action::Save,
        None,
    )
    .await?;

    let device_id = device_ref(&data)?;

    let patterns = DenyPatterns::from_cli(&state.cli);
    let violations = validate_packet(&data, &patterns);
    if !violations.is_empty() {
        return Err(CoreError::Validation(violations));
    }

    authorize_reference(Arc::clone(&state), user, EntityRef::Device(device_id)).await?;

    let name = data.name.unwrap_or_default();
    let version = data.version.unwrap_or_default();
    check_duplicate_packet(Arc::clone(&state), &name, device_id, &version, None).await?;

    let now = Utc::now().naive_utc();
    let apacket = APacket {
        entity_version: Set(1),
        device: Set(device_id),
        name: Set(name),
        packet_type: Set(data.packet_type.unwrap_or(PacketType::Input)),
        format: Set(data.format.unwrap_or(PacketFormat::Json)),
        serialization: Set(data.serialization.unwrap_or(PacketSerialization::None)),
        version: Set(version),
        traffic_plan: Set(data.traffic_plan.unwrap_or(TrafficPlan::Low)),
        timestamp_field: Set(data.timestamp_field.unwrap_or_default()),
        timestamp_format: Set(data.timestamp_format.unwrap_or_default()),
        unix_timestamp: Set(data.unix_timestamp.unwrap_or(true)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let packet = apacket.insert(&state.db).await?;

    tracing::info!("Created packet {} on device {}", packet.id, device_id);

    Ok(packet)
}

pub async fn update_packet(
    state: Arc<ServerState>,
    user: &MUser,
    packet_id: i64,
    data: PacketData,
) -> CoreResult<MPacket> {
    authorize(
        Arc::clone(&state),
        user,
        Resource::Packet,
        Action::Update,
        None,
    )
    .await?;

    let device_id = device_ref(&data)?;

    let patterns = DenyPatterns::from_cli(&state.cli);
    let violations = validate_packet(&data, &patterns);
    if !violations.is_empty() {
        return Err(CoreError::Validation(violations));
    }

    require_owner(Arc::clone(&state), user, EntityRef::Packet(packet_id)).await?;
    authorize_reference(Arc::clone(&state), user, EntityRef::Device(device_id)).await?;

    let packet = get_packet(Arc::clone(&state), packet_id).await?;

    let name = data.name.unwrap_or_default();
    let version = data.version.unwrap_or_default();
    check_duplicate_packet(
        Arc::clone(&state),
        &name,
        device_id,
        &version,
        Some(packet_id),
    )
    .await?;

    let mut apacket = packet.clone().into_active_model();
    apacket.device = Set(device_id);
    apacket.name = Set(name);
    apacket.packet_type = Set(data.packet_type.unwrap_or(packet.packet_type));
    apacket.format = Set(data.format.unwrap_or(packet.format));
    apacket.serialization = Set(data.serialization.unwrap_or(packet.serialization));
    apacket.version = Set(version);
    apacket.traffic_plan = Set(data.traffic_plan.unwrap_or(packet.traffic_plan));
    apacket.timestamp_field = Set(data.timestamp_field.unwrap_or_default());
    apacket.timestamp_format = Set(data.timestamp_format.unwrap_or_default());
    apacket.unix_timestamp = Set(data.unix_timestamp.unwrap_or(packet.unix_timestamp));
    apacket.entity_version = Set(packet.entity_version + 1);
    apacket.updated_at = Set(Utc::now().naive_utc());

    Ok(apacket.update(&state.db).await?)
}

pub async fn find_packet(
    state: Arc<ServerState>,
    user: &MUser,
    packet_id: i64,
) -> CoreResult<MPacket> {
    authorize(
        Arc::clone(&state),
        user,
        Resource::Packet,
        Action::Find,
        Some(EntityRef::Packet(packet_id)),
    )
    .await?;

    get_packet(state, packet_id).await
}

/// Listing a device's packets requires the device's packet-listing
/// capability, not a packet action bit.
pub async fn find_packets_by_device(
    state: Arc<ServerState>,
    user: &MUser,
    device_id: i64,
    request: PageRequest,
) -> CoreResult<Page<MPacket>> {
    authorize(
        Arc::clone(&state),
        user,
        Resource::Device,
        Action::ListPackets,
        Some(EntityRef::Device(device_id)),
    )
    .await?;

    let query = EPacket::find().filter(CPacket::Device.eq(device_id));

    let total = query.clone().count(&state.db).await?;
    let window = window(request, total);

    let results = query
        .order_by_asc(CPacket::Id)
        .offset(window.offset)
        .limit(window.delta)
        .all(&state.db)
        .await?;

    Ok(window.finish(results))
}

pub async fn delete_packet(
    state: Arc<ServerState>,
    user: &MUser,
    packet_id: i64,
) -> CoreResult<()> {
    authorize(
        Arc::clone(&state),
        user,
        Resource::Packet,
        Action::Remove,
        Some(EntityRef::Packet(packet_id)),
    )
    .await?;

    delete_packet_tree(state, packet_id).await
}
