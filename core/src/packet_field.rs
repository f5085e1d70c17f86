/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::Utc;
use entity::packet_field::{FieldMultiplicity, FieldType};
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use std::sync::Arc;

use super::authorization::{authorize, authorize_reference, require_owner};
use super::database::get_packet_field;
use super::error::{CoreError, CoreResult};
use super::lifecycle::delete_packet_field_row;
use super::ownership::EntityRef;
use super::pagination::{window, Page, PageRequest};
use super::permission::{Action, Resource};
use super::types::*;
use super::validate::{validate_packet_field, DenyPatterns};

/// Field names are unique inside their packet; a collision names both key
/// fields.
pub async fn check_duplicate_packet_field(
    state: Arc<ServerState>,
    name: &str,
    packet_id: i64,
    exclude: Option<i64>,
) -> CoreResult<()> {
    let mut condition = Condition::all()
        .add(CPacketField::Name.eq(name))
        .add(CPacketField::Packet.eq(packet_id));

    if let Some(id) = exclude {
        condition = condition.add(CPacketField::Id.ne(id));
    }

    let existing = EPacketField::find().filter(condition).one(&state.db).await?;

    if existing.is_some() {
        return Err(CoreError::Duplicate(vec![
            "name".to_string(),
            "packet".to_string(),
        ]));
    }

    Ok(())
}

fn packet_ref(data: &PacketFieldData) -> CoreResult<i64> {
    match data.packet {
        Some(id) if id > 0 => Ok(id),
        _ => Err(CoreError::not_found(Resource::Packet.name())),
    }
}

pub async fn save_packet_field(
    state: Arc<ServerState>,
    user: &MUser,
    data: PacketFieldData,
) -> CoreResult<MPacketField> {
    authorize(
        Arc::clone(&state),
        user,
        Resource::PacketField,
        Action::Save,
        None,
    )
    .await?;

    let packet_id = packet_ref(&data)?;

    let patterns = DenyPatterns::from_cli(&state.cli);
    let violations = validate_packet_field(&data, &patterns);
    if !violations.is_empty() {
        return Err(CoreError::Validation(violations));
    }

    authorize_reference(Arc::clone(&state), user, EntityRef::Packet(packet_id)).await?;

    let name = data.name.unwrap_or_default();
    check_duplicate_packet_field(Arc::clone(&state), &name, packet_id, None).await?;

    let now = Utc::now().naive_utc();
    let afield = APacketField {
        entity_version: Set(1),
        packet: Set(packet_id),
        name: Set(name),
        description: Set(data.description),
        field_type: Set(data.field_type.unwrap_or(FieldType::Object)),
        multiplicity: Set(data.multiplicity.unwrap_or(FieldMultiplicity::Single)),
        unit: Set(data.unit),
        value: Set(data.value),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let field = afield.insert(&state.db).await?;

    tracing::info!("Created field {} on packet {}", field.id, packet_id);

    Ok(field)
}

pub async fn update_packet_field(
    state: Arc<ServerState>,
    user: &MUser,
    field_id: i64,
    data: PacketFieldData,
) -> CoreResult<MPacketField> {
    authorize(
        Arc::clone(&state),
        user,
        Resource::PacketField,
        Action::Update,
        None,
    )
    .await?;

    let packet_id = packet_ref(&data)?;

    let patterns = DenyPatterns::from_cli(&state.cli);
    let violations = validate_packet_field(&data, &patterns);
    if !violations.is_empty() {
        return Err(CoreError::Validation(violations));
    }

    require_owner(Arc::clone(&state), user, EntityRef::PacketField(field_id)).await?;
    authorize_reference(Arc::clone(&state), user, EntityRef::Packet(packet_id)).await?;

    let field = get_packet_field(Arc::clone(&state), field_id).await?;

    let name = data.name.unwrap_or_default();
    check_duplicate_packet_field(Arc::clone(&state), &name, packet_id, Some(field_id)).await?;

    let mut afield = field.clone().into_active_model();
    afield.packet = Set(packet_id);
    afield.name = Set(name);
    afield.description = Set(data.description);
    afield.field_type = Set(data.field_type.unwrap_or(field.field_type));
    afield.multiplicity = Set(data.multiplicity.unwrap_or(field.multiplicity));
    afield.unit = Set(data.unit);
    afield.value = Set(data.value);
    afield.entity_version = Set(field.entity_version + 1);
    afield.updated_at = Set(Utc::now().naive_utc());

    Ok(afield.update(&state.db).await?)
}

pub async fn find_packet_field(
    state: Arc<ServerState>,
    user: &MUser,
    field_id: i64,
) -> CoreResult<MPacketField> {
    authorize(
        Arc::clone(&state),
        user,
        Resource::PacketField,
        Action::Find,
        Some(EntityRef::PacketField(field_id)),
    )
    .await?;

    get_packet_field(state, field_id).await
}

pub async fn find_fields_by_packet(
    state: Arc<ServerState>,
    user: &MUser,
    packet_id: i64,
    request: PageRequest,
) -> CoreResult<Page<MPacketField>> {
    authorize(
        Arc::clone(&state),
        user,
        Resource::PacketField,
        Action::FindAll,
        Some(EntityRef::Packet(packet_id)),
    )
    .await?;

    let query = EPacketField::find().filter(CPacketField::Packet.eq(packet_id));

    let total = query.clone().count(&state.db).await?;
    let window = window(request, total);

    let results = query
        .order_by_asc(CPacketField::Id)
        .offset(window.offset)
        .limit(window.delta)
        .all(&state.db)
        .await?;

    Ok(window.finish(results))
}

pub async fn delete_packet_field(
    state: Arc<ServerState>,
    user: &MUser,
    field_id: i64,
) -> CoreResult<()> {
    authorize(
        Arc::clone(&state),
        user,
        Resource::PacketField,
        Action::Remove,
        Some(EntityRef::PacketField(field_id)),
    )
    .await?;

    delete_packet_field_row(state, field_id).await
}
