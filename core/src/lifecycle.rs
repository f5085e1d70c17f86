/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use sea_orm::{ColumnTrait, DatabaseTransaction, DbErr, EntityTrait, QueryFilter, TransactionTrait};
use std::sync::Arc;

use super::error::CoreResult;
use super::types::*;

/// Subtree deletion. Each entry point removes the entity and everything
/// below it in one transaction, children before parents, and never touches
/// anything above the entity. A failure anywhere rolls the whole subtree
/// back.

async fn device_ids_of_project(
    txn: &DatabaseTransaction,
    project_id: i64,
) -> Result<Vec<i64>, DbErr> {
    let devices = EDevice::find()
        .filter(CDevice::Project.eq(project_id))
        .all(txn)
        .await?;

    Ok(devices.iter().map(|device| device.id).collect())
}

async fn packet_ids_of_devices(
    txn: &DatabaseTransaction,
    device_ids: &[i64],
) -> Result<Vec<i64>, DbErr> {
    if device_ids.is_empty() {
        return Ok(Vec::new());
    }

    let packets = EPacket::find()
        .filter(CPacket::Device.is_in(device_ids.to_vec()))
        .all(txn)
        .await?;

    Ok(packets.iter().map(|packet| packet.id).collect())
}

async fn delete_fields_of_packets(
    txn: &DatabaseTransaction,
    packet_ids: &[i64],
) -> Result<u64, DbErr> {
    if packet_ids.is_empty() {
        return Ok(0);
    }

    let res = EPacketField::delete_many()
        .filter(CPacketField::Packet.is_in(packet_ids.to_vec()))
        .exec(txn)
        .await?;
    Ok(res.rows_affected)
}

async fn delete_packets(txn: &DatabaseTransaction, packet_ids: &[i64]) -> Result<u64, DbErr> {
    if packet_ids.is_empty() {
        return Ok(0);
    }

    let res = EPacket::delete_many()
        .filter(CPacket::Id.is_in(packet_ids.to_vec()))
        .exec(txn)
        .await?;
    Ok(res.rows_affected)
}

pub async fn delete_project_tree(state: Arc<ServerState>, project_id: i64) -> CoreResult<()> {
    let txn = state.db.begin().await?;

    let device_ids = device_ids_of_project(&txn, project_id).await?;
    let packet_ids = packet_ids_of_devices(&txn, &device_ids).await?;

    delete_fields_of_packets(&txn, &packet_ids).await?;
    delete_packets(&txn, &packet_ids).await?;

    if !device_ids.is_empty() {
        EDevice::delete_many()
            .filter(CDevice::Id.is_in(device_ids.clone()))
            .exec(&txn)
            .await?;
    }

    EProject::delete_many()
        .filter(CProject::Id.eq(project_id))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    tracing::info!(
        "Deleted project {} with {} devices and {} packets",
        project_id,
        device_ids.len(),
        packet_ids.len()
    );

    Ok(())
}

pub async fn delete_device_tree(state: Arc<ServerState>, device_id: i64) -> CoreResult<()> {
    let txn = state.db.begin().await?;

    let device_ids = vec![device_id];
    let packet_ids = packet_ids_of_devices(&txn, &device_ids).await?;

    delete_fields_of_packets(&txn, &packet_ids).await?;
    delete_packets(&txn, &packet_ids).await?;

    EDevice::delete_many()
        .filter(CDevice::Id.eq(device_id))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    tracing::info!(
        "Deleted device {} with {} packets",
        device_id,
        packet_ids.len()
    );

    Ok(())
}

pub async fn delete_packet_tree(state: Arc<ServerState>, packet_id: i64) -> CoreResult<()> {
    let txn = state.db.begin().await?;

    let packet_ids = vec![packet_id];
    delete_fields_of_packets(&txn, &packet_ids).await?;
    delete_packets(&txn, &packet_ids).await?;

    txn.commit().await?;

    tracing::info!("Deleted packet {}", packet_id);

    Ok(())
}

pub async fn delete_packet_field_row(state: Arc<ServerState>, field_id: i64) -> CoreResult<()> {
    EPacketField::delete_many()
        .filter(CPacketField::Id.eq(field_id))
        .exec(&state.db)
        .await?;

    tracing::info!("Deleted packet field {}", field_id);

    Ok(())
}
