/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use clap::Parser;
use entity::packet::{PacketFormat, PacketSerialization, PacketType, TrafficPlan};
use entity::packet_field::{FieldMultiplicity, FieldType};
use entity::*;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(name = "Meridian", display_name = "Meridian", bin_name = "meridian-server", author = "Wavelens", version, about, long_about = None)]
pub struct Cli {
    #[arg(long, env = "MERIDIAN_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
    #[arg(long, env = "MERIDIAN_DATABASE_URL")]
    pub database_url: Option<String>,
    #[arg(long, env = "MERIDIAN_DATABASE_URL_FILE")]
    pub database_url_file: Option<String>,
    #[arg(long, env = "MERIDIAN_DENY_PATTERNS")]
    pub deny_patterns: Option<String>,
    #[arg(long, env = "MERIDIAN_DISABLE_REGISTRATION", default_value = "false")]
    pub disable_registration: bool,
}

#[derive(Debug)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub cli: Cli,
}

/// Draft of a project as submitted for save/update. Unset fields are the
/// "null" inputs the validation pipeline reports on.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ProjectData {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct DeviceData {
    pub project: Option<i64>,
    pub device_name: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub firmware_version: Option<String>,
    pub software_version: Option<String>,
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct PacketData {
    pub device: Option<i64>,
    pub name: Option<String>,
    pub packet_type: Option<PacketType>,
    pub format: Option<PacketFormat>,
    pub serialization: Option<PacketSerialization>,
    pub version: Option<String>,
    pub traffic_plan: Option<TrafficPlan>,
    pub timestamp_field: Option<String>,
    pub timestamp_format: Option<String>,
    pub unix_timestamp: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct PacketFieldData {
    pub packet: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub field_type: Option<FieldType>,
    pub multiplicity: Option<FieldMultiplicity>,
    pub unit: Option<String>,
    pub value: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct UserData {
    pub username: Option<String>,
    pub admin: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RoleData {
    pub name: Option<String>,
    pub description: Option<String>,
}

pub type EDevice = device::Entity;
pub type EPacket = packet::Entity;
pub type EPacketField = packet_field::Entity;
pub type EPermission = permission::Entity;
pub type EProject = project::Entity;
pub type ERole = role::Entity;
pub type EUser = user::Entity;
pub type EUserRole = user_role::Entity;

pub type MDevice = device::Model;
pub type MPacket = packet::Model;
pub type MPacketField = packet_field::Model;
pub type MPermission = permission::Model;
pub type MProject = project::Model;
pub type MRole = role::Model;
pub type MUser = user::Model;
pub type MUserRole = user_role::Model;

pub type ADevice = device::ActiveModel;
pub type APacket = packet::ActiveModel;
pub type APacketField = packet_field::ActiveModel;
pub type APermission = permission::ActiveModel;
pub type AProject = project::ActiveModel;
pub type ARole = role::ActiveModel;
pub type AUser = user::ActiveModel;
pub type AUserRole = user_role::ActiveModel;

pub type CDevice = device::Column;
pub type CPacket = packet::Column;
pub type CPacketField = packet_field::Column;
pub type CPermission = permission::Column;
pub type CProject = project::Column;
pub type CRole = role::Column;
pub type CUser = user::Column;
pub type CUserRole = user_role::Column;
