use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Direction of a packet from the device's point of view.
#[derive(Debug, Copy, Clone, PartialEq, Eq, DeriveActiveEnum, EnumIter, Deserialize, Serialize)]
#[sea_orm(rs_type = "i16", db_type = "Integer")]
pub enum PacketType {
    #[sea_orm(num_value = 0)]
    Input,
    #[sea_orm(num_value = 1)]
    Output,
    #[sea_orm(num_value = 2)]
    Io,
}

/// Transmission format of the payload, e.g. json or csv.
#[derive(Debug, Copy, Clone, PartialEq, Eq, DeriveActiveEnum, EnumIter, Deserialize, Serialize)]
#[sea_orm(rs_type = "i16", db_type = "Integer")]
pub enum PacketFormat {
    #[sea_orm(num_value = 0)]
    Csv,
    #[sea_orm(num_value = 1)]
    Json,
    #[sea_orm(num_value = 2)]
    Xml,
    #[sea_orm(num_value = 3)]
    Text,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, DeriveActiveEnum, EnumIter, Deserialize, Serialize)]
#[sea_orm(rs_type = "i16", db_type = "Integer")]
pub enum PacketSerialization {
    #[sea_orm(num_value = 0)]
    None,
    #[sea_orm(num_value = 1)]
    Avro,
    #[sea_orm(num_value = 2)]
    Protobuf,
}

/// How many bytes per day the packet is expected to send.
#[derive(Debug, Copy, Clone, PartialEq, Eq, DeriveActiveEnum, EnumIter, Deserialize, Serialize)]
#[sea_orm(rs_type = "i16", db_type = "Integer")]
pub enum TrafficPlan {
    #[sea_orm(num_value = 0)]
    Low,
    #[sea_orm(num_value = 1)]
    Medium,
    #[sea_orm(num_value = 2)]
    High,
    #[sea_orm(num_value = 3)]
    Intensive,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "packet")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub entity_version: i64,
    pub device: i64,
    #[sea_orm(indexed)]
    pub name: String,
    pub packet_type: PacketType,
    pub format: PacketFormat,
    pub serialization: PacketSerialization,
    pub version: String,
    pub traffic_plan: TrafficPlan,
    pub timestamp_field: String,
    pub timestamp_format: String,
    pub unix_timestamp: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::device::Entity",
        from = "Column::Device",
        to = "super::device::Column::Id"
    )]
    Device,
}

impl ActiveModelBehavior for ActiveModel {}
