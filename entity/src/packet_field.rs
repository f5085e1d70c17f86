/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, DeriveActiveEnum, EnumIter, Deserialize, Serialize)]
#[sea_orm(rs_type = "i16", db_type = "Integer")]
pub enum FieldType {
    #[sea_orm(num_value = 0)]
    Object,
    #[sea_orm(num_value = 1)]
    Integer,
    #[sea_orm(num_value = 2)]
    Long,
    #[sea_orm(num_value = 3)]
    Float,
    #[sea_orm(num_value = 4)]
    Double,
    #[sea_orm(num_value = 5)]
    Boolean,
    #[sea_orm(num_value = 6)]
    String,
    #[sea_orm(num_value = 7)]
    Date,
    #[sea_orm(num_value = 8)]
    Timestamp,
    #[sea_orm(num_value = 9)]
    Category,
    #[sea_orm(num_value = 10)]
    Text,
    #[sea_orm(num_value = 11)]
    File,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, DeriveActiveEnum, EnumIter, Deserialize, Serialize)]
#[sea_orm(rs_type = "i16", db_type = "Integer")]
pub enum FieldMultiplicity {
    #[sea_orm(num_value = 0)]
    Single,
    #[sea_orm(num_value = 1)]
    Array,
    #[sea_orm(num_value = 2)]
    Matrix,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "packet_field")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub entity_version: i64,
    pub packet: i64,
    #[sea_orm(indexed)]
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub field_type: FieldType,
    pub multiplicity: FieldMultiplicity,
    pub unit: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub value: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::packet::Entity",
        from = "Column::Packet",
        to = "super::packet::Column::Id"
    )]
    Packet,
}

impl ActiveModelBehavior for ActiveModel {}
