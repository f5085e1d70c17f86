/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Packet::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Packet::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Packet::EntityVersion)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Packet::Device).big_integer().not_null())
                    .col(ColumnDef::new(Packet::Name).string().not_null())
                    .col(ColumnDef::new(Packet::PacketType).integer().not_null())
                    .col(ColumnDef::new(Packet::Format).integer().not_null())
                    .col(ColumnDef::new(Packet::Serialization).integer().not_null())
                    .col(ColumnDef::new(Packet::Version).string().not_null())
                    .col(ColumnDef::new(Packet::TrafficPlan).integer().not_null())
                    .col(ColumnDef::new(Packet::TimestampField).string().not_null())
                    .col(ColumnDef::new(Packet::TimestampFormat).string().not_null())
                    .col(ColumnDef::new(Packet::UnixTimestamp).boolean().not_null())
                    .col(ColumnDef::new(Packet::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Packet::UpdatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-packet-device")
                            .from(Packet::Table, Packet::Device)
                            .to(Device::Table, Device::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .name("idx-packet-name-device-version")
                            .col(Packet::Name)
                            .col(Packet::Device)
                            .col(Packet::Version)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Packet::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Packet {
    Table,
    Id,
    EntityVersion,
    Device,
    Name,
    PacketType,
    Format,
    Serialization,
    Version,
    TrafficPlan,
    TimestampField,
    TimestampFormat,
    UnixTimestamp,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Device {
    Table,
    Id,
}
