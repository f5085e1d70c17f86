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
                    .table(PacketField::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PacketField::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PacketField::EntityVersion)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PacketField::Packet)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PacketField::Name).string().not_null())
                    .col(ColumnDef::new(PacketField::Description).text())
                    .col(ColumnDef::new(PacketField::FieldType).integer().not_null())
                    .col(
                        ColumnDef::new(PacketField::Multiplicity)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PacketField::Unit).string())
                    .col(ColumnDef::new(PacketField::Value).text())
                    .col(
                        ColumnDef::new(PacketField::CreatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PacketField::UpdatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-packet_field-packet")
                            .from(PacketField::Table, PacketField::Packet)
                            .to(Packet::Table, Packet::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .name("idx-packet_field-name-packet")
                            .col(PacketField::Name)
                            .col(PacketField::Packet)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PacketField::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PacketField {
    Table,
    Id,
    EntityVersion,
    Packet,
    Name,
    Description,
    FieldType,
    Multiplicity,
    Unit,
    Value,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Packet {
    Table,
    Id,
}
