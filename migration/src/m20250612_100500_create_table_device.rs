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
                    .table(Device::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Device::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Device::EntityVersion)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Device::Project).big_integer().not_null())
                    .col(
                        ColumnDef::new(Device::DeviceName)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Device::Brand).string())
                    .col(ColumnDef::new(Device::Model).string())
                    .col(ColumnDef::new(Device::FirmwareVersion).string())
                    .col(ColumnDef::new(Device::SoftwareVersion).string())
                    .col(ColumnDef::new(Device::Description).text())
                    .col(ColumnDef::new(Device::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Device::UpdatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-device-project")
                            .from(Device::Table, Device::Project)
                            .to(Project::Table, Project::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Device::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Device {
    Table,
    Id,
    EntityVersion,
    Project,
    DeviceName,
    Brand,
    Model,
    FirmwareVersion,
    SoftwareVersion,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Project {
    Table,
    Id,
}
