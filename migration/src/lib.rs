/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub use sea_orm_migration::prelude::*;

mod m20250612_100000_create_table_user;
mod m20250612_100100_create_table_role;
mod m20250612_100200_create_table_user_role;
mod m20250612_100300_create_table_permission;
mod m20250612_100400_create_table_project;
mod m20250612_100500_create_table_device;
mod m20250612_100600_create_table_packet;
mod m20250612_100700_create_table_packet_field;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250612_100000_create_table_user::Migration),
            Box::new(m20250612_100100_create_table_role::Migration),
            Box::new(m20250612_100200_create_table_user_role::Migration),
            Box::new(m20250612_100300_create_table_permission::Migration),
            Box::new(m20250612_100400_create_table_project::Migration),
            Box::new(m20250612_100500_create_table_device::Migration),
            Box::new(m20250612_100600_create_table_packet::Migration),
            Box::new(m20250612_100700_create_table_packet_field::Migration),
        ]
    }
}
