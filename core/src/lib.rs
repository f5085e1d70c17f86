/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub mod authorization;
pub mod consts;
pub mod database;
pub mod device;
pub mod error;
pub mod lifecycle;
pub mod ownership;
pub mod packet;
pub mod packet_field;
pub mod pagination;
pub mod permission;
pub mod project;
pub mod role;
pub mod types;
pub mod user;
pub mod validate;

use anyhow::Result;
use clap::Parser;
use database::connect_db;
use std::sync::Arc;
use types::*;

pub async fn init_state() -> Result<Arc<ServerState>> {
    let cli = Cli::parse();

    let db = connect_db(&cli).await?;

    Ok(Arc::new(ServerState { db, cli }))
}
