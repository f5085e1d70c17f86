/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Test modules for core crate

pub mod authorization_tests;
pub mod project_tests;
pub mod user_tests;
pub mod validate_tests;
