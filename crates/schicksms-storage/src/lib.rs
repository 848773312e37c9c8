// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence for SchickSMS.
//!
//! Provides WAL-mode SQLite storage with embedded migrations, a single-writer
//! concurrency model via `tokio-rusqlite`, and typed operations for the
//! address book and the send log.

pub mod database;
pub mod export;
pub mod import;
pub mod migrations;
pub mod models;
pub mod queries;

pub use database::Database;
pub use export::{export_csv, render_csv};
pub use import::import_address_book;
pub use models::*;
