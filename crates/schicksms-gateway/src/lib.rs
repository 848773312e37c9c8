// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON HTTP API for the SchickSMS console.
//!
//! Thin handlers over the spool, dispatch and storage crates. All `/v1`
//! routes sit behind a bearer token; `/health` is open for service
//! supervisors.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod server;
pub mod state;

pub use auth::AuthConfig;
pub use error::ApiError;
pub use server::{build_router, start_server};
pub use state::{ApiSettings, AppState};
