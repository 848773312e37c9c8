// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for SchickSMS integration tests.
//!
//! Provides fakes and fixtures for fast, deterministic tests that never
//! spawn real processes or touch the real spool.
//!
//! # Components
//!
//! - [`FakeRunner`] - `CommandRunner` with scripted results and call capture
//! - [`SpoolFixture`] - temporary outbox/sent/error tree with backup writers

pub mod fake_runner;
pub mod spool_fixture;

pub use fake_runner::{FakeRunner, Scripted};
pub use spool_fixture::{encode_utf16_hex, SpoolDir, SpoolFixture};
