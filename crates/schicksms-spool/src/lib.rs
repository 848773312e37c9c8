// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gammu SMSD spool directory handling for SchickSMS.
//!
//! The daemon's files backend watches an outbox directory and moves every
//! message it processes into `sent` or `error`, leaving a `.smsbackup` copy
//! behind. This crate writes into the outbox and observes the other two; it
//! never moves or deletes anything itself.

pub mod backup;
pub mod history;
pub mod layout;
pub mod status;
pub mod writer;

pub use backup::{decode, decode_record, BackupRecord};
pub use history::{HistoryAggregator, HistoryEntry};
pub use layout::SpoolLayout;
pub use status::StatusReconciler;
pub use writer::SpoolWriter;
