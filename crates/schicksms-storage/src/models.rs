// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Row types for the address book and the send log.

use serde::{Deserialize, Serialize};

/// Status written to the send log for a successful send.
pub const STATUS_SENT: &str = "Gesendet";

/// Status counted as failed in the statistics.
pub const STATUS_FAILED: &str = "Fehler";

/// An address book entry. `number` is unique across the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub number: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Result of saving a contact by number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContactSaved {
    pub id: i64,
    /// `true` when an existing contact with the same number was renamed.
    pub updated: bool,
}

/// One row of the send log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsLogEntry {
    pub id: i64,
    pub recipient: String,
    pub message: String,
    pub status: String,
    pub sent_at: String,
    pub filename: Option<String>,
    pub archived: bool,
}

/// Messages sent on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: String,
    pub count: i64,
}

/// Totals over the whole send log plus the last seven days per day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmsStatistics {
    pub total: i64,
    pub success: i64,
    pub failed: i64,
    /// Percentage of successful sends, two decimals. Zero for an empty log.
    pub success_rate: f64,
    pub daily: Vec<DailyCount>,
}

/// A page of rows plus the count of all rows matching the same filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

/// Outcome of importing a legacy JSON address book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
    pub total: usize,
}

/// Round a percentage to two decimals.
pub(crate) fn success_rate(success: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (success as f64 / total as f64 * 10_000.0).round() / 100.0
}
