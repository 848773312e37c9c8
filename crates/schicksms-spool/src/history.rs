// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recent-message listing built from the daemon's backup files.
//!
//! Every call rescans `sent` and `error`, so cost grows with the number of
//! files kept there. Nothing is cached between calls.

use std::cmp::Ordering;
use std::path::Path;

use schicksms_core::{ContactLookup, DeliveryRecord, DeliveryStatus, SmsError};
use serde::Serialize;
use tracing::{debug, warn};

use crate::backup::decode_record;
use crate::layout::SpoolLayout;

/// Extension of the daemon's post-send copies.
pub const BACKUP_EXTENSION: &str = "smsbackup";

/// Merges backup files from the sent and error directories.
#[derive(Debug, Clone)]
pub struct HistoryAggregator {
    layout: SpoolLayout,
}

impl HistoryAggregator {
    pub fn new(layout: SpoolLayout) -> Self {
        Self { layout }
    }

    /// Up to `limit` records, most recent first, with contact names filled in.
    pub async fn list_recent(
        &self,
        limit: usize,
        contacts: &dyn ContactLookup,
    ) -> Result<Vec<DeliveryRecord>, SmsError> {
        let layout = self.layout.clone();
        let mut records = tokio::task::spawn_blocking(move || collect_recent(&layout, limit))
            .await
            .map_err(|e| SmsError::Internal(format!("history scan panicked: {e}")))?;

        for record in &mut records {
            record.contact_name = contacts.name_for(&record.recipient_number);
        }
        Ok(records)
    }
}

/// Scan both directories, order the records and keep the first `limit`.
pub fn collect_recent(layout: &SpoolLayout, limit: usize) -> Vec<DeliveryRecord> {
    let mut records = read_backups(&layout.sent, DeliveryStatus::Sent);
    records.extend(read_backups(&layout.error, DeliveryStatus::Error));
    debug!(count = records.len(), limit, "backup files scanned");

    let mut ordered = order_records(records);
    ordered.truncate(limit);
    ordered
}

fn read_backups(dir: &Path, status: DeliveryStatus) -> Vec<DeliveryRecord> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(dir = %dir.display(), error = %e, "skipping unreadable spool directory");
            return Vec::new();
        }
    };

    entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension().is_some_and(|ext| ext == BACKUP_EXTENSION) && path.is_file()
        })
        .filter_map(|path| {
            let filename = path.file_name()?.to_string_lossy().into_owned();
            match std::fs::read(&path) {
                Ok(bytes) => Some(decode_record(
                    &filename,
                    status,
                    &String::from_utf8_lossy(&bytes),
                )),
                Err(e) => {
                    // Moved away between listing and reading.
                    warn!(path = %path.display(), error = %e, "failed to read backup file");
                    None
                }
            }
        })
        .collect()
}

/// Newest first.
///
/// Records with a parsed timestamp are ordered by time, the rest by their raw
/// timestamp text. The two runs are then merged by comparing display dates
/// in descending order, which places unparsed records wherever that string
/// comparison puts them rather than at either end.
pub fn order_records(records: Vec<DeliveryRecord>) -> Vec<DeliveryRecord> {
    let (mut parsed, mut unparsed): (Vec<_>, Vec<_>) =
        records.into_iter().partition(|r| r.timestamp.is_some());

    parsed.sort_by(|a, b| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| b.filename.cmp(&a.filename))
    });
    unparsed.sort_by(|a, b| {
        b.raw_timestamp
            .cmp(&a.raw_timestamp)
            .then_with(|| b.filename.cmp(&a.filename))
    });

    let mut merged = Vec::with_capacity(parsed.len() + unparsed.len());
    let mut parsed = parsed.into_iter().peekable();
    let mut unparsed = unparsed.into_iter().peekable();
    loop {
        let take_parsed = match (parsed.peek(), unparsed.peek()) {
            (Some(p), Some(u)) => u.date.cmp(&p.date) != Ordering::Greater,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        let next = if take_parsed {
            parsed.next()
        } else {
            unparsed.next()
        };
        merged.extend(next);
    }
    merged
}

/// A history row as shown to operators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub filename: String,
    pub date: String,
    /// `Name (+number)` or the bare number.
    pub recipient: String,
    pub recipient_number: String,
    /// Message cut to the preview length, with `...` when shortened.
    pub message: String,
    /// Localized status label.
    pub status: String,
}

impl HistoryEntry {
    pub fn from_record(record: &DeliveryRecord, preview_chars: usize) -> Self {
        Self {
            filename: record.filename.clone(),
            date: record.date.clone(),
            recipient: record.display_recipient(),
            recipient_number: record.recipient_number.clone(),
            message: preview(&record.message, preview_chars),
            status: record.status.label().to_string(),
        }
    }
}

/// First `max_chars` characters of `text`, plus `...` if anything was cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(filename: &str, raw: Option<&str>) -> DeliveryRecord {
        let mut r = DeliveryRecord::placeholder(filename, DeliveryStatus::Sent);
        r.raw_timestamp = raw.map(str::to_string);
        r.timestamp = raw.and_then(crate::backup::parse_backup_timestamp);
        if let Some(ts) = r.timestamp {
            r.date = ts.format(crate::backup::DISPLAY_FORMAT).to_string();
        }
        r
    }

    fn names(records: &[DeliveryRecord]) -> Vec<&str> {
        records.iter().map(|r| r.filename.as_str()).collect()
    }

    #[test]
    fn parsed_records_are_newest_first() {
        let ordered = order_records(vec![
            record("a", Some("20250101T080000Z")),
            record("c", Some("20250301T080000Z")),
            record("b", Some("20250201T080000Z")),
        ]);
        assert_eq!(names(&ordered), ["c", "b", "a"]);
    }

    #[test]
    fn time_beats_display_string_order() {
        // "31.01.2025" sorts above "01.02.2025" as a string but is older.
        let ordered = order_records(vec![
            record("jan", Some("20250131T120000Z")),
            record("feb", Some("20250201T120000Z")),
        ]);
        assert_eq!(names(&ordered), ["feb", "jan"]);
    }

    #[test]
    fn unparsed_records_merge_by_display_string() {
        let ordered = order_records(vec![
            record("parsed", Some("20250213T183445Z")),
            record("broken-a", Some("garbage-a")),
            record("broken-b", Some("garbage-b")),
        ]);
        // "Unbekannt" compares above any "DD.MM.YYYY" string.
        assert_eq!(names(&ordered), ["broken-b", "broken-a", "parsed"]);
    }

    #[test]
    fn ordering_is_total_and_stable_for_equal_timestamps() {
        let ordered = order_records(vec![
            record("x1", Some("20250213T183445Z")),
            record("x2", Some("20250213T183445Z")),
        ]);
        assert_eq!(names(&ordered), ["x2", "x1"]);
    }

    #[test]
    fn preview_cuts_on_characters() {
        assert_eq!(preview("kurz", 30), "kurz");
        assert_eq!(preview(&"ä".repeat(31), 30), format!("{}...", "ä".repeat(30)));
        assert_eq!(preview(&"x".repeat(30), 30), "x".repeat(30));
    }

    #[test]
    fn entry_uses_label_and_display_name() {
        let mut r = record("f", Some("20250213T183445Z"));
        r.recipient_number = "+491701234567".into();
        r.contact_name = Some("Oma".into());
        r.message = "Das ist eine ziemlich lange Nachricht an Oma".into();
        let entry = HistoryEntry::from_record(&r, 30);
        assert_eq!(entry.recipient, "Oma (+491701234567)");
        assert_eq!(entry.status, "Gesendet");
        assert_eq!(entry.message, "Das ist eine ziemlich lange Na...");
        assert_eq!(entry.date, "13.02.2025 18:34:45");
    }
}
