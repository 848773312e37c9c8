// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Decoder for the daemon's `.smsbackup` files.
//!
//! The files are INI-like text. Only three keys matter here:
//!
//! ```text
//! [SMSBackup000]
//! Number = "+491701234567"
//! DateTime = 20250213T183445Z
//! Text00 = 00480065006C006C006F
//! ```
//!
//! `Text00` holds the message as hex UTF-16BE code units, four hex digits
//! per unit. Surrogate pairs are not combined: each unit is mapped to a
//! code point on its own and lone surrogates are dropped, so characters
//! outside the Basic Multilingual Plane do not survive decoding.

use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use schicksms_core::{DecodeError, DeliveryRecord, DeliveryStatus, NO_MESSAGE, UNKNOWN};

static DATETIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})(\d{2})(\d{2})T(\d{2})(\d{2})(\d{2})Z?$")
        .expect("datetime pattern is valid")
});

/// Display format for decoded timestamps.
pub const DISPLAY_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Fields projected out of a backup file, with sentinels already applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupRecord {
    pub recipient_number: String,
    pub raw_timestamp: Option<String>,
    pub timestamp: Option<NaiveDateTime>,
    pub date: String,
    pub message: String,
}

impl BackupRecord {
    pub fn into_delivery_record(
        self,
        filename: impl Into<String>,
        status: DeliveryStatus,
    ) -> DeliveryRecord {
        DeliveryRecord {
            filename: filename.into(),
            raw_timestamp: self.raw_timestamp,
            timestamp: self.timestamp,
            date: self.date,
            recipient_number: self.recipient_number,
            contact_name: None,
            message: self.message,
            status,
        }
    }
}

/// Collect `Key = Value` lines. The first occurrence of a key wins.
///
/// Section headers, comments and lines without `=` are skipped. Values lose
/// surrounding whitespace and one pair of surrounding double quotes.
pub fn scan_entries(contents: &str) -> HashMap<&str, &str> {
    let mut entries = HashMap::new();
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(['[', ';', '#']) {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        let value = value.trim();
        // A lone quote is an empty quoted value.
        let value = match value.strip_prefix('"') {
            Some("") => "",
            Some(rest) => rest.strip_suffix('"').unwrap_or(value),
            None => value,
        };
        entries.entry(key).or_insert(value);
    }
    entries
}

/// Decode hex UTF-16BE, one code unit per four hex digits.
///
/// A trailing group shorter than four digits is read as its own value.
/// Surrogate halves have no `char` and are skipped.
pub fn decode_utf16_hex(hex: &str) -> String {
    hex.as_bytes()
        .chunks(4)
        .filter_map(|group| {
            let group = std::str::from_utf8(group).ok()?;
            let unit = u32::from_str_radix(group, 16).ok()?;
            char::from_u32(unit)
        })
        .collect()
}

/// Parse `YYYYMMDDTHHMMSS` with an optional trailing `Z`.
pub fn parse_backup_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let caps = DATETIME_PATTERN.captures(raw)?;
    let field = |i: usize| caps[i].parse::<u32>().ok();
    let year = caps[1].parse::<i32>().ok()?;
    NaiveDate::from_ymd_opt(year, field(2)?, field(3)?)?.and_hms_opt(field(4)?, field(5)?, field(6)?)
}

/// Project a backup file's contents into a [`BackupRecord`].
///
/// Missing or malformed fields become sentinel values. Only a file with no
/// recognizable entries at all is an error.
pub fn decode(contents: &str) -> Result<BackupRecord, DecodeError> {
    let entries = scan_entries(contents);
    if entries.is_empty() {
        return Err(DecodeError::NoEntries);
    }

    let recipient_number = entries
        .get("Number")
        .filter(|n| !n.is_empty())
        .map_or_else(|| UNKNOWN.to_string(), |n| n.to_string());

    let message = entries
        .get("Text00")
        .map(|text| leading_hex(text))
        .filter(|hex| !hex.is_empty())
        .map_or_else(|| NO_MESSAGE.to_string(), decode_utf16_hex);

    let raw_timestamp = entries
        .get("DateTime")
        .and_then(|v| v.split_whitespace().next())
        .map(str::to_string);
    let timestamp = raw_timestamp.as_deref().and_then(parse_backup_timestamp);
    let date = timestamp.map_or_else(
        || UNKNOWN.to_string(),
        |ts| ts.format(DISPLAY_FORMAT).to_string(),
    );

    Ok(BackupRecord {
        recipient_number,
        raw_timestamp,
        timestamp,
        date,
        message,
    })
}

/// Decode a file found in `status`'s directory. Undecodable files still
/// produce a record so one bad file cannot hide the rest of the listing.
pub fn decode_record(filename: &str, status: DeliveryStatus, contents: &str) -> DeliveryRecord {
    match decode(contents) {
        Ok(record) => record.into_delivery_record(filename, status),
        Err(e) => {
            tracing::warn!(filename, error = %e, "unreadable backup file");
            DeliveryRecord::placeholder(filename, status)
        }
    }
}

fn leading_hex(text: &str) -> &str {
    let end = text
        .find(|c: char| !c.is_ascii_hexdigit())
        .unwrap_or(text.len());
    &text[..end]
}
