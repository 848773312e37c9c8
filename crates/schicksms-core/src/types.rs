// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared between the spool, dispatch, storage and gateway crates.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Placeholder shown when a backup file lacks a recipient or timestamp.
pub const UNKNOWN: &str = "Unbekannt";

/// Placeholder shown when a backup file lacks a message payload.
pub const NO_MESSAGE: &str = "Keine Nachricht";

/// A message to be handed to the modem daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    /// Phone number in international format (`+` followed by digits).
    pub recipient: String,
    /// Free UTF-8 text.
    pub body: String,
    /// Display name of the sender. Informational only; the outbox format has no field for it.
    pub sender_id: String,
}

/// A spool file that was successfully placed in the outbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpoolFileHandle {
    /// Bare file name, e.g. `OUT_20250213_183445_1a2b3c4d.txt`.
    pub filename: String,
    /// Full path inside the outbox at the time of writing.
    #[serde(skip)]
    pub path: PathBuf,
}

/// Observed disposition of a spool file.
///
/// Derived purely from which directory currently holds the file.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DeliveryStatus {
    /// Still waiting in the outbox.
    Queued,
    /// Moved to the sent directory by the daemon.
    Sent,
    /// Moved to the error directory by the daemon.
    Error,
    /// Not present in any of the three directories.
    Unknown,
}

impl DeliveryStatus {
    /// Operator-facing label, in the console's display language.
    pub fn label(&self) -> &'static str {
        match self {
            DeliveryStatus::Queued => "In der Warteschlange",
            DeliveryStatus::Sent => "Gesendet",
            DeliveryStatus::Error => "Fehler",
            DeliveryStatus::Unknown => "Status unbekannt",
        }
    }

    /// Whether the daemon is finished with this file.
    pub fn is_terminal(&self) -> bool {
        matches!(self, DeliveryStatus::Sent | DeliveryStatus::Error)
    }
}

/// One historical send attempt reconstructed from a daemon backup file.
///
/// Built fresh on every history request; never cached or mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryRecord {
    /// Backup file name.
    pub filename: String,
    /// Raw `DateTime` token as found in the file, if any.
    pub raw_timestamp: Option<String>,
    /// Parsed timestamp; `None` when the token was missing or malformed.
    #[serde(skip)]
    pub timestamp: Option<NaiveDateTime>,
    /// `DD.MM.YYYY HH:MM:SS`, or [`UNKNOWN`].
    pub date: String,
    /// Recipient number, or [`UNKNOWN`].
    pub recipient_number: String,
    /// Address book name for the recipient, if one matched.
    pub contact_name: Option<String>,
    /// Full decoded message text, or [`NO_MESSAGE`].
    pub message: String,
    /// `Sent` or `Error`, depending on the directory the file came from.
    pub status: DeliveryStatus,
}

impl DeliveryRecord {
    /// A record consisting only of sentinels, used when a file is unreadable.
    pub fn placeholder(filename: impl Into<String>, status: DeliveryStatus) -> Self {
        Self {
            filename: filename.into(),
            raw_timestamp: None,
            timestamp: None,
            date: UNKNOWN.to_string(),
            recipient_number: UNKNOWN.to_string(),
            contact_name: None,
            message: NO_MESSAGE.to_string(),
            status,
        }
    }

    /// `Name (+number)` when a contact matched, else the bare number.
    pub fn display_recipient(&self) -> String {
        match &self.contact_name {
            Some(name) => format!("{name} ({})", self.recipient_number),
            None => self.recipient_number.clone(),
        }
    }
}

/// Delivery strategy selected by the caller.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SendMethod {
    /// Drop a spool file into the outbox.
    File,
    /// Run the injector command.
    #[default]
    Command,
    /// File first; the command only if the file method failed.
    Both,
}

/// A fully described external process invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandInvocation {
    /// Program followed by its arguments.
    pub argv: Vec<String>,
    /// Text piped to standard input, if any.
    pub stdin: Option<String>,
}

impl CommandInvocation {
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv, stdin: None }
    }

    pub fn with_stdin(mut self, stdin: impl Into<String>) -> Self {
        self.stdin = Some(stdin.into());
        self
    }

    /// The program name, or an empty string for an empty argv.
    pub fn program(&self) -> &str {
        self.argv.first().map(String::as_str).unwrap_or("")
    }
}

/// Structured result of a finished process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOutput {
    pub argv: Vec<String>,
    pub stdin: Option<String>,
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Stdout followed by stderr, trimmed, for operator display.
    pub fn combined_text(&self) -> String {
        let stdout = self.stdout.trim();
        let stderr = self.stderr.trim();
        match (stdout.is_empty(), stderr.is_empty()) {
            (false, false) => format!("{stdout}\n{stderr}"),
            (false, true) => stdout.to_string(),
            (true, false) => stderr.to_string(),
            (true, true) => String::new(),
        }
    }
}

/// Health status reported by component checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Degraded(String),
    Unhealthy(String),
}
