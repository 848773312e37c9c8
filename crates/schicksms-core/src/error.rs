// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for SchickSMS.
//!
//! Each component reports its own narrow error enum ([`ValidationError`],
//! [`CommandError`], [`DecodeError`]); [`SmsError`] is the umbrella type used
//! across crate boundaries and by the gateway.

use std::time::Duration;

use thiserror::Error;

use crate::types::CommandOutput;

/// Input rejected before anything touches the filesystem or a process.
///
/// Reported straight back to the caller and never logged as a system fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Recipient does not match `+` followed by at least `min_digits` digits.
    #[error(
        "invalid recipient `{recipient}`: use international format with at least {min_digits} digits (e.g. +491234567890)"
    )]
    InvalidRecipient { recipient: String, min_digits: usize },

    /// Message body is empty or whitespace only.
    #[error("message must not be empty")]
    EmptyMessage,

    /// Contact name is empty or whitespace only.
    #[error("contact name must not be empty")]
    EmptyName,

    /// Another contact already uses this number.
    #[error("number `{number}` is already used by another contact")]
    DuplicateNumber { number: String },

    /// Address book import file is not a JSON array.
    #[error("address book is not a JSON array: {reason}")]
    InvalidAddressBook { reason: String },
}

/// Failure of the external injector command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Input failed validation; the injector was never started.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The process could not be started at all.
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The process ran and exited unsuccessfully.
    #[error("SMS command failed: {}", output.combined_text())]
    Failed { output: CommandOutput },

    /// The process did not finish within the configured bound and was killed.
    #[error("SMS command timed out after {}s", timeout.as_secs())]
    Timeout { timeout: Duration },
}

impl CommandError {
    /// Captured process output, when the process actually ran.
    pub fn output(&self) -> Option<&CommandOutput> {
        match self {
            CommandError::Failed { output } => Some(output),
            _ => None,
        }
    }
}

/// A backup file with nothing recognizable in it.
///
/// Missing individual fields are not errors; they degrade to sentinel values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("no `Key = Value` entries found in backup file")]
    NoEntries,
}

/// The primary error type shared across SchickSMS crates.
#[derive(Debug, Error)]
pub enum SmsError {
    /// Configuration errors (invalid TOML, bad paths, out-of-range values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Caller input rejected by validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Filesystem failure (unwritable outbox, failed rename, unreadable dir).
    #[error("{message}: {source}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Injector command failure.
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Storage backend errors (database connection, query failure).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A requested record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SmsError {
    /// Shorthand for wrapping an `io::Error` with context.
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        SmsError::Io {
            message: message.into(),
            source,
        }
    }

    /// Remediation text suitable for showing to an operator.
    ///
    /// Filesystem failures get a generic hint instead of raw OS text; command
    /// failures are surfaced verbatim since the injector's stderr is the
    /// primary diagnostic.
    pub fn operator_message(&self) -> String {
        match self {
            SmsError::Io { .. } => {
                "Could not write to the outbox directory. Check that it exists and is writable by the service user.".to_string()
            }
            SmsError::Storage { .. } => "Database error. See server log for details.".to_string(),
            other => other.to_string(),
        }
    }
}
