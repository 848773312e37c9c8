// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbox writer.
//!
//! A message becomes a small text file the daemon picks up on its next poll:
//!
//! ```text
//! To: +491701234567
//! Alphabet: UTF-8
//! Coding: Default_No_Compression
//!
//! <body>
//! ```
//!
//! The file is written under a hidden temporary name in the outbox, synced,
//! and then renamed into place so the daemon never sees a partial file.

use std::io::Write;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use schicksms_config::model::GammuConfig;
use schicksms_core::{
    validate_message, OutgoingMessage, RecipientPolicy, SmsError, SpoolFileHandle,
};
use tracing::{debug, error, info, warn};

/// Prefix of in-flight files. The daemon only reads names starting with `OUT`.
const TEMP_PREFIX: &str = ".schicksms-";

/// Spool file name for a submission at `now` with the given random suffix.
pub fn spool_filename(now: NaiveDateTime, suffix: u32) -> String {
    format!("OUT_{}_{suffix:08x}.txt", now.format("%Y%m%d_%H%M%S"))
}

/// Full file contents for `message`. The body is appended unchanged.
pub fn render_spool_file(message: &OutgoingMessage) -> String {
    format!(
        "To: {}\nAlphabet: UTF-8\nCoding: Default_No_Compression\n\n{}",
        message.recipient, message.body
    )
}

/// Places outgoing messages into the daemon's outbox.
#[derive(Debug, Clone)]
pub struct SpoolWriter {
    outbox: PathBuf,
    policy: RecipientPolicy,
    default_sender: String,
}

impl SpoolWriter {
    pub fn new(outbox: impl Into<PathBuf>, policy: RecipientPolicy, default_sender: &str) -> Self {
        Self {
            outbox: outbox.into(),
            policy,
            default_sender: default_sender.to_string(),
        }
    }

    pub fn from_config(config: &GammuConfig) -> Self {
        Self::new(
            config.outbox_path.clone(),
            config.recipient_policy(),
            &config.default_sender,
        )
    }

    /// Validate and write one message into the outbox.
    ///
    /// Validation failures return before any file is created. A missing or
    /// unwritable outbox is an [`SmsError::Io`]; the directory is never created.
    pub fn submit(
        &self,
        recipient: &str,
        body: &str,
        sender: Option<&str>,
    ) -> Result<SpoolFileHandle, SmsError> {
        if let Err(e) = validate_message(&self.policy, recipient, body) {
            debug!(recipient, error = %e, "spool submission rejected");
            return Err(e.into());
        }

        let message = OutgoingMessage {
            recipient: recipient.to_string(),
            body: body.to_string(),
            sender_id: sender.unwrap_or(&self.default_sender).to_string(),
        };

        let filename = spool_filename(chrono::Local::now().naive_local(), rand::random());
        let target = self.outbox.join(&filename);

        self.write_atomically(&target, render_spool_file(&message).as_bytes())
            .inspect_err(|e| {
                error!(outbox = %self.outbox.display(), error = %e, "failed to write spool file");
            })?;

        info!(
            filename = %filename,
            recipient = %message.recipient,
            sender = %message.sender_id,
            bytes = message.body.len(),
            "spool file queued"
        );

        Ok(SpoolFileHandle {
            filename,
            path: target,
        })
    }

    fn write_atomically(&self, target: &std::path::Path, contents: &[u8]) -> Result<(), SmsError> {
        let mut temp = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .suffix(".tmp")
            .tempfile_in(&self.outbox)
            .map_err(|e| SmsError::io("failed to create spool file in outbox", e))?;

        temp.write_all(contents)
            .map_err(|e| SmsError::io("failed to write spool file", e))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| SmsError::io("failed to sync spool file", e))?;

        if target.exists() {
            warn!(path = %target.display(), "spool file name collision, replacing existing file");
        }

        temp.persist(target)
            .map_err(|e| SmsError::io("failed to move spool file into outbox", e.error))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use schicksms_core::ValidationError;
    use tracing_test::traced_test;

    use super::*;

    fn writer(outbox: &std::path::Path) -> SpoolWriter {
        SpoolWriter::new(outbox, RecipientPolicy::new(10), "SchickSMS")
    }

    fn dir_entries(dir: &std::path::Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn filename_has_timestamp_and_hex_suffix() {
        let now = NaiveDate::from_ymd_opt(2025, 2, 13)
            .unwrap()
            .and_hms_opt(18, 34, 45)
            .unwrap();
        assert_eq!(
            spool_filename(now, 0x1a2b3c4d),
            "OUT_20250213_183445_1a2b3c4d.txt"
        );
        assert_eq!(spool_filename(now, 7), "OUT_20250213_183445_00000007.txt");
    }

    #[test]
    fn rendered_file_has_header_block() {
        let message = OutgoingMessage {
            recipient: "+491701234567".into(),
            body: "Hallo Welt".into(),
            sender_id: "SchickSMS".into(),
        };
        assert_eq!(
            render_spool_file(&message),
            "To: +491701234567\nAlphabet: UTF-8\nCoding: Default_No_Compression\n\nHallo Welt"
        );
    }

    #[test]
    fn submit_writes_one_file_and_no_temporaries() {
        let dir = tempfile::tempdir().unwrap();
        let handle = writer(dir.path())
            .submit("+491701234567", "Termin morgen 10 Uhr", None)
            .unwrap();

        assert_eq!(dir_entries(dir.path()), vec![handle.filename.clone()]);
        assert!(handle.filename.starts_with("OUT_"));
        assert!(handle.filename.ends_with(".txt"));
        let contents = std::fs::read_to_string(&handle.path).unwrap();
        assert!(contents.starts_with("To: +491701234567\n"));
    }

    #[test]
    fn invalid_recipient_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let err = writer(dir.path())
            .submit("+49123; rm -rf /", "hi", None)
            .unwrap_err();
        assert!(matches!(
            err,
            SmsError::Validation(ValidationError::InvalidRecipient { .. })
        ));
        assert!(dir_entries(dir.path()).is_empty());
    }

    #[test]
    fn empty_body_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let err = writer(dir.path())
            .submit("+491701234567", "   ", None)
            .unwrap_err();
        assert!(matches!(
            err,
            SmsError::Validation(ValidationError::EmptyMessage)
        ));
        assert!(dir_entries(dir.path()).is_empty());
    }

    #[test]
    #[traced_test]
    fn successful_submit_is_logged_with_filename() {
        let dir = tempfile::tempdir().unwrap();
        let handle = writer(dir.path())
            .submit("+491701234567", "hi", Some("Praxis"))
            .unwrap();
        assert!(logs_contain("spool file queued"));
        assert!(logs_contain(&handle.filename));
        assert!(logs_contain("Praxis"));
    }

    #[test]
    fn missing_outbox_is_an_io_error_and_is_not_created() {
        let dir = tempfile::tempdir().unwrap();
        let outbox = dir.path().join("outbox");
        let err = writer(&outbox)
            .submit("+491701234567", "hi", None)
            .unwrap_err();
        assert!(matches!(err, SmsError::Io { .. }));
        assert!(!outbox.exists());
    }
}
