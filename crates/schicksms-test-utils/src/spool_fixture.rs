// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Temporary spool tree for filesystem tests.

use std::path::{Path, PathBuf};

use schicksms_config::model::GammuConfig;
use tempfile::TempDir;

/// Which daemon directory a fixture file goes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpoolDir {
    Outbox,
    Sent,
    Error,
}

/// A temp directory holding `outbox/`, `sent/` and `error/`.
///
/// Removed when dropped.
pub struct SpoolFixture {
    root: TempDir,
}

impl SpoolFixture {
    /// Create the tree. Panics on I/O failure.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp spool root");
        for dir in ["outbox", "sent", "error"] {
            std::fs::create_dir(root.path().join(dir)).expect("create spool dir");
        }
        Self { root }
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn dir(&self, which: SpoolDir) -> PathBuf {
        let name = match which {
            SpoolDir::Outbox => "outbox",
            SpoolDir::Sent => "sent",
            SpoolDir::Error => "error",
        };
        self.root.path().join(name)
    }

    pub fn outbox(&self) -> PathBuf {
        self.dir(SpoolDir::Outbox)
    }

    pub fn sent(&self) -> PathBuf {
        self.dir(SpoolDir::Sent)
    }

    pub fn error(&self) -> PathBuf {
        self.dir(SpoolDir::Error)
    }

    /// Default gammu settings pointed at this tree.
    pub fn gammu_config(&self) -> GammuConfig {
        GammuConfig {
            outbox_path: self.outbox(),
            sent_path: self.sent(),
            error_path: self.error(),
            status_check_delay_ms: 0,
            ..GammuConfig::default()
        }
    }

    /// Write a file with arbitrary contents.
    pub fn write_raw(&self, which: SpoolDir, name: &str, contents: &str) -> PathBuf {
        let path = self.dir(which).join(name);
        std::fs::write(&path, contents).expect("write fixture file");
        path
    }

    /// Write a `.smsbackup` file the way the daemon does.
    ///
    /// `text` is encoded to hex UTF-16BE; `None` fields are left out.
    pub fn write_backup(
        &self,
        which: SpoolDir,
        name: &str,
        number: Option<&str>,
        datetime: Option<&str>,
        text: Option<&str>,
    ) -> PathBuf {
        let mut contents = String::from("; This file format was designed by Gammu\n[SMSBackup000]\n");
        contents.push_str("SMSC = \"+491770610000\"\nState = Sent\n");
        if let Some(number) = number {
            contents.push_str(&format!("Number = \"{number}\"\n"));
        }
        contents.push_str("Coding = Unicode\nFolder = 2\n");
        if let Some(text) = text {
            contents.push_str(&format!("Text00 = {}\n", encode_utf16_hex(text)));
        }
        if let Some(datetime) = datetime {
            contents.push_str(&format!("DateTime = {datetime}\n"));
        }
        self.write_raw(which, name, &contents)
    }

    /// Names currently in one directory, sorted.
    pub fn list(&self, which: SpoolDir) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.dir(which))
            .expect("read fixture dir")
            .filter_map(Result::ok)
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

impl Default for SpoolFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Uppercase hex UTF-16BE, four digits per code unit.
pub fn encode_utf16_hex(text: &str) -> String {
    text.encode_utf16().map(|unit| format!("{unit:04X}")).collect()
}
