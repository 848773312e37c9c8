// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The three spool directories shared with the Gammu SMSD files backend.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use schicksms_config::model::GammuConfig;

/// Outbox, sent and error directories.
///
/// Paths are deployment configuration. Nothing in this crate creates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpoolLayout {
    pub outbox: PathBuf,
    pub sent: PathBuf,
    pub error: PathBuf,
}

impl SpoolLayout {
    pub fn new(
        outbox: impl Into<PathBuf>,
        sent: impl Into<PathBuf>,
        error: impl Into<PathBuf>,
    ) -> Self {
        Self {
            outbox: outbox.into(),
            sent: sent.into(),
            error: error.into(),
        }
    }

    pub fn from_config(config: &GammuConfig) -> Self {
        Self::new(
            config.outbox_path.clone(),
            config.sent_path.clone(),
            config.error_path.clone(),
        )
    }

    /// All three directories with a short label, for health checks.
    pub fn directories(&self) -> [(&'static str, &Path); 3] {
        [
            ("outbox", self.outbox.as_path()),
            ("sent", self.sent.as_path()),
            ("error", self.error.as_path()),
        ]
    }
}

/// Reduce a caller-supplied name to a single plain file name.
///
/// Leading directories are dropped. Returns `None` for empty names and for
/// any name with a `..` component or without a normal final component.
pub fn plain_file_name(name: &str) -> Option<&OsStr> {
    let mut last = None;
    for component in Path::new(name).components() {
        match component {
            Component::ParentDir => return None,
            Component::Normal(file) => last = Some(file),
            Component::RootDir | Component::CurDir | Component::Prefix(_) => {}
        }
    }
    last
}
