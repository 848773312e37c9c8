// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Delivery status from directory membership.
//!
//! The daemon moves each spool file from the outbox into either `sent` or
//! `error`. Nothing is tracked locally; every check looks at the directories
//! again, so a file moved mid-check simply shows up as its new state on the
//! next call, or as `Unknown` if it was missed in both places.

use schicksms_core::DeliveryStatus;
use tracing::debug;

use crate::layout::{plain_file_name, SpoolLayout};

/// Read-only observer of the spool directories.
#[derive(Debug, Clone)]
pub struct StatusReconciler {
    layout: SpoolLayout,
}

impl StatusReconciler {
    pub fn new(layout: SpoolLayout) -> Self {
        Self { layout }
    }

    /// Outbox first, then error, then sent.
    pub fn check_status(&self, filename: &str) -> DeliveryStatus {
        let Some(name) = plain_file_name(filename) else {
            debug!(filename, "status requested for unusable file name");
            return DeliveryStatus::Unknown;
        };

        let status = if self.layout.outbox.join(name).exists() {
            DeliveryStatus::Queued
        } else if self.layout.error.join(name).exists() {
            DeliveryStatus::Error
        } else if self.layout.sent.join(name).exists() {
            DeliveryStatus::Sent
        } else {
            DeliveryStatus::Unknown
        };

        debug!(filename, %status, "spool status checked");
        status
    }
}
