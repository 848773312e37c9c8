// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Address book lookup used to decorate history records.

use std::collections::HashMap;

/// Resolves a phone number to a friendly name by exact match.
pub trait ContactLookup: Send + Sync {
    fn name_for(&self, number: &str) -> Option<String>;
}

/// Lookup that never matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContacts;

impl ContactLookup for NoContacts {
    fn name_for(&self, _number: &str) -> Option<String> {
        None
    }
}

impl ContactLookup for HashMap<String, String> {
    fn name_for(&self, number: &str) -> Option<String> {
        self.get(number).cloned()
    }
}
