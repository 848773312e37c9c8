// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator seams.
//!
//! External processes and the address book sit behind these traits so the
//! core logic can be exercised with fakes.

pub mod contacts;
pub mod runner;

pub use contacts::{ContactLookup, NoContacts};
pub use runner::CommandRunner;
