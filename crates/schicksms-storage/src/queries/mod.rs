// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query modules for the address book and the send log.

pub mod contacts;
pub mod history;
