// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for SchickSMS.
//!
//! This crate provides the error taxonomy, the shared data types, input
//! validation, and the collaborator traits used throughout the workspace.

pub mod error;
pub mod traits;
pub mod types;
pub mod validation;

// Re-export key items at crate root for ergonomic imports.
pub use error::{CommandError, DecodeError, SmsError, ValidationError};
pub use traits::{CommandRunner, ContactLookup, NoContacts};
pub use types::{
    CommandInvocation, CommandOutput, DeliveryRecord, DeliveryStatus, HealthStatus,
    OutgoingMessage, SendMethod, SpoolFileHandle, NO_MESSAGE, UNKNOWN,
};
pub use validation::{validate_body, validate_message, RecipientPolicy};
