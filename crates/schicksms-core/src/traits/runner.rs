// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! External process capability.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::CommandError;
use crate::types::{CommandInvocation, CommandOutput};

/// Runs an external process to completion.
///
/// Implementations must return `Ok` for any process that ran and exited,
/// whatever its exit code; interpreting the exit code is the caller's job.
/// `CommandError::Timeout` is returned when `timeout` elapses first.
#[async_trait]
pub trait CommandRunner: Send + Sync + 'static {
    async fn run(
        &self,
        invocation: &CommandInvocation,
        timeout: Duration,
    ) -> Result<CommandOutput, CommandError>;
}
