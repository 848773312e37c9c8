// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Direct delivery through `gammu-smsd-inject`.
//!
//! The injector is called as `<injector_command...> TEXT <recipient>` with
//! the message on standard input. Exit code 0 means the daemon accepted the
//! message for queueing, not that it was delivered.

use std::sync::Arc;
use std::time::Duration;

use schicksms_config::model::GammuConfig;
use schicksms_core::{
    validate_message, CommandError, CommandInvocation, CommandOutput, CommandRunner,
    RecipientPolicy,
};
use tokio::sync::Semaphore;
use tracing::{debug, error, info};

use crate::shell::render_command_line;

/// Runs the injector with bounded time and bounded concurrency.
pub struct CommandDispatcher {
    runner: Arc<dyn CommandRunner>,
    injector: Vec<String>,
    use_shell: bool,
    timeout: Duration,
    policy: RecipientPolicy,
    permits: Semaphore,
}

impl CommandDispatcher {
    pub fn new(runner: Arc<dyn CommandRunner>, config: &GammuConfig) -> Self {
        Self {
            runner,
            injector: config.injector_command.clone(),
            use_shell: config.use_shell,
            timeout: config.command_timeout(),
            policy: config.recipient_policy(),
            permits: Semaphore::new(config.max_concurrent_dispatches.max(1)),
        }
    }

    /// The exact process invocation for a message.
    ///
    /// With `use_shell` the argv is flattened into one quoted line for
    /// `sh -c`; the body still travels on stdin and never appears in it.
    pub fn build_invocation(&self, recipient: &str, body: &str) -> CommandInvocation {
        let mut argv = self.injector.clone();
        argv.push("TEXT".to_string());
        argv.push(recipient.to_string());

        let argv = if self.use_shell {
            vec!["sh".to_string(), "-c".to_string(), render_command_line(&argv)]
        } else {
            argv
        };
        CommandInvocation::new(argv).with_stdin(body)
    }

    /// Validate, then run the injector once. Never retries.
    pub async fn dispatch_via_command(
        &self,
        recipient: &str,
        body: &str,
    ) -> Result<CommandOutput, CommandError> {
        if let Err(e) = validate_message(&self.policy, recipient, body) {
            debug!(recipient, error = %e, "dispatch rejected");
            return Err(e.into());
        }

        let invocation = self.build_invocation(recipient, body);

        // The semaphore is owned here and never closed.
        let _permit = self.permits.acquire().await.ok();
        debug!(argv = ?invocation.argv, "running injector");

        let output = self
            .runner
            .run(&invocation, self.timeout)
            .await
            .inspect_err(|e| error!(recipient, error = %e, "injector did not complete"))?;

        if output.success() {
            info!(recipient, output = %output.combined_text(), "injector accepted message");
            Ok(output)
        } else {
            error!(
                recipient,
                exit_code = ?output.exit_code,
                stdout = %output.stdout.trim(),
                stderr = %output.stderr.trim(),
                "injector failed"
            );
            Err(CommandError::Failed { output })
        }
    }
}
