// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process runner backed by `tokio::process`.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use schicksms_core::{CommandError, CommandInvocation, CommandOutput, CommandRunner};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

/// Spawns real processes. No shell is involved unless argv names one.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioCommandRunner;

#[async_trait]
impl CommandRunner for TokioCommandRunner {
    async fn run(
        &self,
        invocation: &CommandInvocation,
        timeout: Duration,
    ) -> Result<CommandOutput, CommandError> {
        let program = invocation.program().to_string();
        let (_, args) = invocation
            .argv
            .split_first()
            .ok_or_else(|| CommandError::Spawn {
                program: program.clone(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty argv"),
            })?;

        let mut child = Command::new(&program)
            .args(args)
            .stdin(if invocation.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| CommandError::Spawn {
                program: program.clone(),
                source,
            })?;

        // Stdin is written from its own task while output is collected.
        if let (Some(mut pipe), Some(input)) = (child.stdin.take(), invocation.stdin.clone()) {
            let program = program.clone();
            tokio::spawn(async move {
                if let Err(e) = pipe.write_all(input.as_bytes()).await {
                    debug!(program = %program, error = %e, "stdin closed early");
                }
            });
        }

        // Dropping the wait future on timeout drops the child, which kills it.
        let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|source| CommandError::Spawn {
                program: program.clone(),
                source,
            })?,
            Err(_) => {
                warn!(program = %program, timeout_secs = timeout.as_secs(), "command timed out, killed");
                return Err(CommandError::Timeout { timeout });
            }
        };

        Ok(CommandOutput {
            argv: invocation.argv.clone(),
            stdin: invocation.stdin.clone(),
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> CommandInvocation {
        CommandInvocation::new(vec!["sh".into(), "-c".into(), script.into()])
    }

    #[tokio::test]
    async fn captures_stdout_and_exit_code() {
        let output = TokioCommandRunner
            .run(&sh("echo hello"), Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(output.stdout.trim(), "hello");
        assert!(output.success());
    }

    #[tokio::test]
    async fn non_zero_exit_is_still_ok() {
        let output = TokioCommandRunner
            .run(&sh("echo nope >&2; exit 3"), Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(output.exit_code, Some(3));
        assert_eq!(output.stderr.trim(), "nope");
    }

    #[tokio::test]
    async fn stdin_is_piped() {
        let invocation = CommandInvocation::new(vec!["cat".into()]).with_stdin("Grüße");
        let output = TokioCommandRunner
            .run(&invocation, Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(output.stdout, "Grüße");
    }

    #[tokio::test]
    async fn slow_process_times_out() {
        let err = TokioCommandRunner
            .run(&sh("sleep 5"), Duration::from_millis(100))
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::Timeout { .. }));
    }

    #[tokio::test]
    async fn missing_program_is_a_spawn_error() {
        let invocation = CommandInvocation::new(vec!["schicksms-no-such-binary".into()]);
        let err = TokioCommandRunner
            .run(&invocation, Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::Spawn { .. }));
    }
}
