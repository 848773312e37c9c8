// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fake process runner for deterministic testing.
//!
//! `FakeRunner` implements `CommandRunner` without spawning anything. Results
//! are popped from a FIFO script; every invocation is recorded so tests can
//! assert on argv and stdin.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use schicksms_core::{CommandError, CommandInvocation, CommandOutput, CommandRunner};

/// One scripted outcome.
#[derive(Debug, Clone)]
pub enum Scripted {
    /// The process ran and exited with `code`.
    Exit {
        code: i32,
        stdout: String,
        stderr: String,
    },
    /// The process outlived its timeout.
    Timeout,
    /// The program could not be started.
    SpawnFailure(String),
}

impl Scripted {
    /// Exit 0 with the given stdout.
    pub fn ok(stdout: &str) -> Self {
        Scripted::Exit {
            code: 0,
            stdout: stdout.to_string(),
            stderr: String::new(),
        }
    }

    /// Non-zero exit with the given stderr.
    pub fn fail(code: i32, stderr: &str) -> Self {
        Scripted::Exit {
            code,
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }
}

/// A `CommandRunner` that replays a script.
///
/// When the script is empty every call exits 0 with empty output.
pub struct FakeRunner {
    script: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<CommandInvocation>>,
    delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::with_script(Vec::new())
    }

    pub fn with_script(script: Vec<Scripted>) -> Self {
        Self {
            script: Mutex::new(VecDeque::from(script)),
            calls: Mutex::new(Vec::new()),
            delay: Duration::ZERO,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Make every call take `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub async fn push(&self, outcome: Scripted) {
        self.script.lock().await.push_back(outcome);
    }

    /// Every invocation seen so far, in call order.
    pub async fn calls(&self) -> Vec<CommandInvocation> {
        self.calls.lock().await.clone()
    }

    /// Highest number of calls that were running at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl Default for FakeRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(
        &self,
        invocation: &CommandInvocation,
        timeout: Duration,
    ) -> Result<CommandOutput, CommandError> {
        self.calls.lock().await.push(invocation.clone());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let outcome = self.script.lock().await.pop_front();
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match outcome.unwrap_or_else(|| Scripted::ok("")) {
            Scripted::Exit {
                code,
                stdout,
                stderr,
            } => Ok(CommandOutput {
                argv: invocation.argv.clone(),
                stdin: invocation.stdin.clone(),
                exit_code: Some(code),
                stdout,
                stderr,
            }),
            Scripted::Timeout => Err(CommandError::Timeout { timeout }),
            Scripted::SpawnFailure(message) => Err(CommandError::Spawn {
                program: invocation.program().to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, message),
            }),
        }
    }
}
