// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Caller-selected delivery: spool file, injector command, or file first
//! with the command as fallback.

use std::sync::Arc;
use std::time::Duration;

use schicksms_core::{CommandError, DeliveryStatus, SendMethod, SmsError};
use schicksms_spool::{SpoolWriter, StatusReconciler};
use serde::Serialize;
use tracing::{info, warn};

use crate::injector::CommandDispatcher;

/// Result of one send request, as returned to the caller.
///
/// `method` is always the path that produced this result, which for
/// [`SendMethod::Both`] may be the fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DeliveryStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    pub method: SendMethod,
}

impl SendOutcome {
    fn failure(method: SendMethod, error: String) -> Self {
        Self {
            success: false,
            error: Some(error),
            filename: None,
            status: None,
            output: None,
            method,
        }
    }
}

/// Routes a message through the selected delivery method.
pub struct SendCoordinator {
    writer: SpoolWriter,
    reconciler: StatusReconciler,
    dispatcher: Arc<CommandDispatcher>,
    status_delay: Duration,
}

impl SendCoordinator {
    pub fn new(
        writer: SpoolWriter,
        reconciler: StatusReconciler,
        dispatcher: Arc<CommandDispatcher>,
        status_delay: Duration,
    ) -> Self {
        Self {
            writer,
            reconciler,
            dispatcher,
            status_delay,
        }
    }

    pub async fn send(
        &self,
        recipient: &str,
        body: &str,
        sender: Option<&str>,
        method: SendMethod,
    ) -> SendOutcome {
        match method {
            SendMethod::File => self.send_file(recipient, body, sender).await,
            SendMethod::Command => self.send_command(recipient, body).await,
            SendMethod::Both => {
                let outcome = self.send_file(recipient, body, sender).await;
                if outcome.success {
                    return outcome;
                }
                info!(
                    recipient,
                    error = outcome.error.as_deref().unwrap_or_default(),
                    "file method failed, falling back to injector"
                );
                self.send_command(recipient, body).await
            }
        }
    }

    async fn send_file(&self, recipient: &str, body: &str, sender: Option<&str>) -> SendOutcome {
        let writer = self.writer.clone();
        let (recipient_owned, body_owned) = (recipient.to_string(), body.to_string());
        let sender_owned = sender.map(str::to_string);
        let submitted = tokio::task::spawn_blocking(move || {
            writer.submit(&recipient_owned, &body_owned, sender_owned.as_deref())
        })
        .await
        .unwrap_or_else(|e| Err(SmsError::Internal(format!("spool write panicked: {e}"))));

        let handle = match submitted {
            Ok(handle) => handle,
            Err(e) => {
                if !matches!(e, SmsError::Validation(_)) {
                    warn!(recipient, error = %e, "file method failed");
                }
                return SendOutcome::failure(SendMethod::File, e.operator_message());
            }
        };

        if !self.status_delay.is_zero() {
            tokio::time::sleep(self.status_delay).await;
        }
        let status = self.reconciler.check_status(&handle.filename);

        SendOutcome {
            success: true,
            error: None,
            filename: Some(handle.filename),
            status: Some(status),
            output: None,
            method: SendMethod::File,
        }
    }

    async fn send_command(&self, recipient: &str, body: &str) -> SendOutcome {
        match self.dispatcher.dispatch_via_command(recipient, body).await {
            Ok(output) => SendOutcome {
                success: true,
                error: None,
                filename: None,
                status: None,
                output: Some(output.combined_text()),
                method: SendMethod::Command,
            },
            Err(e) => {
                let output = e.output().map(|o| o.combined_text());
                let mut outcome = SendOutcome::failure(SendMethod::Command, e.to_string());
                outcome.output = output.filter(|o| !o.is_empty());
                if let CommandError::Spawn { program, .. } = &e {
                    warn!(program = %program, "injector could not be started");
                }
                outcome
            }
        }
    }
}
