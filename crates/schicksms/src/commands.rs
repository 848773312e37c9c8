// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-shot CLI commands: `send`, `status`, `history`, `contacts import`.

use std::path::Path;
use std::sync::Arc;

use schicksms_config::SchickSmsConfig;
use schicksms_core::{SendMethod, SmsError};
use schicksms_dispatch::{SendOutcome, TokioCommandRunner};
use schicksms_gateway::AppState;
use schicksms_spool::{HistoryAggregator, HistoryEntry, SpoolLayout, StatusReconciler};
use schicksms_storage::queries::{contacts::number_index, history::record_sent};
use schicksms_storage::{import_address_book, Database};
use tracing::warn;

async fn open_database(config: &SchickSmsConfig) -> Result<Database, SmsError> {
    Database::open_with(&config.storage.database_path, config.storage.wal_mode).await
}

/// Send one message and print the outcome as JSON.
pub async fn run_send(
    config: &SchickSmsConfig,
    recipient: &str,
    message: &str,
    method: Option<SendMethod>,
    sender: Option<&str>,
) -> Result<SendOutcome, SmsError> {
    let db = open_database(config).await?;
    let state = AppState::from_config(config, Arc::new(TokioCommandRunner), db.clone());
    let method = method.unwrap_or(config.gammu.default_method);

    let outcome = state.coordinator.send(recipient, message, sender, method).await;
    let rendered = serde_json::to_string_pretty(&outcome)
        .map_err(|e| SmsError::Internal(format!("failed to render outcome: {e}")))?;
    println!("{rendered}");

    // Already handed off: a failed log write is not a failed send.
    if outcome.success {
        if let Err(e) = record_sent(&db, recipient, message, outcome.filename.as_deref()).await {
            warn!(error = %e, "message sent but not recorded in the send log");
        }
    }
    if let Err(e) = db.close().await {
        warn!(error = %e, "failed to close database after send");
    }
    Ok(outcome)
}

/// Print where a spool file currently is.
pub fn run_status(config: &SchickSmsConfig, filename: &str) {
    let reconciler = StatusReconciler::new(SpoolLayout::from_config(&config.gammu));
    let status = reconciler.check_status(filename);
    println!("{filename}: {} ({status})", status.label());
}

fn history_line(entry: &HistoryEntry) -> String {
    format!(
        "{:<19}  {:<8}  {:<32}  {}",
        entry.date, entry.status, entry.recipient, entry.message
    )
}

/// Print the most recent finished messages.
pub async fn run_history(config: &SchickSmsConfig, limit: Option<usize>) -> Result<(), SmsError> {
    let db = open_database(config).await?;
    let contacts = number_index(&db).await?;
    db.close().await?;

    let history = HistoryAggregator::new(SpoolLayout::from_config(&config.gammu));
    let limit = limit.unwrap_or(config.history.recent_limit);
    let records = history.list_recent(limit, &contacts).await?;

    if records.is_empty() {
        println!("No messages in sent or error.");
        return Ok(());
    }
    for record in &records {
        let entry = HistoryEntry::from_record(record, config.history.preview_chars);
        println!("{}", history_line(&entry));
    }
    Ok(())
}

/// Import a legacy JSON address book.
pub async fn run_import(config: &SchickSmsConfig, file: &Path) -> Result<(), SmsError> {
    let json = tokio::fs::read_to_string(file)
        .await
        .map_err(|e| SmsError::io(format!("failed to read {}", file.display()), e))?;

    let db = open_database(config).await?;
    let summary = import_address_book(&db, &json).await?;
    db.close().await?;

    println!(
        "Imported {} of {} contacts ({} skipped).",
        summary.imported, summary.total, summary.skipped
    );
    Ok(())
}
