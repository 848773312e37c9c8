// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sending, delivery status, spool history and segment counts.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use schicksms_core::{DeliveryStatus, SendMethod};
use schicksms_dispatch::{calculate_segments, SegmentInfo, SendOutcome};
use schicksms_spool::HistoryEntry;
use schicksms_storage::queries::{contacts::number_index, history::record_sent};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /v1/sms.
#[derive(Debug, Deserialize)]
pub struct SendRequest {
    pub recipient: String,
    pub message: String,
    /// Delivery method; the configured default when absent.
    #[serde(default)]
    pub method: Option<SendMethod>,
    /// Sender id written into spool files.
    #[serde(default)]
    pub sender: Option<String>,
}

/// POST /v1/sms
///
/// Always answers 200 with a [`SendOutcome`]; `success` tells the caller
/// whether the message was accepted. Accepted messages go into the send log.
pub async fn post_sms(
    State(state): State<AppState>,
    Json(body): Json<SendRequest>,
) -> Json<SendOutcome> {
    let method = body.method.unwrap_or(state.settings.default_method);
    let recipient = body.recipient.trim();

    let outcome = state
        .coordinator
        .send(recipient, &body.message, body.sender.as_deref(), method)
        .await;

    if outcome.success {
        if let Err(e) = record_sent(
            &state.db,
            recipient,
            &body.message,
            outcome.filename.as_deref(),
        )
        .await
        {
            warn!(error = %e, "message sent but not recorded in send log");
        }
    }
    Json(outcome)
}

/// Response body for GET /v1/sms/status/{filename}.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub filename: String,
    pub status: DeliveryStatus,
    /// Localized status label.
    pub label: &'static str,
}

/// GET /v1/sms/status/{filename}
pub async fn get_delivery_status(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Json<StatusResponse> {
    let status = state.reconciler.check_status(&filename);
    Json(StatusResponse {
        filename,
        status,
        label: status.label(),
    })
}

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Response body for GET /v1/sms/recent.
#[derive(Debug, Serialize)]
pub struct RecentResponse {
    pub messages: Vec<HistoryEntry>,
}

/// GET /v1/sms/recent
///
/// Messages the daemon has finished with, newest first, named from the
/// address book.
pub async fn get_recent(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<RecentResponse>, ApiError> {
    let limit = query.limit.unwrap_or(state.settings.recent_limit);
    let contacts = number_index(&state.db).await?;
    let records = state.history.list_recent(limit, &contacts).await?;
    let messages = records
        .iter()
        .map(|record| HistoryEntry::from_record(record, state.settings.preview_chars))
        .collect();
    Ok(Json(RecentResponse { messages }))
}

#[derive(Debug, Deserialize)]
pub struct SegmentsQuery {
    #[serde(default)]
    pub message: String,
}

/// GET /v1/sms/segments
pub async fn get_segments(
    State(state): State<AppState>,
    Query(query): Query<SegmentsQuery>,
) -> Json<SegmentInfo> {
    Json(calculate_segments(
        &query.message,
        state.settings.max_sms_length,
    ))
}
