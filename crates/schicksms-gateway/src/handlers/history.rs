// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Send log listing, archive flag, deletion and CSV export.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use schicksms_storage::queries::history::{delete_sms, list_history, set_archived};
use schicksms_storage::{export_csv, Page, SmsLogEntry};
use serde::Deserialize;

use super::{page_limit, Ack};
use crate::error::ApiError;
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 50;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
    #[serde(default)]
    pub archived: bool,
}

/// GET /v1/history
pub async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Page<SmsLogEntry>>, ApiError> {
    let page = list_history(
        &state.db,
        query.archived,
        page_limit(query.limit, DEFAULT_PAGE_SIZE),
        query.offset.unwrap_or(0).max(0),
    )
    .await?;
    Ok(Json(page))
}

/// POST /v1/history/{id}/archive
pub async fn archive(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Ack>, ApiError> {
    set_archived(&state.db, id, true).await?;
    Ok(Json(Ack::ok()))
}

/// POST /v1/history/{id}/unarchive
pub async fn unarchive(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Ack>, ApiError> {
    set_archived(&state.db, id, false).await?;
    Ok(Json(Ack::ok()))
}

/// DELETE /v1/history/{id}
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Ack>, ApiError> {
    delete_sms(&state.db, id).await?;
    Ok(Json(Ack::ok()))
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    /// Without a value both archived and active rows are exported.
    #[serde(default)]
    pub archived: Option<bool>,
}

/// GET /v1/history/export
pub async fn export(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let csv = export_csv(&state.db, query.archived).await?;
    let filename = format!(
        "sms_history_{}.csv",
        chrono::Local::now().format("%Y-%m-%d_%H-%M-%S")
    );
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    ))
}
