// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Liveness and the system status page.

use axum::{extract::State, Json};
use schicksms_core::HealthStatus;
use schicksms_dispatch::{DaemonStatus, ModemStatus, SystemInfo};
use schicksms_storage::queries::history::statistics;
use schicksms_storage::SmsStatistics;
use serde::Serialize;
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// GET /health
///
/// Unauthenticated; reports only that the process is serving.
pub async fn get_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// Response body for GET /v1/status.
#[derive(Debug, Serialize)]
pub struct SystemStatusResponse {
    /// `healthy`, `degraded: <reason>` or `unhealthy: <reason>`.
    pub health: String,
    pub daemon: DaemonStatus,
    pub modem: ModemStatus,
    pub statistics: SmsStatistics,
    pub system: SystemInfo,
}

pub(crate) fn health_label(health: &HealthStatus) -> String {
    match health {
        HealthStatus::Healthy => "healthy".to_string(),
        HealthStatus::Degraded(reason) => format!("degraded: {reason}"),
        HealthStatus::Unhealthy(reason) => format!("unhealthy: {reason}"),
    }
}

/// GET /v1/status
pub async fn get_system_status(
    State(state): State<AppState>,
) -> Result<Json<SystemStatusResponse>, ApiError> {
    let (daemon, modem) = tokio::join!(state.health.daemon_status(), state.health.modem_status());
    let statistics = statistics(&state.db).await?;
    let system = tokio::task::spawn_blocking(SystemInfo::collect)
        .await
        .unwrap_or_else(|e| {
            warn!(error = %e, "host information collection failed");
            SystemInfo::unavailable()
        });
    Ok(Json(SystemStatusResponse {
        health: health_label(&modem.health(&daemon)),
        daemon,
        modem,
        statistics,
        system,
    }))
}
