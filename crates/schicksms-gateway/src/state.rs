// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared state for the request handlers.

use std::sync::Arc;
use std::time::Instant;

use schicksms_config::SchickSmsConfig;
use schicksms_core::{CommandRunner, SendMethod};
use schicksms_dispatch::{CommandDispatcher, HealthMonitor, SendCoordinator};
use schicksms_spool::{HistoryAggregator, SpoolLayout, SpoolWriter, StatusReconciler};
use schicksms_storage::Database;

/// Values the handlers read from configuration.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub default_method: SendMethod,
    pub max_sms_length: usize,
    pub recent_limit: usize,
    pub preview_chars: usize,
}

impl ApiSettings {
    pub fn from_config(config: &SchickSmsConfig) -> Self {
        Self {
            default_method: config.gammu.default_method,
            max_sms_length: config.gammu.max_sms_length,
            recent_limit: config.history.recent_limit,
            preview_chars: config.history.preview_chars,
        }
    }
}

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    pub coordinator: Arc<SendCoordinator>,
    pub reconciler: StatusReconciler,
    pub history: HistoryAggregator,
    pub health: Arc<HealthMonitor>,
    pub db: Database,
    pub settings: ApiSettings,
    /// Process start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    /// Wire every component from configuration around one command runner.
    pub fn from_config(
        config: &SchickSmsConfig,
        runner: Arc<dyn CommandRunner>,
        db: Database,
    ) -> Self {
        let gammu = &config.gammu;
        let layout = SpoolLayout::from_config(gammu);
        let reconciler = StatusReconciler::new(layout.clone());
        let dispatcher = Arc::new(CommandDispatcher::new(runner.clone(), gammu));
        let coordinator = SendCoordinator::new(
            SpoolWriter::from_config(gammu),
            reconciler.clone(),
            dispatcher,
            gammu.status_check_delay(),
        );

        Self {
            coordinator: Arc::new(coordinator),
            reconciler,
            history: HistoryAggregator::new(layout),
            health: Arc::new(HealthMonitor::new(runner, gammu)),
            db,
            settings: ApiSettings::from_config(config),
            start_time: Instant::now(),
        }
    }
}
