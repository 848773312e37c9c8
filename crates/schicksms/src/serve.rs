// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `schicksms serve` command implementation.
//!
//! Opens the database, wires the real process runner into the gateway and
//! serves until SIGINT or SIGTERM.

use std::sync::Arc;

use schicksms_config::SchickSmsConfig;
use schicksms_core::SmsError;
use schicksms_dispatch::TokioCommandRunner;
use schicksms_gateway::{start_server, AppState};
use schicksms_spool::SpoolLayout;
use schicksms_storage::Database;
use tracing::{info, warn};

/// Run the HTTP API until a shutdown signal arrives.
pub async fn run_serve(config: SchickSmsConfig) -> Result<(), SmsError> {
    info!(
        name = %config.app.name,
        method = %config.gammu.default_method,
        "starting SchickSMS"
    );

    // Missing directories are reported, never created.
    let layout = SpoolLayout::from_config(&config.gammu);
    for (name, dir) in layout.directories() {
        if !dir.is_dir() {
            warn!(directory = name, path = %dir.display(), "spool directory does not exist");
        }
    }

    let db = Database::open_with(&config.storage.database_path, config.storage.wal_mode).await?;
    let state = AppState::from_config(&config, Arc::new(TokioCommandRunner), db.clone());

    start_server(&config.gateway, state, shutdown_signal()).await?;

    db.close().await?;
    info!("shutdown complete");
    Ok(())
}

/// Resolves on SIGINT, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => info!("received SIGINT (Ctrl+C), initiating shutdown"),
                    _ = sigterm.recv() => info!("received SIGTERM, initiating shutdown"),
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler, waiting for Ctrl+C only");
                let _ = ctrl_c.await;
                info!("received SIGINT (Ctrl+C), initiating shutdown");
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = ctrl_c.await;
        info!("received Ctrl+C, initiating shutdown");
    }
}
