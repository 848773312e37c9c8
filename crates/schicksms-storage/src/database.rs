// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All reads and writes go through tokio-rusqlite's single background thread.
//! Do NOT create additional Connection instances for writes.

use std::path::Path;

use schicksms_core::SmsError;
use tracing::{debug, info};

use crate::migrations::run_migrations;

/// Convert a tokio-rusqlite error into `SmsError::Storage`.
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> SmsError {
    SmsError::Storage {
        source: Box::new(e),
    }
}

/// Handle to the SchickSMS SQLite database.
#[derive(Clone)]
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open with WAL mode enabled.
    pub async fn open(path: &str) -> Result<Self, SmsError> {
        Self::open_with(path, true).await
    }

    /// Open (creating the file and its directory if needed), migrate, and
    /// apply connection PRAGMAs.
    pub async fn open_with(path: &str, wal_mode: bool) -> Result<Self, SmsError> {
        if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| SmsError::io(format!("failed to create {}", parent.display()), e))?;
        }

        // Migrations need `&mut Connection`; run them on a plain connection
        // before handing the file to the background thread.
        let migrate_path = path.to_string();
        tokio::task::spawn_blocking(move || -> Result<(), SmsError> {
            let mut conn = rusqlite::Connection::open(&migrate_path).map_err(|e| SmsError::Storage {
                source: Box::new(e),
            })?;
            run_migrations(&mut conn)
        })
        .await
        .map_err(|e| SmsError::Internal(format!("migration task panicked: {e}")))??;

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(|e| SmsError::Storage {
                source: Box::new(e),
            })?;

        conn.call(move |conn| {
            if wal_mode {
                conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| {
                    row.get::<_, String>(0)
                })?;
            }
            conn.pragma_update(None, "synchronous", "NORMAL")?;
            conn.pragma_update(None, "foreign_keys", "ON")?;
            conn.pragma_update(None, "busy_timeout", 5000)?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        info!(path, wal_mode, "database opened");
        Ok(Self { conn })
    }

    /// The shared background connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Cheap liveness query for health checks.
    pub async fn ping(&self) -> Result<(), SmsError> {
        self.conn
            .call(|conn| conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0)))
            .await
            .map_err(map_tr_err)?;
        Ok(())
    }

    /// Close the background connection, flushing the WAL.
    pub async fn close(self) -> Result<(), SmsError> {
        self.conn.close().await.map_err(map_tr_err)?;
        debug!("database closed");
        Ok(())
    }
}
