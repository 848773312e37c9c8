// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Send log operations.
//!
//! The log only records what the console submitted. Actual delivery is
//! observed through the spool directories, not stored here.

use rusqlite::{params, Row};
use schicksms_core::SmsError;
use tracing::debug;

use crate::database::Database;
use crate::models::{
    success_rate, DailyCount, Page, SmsLogEntry, SmsStatistics, STATUS_FAILED, STATUS_SENT,
};

const LOG_COLUMNS: &str = "id, recipient, message, status, sent_at, filename, archived";

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<SmsLogEntry> {
    Ok(SmsLogEntry {
        id: row.get(0)?,
        recipient: row.get(1)?,
        message: row.get(2)?,
        status: row.get(3)?,
        sent_at: row.get(4)?,
        filename: row.get(5)?,
        archived: row.get(6)?,
    })
}

/// Append a row and return its id. `sent_at` is set by the database.
pub async fn insert_sms(
    db: &Database,
    recipient: &str,
    message: &str,
    status: &str,
    filename: Option<&str>,
) -> Result<i64, SmsError> {
    let recipient = recipient.to_string();
    let message = message.to_string();
    let status = status.to_string();
    let filename = filename.map(str::to_string);
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO sms_history (recipient, message, status, filename)
                 VALUES (?1, ?2, ?3, ?4)",
                params![recipient, message, status, filename],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Record a successful send.
pub async fn record_sent(
    db: &Database,
    recipient: &str,
    message: &str,
    filename: Option<&str>,
) -> Result<i64, SmsError> {
    insert_sms(db, recipient, message, STATUS_SENT, filename).await
}

/// Newest first, filtered by the archive flag.
pub async fn list_history(
    db: &Database,
    archived: bool,
    limit: i64,
    offset: i64,
) -> Result<Page<SmsLogEntry>, SmsError> {
    db.connection()
        .call(move |conn| {
            let total: i64 = conn.query_row(
                "SELECT COUNT(*) FROM sms_history WHERE archived = ?1",
                params![archived],
                |row| row.get(0),
            )?;
            let mut stmt = conn.prepare(&format!(
                "SELECT {LOG_COLUMNS} FROM sms_history WHERE archived = ?1
                 ORDER BY sent_at DESC, id DESC LIMIT ?2 OFFSET ?3"
            ))?;
            let rows = stmt.query_map(params![archived, limit, offset], entry_from_row)?;
            let mut items = Vec::new();
            for row in rows {
                items.push(row?);
            }
            Ok(Page { items, total })
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Set or clear the archive flag of one row.
pub async fn set_archived(db: &Database, id: i64, archived: bool) -> Result<(), SmsError> {
    let changed = db
        .connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE sms_history SET archived = ?1 WHERE id = ?2",
                params![archived, id],
            )
        })
        .await
        .map_err(crate::database::map_tr_err)?;
    if changed == 0 {
        return Err(SmsError::NotFound(format!("message {id}")));
    }
    debug!(id, archived, "send log entry archive flag changed");
    Ok(())
}

/// Remove one row.
pub async fn delete_sms(db: &Database, id: i64) -> Result<(), SmsError> {
    let deleted = db
        .connection()
        .call(move |conn| conn.execute("DELETE FROM sms_history WHERE id = ?1", params![id]))
        .await
        .map_err(crate::database::map_tr_err)?;
    if deleted == 0 {
        return Err(SmsError::NotFound(format!("message {id}")));
    }
    debug!(id, "send log entry deleted");
    Ok(())
}

/// Counts over the whole log, plus per-day counts for the last seven days.
pub async fn statistics(db: &Database) -> Result<SmsStatistics, SmsError> {
    db.connection()
        .call(|conn| {
            let (total, success, failed): (i64, i64, i64) = conn.query_row(
                "SELECT COUNT(*),
                        COALESCE(SUM(status = ?1), 0),
                        COALESCE(SUM(status = ?2), 0)
                 FROM sms_history",
                params![STATUS_SENT, STATUS_FAILED],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )?;

            let mut stmt = conn.prepare(
                "SELECT date(sent_at) AS day, COUNT(*) FROM sms_history
                 WHERE sent_at >= date('now', '-7 days')
                 GROUP BY day ORDER BY day",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok(DailyCount {
                    date: row.get(0)?,
                    count: row.get(1)?,
                })
            })?;
            let mut daily = Vec::new();
            for row in rows {
                daily.push(row?);
            }

            Ok(SmsStatistics {
                total,
                success,
                failed,
                success_rate: success_rate(success, total),
                daily,
            })
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Rows for export, newest first. `None` exports both archived and active rows.
pub async fn export_rows(
    db: &Database,
    archived: Option<bool>,
) -> Result<Vec<SmsLogEntry>, SmsError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {LOG_COLUMNS} FROM sms_history
                 WHERE ?1 IS NULL OR archived = ?1
                 ORDER BY sent_at DESC, id DESC"
            ))?;
            let rows = stmt.query_map(params![archived], entry_from_row)?;
            let mut items = Vec::new();
            for row in rows {
                items.push(row?);
            }
            Ok(items)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
