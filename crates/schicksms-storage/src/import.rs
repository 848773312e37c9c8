// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Import of the legacy JSON address book.
//!
//! The file is an array of `{"name": ..., "number": ...}` objects. Numbers
//! already in the table are left untouched.

use rusqlite::params;
use schicksms_core::{SmsError, ValidationError};
use serde_json::Value;
use tracing::info;

use crate::database::Database;
use crate::models::ImportSummary;

/// Name/number pairs from the JSON text. Entries without both are `None`.
fn parse_entries(json: &str) -> Result<Vec<Option<(String, String)>>, SmsError> {
    let entries: Vec<Value> =
        serde_json::from_str(json).map_err(|e| ValidationError::InvalidAddressBook {
            reason: e.to_string(),
        })?;

    Ok(entries
        .iter()
        .map(|entry| {
            let field = |key: &str| {
                entry
                    .get(key)
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(str::to_string)
            };
            Some((field("name")?, field("number")?))
        })
        .collect())
}

/// Insert every complete entry whose number is not yet known.
pub async fn import_address_book(db: &Database, json: &str) -> Result<ImportSummary, SmsError> {
    let entries = parse_entries(json)?;
    let total = entries.len();

    let summary = db
        .connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            let mut summary = ImportSummary {
                total,
                ..ImportSummary::default()
            };
            {
                let mut stmt =
                    tx.prepare("INSERT OR IGNORE INTO contacts (name, number) VALUES (?1, ?2)")?;
                for entry in entries {
                    let inserted = match entry {
                        Some((name, number)) => stmt.execute(params![name, number])? > 0,
                        None => false,
                    };
                    if inserted {
                        summary.imported += 1;
                    } else {
                        summary.skipped += 1;
                    }
                }
            }
            tx.commit()?;
            Ok(summary)
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    info!(
        imported = summary.imported,
        skipped = summary.skipped,
        total = summary.total,
        "address book imported"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::contacts::{find_by_number, list_contacts, upsert_contact};
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn imports_new_and_skips_known_or_incomplete() {
        let (db, _dir) = setup_db().await;
        upsert_contact(&db, "Oma", "+491701234567").await.unwrap();

        let json = r#"[
            {"name": "Oma Neu", "number": "+491701234567"},
            {"name": "Praxis", "number": "+4930123456"},
            {"name": "", "number": "+4930999999"},
            {"number": "+4930888888"},
            {"name": "Zahl", "number": 4930777777}
        ]"#;
        let summary = import_address_book(&db, json).await.unwrap();
        assert_eq!(
            summary,
            ImportSummary {
                imported: 1,
                skipped: 4,
                total: 5
            }
        );

        // Existing entries keep their name.
        let oma = find_by_number(&db, "+491701234567").await.unwrap().unwrap();
        assert_eq!(oma.name, "Oma");
        assert_eq!(list_contacts(&db, None, 50, 0).await.unwrap().total, 2);
    }

    #[tokio::test]
    async fn importing_twice_changes_nothing() {
        let (db, _dir) = setup_db().await;
        let json = r#"[{"name": "A", "number": "+4911111"}]"#;
        assert_eq!(import_address_book(&db, json).await.unwrap().imported, 1);
        let again = import_address_book(&db, json).await.unwrap();
        assert_eq!(again.imported, 0);
        assert_eq!(again.skipped, 1);
    }

    #[tokio::test]
    async fn non_array_is_rejected() {
        let (db, _dir) = setup_db().await;
        for malformed in [r#"{"name": "A"}"#, "not json"] {
            let err = import_address_book(&db, malformed).await.unwrap_err();
            assert!(matches!(
                err,
                SmsError::Validation(ValidationError::InvalidAddressBook { .. })
            ));
        }
        assert_eq!(
            import_address_book(&db, "[]").await.unwrap(),
            ImportSummary::default()
        );
    }
}
