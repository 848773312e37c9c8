// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Address book CRUD operations.

use std::collections::HashMap;

use rusqlite::{params, OptionalExtension, Row};
use schicksms_core::validation::CONTACT_MIN_DIGITS;
use schicksms_core::{RecipientPolicy, SmsError, ValidationError};
use tracing::debug;

use crate::database::Database;
use crate::models::{Contact, ContactSaved, Page};

const CONTACT_COLUMNS: &str = "id, name, number, created_at, updated_at";

fn contact_from_row(row: &Row<'_>) -> rusqlite::Result<Contact> {
    Ok(Contact {
        id: row.get(0)?,
        name: row.get(1)?,
        number: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

/// Trim and check a name/number pair before it reaches the table.
fn validate_contact(name: &str, number: &str) -> Result<(String, String), ValidationError> {
    let name = name.trim();
    let number = number.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    RecipientPolicy::new(CONTACT_MIN_DIGITS).validate(number)?;
    Ok((name.to_string(), number.to_string()))
}

/// Contacts ordered by name, optionally filtered by a name or number substring.
pub async fn list_contacts(
    db: &Database,
    search: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Page<Contact>, SmsError> {
    let pattern = search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("%{s}%"));
    db.connection()
        .call(move |conn| {
            let total: i64 = conn.query_row(
                "SELECT COUNT(*) FROM contacts
                 WHERE ?1 IS NULL OR name LIKE ?1 OR number LIKE ?1",
                params![pattern],
                |row| row.get(0),
            )?;
            let mut stmt = conn.prepare(&format!(
                "SELECT {CONTACT_COLUMNS} FROM contacts
                 WHERE ?1 IS NULL OR name LIKE ?1 OR number LIKE ?1
                 ORDER BY name ASC, id ASC LIMIT ?2 OFFSET ?3"
            ))?;
            let rows = stmt.query_map(params![pattern, limit, offset], contact_from_row)?;
            let mut items = Vec::new();
            for row in rows {
                items.push(row?);
            }
            Ok(Page { items, total })
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a contact by exact number.
pub async fn find_by_number(db: &Database, number: &str) -> Result<Option<Contact>, SmsError> {
    let number = number.to_string();
    db.connection()
        .call(move |conn| {
            conn.query_row(
                &format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE number = ?1"),
                params![number],
                contact_from_row,
            )
            .optional()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Save a contact keyed by number.
///
/// An existing contact with the same number is renamed; otherwise a new row
/// is inserted.
pub async fn upsert_contact(
    db: &Database,
    name: &str,
    number: &str,
) -> Result<ContactSaved, SmsError> {
    let (name, number) = validate_contact(name, number)?;
    let saved = db
        .connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            let existing: Option<i64> = tx
                .query_row(
                    "SELECT id FROM contacts WHERE number = ?1",
                    params![number],
                    |row| row.get(0),
                )
                .optional()?;
            let saved = match existing {
                Some(id) => {
                    tx.execute(
                        "UPDATE contacts SET name = ?1, updated_at = CURRENT_TIMESTAMP WHERE id = ?2",
                        params![name, id],
                    )?;
                    ContactSaved { id, updated: true }
                }
                None => {
                    tx.execute(
                        "INSERT INTO contacts (name, number) VALUES (?1, ?2)",
                        params![name, number],
                    )?;
                    ContactSaved {
                        id: tx.last_insert_rowid(),
                        updated: false,
                    }
                }
            };
            tx.commit()?;
            Ok(saved)
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    debug!(id = saved.id, updated = saved.updated, "contact saved");
    Ok(saved)
}

enum UpdateOutcome {
    Updated,
    Missing,
    NumberTaken,
}

/// Change name and number of the contact with `id`.
///
/// Fails with [`ValidationError::DuplicateNumber`] if another contact already
/// uses `number`, and with [`SmsError::NotFound`] if `id` does not exist.
pub async fn update_contact(
    db: &Database,
    id: i64,
    name: &str,
    number: &str,
) -> Result<(), SmsError> {
    let (name, number) = validate_contact(name, number)?;
    let check_number = number.clone();
    let outcome = db
        .connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            let taken: Option<i64> = tx
                .query_row(
                    "SELECT id FROM contacts WHERE number = ?1 AND id != ?2",
                    params![number, id],
                    |row| row.get(0),
                )
                .optional()?;
            if taken.is_some() {
                return Ok(UpdateOutcome::NumberTaken);
            }
            let changed = tx.execute(
                "UPDATE contacts SET name = ?1, number = ?2, updated_at = CURRENT_TIMESTAMP
                 WHERE id = ?3",
                params![name, number, id],
            )?;
            tx.commit()?;
            Ok(if changed == 0 {
                UpdateOutcome::Missing
            } else {
                UpdateOutcome::Updated
            })
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    match outcome {
        UpdateOutcome::Updated => {
            debug!(id, "contact updated");
            Ok(())
        }
        UpdateOutcome::Missing => Err(SmsError::NotFound(format!("contact {id}"))),
        UpdateOutcome::NumberTaken => Err(ValidationError::DuplicateNumber {
            number: check_number,
        }
        .into()),
    }
}

/// Delete the contact with `id`.
pub async fn delete_contact(db: &Database, id: i64) -> Result<(), SmsError> {
    let deleted = db
        .connection()
        .call(move |conn| conn.execute("DELETE FROM contacts WHERE id = ?1", params![id]))
        .await
        .map_err(crate::database::map_tr_err)?;
    if deleted == 0 {
        return Err(SmsError::NotFound(format!("contact {id}")));
    }
    debug!(id, "contact deleted");
    Ok(())
}

/// Every contact as a `number -> name` map, ready to use as a
/// [`ContactLookup`](schicksms_core::ContactLookup).
pub async fn number_index(db: &Database) -> Result<HashMap<String, String>, SmsError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare("SELECT number, name FROM contacts")?;
            let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
            rows.collect::<Result<HashMap<String, String>, _>>()
        })
        .await
        .map_err(crate::database::map_tr_err)
}
