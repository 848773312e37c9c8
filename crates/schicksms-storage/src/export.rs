// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! CSV export of the send log.
//!
//! The output opens cleanly in spreadsheet tools that expect a UTF-8 BOM,
//! with German column titles.

use schicksms_core::SmsError;

use crate::database::Database;
use crate::models::SmsLogEntry;
use crate::queries::history::export_rows;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Column titles of the export.
pub const CSV_HEADER: [&str; 7] = [
    "ID",
    "Empfänger",
    "Nachricht",
    "Status",
    "Gesendet am",
    "Dateiname",
    "Archiviert",
];

/// Render `entries` as CSV bytes with a leading BOM and header row.
pub fn render_csv(entries: &[SmsLogEntry]) -> Result<Vec<u8>, SmsError> {
    let mut writer = csv::Writer::from_writer(UTF8_BOM.to_vec());
    writer.write_record(CSV_HEADER).map_err(csv_err)?;
    for entry in entries {
        let id = entry.id.to_string();
        writer
            .write_record([
                id.as_str(),
                entry.recipient.as_str(),
                entry.message.as_str(),
                entry.status.as_str(),
                entry.sent_at.as_str(),
                entry.filename.as_deref().unwrap_or(""),
                if entry.archived { "Ja" } else { "Nein" },
            ])
            .map_err(csv_err)?;
    }
    writer
        .into_inner()
        .map_err(|e| SmsError::io("failed to finish CSV export", e.into_error()))
}

/// Load and render the send log. `None` exports every row.
pub async fn export_csv(db: &Database, archived: Option<bool>) -> Result<Vec<u8>, SmsError> {
    let rows = export_rows(db, archived).await?;
    tracing::debug!(rows = rows.len(), ?archived, "exporting send log");
    render_csv(&rows)
}

fn csv_err(e: csv::Error) -> SmsError {
    SmsError::Internal(format!("failed to write CSV: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, message: &str, archived: bool) -> SmsLogEntry {
        SmsLogEntry {
            id,
            recipient: "+491701234567".into(),
            message: message.into(),
            status: "Gesendet".into(),
            sent_at: "2025-02-13 18:34:45".into(),
            filename: None,
            archived,
        }
    }

    #[test]
    fn starts_with_bom_and_german_header() {
        let bytes = render_csv(&[]).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));
        let text = std::str::from_utf8(&bytes[UTF8_BOM.len()..]).unwrap();
        assert_eq!(
            text,
            "ID,Empfänger,Nachricht,Status,Gesendet am,Dateiname,Archiviert\n"
        );
    }

    #[test]
    fn rows_quote_commas_and_translate_flag() {
        let bytes = render_csv(&[entry(1, "Hallo, Welt", false), entry(2, "x", true)]).unwrap();
        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines[1],
            "1,+491701234567,\"Hallo, Welt\",Gesendet,2025-02-13 18:34:45,,Nein"
        );
        assert!(lines[2].ends_with(",Ja"));
    }
}
