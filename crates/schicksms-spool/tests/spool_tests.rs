// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests over a temporary spool tree.

use std::collections::HashMap;

use schicksms_core::{DeliveryStatus, NoContacts, NO_MESSAGE, UNKNOWN};
use schicksms_spool::{HistoryAggregator, HistoryEntry, SpoolLayout, SpoolWriter, StatusReconciler};
use schicksms_test_utils::{SpoolDir, SpoolFixture};

fn layout(fixture: &SpoolFixture) -> SpoolLayout {
    SpoolLayout::from_config(&fixture.gammu_config())
}

#[test]
fn body_after_header_is_byte_identical() {
    let fixture = SpoolFixture::new();
    let writer = SpoolWriter::from_config(&fixture.gammu_config());

    for body in [
        "Hallo",
        "Grüße aus Köln 🚀",
        "line one\nline two\r\n",
        "  leading and trailing  ",
        "quotes ' \" and $(shell) `stuff`",
    ] {
        let handle = writer.submit("+491701234567", body, None).unwrap();
        let bytes = std::fs::read(&handle.path).unwrap();
        let header = b"To: +491701234567\nAlphabet: UTF-8\nCoding: Default_No_Compression\n\n";
        assert!(bytes.starts_with(header));
        assert_eq!(&bytes[header.len()..], body.as_bytes());
    }
}

#[test]
fn rejected_recipients_never_touch_the_outbox() {
    let fixture = SpoolFixture::new();
    let writer = SpoolWriter::from_config(&fixture.gammu_config());

    for recipient in ["+49123; rm -rf /", "491701234567", "+4917", "", "+49 170 1234567"] {
        assert!(writer.submit(recipient, "hi", None).is_err());
    }
    assert!(fixture.list(SpoolDir::Outbox).is_empty());
}

#[test]
fn submitted_file_is_queued_until_the_daemon_moves_it() {
    let fixture = SpoolFixture::new();
    let writer = SpoolWriter::from_config(&fixture.gammu_config());
    let reconciler = StatusReconciler::new(layout(&fixture));

    let handle = writer.submit("+491701234567", "hi", None).unwrap();
    assert_eq!(reconciler.check_status(&handle.filename), DeliveryStatus::Queued);

    std::fs::rename(&handle.path, fixture.error().join(&handle.filename)).unwrap();
    assert_eq!(reconciler.check_status(&handle.filename), DeliveryStatus::Error);

    std::fs::remove_file(fixture.error().join(&handle.filename)).unwrap();
    assert_eq!(reconciler.check_status(&handle.filename), DeliveryStatus::Unknown);
}

#[tokio::test]
async fn list_recent_respects_limit_across_both_directories() {
    let fixture = SpoolFixture::new();
    for i in 0..50 {
        let which = if i % 2 == 0 { SpoolDir::Sent } else { SpoolDir::Error };
        fixture.write_backup(
            which,
            &format!("OUT{i:02}.smsbackup"),
            Some("+491701234567"),
            Some(&format!("202502{:02}T1200{:02}Z", 1 + i / 10, i % 60)),
            Some("Hello"),
        );
    }

    let aggregator = HistoryAggregator::new(layout(&fixture));
    let records = aggregator.list_recent(5, &NoContacts).await.unwrap();
    assert_eq!(records.len(), 5);
    assert_eq!(records[0].filename, "OUT49.smsbackup");
    assert_eq!(records[0].status, DeliveryStatus::Error);
    assert_eq!(records[1].filename, "OUT48.smsbackup");
    assert_eq!(records[1].status, DeliveryStatus::Sent);
}

#[tokio::test]
async fn later_timestamp_comes_first() {
    let fixture = SpoolFixture::new();
    fixture.write_backup(
        SpoolDir::Sent,
        "early.smsbackup",
        Some("+491701234567"),
        Some("20250213T083000Z"),
        Some("first"),
    );
    fixture.write_backup(
        SpoolDir::Sent,
        "late.smsbackup",
        Some("+491701234567"),
        Some("20250213T183445Z"),
        Some("second"),
    );

    let records = HistoryAggregator::new(layout(&fixture))
        .list_recent(10, &NoContacts)
        .await
        .unwrap();
    let names: Vec<_> = records.iter().map(|r| r.filename.as_str()).collect();
    assert_eq!(names, ["late.smsbackup", "early.smsbackup"]);
}

#[tokio::test]
async fn contacts_and_sentinels_are_applied() {
    let fixture = SpoolFixture::new();
    fixture.write_backup(
        SpoolDir::Sent,
        "known.smsbackup",
        Some("+491701234567"),
        Some("20250213T183445Z"),
        Some("Hello"),
    );
    fixture.write_backup(SpoolDir::Error, "anon.smsbackup", None, None, None);
    fixture.write_raw(SpoolDir::Error, "empty.smsbackup", "");
    fixture.write_raw(SpoolDir::Sent, "ignored.txt", "Number = \"+1\"\n");

    let mut book = HashMap::new();
    book.insert("+491701234567".to_string(), "Oma".to_string());

    let records = HistoryAggregator::new(layout(&fixture))
        .list_recent(10, &book)
        .await
        .unwrap();
    assert_eq!(records.len(), 3);

    let known = records.iter().find(|r| r.filename == "known.smsbackup").unwrap();
    assert_eq!(known.message, "Hello");
    assert_eq!(known.display_recipient(), "Oma (+491701234567)");

    for name in ["anon.smsbackup", "empty.smsbackup"] {
        let record = records.iter().find(|r| r.filename == name).unwrap();
        assert_eq!(record.recipient_number, UNKNOWN);
        assert_eq!(record.message, NO_MESSAGE);
        assert_eq!(record.date, UNKNOWN);
        assert_eq!(record.status, DeliveryStatus::Error);
    }

    let entry = HistoryEntry::from_record(known, 30);
    assert_eq!(entry.status, "Gesendet");
}

#[tokio::test]
async fn missing_directories_yield_an_empty_history() {
    let fixture = SpoolFixture::new();
    let layout = SpoolLayout::new(
        fixture.outbox(),
        fixture.root().join("missing-sent"),
        fixture.root().join("missing-error"),
    );
    let records = HistoryAggregator::new(layout)
        .list_recent(10, &NoContacts)
        .await
        .unwrap();
    assert!(records.is_empty());
}
