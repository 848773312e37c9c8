// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests that run the `schicksms` binary against a temporary
//! spool tree and database.

use std::path::PathBuf;
use std::process::{Command, Output};

use schicksms_test_utils::{SpoolDir, SpoolFixture};

struct Harness {
    fixture: SpoolFixture,
    _db_dir: tempfile::TempDir,
    config_path: PathBuf,
}

impl Harness {
    fn new() -> Self {
        let fixture = SpoolFixture::new();
        let db_dir = tempfile::tempdir().unwrap();
        let config_path = db_dir.path().join("schicksms.toml");
        let toml = format!(
            r#"
[gammu]
outbox_path = "{}"
sent_path = "{}"
error_path = "{}"
status_check_delay_ms = 0
injector_command = ["schicksms-e2e-missing-injector"]

[storage]
database_path = "{}"
"#,
            fixture.outbox().display(),
            fixture.sent().display(),
            fixture.error().display(),
            db_dir.path().join("e2e.db").display(),
        );
        std::fs::write(&config_path, toml).unwrap();
        Self {
            fixture,
            _db_dir: db_dir,
            config_path,
        }
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_schicksms"))
            .arg("--config")
            .arg(&self.config_path)
            .args(args)
            .env("RUST_LOG", "off")
            .output()
            .unwrap()
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn send_by_file_then_follow_status() {
    let harness = Harness::new();

    let output = harness.run(&["send", "+491701234567", "Hallo aus dem Test", "--method", "file"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let outcome: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(outcome["success"], true);
    let filename = outcome["filename"].as_str().unwrap().to_string();
    assert_eq!(harness.fixture.list(SpoolDir::Outbox), vec![filename.clone()]);

    let output = harness.run(&["status", &filename]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("In der Warteschlange"));

    std::fs::rename(
        harness.fixture.outbox().join(&filename),
        harness.fixture.sent().join(&filename),
    )
    .unwrap();
    let output = harness.run(&["status", &filename]);
    assert!(stdout(&output).contains("Gesendet"));
}

#[test]
fn invalid_recipient_exits_with_two() {
    let harness = Harness::new();
    let output = harness.run(&["send", "0170 123", "Hallo", "--method", "file"]);
    assert_eq!(output.status.code(), Some(2));

    let outcome: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(outcome["success"], false);
    assert!(harness.fixture.list(SpoolDir::Outbox).is_empty());
}

#[test]
fn missing_injector_fails_the_command_send() {
    let harness = Harness::new();
    let output = harness.run(&["send", "+491701234567", "Hallo", "--method", "command"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(harness.fixture.list(SpoolDir::Outbox).is_empty());
}

#[test]
fn history_lists_backups_with_imported_names() {
    let harness = Harness::new();
    harness.fixture.write_backup(
        SpoolDir::Sent,
        "OUT_1.smsbackup",
        Some("+491701234567"),
        Some("20250213T183445Z"),
        Some("Bis morgen"),
    );
    let book = harness.fixture.root().join("contacts.json");
    std::fs::write(&book, r#"[{"name": "Oma", "number": "+491701234567"}]"#).unwrap();

    let output = harness.run(&["contacts", "import", book.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Imported 1 of 1"));

    let output = harness.run(&["history"]);
    assert!(output.status.success());
    let listing = stdout(&output);
    assert!(listing.contains("13.02.2025 18:34:45"));
    assert!(listing.contains("Oma (+491701234567)"));
    assert!(listing.contains("Bis morgen"));
}

#[test]
fn doctor_reports_missing_injector_in_plain_mode() {
    let harness = Harness::new();
    let output = harness.run(&["doctor", "--plain"]);
    assert!(output.status.success());
    let report = stdout(&output);
    assert!(report.contains("[OK]   Spool outbox"));
    assert!(report.contains("[FAIL] Injector"));
}

#[test]
fn unreadable_import_file_exits_with_one() {
    let harness = Harness::new();
    let output = harness.run(&["contacts", "import", "/nonexistent/contacts.json"]);
    assert_eq!(output.status.code(), Some(1));
}
