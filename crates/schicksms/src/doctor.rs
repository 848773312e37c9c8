// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `schicksms doctor` command implementation.
//!
//! Checks the pieces SchickSMS depends on at runtime: the three spool
//! directories, the history database, the injector binary and the API token.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use schicksms_config::SchickSmsConfig;
use schicksms_core::SmsError;
use schicksms_spool::SpoolLayout;
use schicksms_storage::Database;

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

impl CheckResult {
    fn new(name: &str, status: CheckStatus, message: impl Into<String>, start: Instant) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: message.into(),
            duration: start.elapsed(),
        }
    }
}

/// Run the `schicksms doctor` command.
///
/// With `--plain`, or when stdout is not a terminal, prints `[OK]`-style
/// markers instead of colored symbols.
pub async fn run_doctor(config: &SchickSmsConfig, plain: bool) -> Result<(), SmsError> {
    let use_color = !plain && std::io::stdout().is_terminal();

    let layout = SpoolLayout::from_config(&config.gammu);
    let mut results: Vec<CheckResult> = layout
        .directories()
        .into_iter()
        .map(|(label, path)| check_spool_dir(label, path))
        .collect();
    results.push(check_database(&config.storage.database_path, config.storage.wal_mode).await);
    results.push(check_injector(&config.gammu.injector_command));
    results.push(check_api_token(config.gateway.bearer_token.as_deref()));

    println!();
    println!("  schicksms doctor");
    println!("  {}", "-".repeat(50));
    for result in &results {
        println!("{}", render_line(result, use_color));
    }
    println!();

    let issues = results
        .iter()
        .filter(|r| r.status != CheckStatus::Pass)
        .count();
    if issues > 0 {
        let issue_word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {issue_word} found.");
    } else {
        println!("  All checks passed.");
    }
    println!();

    Ok(())
}

fn render_line(result: &CheckResult, use_color: bool) -> String {
    let duration_ms = result.duration.as_millis();
    if use_color {
        use colored::Colorize;
        let (symbol, message) = match result.status {
            CheckStatus::Pass => ("✓".green(), result.message.normal()),
            CheckStatus::Warn => ("!".yellow(), result.message.yellow()),
            CheckStatus::Fail => ("✗".red(), result.message.red()),
        };
        format!("    {symbol} {:<20} {message} ({duration_ms}ms)", result.name)
    } else {
        let marker = match result.status {
            CheckStatus::Pass => "[OK]  ",
            CheckStatus::Warn => "[WARN]",
            CheckStatus::Fail => "[FAIL]",
        };
        format!(
            "    {marker} {:<20} {} ({duration_ms}ms)",
            result.name, result.message
        )
    }
}

/// The directory must exist and accept new files. Nothing is left behind.
fn check_spool_dir(label: &str, path: &Path) -> CheckResult {
    let start = Instant::now();
    let name = format!("Spool {label}");

    if !path.is_dir() {
        return CheckResult::new(
            &name,
            CheckStatus::Fail,
            format!("missing: {}", path.display()),
            start,
        );
    }

    let marker = path.join(format!(".schicksms-doctor-{}", std::process::id()));
    match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&marker)
    {
        Ok(_) => {
            let _ = std::fs::remove_file(&marker);
            CheckResult::new(&name, CheckStatus::Pass, "writable", start)
        }
        Err(e) => CheckResult::new(
            &name,
            CheckStatus::Fail,
            format!("not writable: {} ({e})", path.display()),
            start,
        ),
    }
}

/// Check database file exists and can be opened.
async fn check_database(db_path: &str, wal_mode: bool) -> CheckResult {
    let start = Instant::now();

    if !Path::new(db_path).exists() {
        return CheckResult::new(
            "Database",
            CheckStatus::Warn,
            format!("not found: {db_path} (will be created on first run)"),
            start,
        );
    }

    let db = match Database::open_with(db_path, wal_mode).await {
        Ok(db) => db,
        Err(e) => {
            return CheckResult::new("Database", CheckStatus::Fail, format!("open failed: {e}"), start);
        }
    };
    let pinged = db.ping().await;
    let _ = db.close().await;

    match pinged {
        Ok(()) => CheckResult::new("Database", CheckStatus::Pass, "connected", start),
        Err(e) => CheckResult::new("Database", CheckStatus::Fail, format!("query failed: {e}"), start),
    }
}

fn check_injector(command: &[String]) -> CheckResult {
    let start = Instant::now();
    let Some(program) = command.first().filter(|p| !p.is_empty()) else {
        return CheckResult::new("Injector", CheckStatus::Fail, "no command configured", start);
    };

    match find_program(program, std::env::var_os("PATH").as_deref()) {
        Some(path) => CheckResult::new(
            "Injector",
            CheckStatus::Pass,
            format!("found at {}", path.display()),
            start,
        ),
        None => CheckResult::new(
            "Injector",
            CheckStatus::Fail,
            format!("`{program}` not found in PATH"),
            start,
        ),
    }
}

/// Names containing a separator are taken as paths, the rest are looked up in `search_path`.
fn find_program(program: &str, search_path: Option<&std::ffi::OsStr>) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }
    std::env::split_paths(search_path?)
        .map(|dir| dir.join(program))
        .find(|path| path.is_file())
}

fn check_api_token(token: Option<&str>) -> CheckResult {
    let start = Instant::now();
    match token.filter(|t| !t.is_empty()) {
        Some(_) => CheckResult::new("API token", CheckStatus::Pass, "configured", start),
        None => CheckResult::new(
            "API token",
            CheckStatus::Warn,
            "not set (every API request except /health is refused)",
            start,
        ),
    }
}
