// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Daemon and modem health checks.
//!
//! Both checks shell out through the same [`CommandRunner`] as the injector
//! and scrape human-readable output, so every field degrades to
//! [`UNKNOWN`] when the tool prints something unexpected.

use std::sync::{Arc, LazyLock};
use std::time::Duration;

use regex::Regex;
use schicksms_config::model::GammuConfig;
use schicksms_core::{CommandInvocation, CommandRunner, HealthStatus, UNKNOWN};
use serde::Serialize;
use tracing::debug;

static SIGNAL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Signal strength: (\d+)%").expect("signal pattern is valid"));
static BATTERY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Battery level: (\d+)%").expect("battery pattern is valid"));
static NETWORK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Network: (.+)$").expect("network pattern is valid"));

/// Whether the SMS daemon service is running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaemonStatus {
    pub is_active: bool,
    /// `Aktiv` or `Inaktiv`.
    pub status: String,
    /// Raw status command output.
    pub details: String,
    /// First line of the version command, or empty while the daemon is down.
    pub version: String,
    /// Identify command output, or empty while the daemon is down.
    pub device_info: String,
}

/// Modem connectivity scraped from the monitor command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModemStatus {
    pub is_connected: bool,
    /// `Verbunden` or `Nicht verbunden`.
    pub status: String,
    pub signal_strength: String,
    pub battery_level: String,
    pub network_name: String,
    pub details: String,
}

impl ModemStatus {
    /// Fold both checks into one health verdict.
    pub fn health(&self, daemon: &DaemonStatus) -> HealthStatus {
        match (daemon.is_active, self.is_connected) {
            (true, true) => HealthStatus::Healthy,
            (true, false) => HealthStatus::Degraded("modem not connected".to_string()),
            (false, _) => HealthStatus::Unhealthy(format!("daemon {}", daemon.details.trim())),
        }
    }
}

/// Scrape `gammu --monitor` output.
///
/// Connected means exit code 0 and no `Error` anywhere in the output.
pub fn parse_monitor_output(exit_ok: bool, text: &str) -> ModemStatus {
    let mut signal_strength = UNKNOWN.to_string();
    let mut battery_level = UNKNOWN.to_string();
    let mut network_name = UNKNOWN.to_string();

    for line in text.lines() {
        if let Some(caps) = SIGNAL_PATTERN.captures(line) {
            signal_strength = format!("{}%", &caps[1]);
        }
        if let Some(caps) = BATTERY_PATTERN.captures(line) {
            battery_level = format!("{}%", &caps[1]);
        }
        if let Some(caps) = NETWORK_PATTERN.captures(line) {
            network_name = caps[1].trim().to_string();
        }
    }

    let is_connected = exit_ok && !text.contains("Error");
    ModemStatus {
        is_connected,
        status: if is_connected { "Verbunden" } else { "Nicht verbunden" }.to_string(),
        signal_strength,
        battery_level,
        network_name,
        details: text.to_string(),
    }
}

fn first_line_or_unknown(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map_or_else(|| UNKNOWN.to_string(), str::to_string)
}

/// Runs the daemon status and modem monitor commands.
pub struct HealthMonitor {
    runner: Arc<dyn CommandRunner>,
    daemon_command: Vec<String>,
    monitor_command: Vec<String>,
    version_command: Vec<String>,
    identify_command: Vec<String>,
    timeout: Duration,
}

impl HealthMonitor {
    pub fn new(runner: Arc<dyn CommandRunner>, config: &GammuConfig) -> Self {
        Self {
            runner,
            daemon_command: config.daemon_status_command.clone(),
            monitor_command: config.monitor_command.clone(),
            version_command: config.version_command.clone(),
            identify_command: config.identify_command.clone(),
            timeout: config.command_timeout(),
        }
    }

    /// Active iff the status command prints exactly `active`.
    ///
    /// Version and device details are only queried from a running daemon.
    pub async fn daemon_status(&self) -> DaemonStatus {
        let details = self.run_text(&self.daemon_command, "daemon status").await;
        let is_active = details.trim() == "active";

        let (version, device_info) = if is_active {
            let version = self.run_text(&self.version_command, "version").await;
            let device_info = self.run_text(&self.identify_command, "identify").await;
            (first_line_or_unknown(&version), device_info)
        } else {
            (String::new(), String::new())
        };

        DaemonStatus {
            is_active,
            status: if is_active { "Aktiv" } else { "Inaktiv" }.to_string(),
            details,
            version,
            device_info,
        }
    }

    /// Combined output of a status command; failures become their error text.
    async fn run_text(&self, argv: &[String], check: &str) -> String {
        let invocation = CommandInvocation::new(argv.to_vec());
        match self.runner.run(&invocation, self.timeout).await {
            Ok(output) => output.combined_text(),
            Err(e) => {
                debug!(check, error = %e, "status command failed");
                e.to_string()
            }
        }
    }

    pub async fn modem_status(&self) -> ModemStatus {
        let invocation = CommandInvocation::new(self.monitor_command.clone());
        match self.runner.run(&invocation, self.timeout).await {
            Ok(output) => parse_monitor_output(output.success(), &output.combined_text()),
            Err(e) => {
                debug!(error = %e, "modem monitor command failed");
                parse_monitor_output(false, &e.to_string())
            }
        }
    }
}
