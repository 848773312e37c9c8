// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for SchickSMS.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key fails
//! startup with a suggestion instead of being silently ignored.

use std::path::PathBuf;
use std::time::Duration;

use schicksms_core::{RecipientPolicy, SendMethod};
use serde::{Deserialize, Serialize};

/// Top-level SchickSMS configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SchickSmsConfig {
    /// Application identity and logging.
    #[serde(default)]
    pub app: AppConfig,

    /// Gammu SMSD spool directories and injector settings.
    #[serde(default)]
    pub gammu: GammuConfig,

    /// SQLite database for contacts and the send log.
    #[serde(default)]
    pub storage: StorageConfig,

    /// HTTP API listener.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Spool history listing.
    #[serde(default)]
    pub history: HistoryConfig,
}

/// Application identity and logging.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Display name.
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_app_name() -> String {
    "SchickSMS".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Gammu SMSD integration.
///
/// The three spool directories are deployment configuration; SchickSMS never
/// creates them.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GammuConfig {
    /// Directory the daemon drains.
    #[serde(default = "default_outbox_path")]
    pub outbox_path: PathBuf,

    /// Directory the daemon moves delivered messages to.
    #[serde(default = "default_sent_path")]
    pub sent_path: PathBuf,

    /// Directory the daemon moves failed messages to.
    #[serde(default = "default_error_path")]
    pub error_path: PathBuf,

    /// Sender name used when a request doesn't carry one.
    #[serde(default = "default_sender")]
    pub default_sender: String,

    /// Characters in a single-segment SMS.
    #[serde(default = "default_max_sms_length")]
    pub max_sms_length: usize,

    /// Minimum digits after `+` for a recipient to be accepted.
    #[serde(default = "default_min_recipient_digits")]
    pub min_recipient_digits: usize,

    /// Injector program and leading arguments (`TEXT <recipient>` is appended).
    #[serde(default = "default_injector_command")]
    pub injector_command: Vec<String>,

    /// Run the injector through `sh -c` with every argument quoted.
    #[serde(default)]
    pub use_shell: bool,

    /// Upper bound on a single injector or status command.
    #[serde(default = "default_command_timeout_secs")]
    pub command_timeout_secs: u64,

    /// Maximum injector processes running at the same time.
    #[serde(default = "default_max_concurrent_dispatches")]
    pub max_concurrent_dispatches: usize,

    /// Pause between writing a spool file and the first status check.
    #[serde(default = "default_status_check_delay_ms")]
    pub status_check_delay_ms: u64,

    /// Delivery method used when a request doesn't specify one.
    #[serde(default)]
    pub default_method: SendMethod,

    /// Command reporting whether the daemon is running (stdout `active`).
    #[serde(default = "default_daemon_status_command")]
    pub daemon_status_command: Vec<String>,

    /// Command printing modem signal/battery/network lines.
    #[serde(default = "default_monitor_command")]
    pub monitor_command: Vec<String>,

    /// Command printing the gammu version on its first line.
    #[serde(default = "default_version_command")]
    pub version_command: Vec<String>,

    /// Command describing the attached phone or modem.
    #[serde(default = "default_identify_command")]
    pub identify_command: Vec<String>,
}

impl Default for GammuConfig {
    fn default() -> Self {
        Self {
            outbox_path: default_outbox_path(),
            sent_path: default_sent_path(),
            error_path: default_error_path(),
            default_sender: default_sender(),
            max_sms_length: default_max_sms_length(),
            min_recipient_digits: default_min_recipient_digits(),
            injector_command: default_injector_command(),
            use_shell: false,
            command_timeout_secs: default_command_timeout_secs(),
            max_concurrent_dispatches: default_max_concurrent_dispatches(),
            status_check_delay_ms: default_status_check_delay_ms(),
            default_method: SendMethod::default(),
            daemon_status_command: default_daemon_status_command(),
            monitor_command: default_monitor_command(),
            version_command: default_version_command(),
            identify_command: default_identify_command(),
        }
    }
}

impl GammuConfig {
    pub fn recipient_policy(&self) -> RecipientPolicy {
        RecipientPolicy::new(self.min_recipient_digits)
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }

    pub fn status_check_delay(&self) -> Duration {
        Duration::from_millis(self.status_check_delay_ms)
    }
}

fn default_outbox_path() -> PathBuf {
    PathBuf::from("/var/spool/gammu/outbox/")
}

fn default_sent_path() -> PathBuf {
    PathBuf::from("/var/spool/gammu/sent/")
}

fn default_error_path() -> PathBuf {
    PathBuf::from("/var/spool/gammu/error/")
}

fn default_sender() -> String {
    "SchickSMS".to_string()
}

fn default_max_sms_length() -> usize {
    160
}

fn default_min_recipient_digits() -> usize {
    10
}

fn default_injector_command() -> Vec<String> {
    vec!["gammu-smsd-inject".to_string()]
}

fn default_command_timeout_secs() -> u64 {
    10
}

fn default_max_concurrent_dispatches() -> usize {
    4
}

fn default_status_check_delay_ms() -> u64 {
    1000
}

fn default_daemon_status_command() -> Vec<String> {
    ["systemctl", "is-active", "gammu-smsd"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_monitor_command() -> Vec<String> {
    ["gammu", "--monitor", "1"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_version_command() -> Vec<String> {
    vec!["gammu".to_string(), "--version".to_string()]
}

fn default_identify_command() -> Vec<String> {
    vec!["gammu".to_string(), "--identify".to_string()]
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("schicksms").join("schicksms.db"))
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "schicksms.db".to_string())
}

fn default_wal_mode() -> bool {
    true
}

/// HTTP API listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Bearer token required on `/v1/*`. Without one every API call is rejected.
    #[serde(default)]
    pub bearer_token: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            bearer_token: None,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Spool history listing.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HistoryConfig {
    /// Entries returned when the caller gives no limit.
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,

    /// Characters of a message shown in list views before `...`.
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            recent_limit: default_recent_limit(),
            preview_chars: default_preview_chars(),
        }
    }
}

fn default_recent_limit() -> usize {
    20
}

fn default_preview_chars() -> usize {
    30
}
