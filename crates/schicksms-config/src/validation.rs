// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization checks that serde attributes cannot express.

use crate::diagnostic::ConfigError;
use crate::model::SchickSmsConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration, collecting every problem found.
pub fn validate_config(config: &SchickSmsConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.app.log_level.as_str()) {
        errors.push(ConfigError::validation(format!(
            "app.log_level `{}` must be one of {}",
            config.app.log_level,
            LOG_LEVELS.join(", ")
        )));
    }

    let gammu = &config.gammu;
    let dirs = [
        ("gammu.outbox_path", &gammu.outbox_path),
        ("gammu.sent_path", &gammu.sent_path),
        ("gammu.error_path", &gammu.error_path),
    ];
    for (name, path) in &dirs {
        if path.as_os_str().is_empty() {
            errors.push(ConfigError::validation(format!("{name} must not be empty")));
        }
    }
    for (i, (name_a, a)) in dirs.iter().enumerate() {
        for (name_b, b) in &dirs[i + 1..] {
            if !a.as_os_str().is_empty() && a.components().eq(b.components()) {
                errors.push(ConfigError::validation(format!(
                    "{name_a} and {name_b} must be different directories"
                )));
            }
        }
    }

    if gammu.min_recipient_digits == 0 {
        errors.push(ConfigError::validation(
            "gammu.min_recipient_digits must be at least 1",
        ));
    }

    if gammu.injector_command.first().is_none_or(|p| p.trim().is_empty()) {
        errors.push(ConfigError::validation(
            "gammu.injector_command must name a program",
        ));
    }

    for (name, argv) in [
        ("gammu.daemon_status_command", &gammu.daemon_status_command),
        ("gammu.monitor_command", &gammu.monitor_command),
        ("gammu.version_command", &gammu.version_command),
        ("gammu.identify_command", &gammu.identify_command),
    ] {
        if argv.first().is_none_or(|p| p.trim().is_empty()) {
            errors.push(ConfigError::validation(format!("{name} must name a program")));
        }
    }

    if gammu.command_timeout_secs == 0 {
        errors.push(ConfigError::validation(
            "gammu.command_timeout_secs must be at least 1",
        ));
    }

    if gammu.max_concurrent_dispatches == 0 {
        errors.push(ConfigError::validation(
            "gammu.max_concurrent_dispatches must be at least 1",
        ));
    }

    if gammu.max_sms_length == 0 {
        errors.push(ConfigError::validation(
            "gammu.max_sms_length must be at least 1",
        ));
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::validation(
            "storage.database_path must not be empty",
        ));
    }

    let host = config.gateway.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::validation("gateway.host must not be empty"));
    } else {
        let is_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_hostname = host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
        if !is_ip && !is_hostname {
            errors.push(ConfigError::validation(format!(
                "gateway.host `{host}` is not a valid IP address or hostname"
            )));
        }
    }

    if config
        .gateway
        .bearer_token
        .as_deref()
        .is_some_and(|t| t.trim().is_empty())
    {
        errors.push(ConfigError::validation(
            "gateway.bearer_token must not be blank; omit it instead",
        ));
    }

    if config.history.recent_limit == 0 {
        errors.push(ConfigError::validation(
            "history.recent_limit must be at least 1",
        ));
    }

    if config.history.preview_chars == 0 {
        errors.push(ConfigError::validation(
            "history.preview_chars must be at least 1",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
