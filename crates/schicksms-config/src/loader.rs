// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading with Figment.
//!
//! Merge order (later overrides earlier):
//! 1. Compiled defaults
//! 2. `/etc/schicksms/schicksms.toml`
//! 3. `~/.config/schicksms/schicksms.toml`
//! 4. `./schicksms.toml`
//! 5. `SCHICKSMS_*` environment variables

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::SchickSmsConfig;

pub(crate) const SYSTEM_CONFIG: &str = "/etc/schicksms/schicksms.toml";
pub(crate) const LOCAL_CONFIG: &str = "schicksms.toml";

/// Sections that env var names are split on, in matching order.
const ENV_SECTIONS: &[&str] = &["app", "gammu", "storage", "gateway", "history"];

/// Path of the per-user config file, if the platform has a config dir.
pub(crate) fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("schicksms").join(LOCAL_CONFIG))
}

/// Build the full layered Figment without extracting it.
pub fn build_figment() -> Figment {
    let mut figment = Figment::new()
        .merge(Serialized::defaults(SchickSmsConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG));
    if let Some(user) = user_config_path() {
        figment = figment.merge(Toml::file(user));
    }
    figment.merge(Toml::file(LOCAL_CONFIG)).merge(env_provider())
}

/// Load configuration from the standard hierarchy with env var overrides.
pub fn load_config() -> Result<SchickSmsConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string on top of the defaults only.
pub fn load_config_from_str(toml_content: &str) -> Result<SchickSmsConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SchickSmsConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from an explicit file, still honouring env overrides.
pub fn load_config_from_path(path: &Path) -> Result<SchickSmsConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SchickSmsConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// `SCHICKSMS_GAMMU_OUTBOX_PATH` -> `gammu.outbox_path`.
///
/// Only the first underscore after a known section name becomes a dot; key
/// names keep their own underscores.
fn env_provider() -> Env {
    Env::prefixed("SCHICKSMS_").map(|key| {
        let key_str = key.as_str();
        ENV_SECTIONS
            .iter()
            .find_map(|section| {
                key_str
                    .strip_prefix(section)
                    .and_then(|rest| rest.strip_prefix('_'))
                    .map(|rest| format!("{section}.{rest}"))
            })
            .unwrap_or_else(|| key_str.to_string())
            .into()
    })
}
