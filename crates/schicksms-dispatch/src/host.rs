// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Host facts for the status page: operating system, memory, root disk, uptime.

use std::path::Path;

use schicksms_core::UNKNOWN;
use serde::Serialize;
use sysinfo::{Disks, System};

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Host section of the status page. Sizes are human readable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemInfo {
    pub os: String,
    pub memory_total: String,
    pub memory_used: String,
    pub disk_total: String,
    pub disk_free: String,
    pub disk_used: String,
    /// Used share of the root filesystem, two decimals.
    pub disk_usage_percent: f64,
    /// Like `uptime -p`, e.g. `up 2 days, 3 hours, 5 minutes`.
    pub uptime: String,
    pub uptime_secs: u64,
}

/// Raw numbers before formatting.
#[derive(Debug, Clone, Default)]
struct HostSample {
    os: Option<String>,
    memory_total: u64,
    memory_used: u64,
    disk_total: u64,
    disk_free: u64,
    uptime_secs: u64,
}

impl SystemInfo {
    /// Read the host through `sysinfo`. Blocking; run it off the async runtime.
    pub fn collect() -> Self {
        let mut system = System::new();
        system.refresh_memory();

        let disks = Disks::new_with_refreshed_list();
        let root = disks
            .list()
            .iter()
            .find(|disk| disk.mount_point() == Path::new("/"))
            .or_else(|| disks.list().first());

        let os = System::long_os_version().map(|os| match System::kernel_version() {
            Some(kernel) => format!("{os} (kernel {kernel})"),
            None => os,
        });

        Self::from_sample(HostSample {
            os,
            memory_total: system.total_memory(),
            memory_used: system.used_memory(),
            disk_total: root.map_or(0, |disk| disk.total_space()),
            disk_free: root.map_or(0, |disk| disk.available_space()),
            uptime_secs: System::uptime(),
        })
    }

    fn from_sample(sample: HostSample) -> Self {
        let disk_used = sample.disk_total.saturating_sub(sample.disk_free);
        let disk_usage_percent = if sample.disk_total == 0 {
            0.0
        } else {
            round_to(disk_used as f64 / sample.disk_total as f64 * 100.0, 2)
        };

        Self {
            os: sample.os.unwrap_or_else(|| UNKNOWN.to_string()),
            memory_total: format_bytes(sample.memory_total, 2),
            memory_used: format_bytes(sample.memory_used, 2),
            disk_total: format_bytes(sample.disk_total, 2),
            disk_free: format_bytes(sample.disk_free, 2),
            disk_used: format_bytes(disk_used, 2),
            disk_usage_percent,
            uptime: format_uptime(sample.uptime_secs),
            uptime_secs: sample.uptime_secs,
        }
    }

    /// Placeholder when collection could not run at all.
    pub fn unavailable() -> Self {
        Self::from_sample(HostSample::default())
    }
}

/// Base-1024 size with at most `precision` decimals, e.g. `1.5 KB`.
pub fn format_bytes(bytes: u64, precision: u32) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{} {}", round_to(value, precision), UNITS[unit])
}

/// `up 1 day, 2 hours, 3 minutes`; zero components are left out.
pub fn format_uptime(secs: u64) -> String {
    let days = secs / 86_400;
    let hours = secs % 86_400 / 3_600;
    let minutes = secs % 3_600 / 60;

    let parts: Vec<String> = [(days, "day"), (hours, "hour"), (minutes, "minute")]
        .into_iter()
        .filter(|(n, _)| *n > 0)
        .map(|(n, word)| format!("{n} {word}{}", if n == 1 { "" } else { "s" }))
        .collect();

    if parts.is_empty() {
        "up 0 minutes".to_string()
    } else {
        format!("up {}", parts.join(", "))
    }
}

fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}
