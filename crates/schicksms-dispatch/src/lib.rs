// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! External process side of SchickSMS.
//!
//! Runs `gammu-smsd-inject` for direct delivery, coordinates it with the
//! spool writer when a caller asks for a fallback, and checks the daemon and
//! modem and reads host facts for the status page.

pub mod delivery;
pub mod host;
pub mod injector;
pub mod modem;
pub mod runner;
pub mod segments;
pub mod shell;

pub use delivery::{SendCoordinator, SendOutcome};
pub use host::SystemInfo;
pub use injector::CommandDispatcher;
pub use modem::{DaemonStatus, HealthMonitor, ModemStatus};
pub use runner::TokioCommandRunner;
pub use segments::{calculate_segments, SegmentInfo};
