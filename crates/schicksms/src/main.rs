// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SchickSMS - a small SMS console for Gammu SMSD.
//!
//! This is the binary entry point.

mod commands;
mod doctor;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use schicksms_config::SchickSmsConfig;
use schicksms_core::SendMethod;

/// SchickSMS - send SMS through a local Gammu SMSD.
#[derive(Parser, Debug)]
#[command(name = "schicksms", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP API.
    Serve,
    /// Send one message.
    Send {
        /// Recipient in international format, e.g. +491701234567.
        recipient: String,
        /// Message text.
        message: String,
        /// Delivery method: file, command or both.
        #[arg(long)]
        method: Option<SendMethod>,
        /// Sender id written into spool files.
        #[arg(long)]
        sender: Option<String>,
    },
    /// Show the delivery status of a spool file.
    Status {
        /// Spool file name as returned by `send`.
        filename: String,
    },
    /// List messages the daemon has finished with.
    History {
        /// Number of entries to show.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Manage the address book.
    Contacts {
        #[command(subcommand)]
        action: ContactsAction,
    },
    /// Check spool directories, database and injector.
    Doctor {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
}

#[derive(Subcommand, Debug)]
enum ContactsAction {
    /// Import a legacy JSON address book (`[{"name": ..., "number": ...}]`).
    Import {
        /// Path to the JSON file.
        file: PathBuf,
    },
}

fn load_config(path: Option<&std::path::Path>) -> SchickSmsConfig {
    let loaded = match path {
        Some(path) => schicksms_config::load_and_validate_path(path),
        None => schicksms_config::load_and_validate(),
    };
    match loaded {
        Ok(config) => config,
        Err(errors) => {
            schicksms_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("schicksms={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());
    init_tracing(&config.app.log_level);

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Send {
            recipient,
            message,
            method,
            sender,
        }) => {
            match commands::run_send(&config, &recipient, &message, method, sender.as_deref())
                .await
            {
                // The outcome JSON already explains the failure.
                Ok(outcome) if !outcome.success => std::process::exit(2),
                other => other.map(|_| ()),
            }
        }
        Some(Commands::Status { filename }) => {
            commands::run_status(&config, &filename);
            Ok(())
        }
        Some(Commands::History { limit }) => commands::run_history(&config, limit).await,
        Some(Commands::Contacts {
            action: ContactsAction::Import { file },
        }) => commands::run_import(&config, &file).await,
        Some(Commands::Doctor { plain }) => doctor::run_doctor(&config, plain).await,
        None => {
            println!("schicksms: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("schicksms: {}", e.operator_message());
        tracing::debug!(error = %e, "command failed");
        std::process::exit(1);
    }
}
