//! # Seatplan CLI Module
//!
//! This module implements the CLI interface for Seatplan.
//!
//! ## Available Commands
//!
//! - `serve` - Start the HTTP server
//! - `generate` - Generate a seating plan from roster files
//! - `export` - Export the snapshot plan as CSV
//! - `import` - Import a CSV plan into the snapshot
//! - `find` - Look up one examinee's seat
//! - `pull` - Fetch the plan from a remote server
//! - `status` - Show snapshot summary

mod commands;

use clap::{Parser, Subcommand};
use seatplan_core::SeatplanError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Seatplan - Exam Seating Server
///
/// Deterministic seat assignment for multi-subject exam sessions.
/// Subject groups are shuffled, interleaved to reduce same-subject
/// adjacency, and packed into rooms smallest-first.
#[derive(Parser, Debug)]
#[command(name = "seatplan")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (lists every quarantined roster row)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the plan snapshot (default: seatplan.json)
    #[arg(short = 'D', long, global = true)]
    pub data: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Serve {
        /// Host to bind to (default: 127.0.0.1)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (default: 8080)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Generate a seating plan from roster files
    Generate {
        /// Examinee roster CSV (identifier, name, subject, date)
        #[arg(short, long)]
        examinees: PathBuf,

        /// Room roster CSV (room id, room name, seat count, layout descriptor)
        #[arg(short, long)]
        rooms: PathBuf,

        /// RNG seed for a reproducible plan
        #[arg(short, long)]
        seed: Option<u64>,

        /// CSV output path (default: exam-seating-<date>.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Push the finished plan to a remote server
        #[arg(long)]
        push: Option<String>,
    },

    /// Export the snapshot plan as CSV
    Export {
        /// Output file path (default: exam-seating-<date>.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import a CSV plan into the snapshot
    Import {
        /// Input file path
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Look up one examinee's seat (case-insensitive)
    Find {
        /// Examinee identifier
        identifier: String,

        /// Query a remote server instead of the local snapshot
        #[arg(long)]
        remote: Option<String>,
    },

    /// Fetch the plan from a remote server into the snapshot
    Pull {
        /// Remote server URL (falls back to the config file)
        #[arg(long)]
        remote: Option<String>,
    },

    /// Show snapshot summary
    Status,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), SeatplanError> {
    let config = crate::config::Config::load();
    let json_mode = cli.json_mode;
    let verbose = cli.verbose;
    let data_path = config.data_path(cli.data);

    match cli.command {
        Some(Commands::Serve { host, port }) => {
            let host = config.host(host);
            let port = config.port(port);
            cmd_serve(&data_path, &host, port).await
        }
        Some(Commands::Generate {
            examinees,
            rooms,
            seed,
            output,
            push,
        }) => {
            cmd_generate(
                &data_path,
                json_mode,
                verbose,
                &examinees,
                &rooms,
                seed,
                output.as_ref(),
                push,
            )
            .await
        }
        Some(Commands::Export { output }) => cmd_export(&data_path, output.as_ref()),
        Some(Commands::Import { file }) => cmd_import(&data_path, &file),
        Some(Commands::Find { identifier, remote }) => {
            cmd_find(&data_path, json_mode, &identifier, remote).await
        }
        Some(Commands::Pull { remote }) => cmd_pull(&data_path, config.remote(remote)).await,
        Some(Commands::Status) => cmd_status(&data_path, json_mode),
        None => {
            // No subcommand - show status by default
            cmd_status(&data_path, json_mode)
        }
    }
}
