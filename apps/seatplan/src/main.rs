//! # Seatplan - Exam Seating Server
//!
//! The main binary for the Seatplan seat-assignment engine.
//!
//! This application provides:
//! - HTTP REST API server (axum-based)
//! - CLI interface for plan generation and export
//! - HTTP client for pushing/pulling plans to a remote server
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     apps/seatplan (THE BINARY)                  │
//! │                                                                 │
//! │  ┌─────────────┐    ┌─────────────┐    ┌──────────────────┐   │
//! │  │   CLI       │    │   HTTP API  │    │  HTTP Client     │   │
//! │  │  (clap)     │    │   (axum)    │    │  (reqwest)       │   │
//! │  └──────┬──────┘    └──────┬──────┘    └────────┬─────────┘   │
//! │         │                  │                    │              │
//! │         └──────────────────┼────────────────────┘              │
//! │                            ▼                                   │
//! │                    ┌───────────────┐                           │
//! │                    │ seatplan-core │                           │
//! │                    │  (THE LOGIC)  │                           │
//! │                    └───────────────┘                           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! seatplan serve --host 0.0.0.0 --port 8080
//!
//! # CLI operations
//! seatplan generate -e examinees.csv -r rooms.csv --seed 42
//! seatplan find stu-042
//! seatplan export -o seating.csv
//! ```

mod api;
mod cli;
mod client;
mod config;
mod snapshot;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // Initialize tracing — SEATPLAN_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("SEATPLAN_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "seatplan=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Display startup banner
    if !cli.quiet {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Seatplan startup banner.
fn print_banner() {
    println!(
        r#"
  ███████╗███████╗ █████╗ ████████╗██████╗ ██╗      █████╗ ███╗   ██╗
  ██╔════╝██╔════╝██╔══██╗╚══██╔══╝██╔══██╗██║     ██╔══██╗████╗  ██║
  ███████╗█████╗  ███████║   ██║   ██████╔╝██║     ███████║██╔██╗ ██║
  ╚════██║██╔══╝  ██╔══██║   ██║   ██╔═══╝ ██║     ██╔══██║██║╚██╗██║
  ███████║███████╗██║  ██║   ██║   ██║     ███████╗██║  ██║██║ ╚████║
  ╚══════╝╚══════╝╚═╝  ╚═╝   ╚═╝   ╚═╝     ╚══════╝╚═╝  ╚═╝╚═╝  ╚═══╝

  Exam Seating Server v{}

  Deterministic • Interleaved • Reproducible
"#,
        env!("CARGO_PKG_VERSION")
    );
}
