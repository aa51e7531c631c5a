//! # Configuration
//!
//! Optional `seatplan.toml` file with server, snapshot, and remote settings.
//! A missing file yields the built-in defaults; explicit CLI flags always win
//! over file values.
//!
//! ```toml
//! data = "plans/seatplan.json"
//! remote = "http://seatplan.example.edu:8080"
//!
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default server bind host.
const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port.
const DEFAULT_PORT: u16 = 8080;

/// Default snapshot file.
const DEFAULT_DATA_PATH: &str = "seatplan.json";

// =============================================================================
// CONFIG STRUCTURE
// =============================================================================

/// Application configuration, read from `seatplan.toml` when present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Snapshot file location.
    pub data: Option<PathBuf>,
    /// Remote server URL for push/pull.
    pub remote: Option<String>,
}

/// HTTP server settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl Config {
    /// Load configuration from `SEATPLAN_CONFIG` or `./seatplan.toml`.
    #[must_use]
    pub fn load() -> Self {
        let path = std::env::var("SEATPLAN_CONFIG")
            .map_or_else(|_| PathBuf::from("seatplan.toml"), PathBuf::from);
        Self::load_from(&path)
    }

    /// Load configuration from a specific file.
    ///
    /// A malformed file is reported and ignored rather than aborting startup.
    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        let Ok(text) = std::fs::read_to_string(path) else {
            return Self::default();
        };

        match toml::from_str(&text) {
            Ok(config) => {
                tracing::info!("Loaded configuration from {:?}", path);
                config
            }
            Err(e) => {
                tracing::warn!("Ignoring malformed config {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Bind host, with the CLI flag taking precedence.
    #[must_use]
    pub fn host(&self, flag: Option<String>) -> String {
        flag.or_else(|| self.server.host.clone())
            .unwrap_or_else(|| DEFAULT_HOST.to_string())
    }

    /// Bind port, with the CLI flag taking precedence.
    #[must_use]
    pub fn port(&self, flag: Option<u16>) -> u16 {
        flag.or(self.server.port).unwrap_or(DEFAULT_PORT)
    }

    /// Snapshot path, with the CLI flag taking precedence.
    #[must_use]
    pub fn data_path(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.data.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH))
    }

    /// Remote URL, with the CLI flag taking precedence. `None` when neither
    /// the flag nor the file names one.
    #[must_use]
    pub fn remote(&self, flag: Option<String>) -> Option<String> {
        flag.or_else(|| self.remote.clone())
    }
}

// =============================================================================
// TESTS
// =============================================================================
