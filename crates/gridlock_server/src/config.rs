//! Server configuration.
//!
//! Resolved in layers, later layers winning: built-in defaults, TOML file,
//! environment (`GRIDLOCK_HOST`, `GRIDLOCK_PORT` or `PORT`,
//! `GRIDLOCK_STATIC_DIR`, `GRIDLOCK_WAITING_MESSAGE`), command-line flags.

use crate::cli::Cli;
use crate::lobby::DEFAULT_WAITING_MESSAGE;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Configuration file looked up when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "gridlock.toml";

/// Resolved server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Interface to bind.
    host: String,

    /// Port to listen on.
    port: u16,

    /// Directory of static assets served beside the game endpoint.
    static_dir: Option<PathBuf>,

    /// Message sent to a client waiting for an opponent.
    waiting_message: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            static_dir: None,
            waiting_message: DEFAULT_WAITING_MESSAGE.to_string(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(host = %config.host, port = config.port, "Config loaded successfully");
        Ok(config)
    }

    /// Resolves the full configuration for a server run.
    ///
    /// An explicit `--config` path must exist; the default file is optional.
    #[instrument(skip(cli))]
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => {
                debug!("No config file, using defaults");
                Self::default()
            }
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        config.apply_cli(cli);
        Ok(config)
    }

    /// Overrides fields from environment variables fetched through `lookup`.
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(host) = lookup("GRIDLOCK_HOST") {
            self.host = host;
        }

        if let Some((key, raw)) = lookup("GRIDLOCK_PORT")
            .map(|v| ("GRIDLOCK_PORT", v))
            .or_else(|| lookup("PORT").map(|v| ("PORT", v)))
        {
            self.port = raw
                .trim()
                .parse()
                .map_err(|e| ConfigError::new(format!("Invalid {}={:?}: {}", key, raw, e)))?;
        }

        if let Some(dir) = lookup("GRIDLOCK_STATIC_DIR") {
            self.static_dir = Some(PathBuf::from(dir));
        }

        if let Some(message) = lookup("GRIDLOCK_WAITING_MESSAGE") {
            self.waiting_message = message;
        }

        Ok(())
    }

    /// Overrides fields given on the command line.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(host) = &cli.host {
            self.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.port = port;
        }
        if let Some(dir) = &cli.static_dir {
            self.static_dir = Some(dir.clone());
        }
    }

    /// `host:port` for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
