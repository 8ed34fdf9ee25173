//! Configuration loading and typed config structures for the EchoChamber server.
//!
//! The canonical configuration lives in `echochamber-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror the
//! YAML structure, and provides a loader that reads and validates the file.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level server configuration.
///
/// Mirrors the structure of `echochamber-config.yaml`. All fields have
/// defaults matching the original deployment, so an absent or empty file
/// still produces a runnable configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Flat-file data directory settings.
    #[serde(default)]
    pub data: DataConfig,

    /// Game tuning parameters.
    #[serde(default)]
    pub game: GameConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values for deployment knobs:
    /// - `ECHOCHAMBER_PORT` overrides `server.port`
    /// - `ECHOCHAMBER_DATA_DIR` overrides `data.dir`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Load configuration from `path`, falling back to defaults when
    /// the file does not exist.
    ///
    /// Environment overrides apply in both cases.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] or [`ConfigError::Yaml`] when the
    /// file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            let mut config = Self::default();
            config.apply_env_overrides();
            Ok(config)
        }
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Override deployment knobs with environment variables when set.
    ///
    /// This lets a container set the port and data directory without
    /// modifying the YAML config file.
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("ECHOCHAMBER_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("ECHOCHAMBER_DATA_DIR") {
            self.data.dir = PathBuf::from(val);
        }
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,

    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Flat-file data directory configuration.
///
/// All game data lives as JSON files under one directory: the post deck,
/// the current run state, the leaderboard, and the user registry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DataConfig {
    /// Directory holding the JSON data files.
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,
}

impl DataConfig {
    /// Path of the post deck file.
    #[must_use]
    pub fn posts_path(&self) -> PathBuf {
        self.dir.join("posts.json")
    }

    /// Path of the current run state file.
    #[must_use]
    pub fn game_state_path(&self) -> PathBuf {
        self.dir.join("game-state.json")
    }

    /// Path of the leaderboard file.
    #[must_use]
    pub fn leaderboard_path(&self) -> PathBuf {
        self.dir.join("leaderboard.json")
    }

    /// Path of the user registry file.
    #[must_use]
    pub fn users_path(&self) -> PathBuf {
        self.dir.join("users.json")
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
        }
    }
}

/// Game tuning parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameConfig {
    /// Maximum number of leaderboard entries retained on disk.
    #[serde(default = "default_leaderboard_cap")]
    pub leaderboard_cap: usize,

    /// Number of entries returned by the public leaderboard endpoint.
    #[serde(default = "default_leaderboard_top_n")]
    pub leaderboard_top_n: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            leaderboard_cap: default_leaderboard_cap(),
            leaderboard_top_n: default_leaderboard_top_n(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    3000
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

const fn default_leaderboard_cap() -> usize {
    100
}

const fn default_leaderboard_top_n() -> usize {
    10
}

fn default_log_level() -> String {
    "info".to_owned()
}
