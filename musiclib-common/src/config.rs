//! Configuration loading and resolution
//!
//! Resolution order, highest priority first:
//! 1. Command-line / environment overrides (parsed by the binary)
//! 2. TOML config file
//! 3. Compiled defaults
//!
//! A missing TOML file is not fatal: defaults apply.
//! The resolved [`ServiceConfig`] is immutable and shared by reference.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default location of the TOML config file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config/musiclib.toml";

/// Raw TOML file contents; every section and key is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
    pub music_api: MusicApiSection,
    pub logging: LoggingConfig,
}

/// `[server]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
    /// Upper bound on the time a single request may take
    pub request_timeout_secs: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            request_timeout_secs: 30,
        }
    }
}

/// `[database]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub path: PathBuf,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/musiclib.db"),
            max_connections: 10,
        }
    }
}

/// `[music_api]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MusicApiSection {
    /// Base URL of the external song-info service (required)
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for MusicApiSection {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_secs: 10,
        }
    }
}

/// `[logging]` section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `tracing` filter directive, used when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl TomlConfig {
    /// Parse TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))
    }

    /// Load the config file, falling back to defaults when it does not exist
    ///
    /// Callers that want to report the fallback should check the path first;
    /// this runs before logging is initialized.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Invalid TOML in {}: {}", path.display(), e)))
    }
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database_path: Option<PathBuf>,
    pub music_api_url: Option<String>,
    pub log_level: Option<String>,
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout: Duration,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// SQLite settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    pub max_connections: u32,
}

/// External song-info service settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MusicApiConfig {
    /// Base URL without trailing slash
    pub url: String,
    pub timeout: Duration,
}

/// Fully resolved, immutable service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub music_api: MusicApiConfig,
    pub logging: LoggingConfig,
}

impl ServiceConfig {
    /// Merge overrides on top of the file config and validate the result
    pub fn resolve(file: TomlConfig, overrides: ConfigOverrides) -> Result<Self> {
        let url = overrides
            .music_api_url
            .unwrap_or(file.music_api.url)
            .trim()
            .trim_end_matches('/')
            .to_string();

        if url.is_empty() {
            return Err(Error::Config(
                "music_api.url is required (set it in the config file or MUSIC_API_URL)"
                    .to_string(),
            ));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(Error::Config(format!(
                "music_api.url must be an http(s) URL, got {}",
                url
            )));
        }
        if file.music_api.timeout_secs == 0 {
            return Err(Error::Config(
                "music_api.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if file.server.request_timeout_secs == 0 {
            return Err(Error::Config(
                "server.request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if file.database.max_connections == 0 {
            return Err(Error::Config(
                "database.max_connections must be greater than 0".to_string(),
            ));
        }

        Ok(Self {
            server: ServerConfig {
                host: overrides.host.unwrap_or(file.server.host),
                port: overrides.port.unwrap_or(file.server.port),
                request_timeout: Duration::from_secs(file.server.request_timeout_secs),
            },
            database: DatabaseConfig {
                path: overrides.database_path.unwrap_or(file.database.path),
                max_connections: file.database.max_connections,
            },
            music_api: MusicApiConfig {
                url,
                timeout: Duration::from_secs(file.music_api.timeout_secs),
            },
            logging: LoggingConfig {
                level: overrides.log_level.unwrap_or(file.logging.level),
            },
        })
    }
}
