//! Configuration management for the Vitrine site builder.
//!
//! Parses `vitrine.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! `server.host` supports environment variable expansion (`$VAR` or
//! `${VAR}`); an unset variable is a load error, not a silent empty
//! string.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use uuid::Uuid;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "vitrine.toml";

/// Configuration load error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The explicitly requested config file does not exist.
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    /// The file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A referenced environment variable is unset.
    #[error("failed to expand '{value}': {reason}")]
    Env {
        /// The value being expanded.
        value: String,
        /// Why expansion failed.
        reason: String,
    },
}

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded
/// config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7878,
        }
    }
}

/// Optional seed site created on startup when the store is empty.
#[derive(Debug, Clone, Deserialize)]
pub struct BootstrapConfig {
    /// Owner id for the seed site; a fresh id is generated when absent.
    pub owner: Option<Uuid>,
    /// Seed site name.
    pub name: String,
    /// Seed site domain.
    pub domain: String,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Seed site created on first start (optional section).
    pub bootstrap: Option<BootstrapConfig>,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration.
    ///
    /// When `path` is given, that file must exist. Otherwise
    /// `vitrine.toml` is discovered by walking up from the current
    /// directory; if none is found, defaults apply. CLI settings are
    /// applied last.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an explicit path is missing, the file
    /// cannot be read or parsed, or env expansion fails.
    pub fn load(path: Option<&Path>, cli: Option<&CliSettings>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                Self::from_file(path)?
            }
            None => match discover(CONFIG_FILENAME) {
                Some(found) => Self::from_file(&found)?,
                None => Self::default(),
            },
        };

        config.server.host = expand(&config.server.host)?;

        if let Some(cli) = cli {
            if let Some(host) = &cli.host {
                config.server.host.clone_from(host);
            }
            if let Some(port) = cli.port {
                config.server.port = port;
            }
        }

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&text)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }
}

/// Walk up from the current directory looking for a config file.
fn discover(filename: &str) -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let candidate = dir.join(filename);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}

/// Expand `$VAR` / `${VAR}` references in a config value.
fn expand(value: &str) -> Result<String, ConfigError> {
    shellexpand::env(value)
        .map(|expanded| expanded.into_owned())
        .map_err(|e| ConfigError::Env {
            value: value.to_owned(),
            reason: e.to_string(),
        })
}
