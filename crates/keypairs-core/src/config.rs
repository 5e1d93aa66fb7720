// ABOUTME: Configuration loading for the keypairs service
// ABOUTME: TOML file with per-section defaults; quota limits are passed explicitly, never global

use crate::error::ConfigError;
use keypairs_ssh::KeyType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Default number of keypairs a user may hold.
pub const DEFAULT_KEYPAIR_QUOTA: u32 = 100;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub quota: QuotaConfig,
    pub keys: KeysConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to SQLite database file
    pub path: Option<PathBuf>,
}

impl DatabaseConfig {
    /// Configured path, or `<config dir>/keypairs/keypairs.db`.
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| {
            dirs::config_dir()
                .map(|p| p.join("keypairs").join("keypairs.db"))
                .unwrap_or_else(|| PathBuf::from("keypairs.db"))
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotaConfig {
    /// Keypair limit for users without an override
    pub default_limit: u32,
    /// Per-user limit overrides keyed by user id
    pub per_user: HashMap<String, u32>,
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_KEYPAIR_QUOTA,
            per_user: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeysConfig {
    /// Algorithm used when the server generates a key (e.g. "ssh-ed25519")
    pub default_type: String,
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            default_type: KeyType::default().to_string(),
        }
    }
}

impl KeysConfig {
    pub fn key_type(&self) -> Result<KeyType, ConfigError> {
        self.default_type.parse().map_err(ConfigError::KeyType)
    }
}

impl Config {
    /// Default config file location (`<config dir>/keypairs/config.toml`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("keypairs").join("config.toml"))
    }

    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content, path)
    }

    /// Load the given file, or the default location; missing files yield defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(p) => p,
            None => return Ok(Self::default()),
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.keys.key_type()?;
        Ok(config)
    }
}
