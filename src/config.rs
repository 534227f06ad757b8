//! Layered configuration
//!
//! Sources, lowest precedence first:
//! 1. built-in defaults ([`Config::default`])
//! 2. a YAML/TOML/JSON file, either given explicitly or `config.yaml` in the
//!    platform config directory
//! 3. environment variables prefixed with `DESK__`, nested keys separated by
//!    `__` (for example `DESK__SERVER__PORT=8080`)

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const ENV_PREFIX: &str = "DESK";
const ENV_SEPARATOR: &str = "__";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
    pub bootstrap: BootstrapConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Where records are kept
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(".support-desk"),
        }
    }
}

/// Token signing settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "change-me-in-production".to_string(),
            token_ttl_hours: 24,
        }
    }
}

/// Default MANAGER account created when none exists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            name: "Admin".to_string(),
            email: "admin@test.com".to_string(),
            password: "Admin@123".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from defaults, an optional file and the environment
    ///
    /// An explicitly given file must exist; the platform default file is
    /// optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&Self::default())?);

        match path {
            Some(path) => {
                builder = builder.add_source(config::File::from(path).required(true));
            },
            None => {
                if let Some(default_path) = Self::default_path() {
                    builder = builder.add_source(config::File::from(default_path).required(false));
                }
            },
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Platform config file location, e.g. `~/.config/support-desk/config.yaml`
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "support-desk")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Whether the signing secret is still the shipped default
    #[must_use]
    pub fn uses_default_secret(&self) -> bool {
        self.auth.jwt_secret == AuthConfig::default().jwt_secret
    }
}
