//! Command handlers
//!
//! Each handler takes a [`HandlerContext`] holding the loaded configuration,
//! the opened storage and the output formatter.

mod bootstrap;
mod config;
#[cfg(feature = "api")]
mod serve;
mod user;

pub use bootstrap::handle_bootstrap;
pub use config::{handle_config_path, handle_config_show};
#[cfg(feature = "api")]
pub use serve::handle_serve;
pub use user::{handle_user_create, handle_user_list};

use crate::cli::OutputFormatter;
use crate::config::Config;
use crate::error::Result;
use crate::storage::FileStorage;
use std::path::Path;
use std::sync::Arc;

/// Resources shared by command handlers
pub struct HandlerContext {
    pub config: Config,
    pub storage: Arc<FileStorage>,
    pub formatter: OutputFormatter,
}

impl HandlerContext {
    /// Load configuration and open the storage directory it names
    pub fn new(config_path: Option<&Path>, formatter: OutputFormatter) -> Result<Self> {
        let config = Config::load(config_path)?;
        Self::with_config(config, formatter)
    }

    pub fn with_config(config: Config, formatter: OutputFormatter) -> Result<Self> {
        let storage = FileStorage::open(&config.storage.path)?;
        tracing::debug!(path = %storage.base_dir().display(), "Storage opened");
        Ok(Self {
            config,
            storage: Arc::new(storage),
            formatter,
        })
    }
}
