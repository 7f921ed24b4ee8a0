//! Configuration loading from files and environment variables

use crate::error::{Error, Result};
use config::{Config as ConfigLib, Environment, File};
use std::path::Path;

use super::{global_config_path, Config};

impl Config {
    /// Loads configuration from a TOML file with environment variable overrides
    ///
    /// Environment variables are prefixed with `PRICESYNC_` and use double
    /// underscores for nested values. For example:
    /// - `PRICESYNC_CATALOG__BASE_URL=https://shop.example/api`
    /// - `PRICESYNC_MATCHING__SIMILARITY_THRESHOLD=75`
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut builder = ConfigLib::builder();

        // Add the config file if it exists
        if path.exists() {
            builder = builder.add_source(File::from(path));
        }

        // Add environment variables with PRICESYNC_ prefix
        builder = builder.add_source(
            Environment::with_prefix("PRICESYNC")
                .separator("__")
                .try_parsing(true),
        );

        // Support the bare CATALOG_AUTH_TOKEN variable used by deploy scripts
        if let Ok(token) = std::env::var("CATALOG_AUTH_TOKEN") {
            builder = builder
                .set_override("catalog.auth_token", token)
                .map_err(|e| Error::config(format!("Failed to set CATALOG_AUTH_TOKEN: {e}")))?;
        }

        let config = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build config: {e}")))?;

        // serde defaults fill any section or field the sources omit
        config
            .try_deserialize()
            .map_err(|e| Error::config(format!("Failed to deserialize config: {e}")))
    }

    /// Creates a config from a TOML string (useful for testing)
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(format!("Failed to parse TOML: {e}")))
    }

    /// Load configuration from a single file
    ///
    /// Precedence (lowest to highest):
    /// 1. Hardcoded defaults
    /// 2. Config file (~/.pricesync/config.toml or custom --config path)
    /// 3. Environment variables (PRICESYNC_*)
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => global_config_path()?,
        };
        Self::from_file(&path)
    }
}
