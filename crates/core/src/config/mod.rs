//! Configuration module for the pricesync system
//!
//! Configuration can be loaded from TOML files and/or environment variables.
//! Thresholds are never read from ambient state; the engine receives an
//! explicit [`MatchingConfig`] at construction time.

mod defaults;
mod loading;

#[cfg(test)]
mod tests;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use defaults::*;

/// Returns the path to the global configuration file
///
/// The global config is stored at `~/.pricesync/config.toml`.
pub fn global_config_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| Error::config("Unable to determine home directory".to_string()))?;
    Ok(home_dir.join(".pricesync").join("config.toml"))
}

/// Main configuration structure for the pricesync system
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Matching and reconciliation thresholds
    #[serde(default)]
    pub matching: MatchingConfig,

    /// Catalog API configuration
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Ingest defaulting configuration
    #[serde(default)]
    pub ingest: IngestConfig,

    /// REST server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

/// Thresholds driving the matcher and reconciler.
///
/// Similarity values are on the 0-100 scale used throughout the wire format;
/// `price_tolerance` is a fraction of the existing price.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Minimum fuzzy-name score for a fuzzy_name match
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: u8,

    /// Minimum fuzzy-name score for a partial_match; below this is no_match
    #[serde(default = "default_low_match_floor")]
    pub low_match_floor: u8,

    /// Minimum similarity for a partial_match to be auto-updated rather than
    /// skipped for manual review
    #[serde(default = "default_min_confidence_for_action")]
    pub min_confidence_for_action: u8,

    /// Relative price delta above which a price change is flagged
    #[serde(default = "default_price_tolerance")]
    pub price_tolerance: f64,
}

/// Configuration for the catalog REST API client
#[derive(Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Provider type: "rest" (default), "mock"
    #[serde(default = "default_catalog_provider")]
    pub provider: String,

    /// Catalog API base URL
    #[serde(default = "default_catalog_base_url")]
    pub base_url: String,

    /// Pre-encoded basic-auth token (or use PRICESYNC_CATALOG__AUTH_TOKEN)
    #[serde(default)]
    pub auth_token: Option<String>,

    /// Products requested per listing page
    #[serde(default = "default_catalog_page_size")]
    pub page_size: usize,

    /// Request timeout in seconds
    #[serde(default = "default_catalog_timeout_secs")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "***REDACTED***"))
            .field("page_size", &self.page_size)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Defaults applied when a pricelist record omits optional fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Category assigned to records without one
    #[serde(default = "default_target_category")]
    pub default_category: String,

    /// Manufacturer assigned to records without one
    #[serde(default = "default_manufacturer")]
    pub default_manufacturer: String,

    /// Catalog status flag for newly created products (1 = enabled)
    #[serde(default = "default_product_status")]
    pub default_status: i32,

    /// Initial stock quantity for newly created products
    #[serde(default = "default_product_quantity")]
    pub default_quantity: i64,
}

/// Configuration for the REST API server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to listen on (host is always 127.0.0.1 for localhost-only access)
    #[serde(default = "default_server_port")]
    pub port: u16,

    /// Allowed CORS origins (empty = disabled, ["*"] = all origins)
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

// Default implementations

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
            low_match_floor: default_low_match_floor(),
            min_confidence_for_action: default_min_confidence_for_action(),
            price_tolerance: default_price_tolerance(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            provider: default_catalog_provider(),
            base_url: default_catalog_base_url(),
            auth_token: None,
            page_size: default_catalog_page_size(),
            timeout_secs: default_catalog_timeout_secs(),
        }
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            default_category: default_target_category(),
            default_manufacturer: default_manufacturer(),
            default_status: default_product_status(),
            default_quantity: default_product_quantity(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_server_port(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        let valid_providers = ["rest", "mock"];
        if !valid_providers.contains(&self.catalog.provider.as_str()) {
            return Err(Error::config(format!(
                "Invalid catalog provider '{}'. Must be one of: {:?}",
                self.catalog.provider, valid_providers
            )));
        }

        if self.matching.similarity_threshold > 100 {
            return Err(Error::config(format!(
                "matching.similarity_threshold must be 0-100, got {}",
                self.matching.similarity_threshold
            )));
        }

        if self.matching.low_match_floor > self.matching.similarity_threshold {
            return Err(Error::config(format!(
                "matching.low_match_floor ({}) cannot exceed similarity_threshold ({})",
                self.matching.low_match_floor, self.matching.similarity_threshold
            )));
        }

        if self.matching.min_confidence_for_action > 100 {
            return Err(Error::config(format!(
                "matching.min_confidence_for_action must be 0-100, got {}",
                self.matching.min_confidence_for_action
            )));
        }

        if !(self.matching.price_tolerance >= 0.0 && self.matching.price_tolerance.is_finite()) {
            return Err(Error::config(format!(
                "matching.price_tolerance must be a non-negative fraction, got {}",
                self.matching.price_tolerance
            )));
        }

        if self.catalog.page_size == 0 {
            return Err(Error::config(
                "catalog.page_size must be greater than 0".to_string(),
            ));
        }
        if self.catalog.page_size > 1000 {
            return Err(Error::config(format!(
                "catalog.page_size too large (max 1000, got {})",
                self.catalog.page_size
            )));
        }

        if self.catalog.timeout_secs == 0 {
            return Err(Error::config(
                "catalog.timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Saves the configuration to a TOML file
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| Error::config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, toml_string)
            .map_err(|e| Error::config(format!("Failed to write config file: {e}")))?;

        Ok(())
    }
}
