//! Catalog providers for fetching and writing live product data
//!
//! This crate provides access to the e-commerce catalog: a REST client for
//! the live store API and an in-memory mock for tests and offline runs. The
//! reconciliation engine only ever sees the materialized snapshot; all
//! network traffic happens strictly before or after a run.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use async_trait::async_trait;
use pricesync_core::config::{CatalogConfig, IngestConfig};
use pricesync_core::error::{Error, Result};
use pricesync_core::{ExistingProduct, ParsedProduct};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

pub mod error;
mod mock;
mod rest;

pub use error::CatalogError;
pub use mock::MockCatalogProvider;
pub use rest::RestCatalogClient;

/// Partial update applied to an existing catalog product. Absent fields are
/// left untouched by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
}

impl ProductPatch {
    /// A patch that only moves the price.
    pub fn price_only(price: f64) -> Self {
        Self {
            price: Some(price),
            ..Self::default()
        }
    }
}

/// Trait for catalog providers
///
/// Implementations expose the four operations the reconciliation pipeline
/// needs: a full snapshot fetch before a run, create/update writes after a
/// run, and a connectivity probe for startup checks.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Fetch the full product catalog as an in-memory snapshot.
    async fn fetch_products(&self) -> Result<Vec<ExistingProduct>>;

    /// Create a new catalog product from a parsed record. Returns the new
    /// catalog id.
    async fn create_product(&self, product: &ParsedProduct) -> Result<String>;

    /// Apply a partial update to an existing product.
    async fn update_product(&self, id: &str, patch: &ProductPatch) -> Result<()>;

    /// Probe the catalog API for reachability and valid credentials.
    async fn test_connection(&self) -> Result<()>;
}

/// Create a new catalog provider based on configuration
///
/// `ingest` supplies the status and quantity assigned to newly created
/// products.
pub fn create_catalog_provider(
    config: &CatalogConfig,
    ingest: &IngestConfig,
) -> Result<Arc<dyn CatalogProvider>> {
    match config.provider.as_str() {
        "rest" => {
            if config.base_url.trim().is_empty() {
                return Err(Error::config(
                    "Catalog base URL required. Set catalog.base_url".to_string(),
                ));
            }

            let auth_token = config
                .auth_token
                .clone()
                .or_else(|| std::env::var("PRICESYNC_CATALOG_AUTH_TOKEN").ok())
                .ok_or_else(|| {
                    Error::config(
                        "Catalog auth token required. Set catalog.auth_token or \
                         PRICESYNC_CATALOG_AUTH_TOKEN env var"
                            .to_string(),
                    )
                })?;

            info!("Creating REST catalog client");
            let client = RestCatalogClient::new(
                config.base_url.clone(),
                auth_token,
                config.page_size,
                config.timeout_secs,
                ingest.default_status,
                ingest.default_quantity,
            )?;
            Ok(Arc::new(client))
        }
        "mock" => {
            info!("Creating mock catalog provider");
            Ok(Arc::new(MockCatalogProvider::default()))
        }
        other => Err(Error::config(format!(
            "Unknown catalog provider: '{other}'. Valid providers: rest, mock"
        ))),
    }
}
