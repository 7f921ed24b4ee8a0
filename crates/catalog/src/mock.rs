//! In-memory catalog provider for tests and offline runs.

use crate::{CatalogProvider, ProductPatch};
use async_trait::async_trait;
use pricesync_core::error::Result;
use pricesync_core::{ExistingProduct, ParsedProduct};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Serves a fixed product list and records every write it receives, so tests
/// can assert on what the pipeline would have sent to the live store.
#[derive(Debug, Default)]
pub struct MockCatalogProvider {
    products: Mutex<Vec<ExistingProduct>>,
    created: Mutex<Vec<ParsedProduct>>,
    updated: Mutex<Vec<(String, ProductPatch)>>,
    next_id: AtomicU64,
}

impl MockCatalogProvider {
    pub fn with_products(products: Vec<ExistingProduct>) -> Self {
        Self {
            products: Mutex::new(products),
            next_id: AtomicU64::new(1000),
            ..Self::default()
        }
    }

    /// Parsed products passed to `create_product`, in call order.
    pub fn created(&self) -> Vec<ParsedProduct> {
        self.created.lock().map(|g| g.clone()).unwrap_or_default()
    }

    /// Patches passed to `update_product`, in call order.
    pub fn updated(&self) -> Vec<(String, ProductPatch)> {
        self.updated.lock().map(|g| g.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl CatalogProvider for MockCatalogProvider {
    async fn fetch_products(&self) -> Result<Vec<ExistingProduct>> {
        Ok(self.products.lock().map(|g| g.clone()).unwrap_or_default())
    }

    async fn create_product(&self, product: &ParsedProduct) -> Result<String> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst).to_string();
        if let Ok(mut created) = self.created.lock() {
            created.push(product.clone());
        }
        if let Ok(mut products) = self.products.lock() {
            products.push(ExistingProduct {
                id: id.clone(),
                name: product.name.clone(),
                model: product.model.clone(),
                sku: product.sku.clone(),
                price: product.price,
                description: product.description.clone(),
                status: Some(1),
                quantity: Some(0),
            });
        }
        Ok(id)
    }

    async fn update_product(&self, id: &str, patch: &ProductPatch) -> Result<()> {
        if let Ok(mut updated) = self.updated.lock() {
            updated.push((id.to_string(), patch.clone()));
        }
        if let Ok(mut products) = self.products.lock() {
            if let Some(product) = products.iter_mut().find(|p| p.id == id) {
                if let Some(name) = &patch.name {
                    product.name = name.clone();
                }
                if let Some(price) = patch.price {
                    product.price = price;
                }
                if let Some(description) = &patch.description {
                    product.description = Some(description.clone());
                }
                if let Some(status) = patch.status {
                    product.status = Some(status);
                }
                if let Some(quantity) = patch.quantity {
                    product.quantity = Some(quantity);
                }
            }
        }
        Ok(())
    }

    async fn test_connection(&self) -> Result<()> {
        Ok(())
    }
}
