//! In-memory catalog lookup index, rebuilt wholesale per reconciliation run.

use crate::normalize::normalize_key;
use pricesync_core::ExistingProduct;
use std::collections::HashMap;
use tracing::warn;

/// Exact-lookup index over one catalog snapshot.
///
/// Built in a single pass over the snapshot. Keys are normalized SKUs and
/// models; duplicate normalized keys are last-write-wins in load order, with
/// each collision logged as a data-quality warning. Read-only after
/// construction, so a single index can serve concurrent matches.
#[derive(Debug)]
pub struct CatalogIndex {
    products: Vec<ExistingProduct>,
    by_sku: HashMap<String, usize>,
    by_model: HashMap<String, usize>,
}

impl CatalogIndex {
    /// Build the index from a catalog snapshot.
    pub fn build(products: Vec<ExistingProduct>) -> Self {
        let mut by_sku = HashMap::with_capacity(products.len());
        let mut by_model = HashMap::with_capacity(products.len());

        for (slot, product) in products.iter().enumerate() {
            if let Some(key) = normalized_field(product.sku.as_deref()) {
                if let Some(prev) = by_sku.insert(key.clone(), slot) {
                    warn!(
                        key = %key,
                        kept_id = %product.id,
                        shadowed_id = %products[prev].id,
                        "duplicate normalized sku in catalog, keeping last loaded"
                    );
                }
            }
            if let Some(key) = normalized_field(product.model.as_deref()) {
                if let Some(prev) = by_model.insert(key.clone(), slot) {
                    warn!(
                        key = %key,
                        kept_id = %product.id,
                        shadowed_id = %products[prev].id,
                        "duplicate normalized model in catalog, keeping last loaded"
                    );
                }
            }
        }

        Self {
            products,
            by_sku,
            by_model,
        }
    }

    /// Exact lookup by normalized SKU.
    pub fn lookup_by_sku(&self, raw: &str) -> Option<&ExistingProduct> {
        self.lookup(&self.by_sku, raw)
    }

    /// Exact lookup by normalized model.
    pub fn lookup_by_model(&self, raw: &str) -> Option<&ExistingProduct> {
        self.lookup(&self.by_model, raw)
    }

    /// The full snapshot, in load order, for linear fuzzy scans.
    pub fn all_products(&self) -> &[ExistingProduct] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    fn lookup<'a>(
        &'a self,
        map: &HashMap<String, usize>,
        raw: &str,
    ) -> Option<&'a ExistingProduct> {
        let key = normalize_key(raw);
        if key.is_empty() {
            return None;
        }
        map.get(&key).map(|&slot| &self.products[slot])
    }
}

/// Normalize an optional key field, dropping blanks.
fn normalized_field(raw: Option<&str>) -> Option<String> {
    let key = normalize_key(raw?);
    if key.is_empty() {
        None
    } else {
        Some(key)
    }
}
