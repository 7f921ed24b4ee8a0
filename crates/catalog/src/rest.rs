//! REST client for the live catalog API.

use crate::error::CatalogError;
use crate::{CatalogProvider, ProductPatch};
use async_trait::async_trait;
use pricesync_core::error::Result;
use pricesync_core::{parse_price, ExistingProduct, ParsedProduct};
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

/// REST catalog client
///
/// Talks to the store's product API with a pre-encoded basic-auth token.
/// Listing is paginated with `page`/`limit` query parameters; a page shorter
/// than the requested limit ends the scan. Product fields in responses are
/// tolerated as either strings or numbers, since the store serializes
/// numeric columns inconsistently.
pub struct RestCatalogClient {
    client: Client,
    base_url: String,
    auth_header: String,
    page_size: usize,
    default_status: i32,
    default_quantity: i64,
}

impl RestCatalogClient {
    /// Create a new REST catalog client
    ///
    /// # Arguments
    /// * `base_url` - Store API root, e.g. "https://shop.example.com"
    /// * `auth_token` - Pre-encoded basic-auth credential
    /// * `page_size` - Products requested per listing page
    /// * `timeout_secs` - Request timeout in seconds
    /// * `default_status` - Status flag assigned to newly created products
    /// * `default_quantity` - Initial stock for newly created products
    pub fn new(
        base_url: String,
        auth_token: String,
        page_size: usize,
        timeout_secs: u64,
        default_status: i32,
        default_quantity: i64,
    ) -> Result<Self> {
        info!("Initializing REST catalog client");
        info!("  Base URL: {base_url}");
        info!("  Page size: {page_size}");
        info!("  Timeout: {timeout_secs}s");

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| {
                CatalogError::ConfigError(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_header: format!("Basic {auth_token}"),
            page_size,
            default_status,
            default_quantity,
        })
    }

    async fn fetch_page(&self, page: usize) -> Result<Vec<ExistingProduct>> {
        let url = format!("{}/api/products", self.base_url);
        let response = self
            .client
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, &self.auth_header)
            .query(&[("page", page.to_string()), ("limit", self.page_size.to_string())])
            .send()
            .await
            .map_err(|e| CatalogError::RequestError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(
                CatalogError::ApiError(format!("listing page {page} returned {status}: {body}"))
                    .into(),
            );
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| CatalogError::ApiError(format!("invalid listing body: {e}")))?;

        let raw_products = body
            .pointer("/data/products")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                CatalogError::ApiError("listing body missing data.products array".to_string())
            })?;

        let mut products = Vec::with_capacity(raw_products.len());
        for raw in raw_products {
            match product_from_value(raw) {
                Some(product) => products.push(product),
                None => warn!(record = %raw, "skipping catalog record without an id"),
            }
        }

        debug!(page, count = products.len(), "fetched catalog page");
        Ok(products)
    }
}

#[async_trait]
impl CatalogProvider for RestCatalogClient {
    async fn fetch_products(&self) -> Result<Vec<ExistingProduct>> {
        let mut all = Vec::new();
        let mut page = 1;

        loop {
            let batch = self.fetch_page(page).await?;
            let short_page = batch.len() < self.page_size;
            all.extend(batch);
            if short_page {
                break;
            }
            page += 1;
        }

        info!(products = all.len(), pages = page, "catalog snapshot fetched");
        Ok(all)
    }

    async fn create_product(&self, product: &ParsedProduct) -> Result<String> {
        let url = format!("{}/api/products", self.base_url);
        let response = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, &self.auth_header)
            .json(&json!({
                "name": product.name,
                "model": product.model,
                "sku": product.sku,
                "price": product.price,
                "description": product.description,
                "category": product.category,
                "manufacturer": product.manufacturer,
                "status": self.default_status,
                "quantity": self.default_quantity,
            }))
            .send()
            .await
            .map_err(|e| CatalogError::RequestError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::ApiError(format!(
                "create returned {status}: {body}"
            ))
            .into());
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| CatalogError::ApiError(format!("invalid create body: {e}")))?;

        let id = body
            .pointer("/data/id")
            .or_else(|| body.get("id"))
            .and_then(value_to_string)
            .ok_or_else(|| CatalogError::ApiError("create body missing product id".to_string()))?;

        debug!(id = %id, name = %product.name, "created catalog product");
        Ok(id)
    }

    async fn update_product(&self, id: &str, patch: &ProductPatch) -> Result<()> {
        let url = format!("{}/api/products/{id}", self.base_url);
        let response = self
            .client
            .put(&url)
            .header(reqwest::header::AUTHORIZATION, &self.auth_header)
            .json(patch)
            .send()
            .await
            .map_err(|e| CatalogError::RequestError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::ApiError(format!(
                "update of {id} returned {status}: {body}"
            ))
            .into());
        }

        debug!(id = %id, "updated catalog product");
        Ok(())
    }

    async fn test_connection(&self) -> Result<()> {
        let url = format!("{}/api/products", self.base_url);
        let response = self
            .client
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, &self.auth_header)
            .query(&[("page", "1"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| CatalogError::RequestError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(
                CatalogError::ApiError(format!("connection probe returned {status}")).into(),
            );
        }

        info!("catalog connection ok");
        Ok(())
    }
}

/// Convert one raw listing record, tolerating string/number drift on every
/// field. Records without an id are unusable and dropped by the caller.
fn product_from_value(raw: &Value) -> Option<ExistingProduct> {
    let id = raw.get("id").or_else(|| raw.get("product_id"))?;
    let id = value_to_string(id)?;

    Some(ExistingProduct {
        id,
        name: raw.get("name").and_then(value_to_string).unwrap_or_default(),
        model: raw.get("model").and_then(value_to_string).filter(|s| !s.is_empty()),
        sku: raw.get("sku").and_then(value_to_string).filter(|s| !s.is_empty()),
        price: raw.get("price").map(value_to_price).unwrap_or(0.0),
        description: raw
            .get("description")
            .and_then(value_to_string)
            .filter(|s| !s.is_empty()),
        status: raw.get("status").and_then(value_to_i64).map(|v| v as i32),
        quantity: raw.get("quantity").and_then(value_to_i64),
    })
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn value_to_price(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        Value::String(s) => parse_price(s).unwrap_or(0.0),
        _ => 0.0,
    }
}

fn value_to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::product_from_value;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn tolerates_string_and_numeric_fields() {
        let record = json!({
            "id": 42,
            "name": "Denon AVR-X1800H AV Receiver",
            "sku": "AVR-X1800H",
            "price": "17,999.00",
            "status": "1",
            "quantity": 3
        });

        let product = product_from_value(&record).expect("product");
        assert_eq!(product.id, "42");
        assert_eq!(product.price, 17999.0);
        assert_eq!(product.status, Some(1));
        assert_eq!(product.quantity, Some(3));
        assert_eq!(product.model, None);
    }

    #[test]
    fn product_id_alias_is_accepted() {
        let record = json!({ "product_id": "A-17", "name": "Thing", "price": 5.0 });
        let product = product_from_value(&record).expect("product");
        assert_eq!(product.id, "A-17");
    }

    #[test]
    fn records_without_id_are_rejected() {
        assert!(product_from_value(&json!({ "name": "No Id", "price": 1.0 })).is_none());
    }

    #[test]
    fn blank_optional_fields_become_none() {
        let record = json!({ "id": 1, "name": "Thing", "sku": "  ", "model": "" });
        let product = product_from_value(&record).expect("product");
        assert_eq!(product.sku, None);
        assert_eq!(product.model, None);
        assert_eq!(product.price, 0.0);
    }
}
