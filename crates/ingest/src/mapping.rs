//! Alias resolution and value coercion for raw pricelist records.

use pricesync_core::config::IngestConfig;
use pricesync_core::{parse_price, ParsedProduct};
use serde_json::Value;
use tracing::debug;

/// Accepted spellings per target field, in lookup priority order. These cover
/// the document-parser output plus the spreadsheet column conventions seen in
/// vendor pricelists.
const NAME_ALIASES: &[&str] = &["name", "product_name", "product", "title", "item", "description_short"];
const MODEL_ALIASES: &[&str] = &["model", "model_number", "model_no", "model_code"];
const SKU_ALIASES: &[&str] = &["sku", "stock_code", "item_code", "part_number", "product_code"];
const PRICE_ALIASES: &[&str] = &["price", "unit_price", "retail_price", "rrp", "selling_price", "amount"];
const DESCRIPTION_ALIASES: &[&str] = &["description", "details", "long_description"];
const CATEGORY_ALIASES: &[&str] = &["category", "product_category"];
const MANUFACTURER_ALIASES: &[&str] = &["manufacturer", "brand", "vendor"];

/// Map one raw record onto a parsed product.
///
/// Missing or malformed fields never error: the name defaults to empty, an
/// unparsable price maps to 0.0, and both are caught by validation during
/// reconciliation. Category and manufacturer fall back to the configured
/// defaults when the record carries neither.
pub fn map_record(record: &Value, config: &IngestConfig) -> ParsedProduct {
    let name = string_field(record, NAME_ALIASES).unwrap_or_default();
    let price = price_field(record);

    if price == 0.0 {
        debug!(name = %name, "record has no usable price, leaving for validation");
    }

    ParsedProduct {
        name,
        model: string_field(record, MODEL_ALIASES),
        sku: string_field(record, SKU_ALIASES),
        price,
        description: string_field(record, DESCRIPTION_ALIASES),
        category: string_field(record, CATEGORY_ALIASES)
            .or_else(|| non_blank(&config.default_category)),
        manufacturer: string_field(record, MANUFACTURER_ALIASES)
            .or_else(|| non_blank(&config.default_manufacturer)),
    }
}

/// Map a whole batch, one product per record, preserving order.
pub fn map_batch(records: &[Value], config: &IngestConfig) -> Vec<ParsedProduct> {
    records.iter().map(|r| map_record(r, config)).collect()
}

/// First alias present with a usable value wins. JSON numbers are accepted
/// where a vendor sheet exported a code column as numeric.
fn string_field(record: &Value, aliases: &[&str]) -> Option<String> {
    for alias in aliases {
        match record.get(alias) {
            Some(Value::String(s)) => {
                let trimmed = s.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
            Some(Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }
    }
    None
}

fn price_field(record: &Value) -> f64 {
    for alias in PRICE_ALIASES {
        match record.get(alias) {
            Some(Value::Number(n)) => {
                if let Some(v) = n.as_f64().filter(|v| v.is_finite() && *v > 0.0) {
                    return v;
                }
            }
            Some(Value::String(s)) => {
                if let Some(v) = parse_price(s).filter(|v| *v > 0.0) {
                    return v;
                }
            }
            _ => {}
        }
    }
    0.0
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
