//! Product records on both sides of a reconciliation run.

use serde::{Deserialize, Serialize};

/// A product record extracted from a vendor pricelist document.
///
/// Produced by the document-parser field mapping, one per pricelist row.
/// Immutable once produced; it has no identity beyond its position in the
/// batch until the matcher pairs it with a catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ParsedProduct {
    /// Product name as it appears on the pricelist
    pub name: String,

    /// Manufacturer model code, if the pricelist carried one explicitly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Stock keeping unit, if the pricelist carried one explicitly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,

    /// Unit price; 0.0 when the source price string was unparsable
    pub price: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
}

impl ParsedProduct {
    /// Returns true if the record carries the minimum data needed to act on it:
    /// a non-empty name and a positive price.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && self.price > 0.0
    }

    /// The identifying key for exact SKU matching: the explicit SKU when
    /// present, otherwise the explicit model.
    pub fn sku_or_model(&self) -> Option<&str> {
        self.sku
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| self.model.as_deref().filter(|s| !s.trim().is_empty()))
    }
}

/// A product record from the live catalog snapshot.
///
/// Loaded in bulk at the start of a run and treated as read-only for the
/// duration of the reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ExistingProduct {
    /// Opaque, stable catalog identifier
    pub id: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,

    pub price: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Catalog status flag (1 = enabled)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(name: &str, price: f64) -> ParsedProduct {
        ParsedProduct {
            name: name.to_string(),
            model: None,
            sku: None,
            price,
            description: None,
            category: None,
            manufacturer: None,
        }
    }

    #[test]
    fn valid_requires_name_and_positive_price() {
        assert!(parsed("Denon AVR-X1800H", 18999.0).is_valid());
        assert!(!parsed("", 18999.0).is_valid());
        assert!(!parsed("   ", 18999.0).is_valid());
        assert!(!parsed("Unknown Gadget", 0.0).is_valid());
        assert!(!parsed("Unknown Gadget", -5.0).is_valid());
    }

    #[test]
    fn sku_or_model_prefers_sku() {
        let mut p = parsed("Denon AVR-X1800H", 100.0);
        assert_eq!(p.sku_or_model(), None);

        p.model = Some("AVR-X1800H".to_string());
        assert_eq!(p.sku_or_model(), Some("AVR-X1800H"));

        p.sku = Some("DENON-AVR-X1800H".to_string());
        assert_eq!(p.sku_or_model(), Some("DENON-AVR-X1800H"));

        // Blank SKU falls back to the model
        p.sku = Some("  ".to_string());
        assert_eq!(p.sku_or_model(), Some("AVR-X1800H"));
    }
}
