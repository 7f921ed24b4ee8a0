//! Comparison output types.
//!
//! Field names and enum spellings here are the wire contract consumed by the
//! dashboard and automation scripts; change them and every consumer breaks.

use crate::product::{ExistingProduct, ParsedProduct};
use serde::{Deserialize, Serialize};

/// How a parsed product was paired with a catalog product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    ExactSku,
    ExactModel,
    ModelExtracted,
    FuzzyName,
    PartialMatch,
    NoMatch,
}

/// Action the reconciler decided on for a parsed product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum ProductAction {
    Create,
    Update,
    Skip,
}

/// Banded classification of match similarity, used for UI/automation risk
/// signaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
    None,
}

impl ConfidenceLevel {
    /// Band a 0-100 similarity score.
    pub fn from_similarity(similarity: u8) -> Self {
        match similarity {
            90..=u8::MAX => Self::High,
            70..=89 => Self::Medium,
            1..=69 => Self::Low,
            0 => Self::None,
        }
    }
}

/// Diagnostic payload attached to a comparison result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct MatchDebug {
    /// Number of catalog products the matcher considered
    pub products_checked: usize,

    /// Best fuzzy-name score observed, even when the run ended in no_match
    pub best_fuzzy_score: u8,

    /// Model token extracted from the parsed name, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_model: Option<String>,
}

/// The unit of reconciliation output: one per parsed product, in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub parsed_product: ParsedProduct,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_product: Option<ExistingProduct>,

    pub match_type: MatchType,

    /// Match similarity, 0-100
    pub similarity: u8,

    pub action: ProductAction,

    /// Signed price delta (new - old); present only when a candidate matched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_change: Option<f64>,

    /// Human-readable advisory and validation notes, in detection order
    pub issues: Vec<String>,

    pub confidence_level: ConfidenceLevel,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<MatchDebug>,
}

/// Per-action counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ActionCounts {
    pub create: usize,
    pub update: usize,
    pub skip: usize,
}

/// Per-match-type counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MatchTypeCounts {
    pub exact_sku: usize,
    pub exact_model: usize,
    pub model_extracted: usize,
    pub fuzzy_name: usize,
    pub partial_match: usize,
    pub no_match: usize,
}

/// Per-confidence-level counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ConfidenceCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub none: usize,
}

/// Aggregate counters over one reconciliation batch.
///
/// Purely derived from the result list; never an independent source of truth.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ComparisonSummary {
    pub total_products: usize,
    pub actions: ActionCounts,
    pub match_types: MatchTypeCounts,
    pub confidence_levels: ConfidenceCounts,
    pub issues_count: usize,
    pub products_with_issues: usize,
    pub average_similarity: f64,
}

impl ComparisonSummary {
    /// Derive the summary by counting over a result slice.
    pub fn from_results(results: &[ComparisonResult]) -> Self {
        let mut summary = Self {
            total_products: results.len(),
            ..Self::default()
        };

        let mut similarity_total: u64 = 0;

        for result in results {
            match result.action {
                ProductAction::Create => summary.actions.create += 1,
                ProductAction::Update => summary.actions.update += 1,
                ProductAction::Skip => summary.actions.skip += 1,
            }

            match result.match_type {
                MatchType::ExactSku => summary.match_types.exact_sku += 1,
                MatchType::ExactModel => summary.match_types.exact_model += 1,
                MatchType::ModelExtracted => summary.match_types.model_extracted += 1,
                MatchType::FuzzyName => summary.match_types.fuzzy_name += 1,
                MatchType::PartialMatch => summary.match_types.partial_match += 1,
                MatchType::NoMatch => summary.match_types.no_match += 1,
            }

            match result.confidence_level {
                ConfidenceLevel::High => summary.confidence_levels.high += 1,
                ConfidenceLevel::Medium => summary.confidence_levels.medium += 1,
                ConfidenceLevel::Low => summary.confidence_levels.low += 1,
                ConfidenceLevel::None => summary.confidence_levels.none += 1,
            }

            if !result.issues.is_empty() {
                summary.products_with_issues += 1;
                summary.issues_count += result.issues.len();
            }

            similarity_total += u64::from(result.similarity);
        }

        if !results.is_empty() {
            summary.average_similarity = similarity_total as f64 / results.len() as f64;
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn result(
        action: ProductAction,
        match_type: MatchType,
        similarity: u8,
        issues: Vec<String>,
    ) -> ComparisonResult {
        ComparisonResult {
            parsed_product: ParsedProduct {
                name: "Test".to_string(),
                model: None,
                sku: None,
                price: 1.0,
                description: None,
                category: None,
                manufacturer: None,
            },
            existing_product: None,
            match_type,
            similarity,
            action,
            price_change: None,
            issues,
            confidence_level: ConfidenceLevel::from_similarity(similarity),
            debug: None,
        }
    }

    #[test]
    fn confidence_banding() {
        assert_eq!(ConfidenceLevel::from_similarity(100), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_similarity(90), ConfidenceLevel::High);
        assert_eq!(
            ConfidenceLevel::from_similarity(89),
            ConfidenceLevel::Medium
        );
        assert_eq!(
            ConfidenceLevel::from_similarity(70),
            ConfidenceLevel::Medium
        );
        assert_eq!(ConfidenceLevel::from_similarity(69), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_similarity(1), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_similarity(0), ConfidenceLevel::None);
    }

    #[test]
    fn summary_counts_total_to_result_count() {
        let results = vec![
            result(ProductAction::Update, MatchType::ExactSku, 100, vec![]),
            result(
                ProductAction::Create,
                MatchType::NoMatch,
                0,
                vec!["note".to_string()],
            ),
            result(
                ProductAction::Skip,
                MatchType::PartialMatch,
                55,
                vec!["a".to_string(), "b".to_string()],
            ),
        ];

        let summary = ComparisonSummary::from_results(&results);
        assert_eq!(summary.total_products, 3);
        assert_eq!(
            summary.actions.create + summary.actions.update + summary.actions.skip,
            3
        );
        assert_eq!(summary.match_types.exact_sku, 1);
        assert_eq!(summary.match_types.no_match, 1);
        assert_eq!(summary.match_types.partial_match, 1);
        assert_eq!(summary.confidence_levels.high, 1);
        assert_eq!(summary.confidence_levels.none, 1);
        assert_eq!(summary.confidence_levels.low, 1);
        assert_eq!(summary.issues_count, 3);
        assert_eq!(summary.products_with_issues, 2);
        assert!((summary.average_similarity - (155.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn empty_batch_yields_zero_summary() {
        let summary = ComparisonSummary::from_results(&[]);
        assert_eq!(summary, ComparisonSummary::default());
    }

    #[test]
    fn wire_field_names_are_stable() {
        let r = result(ProductAction::Update, MatchType::ExactSku, 100, vec![]);
        let value = serde_json::to_value(&r).expect("serialize");
        let obj = value.as_object().expect("object");

        assert!(obj.contains_key("parsedProduct"));
        assert!(obj.contains_key("matchType"));
        assert!(obj.contains_key("confidenceLevel"));
        assert_eq!(value["matchType"], "exact_sku");
        assert_eq!(value["action"], "update");
        assert_eq!(value["confidenceLevel"], "high");
        // Absent optionals stay off the wire
        assert!(!obj.contains_key("existingProduct"));
        assert!(!obj.contains_key("priceChange"));
    }
}
