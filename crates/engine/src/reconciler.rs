//! Action classification: create, update, or skip, with advisory issues.

use crate::matcher::MatchResult;
use pricesync_core::config::MatchingConfig;
use pricesync_core::{
    ComparisonResult, ConfidenceLevel, MatchType, ParsedProduct, ProductAction,
};

const ISSUE_MISSING_NAME: &str = "Missing product name";
const ISSUE_INVALID_PRICE: &str = "Invalid or missing price";
const ISSUE_PRICE_CHANGE: &str = "Significant price change";
const ISSUE_LOW_CONFIDENCE: &str = "Low confidence match - manual review required";

/// Turns one parsed product and its match outcome into a classified result.
///
/// Issues are advisory except the hard validation failures, which force
/// `skip` no matter what the matcher found. Never fails on malformed input.
#[derive(Debug, Clone, Copy)]
pub struct Reconciler<'a> {
    config: &'a MatchingConfig,
}

impl<'a> Reconciler<'a> {
    pub fn new(config: &'a MatchingConfig) -> Self {
        Self { config }
    }

    pub fn classify(&self, parsed: ParsedProduct, matched: MatchResult<'_>) -> ComparisonResult {
        let mut issues = Vec::new();

        if parsed.name.trim().is_empty() {
            issues.push(ISSUE_MISSING_NAME.to_string());
        }
        if parsed.price <= 0.0 {
            issues.push(ISSUE_INVALID_PRICE.to_string());
        }
        let invalid = !issues.is_empty();

        let mut price_change = None;
        let mut action = match matched.candidate {
            Some(existing) => {
                let delta = parsed.price - existing.price;
                price_change = Some(delta);

                if significant_change(delta, existing.price, self.config.price_tolerance) {
                    issues.push(ISSUE_PRICE_CHANGE.to_string());
                }

                if matched.match_type == MatchType::PartialMatch
                    && matched.similarity < self.config.min_confidence_for_action
                {
                    issues.push(ISSUE_LOW_CONFIDENCE.to_string());
                    ProductAction::Skip
                } else {
                    ProductAction::Update
                }
            }
            None => ProductAction::Create,
        };

        // Invalid data is never auto-created or auto-updated
        if invalid {
            action = ProductAction::Skip;
        }

        ComparisonResult {
            parsed_product: parsed,
            existing_product: matched.candidate.cloned(),
            match_type: matched.match_type,
            similarity: matched.similarity,
            action,
            price_change,
            issues,
            confidence_level: ConfidenceLevel::from_similarity(matched.similarity),
            debug: Some(matched.debug),
        }
    }
}

/// A change is significant when it moves the price by more than the tolerance
/// fraction. A previously unpriced product gaining a price always counts.
fn significant_change(delta: f64, old_price: f64, tolerance: f64) -> bool {
    if old_price > 0.0 {
        (delta.abs() / old_price) > tolerance
    } else {
        delta != 0.0
    }
}
