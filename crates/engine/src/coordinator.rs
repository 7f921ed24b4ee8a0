//! Batch run coordination: one index build, parallel per-product matching.

use crate::index::CatalogIndex;
use crate::matcher::Matcher;
use crate::reconciler::Reconciler;
use pricesync_core::config::MatchingConfig;
use pricesync_core::{ComparisonResult, ComparisonSummary, ExistingProduct, ParsedProduct};
use rayon::prelude::*;
use tracing::debug;

/// Full output of one reconciliation run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcileOutcome {
    /// One result per input product, in input order
    pub results: Vec<ComparisonResult>,
    pub summary: ComparisonSummary,
}

/// Reconcile a parsed batch against a catalog snapshot.
///
/// Builds the catalog index once, then matches products in parallel. The
/// parallel map is indexed, so output order always mirrors input order, and
/// identical inputs always produce identical outputs.
pub fn reconcile(
    parsed: Vec<ParsedProduct>,
    existing: Vec<ExistingProduct>,
    config: &MatchingConfig,
) -> ReconcileOutcome {
    let index = CatalogIndex::build(existing);
    let matcher = Matcher::new(&index, config);
    let reconciler = Reconciler::new(config);

    let results: Vec<ComparisonResult> = parsed
        .into_par_iter()
        .map(|product| {
            let matched = matcher.match_product(&product);
            reconciler.classify(product, matched)
        })
        .collect();

    let summary = ComparisonSummary::from_results(&results);
    debug!(
        products = summary.total_products,
        catalog = index.len(),
        creates = summary.actions.create,
        updates = summary.actions.update,
        skips = summary.actions.skip,
        "reconciliation run complete"
    );

    ReconcileOutcome { results, summary }
}
