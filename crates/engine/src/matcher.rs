//! Tiered candidate matching for a single parsed product.

use crate::extract::extract_model_token;
use crate::index::CatalogIndex;
use crate::similarity::similarity_score;
use pricesync_core::config::MatchingConfig;
use pricesync_core::{ExistingProduct, MatchDebug, MatchType, ParsedProduct};
use std::cmp::Ordering;

/// Outcome of matching one parsed product against the catalog index.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult<'a> {
    pub match_type: MatchType,

    /// 0-100; 0 for no_match even when a weak fuzzy score existed
    pub similarity: u8,

    pub candidate: Option<&'a ExistingProduct>,

    pub debug: MatchDebug,
}

/// Applies match strategies in fixed priority order, stopping at the first
/// hit: exact SKU, exact model, extracted model, then fuzzy name scan.
///
/// Never mutates the index; one matcher can serve concurrent products.
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'a> {
    index: &'a CatalogIndex,
    config: &'a MatchingConfig,
}

impl<'a> Matcher<'a> {
    pub fn new(index: &'a CatalogIndex, config: &'a MatchingConfig) -> Self {
        Self { index, config }
    }

    pub fn match_product(&self, parsed: &ParsedProduct) -> MatchResult<'a> {
        let mut debug = MatchDebug::default();

        // Tier 1: explicit SKU (falling back to explicit model) against the
        // SKU index.
        if let Some(key) = parsed.sku_or_model() {
            if let Some(candidate) = self.index.lookup_by_sku(key) {
                return MatchResult {
                    match_type: MatchType::ExactSku,
                    similarity: 100,
                    candidate: Some(candidate),
                    debug,
                };
            }
        }

        // Tier 2: explicit model against the model index.
        if let Some(model) = non_blank(parsed.model.as_deref()) {
            if let Some(candidate) = self.index.lookup_by_model(model) {
                return MatchResult {
                    match_type: MatchType::ExactModel,
                    similarity: 100,
                    candidate: Some(candidate),
                    debug,
                };
            }
        }

        // Tier 3: model code mined from the free-text name, tried against
        // both indices. Discounted because extraction is heuristic.
        if let Some(token) = extract_model_token(&parsed.name) {
            let hit = self
                .index
                .lookup_by_sku(&token)
                .or_else(|| self.index.lookup_by_model(&token));
            debug.extracted_model = Some(token);
            if let Some(candidate) = hit {
                return MatchResult {
                    match_type: MatchType::ModelExtracted,
                    similarity: 95,
                    candidate: Some(candidate),
                    debug,
                };
            }
        }

        // Tier 4: fuzzy name scan over the whole snapshot.
        let mut best: Option<(&ExistingProduct, u8)> = None;
        for product in self.index.all_products() {
            let score = similarity_score(&parsed.name, &product.name);
            debug.products_checked += 1;

            best = match best {
                None => Some((product, score)),
                Some((held, held_score)) => match score.cmp(&held_score) {
                    Ordering::Greater => Some((product, score)),
                    // Ties go to the lower catalog id for reproducible runs
                    Ordering::Equal if id_order(&product.id, &held.id) == Ordering::Less => {
                        Some((product, score))
                    }
                    _ => Some((held, held_score)),
                },
            };
        }

        let Some((candidate, score)) = best else {
            return MatchResult {
                match_type: MatchType::NoMatch,
                similarity: 0,
                candidate: None,
                debug,
            };
        };

        debug.best_fuzzy_score = score;

        if score >= self.config.similarity_threshold {
            MatchResult {
                match_type: MatchType::FuzzyName,
                similarity: score,
                candidate: Some(candidate),
                debug,
            }
        } else if score >= self.config.low_match_floor {
            MatchResult {
                match_type: MatchType::PartialMatch,
                similarity: score,
                candidate: Some(candidate),
                debug,
            }
        } else {
            MatchResult {
                match_type: MatchType::NoMatch,
                similarity: 0,
                candidate: None,
                debug,
            }
        }
    }
}

/// Order catalog ids numerically when both are all digits, lexicographically
/// otherwise. Keeps "9" < "42" for numeric catalogs without breaking on
/// alphanumeric id schemes.
fn id_order(a: &str, b: &str) -> Ordering {
    let a_num = all_digits(a);
    let b_num = all_digits(b);
    if a_num && b_num {
        match a.len().cmp(&b.len()) {
            Ordering::Equal => a.cmp(b),
            other => other,
        }
    } else {
        a.cmp(b)
    }
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}
