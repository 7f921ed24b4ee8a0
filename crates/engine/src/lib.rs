//! The product reconciliation engine
//!
//! Maps freshly parsed pricelist records to zero-or-one existing catalog
//! entries, scores match confidence, and classifies each record as a create,
//! update, or skip. Pure and in-memory: the catalog snapshot is loaded before
//! [`reconcile`] is called and never mutated during a run.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod extract;
pub mod index;
pub mod matcher;
pub mod normalize;
pub mod reconciler;
pub mod similarity;

mod coordinator;

pub use coordinator::{reconcile, ReconcileOutcome};
pub use extract::extract_model_token;
pub use index::CatalogIndex;
pub use matcher::{MatchResult, Matcher};
pub use normalize::normalize_key;
pub use reconciler::Reconciler;
pub use similarity::similarity_score;
