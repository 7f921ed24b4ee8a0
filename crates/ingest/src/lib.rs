//! Field mapping from raw document-parser output to parsed product records
//!
//! The document parser and spreadsheet importers emit loosely structured JSON
//! objects whose field names vary by vendor. This crate flattens those
//! records onto [`pricesync_core::ParsedProduct`], resolving field aliases,
//! coercing string/number values, and parsing price strings. Mapping never
//! fails: unusable values degrade to defaults that downstream validation
//! flags.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

mod mapping;

pub use mapping::{map_batch, map_record};
