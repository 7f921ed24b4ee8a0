//! Core types for the pricesync reconciliation system
//!
//! This crate provides the foundational types used throughout pricesync:
//!
//! - **Products**: parsed pricelist records and existing catalog records
//! - **Comparison**: match/action/confidence enums and the comparison
//!   result and summary wire types
//! - **Configuration**: system configuration management
//! - **Error handling**: unified error types
//!

pub mod comparison;
pub mod config;
pub mod error;
pub mod price;
pub mod product;

// Re-export main types for convenience
pub use comparison::{
    ComparisonResult, ComparisonSummary, ConfidenceLevel, MatchDebug, MatchType, ProductAction,
};
pub use config::{CatalogConfig, Config, IngestConfig, MatchingConfig, ServerConfig};
pub use error::{Error, Result, ResultExt};
pub use price::parse_price;
pub use product::{ExistingProduct, ParsedProduct};

/// Version of the core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::comparison::{ComparisonResult, ComparisonSummary, MatchType, ProductAction};
    pub use crate::config::Config;
    pub use crate::error::{Result, ResultExt};
    pub use crate::product::{ExistingProduct, ParsedProduct};
}
