//! Error types for the catalog client module

use std::fmt;

/// Errors that can occur talking to the catalog API
#[derive(Debug)]
pub enum CatalogError {
    /// Request failed at the transport level
    RequestError(String),

    /// The API answered with a non-success status or a malformed body
    ApiError(String),

    /// Configuration error
    ConfigError(String),

    /// Other error
    Other(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequestError(msg) => write!(f, "Catalog request failed: {msg}"),
            Self::ApiError(msg) => write!(f, "Catalog API error: {msg}"),
            Self::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            Self::Other(msg) => write!(f, "Catalog error: {msg}"),
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<CatalogError> for pricesync_core::error::Error {
    fn from(err: CatalogError) -> Self {
        pricesync_core::error::Error::catalog(err.to_string())
    }
}
