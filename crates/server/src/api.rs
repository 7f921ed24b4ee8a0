//! Request and response models for the comparison API.
//!
//! The envelope shapes here are consumed by the dashboard; keep them stable.

use pricesync_core::{ComparisonResult, ComparisonSummary};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Body of a comparison request: raw pricelist records straight from the
/// document parser or a spreadsheet export. Field mapping happens server-side
/// so every client sends the same loose shape.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CompareRequest {
    #[schema(value_type = Vec<Object>)]
    pub products: Vec<Value>,
}

/// Payload section of a successful comparison response.
#[derive(Debug, Serialize, ToSchema)]
pub struct CompareData {
    pub results: Vec<ComparisonResult>,
    pub summary: ComparisonSummary,
    pub total_products: usize,
    pub existing_products_count: usize,
}

/// Envelope for comparison responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct CompareResponse {
    pub success: bool,
    pub message: String,
    pub data: CompareData,
}

/// Envelope for catalog reload responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReloadResponse {
    pub success: bool,
    pub message: String,
    pub products_count: usize,
}
