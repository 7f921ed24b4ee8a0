//! REST API server implementation using Axum
//!
//! Exposes the comparison pipeline over HTTP for the dashboard: a compare
//! endpoint that maps raw records and reconciles them against the in-memory
//! catalog snapshot, and a reload endpoint that refreshes that snapshot.

use crate::api::{CompareData, CompareRequest, CompareResponse, ReloadResponse};
use axum::{
    extract::State,
    http::{HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use pricesync_catalog::CatalogProvider;
use pricesync_core::config::{Config, ServerConfig};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Shared application state
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) catalog: Arc<dyn CatalogProvider>,
    pub(crate) config: Arc<Config>,
    pub(crate) snapshot: Arc<RwLock<Vec<pricesync_core::ExistingProduct>>>,
}

/// Build the Axum router with all endpoints
pub(crate) fn build_router(state: AppState, server_config: &ServerConfig) -> Router {
    let router = Router::new()
        // Comparison endpoints
        .route("/api/v1/products/compare", post(compare_handler))
        .route("/api/v1/products/reload", post(reload_handler))
        // Health check
        .route("/health", get(health_handler))
        // OpenAPI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // Configure CORS based on allowed_origins
    let cors_layer = if server_config.allowed_origins.is_empty() {
        // CORS disabled
        CorsLayer::new()
    } else if server_config.allowed_origins.contains(&"*".to_string()) {
        // Allow all origins
        CorsLayer::permissive()
    } else {
        // Allow specific origins
        let mut cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
            ]);

        for origin in &server_config.allowed_origins {
            if let Ok(header_value) = HeaderValue::from_str(origin) {
                cors = cors.allow_origin(header_value);
            }
        }
        cors
    };

    router
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// POST /api/v1/products/compare
#[utoipa::path(
    post,
    path = "/api/v1/products/compare",
    request_body = CompareRequest,
    responses(
        (status = 200, description = "Comparison results and summary", body = CompareResponse),
        (status = 400, description = "Invalid request"),
        (status = 500, description = "Internal server error")
    ),
    tag = "products"
)]
async fn compare_handler(
    State(state): State<AppState>,
    Json(request): Json<CompareRequest>,
) -> Result<Json<CompareResponse>, ApiError> {
    tracing::info!("Compare request: {} raw records", request.products.len());

    let parsed = pricesync_ingest::map_batch(&request.products, &state.config.ingest);
    let existing = state.snapshot.read().await.clone();
    let existing_count = existing.len();
    let matching = state.config.matching;

    // The engine is CPU-bound; keep it off the async executor
    let outcome = tokio::task::spawn_blocking(move || {
        pricesync_engine::reconcile(parsed, existing, &matching)
    })
    .await
    .map_err(|e| ApiError::Internal(anyhow::anyhow!("reconciliation task failed: {e}")))?;

    let total = outcome.summary.total_products;
    Ok(Json(CompareResponse {
        success: true,
        message: format!("Compared {total} products against {existing_count} catalog entries"),
        data: CompareData {
            results: outcome.results,
            summary: outcome.summary,
            total_products: total,
            existing_products_count: existing_count,
        },
    }))
}

/// POST /api/v1/products/reload
#[utoipa::path(
    post,
    path = "/api/v1/products/reload",
    responses(
        (status = 200, description = "Catalog snapshot reloaded", body = ReloadResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "products"
)]
async fn reload_handler(State(state): State<AppState>) -> Result<Json<ReloadResponse>, ApiError> {
    tracing::info!("Reloading catalog snapshot");

    let fresh = state.catalog.fetch_products().await?;
    let products_count = fresh.len();
    *state.snapshot.write().await = fresh;

    tracing::info!("Catalog snapshot reloaded: {products_count} products");
    Ok(Json(ReloadResponse {
        success: true,
        message: format!("Reloaded {products_count} products"),
        products_count,
    }))
}

/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy")
    ),
    tag = "health"
)]
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    use serde_json::json;

    let snapshot_size = state.snapshot.read().await.len();

    let health_status = json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "catalog_snapshot": { "products": snapshot_size }
    });

    (StatusCode::OK, Json(health_status))
}

/// Error handling for API endpoints
#[derive(Debug)]
#[allow(dead_code)]
pub enum ApiError {
    InvalidRequest(String),
    ServiceUnavailable(String),
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            ApiError::Internal(err) => {
                // Log the full error details for debugging
                tracing::error!("Internal server error: {err:?}");
                // Return a generic message to the client to avoid information disclosure
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        (
            status,
            Json(serde_json::json!({ "success": false, "message": message })),
        )
            .into_response()
    }
}

impl From<pricesync_core::error::Error> for ApiError {
    fn from(err: pricesync_core::error::Error) -> Self {
        ApiError::Internal(err.into())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(compare_handler, reload_handler, health_handler),
    components(schemas(
        CompareRequest,
        CompareResponse,
        crate::api::CompareData,
        ReloadResponse
    )),
    tags(
        (name = "products", description = "Product comparison and catalog reload endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
struct ApiDoc;
