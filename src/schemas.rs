use common::{HeatmapGrid, HeatmapRow, Sample};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::config::{HeatmapConfig, RendererKind};
use crate::provider::ProviderClient;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Client for the branch data provider
    pub provider: ProviderClient,
    /// Immutable grid, palette and renderer configuration
    pub heatmap: Arc<HeatmapConfig>,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Renderer used when a request does not pick one
    pub renderer: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::index::index,
        crate::handlers::heatmap::get_heatmap,
        crate::handlers::heatmap::get_branch_grid,
    ),
    components(
        schemas(
            common::GridResponse,
            HeatmapGrid,
            HeatmapRow,
            Sample,
            ErrorResponse,
            HealthResponse,
            RendererKind,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "heatmap", description = "Branch load heatmap endpoints"),
    ),
    info(
        title = "loadmap API",
        description = "Weekly visitor-load heatmaps for branches of the data provider",
        version = "0.1.0",
    )
)]
pub struct ApiDoc;
