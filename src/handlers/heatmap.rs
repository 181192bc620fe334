use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Json},
};
use axum_valid::Valid;
use common::{ApiResponse, GridResponse, HeatmapGrid};
use compute::converters::grid_to_heatmap;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::IntoParams;
use validator::Validate;

use crate::config::RendererKind;
use crate::error::AppError;
use crate::helpers::heatmap::{load_grid, render_png};
use crate::schemas::{AppState, ErrorResponse};

/// Branch identifier as used by the data provider
#[derive(Debug, Deserialize, Serialize, Validate, IntoParams)]
#[into_params(parameter_in = Path)]
pub struct BranchPath {
    /// Branch slug, e.g. `oktyabrskiy`
    #[validate(length(min = 1, max = 128))]
    pub slug: String,
}

/// Query parameters for the heatmap image
#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RenderQuery {
    /// Renderer to use instead of the configured default
    pub renderer: Option<RendererKind>,
}

/// Render the weekly load heatmap of a branch as PNG
#[utoipa::path(
    get,
    path = "/{slug}",
    tag = "heatmap",
    params(BranchPath, RenderQuery),
    responses(
        (status = 200, description = "Heatmap image", content_type = "image/png"),
        (status = 400, description = "Invalid branch slug"),
        (status = 404, description = "Provider has no load data for the branch", body = ErrorResponse),
        (status = 500, description = "Provider data unusable or rendering failed", body = ErrorResponse),
        (status = 502, description = "Data provider unreachable or failing", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_heatmap(
    Valid(Path(path)): Valid<Path<BranchPath>>,
    Query(query): Query<RenderQuery>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let renderer = query.renderer.unwrap_or(state.heatmap.default_renderer);

    let grid = load_grid(&state, &path.slug).await?;
    let png = render_png(&state, grid, renderer).await?;

    info!(slug = %path.slug, ?renderer, bytes = png.len(), "Served heatmap");
    Ok((
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        png,
    ))
}

/// Get the weekly load grid of a branch as JSON
#[utoipa::path(
    get,
    path = "/api/v1/branches/{slug}/grid",
    tag = "heatmap",
    params(BranchPath),
    responses(
        (status = 200, description = "Load grid built successfully", body = GridResponse),
        (status = 400, description = "Invalid branch slug"),
        (status = 404, description = "Provider has no load data for the branch", body = ErrorResponse),
        (status = 500, description = "Provider data unusable", body = ErrorResponse),
        (status = 502, description = "Data provider unreachable or failing", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_branch_grid(
    Valid(Path(path)): Valid<Path<BranchPath>>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<HeatmapGrid>>, AppError> {
    let grid = load_grid(&state, &path.slug).await?;
    let heatmap = grid_to_heatmap(&grid, state.heatmap.days(), &state.heatmap.scale);

    info!(slug = %path.slug, rows = heatmap.rows.len(), "Served load grid");
    Ok(Json(ApiResponse::ok(
        heatmap,
        "Load grid retrieved successfully",
    )))
}
