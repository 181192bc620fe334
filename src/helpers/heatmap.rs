use compute::LoadGrid;
use render::HeatmapView;
use tracing::{debug, instrument};

use crate::config::RendererKind;
use crate::error::AppError;
use crate::schemas::AppState;

/// Fetches a branch's load history and builds its grid.
///
/// Fails with [`AppError::NoLoadData`] when the provider has no samples, or
/// none with a recognized day, so callers never see an empty grid. The
/// legacy renderer drew a margins-only image in the second case; a 404 is
/// returned instead.
#[instrument(skip(state))]
pub async fn load_grid(state: &AppState, slug: &str) -> Result<LoadGrid, AppError> {
    let samples = state.provider.fetch_load_history(slug).await?;
    if samples.is_empty() {
        return Err(AppError::NoLoadData(slug.to_string()));
    }

    let grid = state.heatmap.builder.build(&samples);
    if grid.is_empty() {
        debug!("No sample carried a recognized day code");
        return Err(AppError::NoLoadData(slug.to_string()));
    }

    Ok(grid)
}

/// Renders `grid` to PNG on the blocking thread pool.
#[instrument(skip(state, grid), fields(rows = grid.row_count()))]
pub async fn render_png(
    state: &AppState,
    grid: LoadGrid,
    renderer: RendererKind,
) -> Result<Vec<u8>, AppError> {
    let heatmap = state.heatmap.clone();

    let png = tokio::task::spawn_blocking(move || {
        let view = HeatmapView::new(&grid, heatmap.days(), &heatmap.scale, &heatmap.title);
        heatmap.renderer(renderer).render(&view)
    })
    .await??;

    debug!(bytes = png.len(), "Heatmap rendered");
    Ok(png)
}
