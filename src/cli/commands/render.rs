use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info, trace};

use crate::config::{HeatmapSettings, initialize_app_state};
use crate::helpers::heatmap::{load_grid, render_png};

pub async fn render(slug: &str, output: &Path, settings: &HeatmapSettings) -> Result<()> {
    trace!("Entering render function");
    info!("Rendering heatmap for branch '{}'", slug);

    let state = initialize_app_state(settings)?;

    let grid = load_grid(&state, slug).await?;
    debug!("Grid has {} rows", grid.row_count());

    let png = render_png(&state, grid, settings.renderer).await?;

    tokio::fs::write(output, &png)
        .await
        .with_context(|| format!("Failed to write heatmap to {}", output.display()))?;

    info!("Wrote {} bytes to {}", png.len(), output.display());
    Ok(())
}
