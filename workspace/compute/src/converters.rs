//! Conversion of computed grids into the transport types of the common crate.

use common::{HeatmapGrid, HeatmapRow};

use crate::days::DayTable;
use crate::grid::{LoadGrid, hour_label};
use crate::scale::ColorScale;

/// Converts a [`LoadGrid`] into its serializable form, classifying every
/// cell with `scale`.
pub fn grid_to_heatmap(grid: &LoadGrid, days: &DayTable, scale: &ColorScale) -> HeatmapGrid {
    let rows = grid
        .rows()
        .map(|(hour, cells)| HeatmapRow {
            hour,
            label: hour_label(hour),
            values: cells.to_vec(),
            colors: cells.iter().map(|value| scale.classify(*value)).collect(),
        })
        .collect();

    HeatmapGrid {
        columns: days.labels().to_vec(),
        rows,
    }
}
