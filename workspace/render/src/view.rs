use compute::{ColorScale, DayTable, LoadGrid};

/// Everything a renderer needs to draw one heatmap.
#[derive(Debug, Clone)]
pub struct HeatmapView<'a> {
    pub grid: &'a LoadGrid,
    /// Day labels, one per column
    pub column_labels: &'a [String],
    /// Hour range labels, one per row
    pub row_labels: Vec<String>,
    pub scale: &'a ColorScale,
    pub title: &'a str,
}

impl<'a> HeatmapView<'a> {
    pub fn new(grid: &'a LoadGrid, days: &'a DayTable, scale: &'a ColorScale, title: &'a str) -> Self {
        Self {
            grid,
            column_labels: days.labels(),
            row_labels: grid.row_labels(),
            scale,
            title,
        }
    }
}
