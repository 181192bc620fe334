use crate::color::Color;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Serializable week-view grid returned by the JSON endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HeatmapGrid {
    /// Day labels, Monday first
    pub columns: Vec<String>,
    /// One row per distinct hour, ascending
    pub rows: Vec<HeatmapRow>,
}

/// A single hour of the week view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HeatmapRow {
    /// Hour of day as reported by the provider
    pub hour: i64,
    /// Display label, e.g. `9:00-10:00`
    pub label: String,
    /// Load values aligned with `columns`; missing cells are 0
    pub values: Vec<f64>,
    /// Classified cell colors aligned with `columns`
    #[schema(value_type = Vec<String>)]
    pub colors: Vec<Color>,
}

impl HeatmapGrid {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
