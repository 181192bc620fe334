//! Common transport-layer types shared between the provider client, the
//! compute core and the HTTP handlers.
//!
//! Nothing in here knows how a grid is built or drawn; these are the shapes
//! that cross crate and wire boundaries.

mod color;
mod grid;
mod sample;

pub use color::Color;
pub use grid::{HeatmapGrid, HeatmapRow};
pub use sample::Sample;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic API response wrapper used by the JSON endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[aliases(GridResponse = ApiResponse<HeatmapGrid>)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            success: true,
        }
    }
}
