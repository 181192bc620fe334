//! Heatmap rasterization.
//!
//! A [`HeatmapRenderer`] turns a [`HeatmapView`] into PNG bytes. Two
//! interchangeable implementations exist: [`PixelRenderer`] paints cells
//! directly onto an image buffer, [`ChartRenderer`] lays the grid out on a
//! plotting area with a color legend.

pub mod chart;
pub mod error;
pub mod font;
pub mod pixel;
pub mod view;

pub use chart::ChartRenderer;
pub use error::{RenderError, Result};
pub use font::LabelFont;
pub use pixel::PixelRenderer;
pub use view::HeatmapView;

use image::{ImageFormat, RgbImage};
use std::io::Cursor;

/// Title drawn above every heatmap unless configured otherwise.
pub const DEFAULT_TITLE: &str = "Информация о предполагаемой загруженности на текущую неделю";

/// A strategy for drawing a heatmap.
pub trait HeatmapRenderer: Send + Sync {
    /// Short identifier used in logs and the health endpoint.
    fn name(&self) -> &'static str;

    /// Renders `view` and returns the encoded PNG.
    fn render(&self, view: &HeatmapView<'_>) -> Result<Vec<u8>>;
}

/// Encodes an RGB buffer as PNG.
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>> {
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, ImageFormat::Png)?;
    Ok(bytes.into_inner())
}

pub(crate) fn rgb(color: common::Color) -> image::Rgb<u8> {
    image::Rgb(color.to_array())
}
