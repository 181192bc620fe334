use common::Color;
use compute::ColorBucket;
use image::RgbImage;
use plotters::coord::Shift;
use plotters::prelude::{
    BitMapBackend, ChartBuilder, DrawingArea, IntoDrawingArea, IntoFont, Rectangle, Text,
};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{Color as _, FontStyle, RGBColor, TextStyle, register_font};
use tracing::{debug, instrument};

use crate::error::{RenderError, Result};
use crate::font::LabelFont;
use crate::view::HeatmapView;
use crate::{HeatmapRenderer, encode_png};

const WIDTH: u32 = 1000;
const HEIGHT: u32 = 600;
const TITLE_BAND: i32 = 50;
const LEGEND_WIDTH: i32 = 170;
const PLOT_MARGIN: i32 = 10;
const HOUR_LABEL_AREA: i32 = 110;
const DAY_LABEL_AREA: i32 = 30;

const LEGEND_TOP: i32 = 20;
const LEGEND_ROW: i32 = 30;
const LEGEND_PAD: i32 = 10;
const SWATCH: i32 = 20;

const FONT_FAMILY: &str = "loadmap-label";

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// Draws the heatmap on a fixed-size plotting canvas with a color legend.
///
/// Text goes through the backend's font registry, so the renderer itself
/// holds no font.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    _registered: (),
}

impl ChartRenderer {
    /// Creates the renderer, registering `font` with the chart backend.
    pub fn new(font: &LabelFont) -> Result<Self> {
        register_font(FONT_FAMILY, FontStyle::Normal, font.data()).map_err(|_| {
            RenderError::FontParse("font rejected by the chart backend".to_string())
        })?;
        Ok(Self { _registered: () })
    }

    fn text_style(&self, size: f64) -> TextStyle<'static> {
        (FONT_FAMILY, size)
            .into_font()
            .color(&plotters_color(Color::BLACK))
    }

    fn draw_grid(&self, root: &Area<'_>, plot_area: &Area<'_>, view: &HeatmapView<'_>) -> Result<()> {
        let grid = view.grid;
        let rows = grid.row_count().max(1) as f64;
        let columns = grid.column_count();

        let mut chart = ChartBuilder::on(plot_area)
            .margin(PLOT_MARGIN)
            .margin_left(HOUR_LABEL_AREA)
            .margin_top(DAY_LABEL_AREA)
            .build_cartesian_2d(0f64..columns as f64, 0f64..rows)
            .map_err(draw_error)?;

        chart
            .draw_series(grid.rows().enumerate().flat_map(|(row, (_, cells))| {
                cells.iter().enumerate().map(move |(column, value)| {
                    Rectangle::new(
                        cell_corners(rows, row, column),
                        plotters_color(view.scale.classify(*value)).filled(),
                    )
                })
            }))
            .map_err(draw_error)?;

        let line = plotters_color(Color::GRAY).stroke_width(1);
        chart
            .draw_series((0..grid.row_count()).flat_map(|row| {
                (0..columns).map(move |column| Rectangle::new(cell_corners(rows, row, column), line))
            }))
            .map_err(draw_error)?;

        let style = self.text_style(14.0);
        for (column, label) in view.column_labels.iter().enumerate() {
            let (x, y) = chart.backend_coord(&(column as f64 + 0.5, rows));
            let anchor = style.pos(Pos::new(HPos::Center, VPos::Bottom));
            root.draw(&Text::new(label.as_str(), (x, y - 8), anchor))
                .map_err(draw_error)?;
        }
        for (row, label) in view.row_labels.iter().enumerate() {
            let (x, y) = chart.backend_coord(&(0.0, rows - row as f64 - 0.5));
            let anchor = style.pos(Pos::new(HPos::Right, VPos::Center));
            root.draw(&Text::new(label.as_str(), (x - 8, y), anchor))
                .map_err(draw_error)?;
        }

        Ok(())
    }

    fn draw_legend(&self, area: &Area<'_>, buckets: &[ColorBucket]) -> Result<()> {
        let outline = plotters_color(Color::GRAY).stroke_width(1);

        for (index, bucket) in buckets.iter().enumerate() {
            let top = LEGEND_TOP + index as i32 * LEGEND_ROW;
            let swatch = [(LEGEND_PAD, top), (LEGEND_PAD + SWATCH, top + SWATCH)];
            area.draw(&Rectangle::new(swatch, plotters_color(bucket.color).filled()))
                .map_err(draw_error)?;
            area.draw(&Rectangle::new(swatch, outline))
                .map_err(draw_error)?;

            let label = bucket_label(bucket, index + 1 == buckets.len());
            let style = self
                .text_style(13.0)
                .pos(Pos::new(HPos::Left, VPos::Center));
            let at = (LEGEND_PAD + SWATCH + 8, top + SWATCH / 2);
            area.draw(&Text::new(label, at, style)).map_err(draw_error)?;
        }

        Ok(())
    }
}

impl HeatmapRenderer for ChartRenderer {
    fn name(&self) -> &'static str {
        "chart"
    }

    #[instrument(skip_all, fields(rows = view.grid.row_count()))]
    fn render(&self, view: &HeatmapView<'_>) -> Result<Vec<u8>> {
        let (width, height) = (WIDTH, HEIGHT);
        let mut buffer = vec![0u8; width as usize * height as usize * 3];

        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&plotters_color(Color::WHITE)).map_err(draw_error)?;

            let (title_area, body) = root.split_vertically(TITLE_BAND);
            let (plot_area, legend_area) = body.split_horizontally(width as i32 - LEGEND_WIDTH);

            let style = self
                .text_style(20.0)
                .pos(Pos::new(HPos::Center, VPos::Center));
            let at = (width as i32 / 2, TITLE_BAND / 2);
            title_area
                .draw(&Text::new(view.title, at, style))
                .map_err(draw_error)?;

            self.draw_grid(&root, &plot_area, view)?;
            self.draw_legend(&legend_area, view.scale.buckets())?;
            root.present().map_err(draw_error)?;
        }

        let image = RgbImage::from_raw(width, height, buffer)
            .ok_or(RenderError::Buffer { width, height })?;

        debug!(width, height, "Rendered chart heatmap");
        encode_png(&image)
    }
}

/// Corners of a cell in chart coordinates; row 0 sits at the top.
fn cell_corners(rows: f64, row: usize, column: usize) -> [(f64, f64); 2] {
    let top = rows - row as f64;
    [(column as f64, top), (column as f64 + 1.0, top - 1.0)]
}

/// Legend text for a bucket, `[lower, upper)` or `≥ lower` for the last one.
fn bucket_label(bucket: &ColorBucket, open_ended: bool) -> String {
    if open_ended {
        format!("≥ {}", bucket.lower)
    } else {
        format!("[{}, {})", bucket.lower, bucket.upper)
    }
}

fn plotters_color(color: Color) -> RGBColor {
    RGBColor(color.r, color.g, color.b)
}

fn draw_error<E: std::fmt::Display>(error: E) -> RenderError {
    RenderError::Draw(error.to_string())
}
