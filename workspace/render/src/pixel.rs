use ab_glyph::PxScale;
use common::Color;
use image::RgbImage;
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use tracing::{debug, instrument};

use crate::error::{RenderError, Result};
use crate::font::LabelFont;
use crate::view::HeatmapView;
use crate::{HeatmapRenderer, encode_png, rgb};

const CELL_WIDTH: u32 = 80;
const CELL_HEIGHT: u32 = 30;
const LEFT_MARGIN: u32 = 100;
const TOP_MARGIN: u32 = 50;
const RIGHT_MARGIN: u32 = 20;
const BOTTOM_MARGIN: u32 = 20;

/// Largest width or height we are willing to allocate.
const MAX_CANVAS_SIDE: u32 = 1 << 15;

const TITLE_SCALE: f32 = 16.0;
const LABEL_SCALE: f32 = 14.0;

/// Paints the heatmap cell by cell onto an RGB buffer.
///
/// Image size follows the grid: a fixed-size cell per (hour, day) plus
/// margins holding the title, day labels and hour labels.
#[derive(Debug, Clone)]
pub struct PixelRenderer {
    font: LabelFont,
}

impl PixelRenderer {
    pub fn new(font: LabelFont) -> Self {
        Self { font }
    }

    /// Canvas size for a grid with `rows` rows and `columns` columns.
    pub fn canvas_size(rows: usize, columns: usize) -> Result<(u32, u32)> {
        let span = |count: usize, cell: u32, margins: u32| {
            u32::try_from(count)
                .ok()
                .and_then(|count| count.checked_mul(cell))
                .and_then(|cells| cells.checked_add(margins))
                .filter(|side| *side <= MAX_CANVAS_SIDE)
        };

        let width = span(columns, CELL_WIDTH, LEFT_MARGIN + RIGHT_MARGIN);
        let height = span(rows, CELL_HEIGHT, TOP_MARGIN + BOTTOM_MARGIN);
        width
            .zip(height)
            .ok_or(RenderError::CanvasTooLarge { rows, columns })
    }

    fn draw_labels(&self, image: &mut RgbImage, view: &HeatmapView<'_>) {
        let font = self.font.font();
        let black = rgb(Color::BLACK);
        let (width, _) = image.dimensions();

        let (title_width, _) = text_size(PxScale::from(TITLE_SCALE), font, view.title);
        let title_x = (width as i32 - title_width as i32) / 2;
        draw_text_mut(image, black, title_x, 10, PxScale::from(TITLE_SCALE), font, view.title);

        for (column, label) in view.column_labels.iter().enumerate() {
            let center = LEFT_MARGIN + column as u32 * CELL_WIDTH + CELL_WIDTH / 2;
            let (label_width, _) = text_size(PxScale::from(LABEL_SCALE), font, label);
            let x = center as i32 - label_width as i32 / 2;
            let y = TOP_MARGIN as i32 - 25;
            draw_text_mut(image, black, x, y, PxScale::from(LABEL_SCALE), font, label);
        }

        for (row, label) in view.row_labels.iter().enumerate() {
            let middle = TOP_MARGIN + row as u32 * CELL_HEIGHT + CELL_HEIGHT / 2;
            let (_, label_height) = text_size(PxScale::from(LABEL_SCALE), font, label);
            let y = middle as i32 - label_height as i32 / 2;
            draw_text_mut(image, black, 10, y, PxScale::from(LABEL_SCALE), font, label);
        }
    }
}

impl HeatmapRenderer for PixelRenderer {
    fn name(&self) -> &'static str {
        "pixel"
    }

    #[instrument(skip_all, fields(rows = view.grid.row_count()))]
    fn render(&self, view: &HeatmapView<'_>) -> Result<Vec<u8>> {
        let grid = view.grid;
        let (width, height) = Self::canvas_size(grid.row_count(), grid.column_count())?;
        let mut image = RgbImage::from_pixel(width, height, rgb(Color::WHITE));

        self.draw_labels(&mut image, view);

        // Coordinates below stay under MAX_CANVAS_SIDE once the canvas exists.
        let outline = rgb(Color::GRAY);
        for (row, (_, cells)) in grid.rows().enumerate() {
            for (column, value) in cells.iter().enumerate() {
                let x = (LEFT_MARGIN + column as u32 * CELL_WIDTH) as i32;
                let y = (TOP_MARGIN + row as u32 * CELL_HEIGHT) as i32;
                // Neighbouring cells share their border pixel.
                let cell = Rect::at(x, y).of_size(CELL_WIDTH + 1, CELL_HEIGHT + 1);
                draw_filled_rect_mut(&mut image, cell, rgb(view.scale.classify(*value)));
                draw_hollow_rect_mut(&mut image, cell, outline);
            }
        }

        debug!(width, height, "Rendered pixel heatmap");
        encode_png(&image)
    }
}
