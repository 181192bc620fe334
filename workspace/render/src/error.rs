use std::path::PathBuf;
use thiserror::Error;

/// Error types for the render module
#[derive(Error, Debug)]
pub enum RenderError {
    /// Font file could not be read
    #[error("Failed to read font file {path}: {source}")]
    FontRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Font bytes are not a usable TrueType/OpenType font
    #[error("Invalid font data: {0}")]
    FontParse(String),

    /// Error reported by the drawing backend
    #[error("Drawing error: {0}")]
    Draw(String),

    /// Raw pixel buffer does not fit the requested canvas
    #[error("Pixel buffer does not match a {width}x{height} image")]
    Buffer { width: u32, height: u32 },

    /// Grid too large for an image canvas
    #[error("A grid of {rows} rows and {columns} columns does not fit on a canvas")]
    CanvasTooLarge { rows: usize, columns: usize },

    /// Error from the PNG encoder
    #[error("PNG encoding error: {0}")]
    Encode(#[from] image::ImageError),
}

/// Type alias for Result with RenderError
pub type Result<T> = std::result::Result<T, RenderError>;
