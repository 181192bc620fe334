use ab_glyph::FontArc;
use std::fmt;
use std::path::Path;
use tracing::info;

use crate::error::{RenderError, Result};

/// DejaVu Sans, shipped with the crate. Covers Latin and Cyrillic labels.
static BUNDLED_FONT: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// TrueType font used for titles and axis labels.
///
/// The raw bytes are kept for the whole process: the chart backend registers
/// fonts by name and only accepts `'static` data. Load it once at start-up.
#[derive(Clone)]
pub struct LabelFont {
    data: &'static [u8],
    font: FontArc,
}

impl LabelFont {
    /// The font compiled into the binary, used when none is configured.
    pub fn bundled() -> Result<Self> {
        Self::from_static(BUNDLED_FONT)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| RenderError::FontRead {
            path: path.to_path_buf(),
            source,
        })?;
        let font = Self::from_bytes(bytes)?;
        info!(path = %path.display(), "Loaded label font");
        Ok(font)
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        Self::from_static(Box::leak(bytes.into_boxed_slice()))
    }

    fn from_static(data: &'static [u8]) -> Result<Self> {
        let font =
            FontArc::try_from_slice(data).map_err(|e| RenderError::FontParse(e.to_string()))?;
        Ok(Self { data, font })
    }

    pub fn font(&self) -> &FontArc {
        &self.font
    }

    pub fn data(&self) -> &'static [u8] {
        self.data
    }
}

impl fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelFont")
            .field("bytes", &self.data.len())
            .finish()
    }
}
