use anyhow::{Context, Result, bail};
use clap::{Args, ValueEnum};
use compute::{ColorScale, DayTable, GridBuilder};
use render::{ChartRenderer, DEFAULT_TITLE, HeatmapRenderer, LabelFont, PixelRenderer};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use utoipa::ToSchema;

use crate::provider::{DEFAULT_PROVIDER_URL, ProviderClient};
use crate::schemas::AppState;

/// Default color steps, `threshold:#RRGGBB` separated by commas.
pub const DEFAULT_PALETTE: &str = "0:#FFFFFF,1:#FFE9D3,40:#E8B7A2,51:#CA4532";

/// Available heatmap renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    /// Cell-by-cell drawing sized to the grid
    #[default]
    Pixel,
    /// Fixed-size chart with a color legend
    Chart,
}

/// Day label language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DayLabelSet {
    #[default]
    Ru,
    En,
}

impl DayLabelSet {
    pub fn table(self) -> DayTable {
        match self {
            DayLabelSet::Ru => DayTable::russian(),
            DayLabelSet::En => DayTable::english(),
        }
    }
}

/// Settings shared by every command that fetches and draws heatmaps
#[derive(Debug, Clone, Args)]
pub struct HeatmapSettings {
    /// Base URL of the branch data provider
    #[arg(long, env = "PROVIDER_URL", default_value = DEFAULT_PROVIDER_URL)]
    pub provider_url: String,

    /// Timeout for one provider request, in seconds
    #[arg(long, env = "PROVIDER_TIMEOUT_SECS", default_value_t = 5.0)]
    pub provider_timeout_secs: f64,

    /// Renderer used when a request does not ask for one
    #[arg(long, env = "RENDERER", value_enum, default_value_t = RendererKind::Pixel)]
    pub renderer: RendererKind,

    /// TrueType font for titles and labels instead of the bundled DejaVu Sans
    #[arg(long, env = "FONT_PATH")]
    pub font_path: Option<PathBuf>,

    /// Language of the day column labels
    #[arg(long, env = "DAY_LABELS", value_enum, default_value_t = DayLabelSet::Ru)]
    pub day_labels: DayLabelSet,

    /// Color steps as `threshold:#RRGGBB,...`, ascending
    #[arg(long, env = "PALETTE", default_value = DEFAULT_PALETTE)]
    pub palette: String,

    /// Upper boundary of the last color step
    #[arg(long, env = "SCALE_MAX", default_value_t = 100.0)]
    pub scale_max: f64,

    /// Title drawn above the heatmap
    #[arg(long, env = "HEATMAP_TITLE", default_value = DEFAULT_TITLE)]
    pub title: String,
}

impl Default for HeatmapSettings {
    fn default() -> Self {
        Self {
            provider_url: DEFAULT_PROVIDER_URL.to_string(),
            provider_timeout_secs: 5.0,
            renderer: RendererKind::Pixel,
            font_path: None,
            day_labels: DayLabelSet::Ru,
            palette: DEFAULT_PALETTE.to_string(),
            scale_max: 100.0,
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

/// Read-only heatmap configuration built once at start-up
#[derive(Debug)]
pub struct HeatmapConfig {
    pub builder: GridBuilder,
    pub scale: ColorScale,
    pub title: String,
    pub default_renderer: RendererKind,
    pixel: PixelRenderer,
    chart: ChartRenderer,
}

impl HeatmapConfig {
    pub fn days(&self) -> &DayTable {
        self.builder.days()
    }

    pub fn renderer(&self, kind: RendererKind) -> &dyn HeatmapRenderer {
        match kind {
            RendererKind::Pixel => &self.pixel,
            RendererKind::Chart => &self.chart,
        }
    }
}

/// Validate settings and build the application state
pub fn initialize_app_state(settings: &HeatmapSettings) -> Result<AppState> {
    debug!(?settings, "Initializing application state");

    if !settings.provider_timeout_secs.is_finite() || settings.provider_timeout_secs <= 0.0 {
        bail!(
            "Provider timeout must be a positive number of seconds, got {}",
            settings.provider_timeout_secs
        );
    }

    let base_url = Url::parse(&settings.provider_url)
        .with_context(|| format!("Invalid provider URL '{}'", settings.provider_url))?;
    let timeout = Duration::from_secs_f64(settings.provider_timeout_secs);
    let provider = ProviderClient::new(base_url, timeout)?;

    let steps = ColorScale::parse_steps(&settings.palette)?;
    let scale = ColorScale::new(steps, settings.scale_max).context("Invalid color scale")?;

    let font = match &settings.font_path {
        Some(path) => LabelFont::load(path)?,
        None => {
            debug!("No font configured, using the bundled DejaVu Sans");
            LabelFont::bundled()?
        }
    };

    let heatmap = HeatmapConfig {
        builder: GridBuilder::new(settings.day_labels.table()),
        scale,
        title: settings.title.clone(),
        default_renderer: settings.renderer,
        chart: ChartRenderer::new(&font)?,
        pixel: PixelRenderer::new(font),
    };

    info!(
        provider = %provider.base_url(),
        renderer = heatmap.renderer(heatmap.default_renderer).name(),
        "Application state initialized"
    );

    Ok(AppState {
        provider,
        heatmap: Arc::new(heatmap),
    })
}
