use common::Color;
use std::str::FromStr;

use crate::error::{ComputeError, Result};

/// Boundaries of the default scale. The last entry closes the top bucket.
pub const DEFAULT_BOUNDARIES: [f64; 5] = [0.0, 1.0, 40.0, 51.0, 100.0];

/// Colors of the default scale, one per bucket.
pub const DEFAULT_PALETTE: [Color; 4] = [
    Color::rgb(0xFF, 0xFF, 0xFF),
    Color::rgb(0xFF, 0xE9, 0xD3),
    Color::rgb(0xE8, 0xB7, 0xA2),
    Color::rgb(0xCA, 0x45, 0x32),
];

/// A half-open `[lower, upper)` value range drawn in one color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorBucket {
    pub lower: f64,
    pub upper: f64,
    pub color: Color,
}

impl ColorBucket {
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value < self.upper
    }
}

/// Discrete value-to-color mapping.
///
/// Built from `(threshold, color)` steps plus a closing upper bound, so the
/// number of boundaries is always one more than the number of colors.
/// Values at or above the upper bound take the last color, values below the
/// first threshold (and NaN) take the first.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    buckets: Vec<ColorBucket>,
}

impl ColorScale {
    pub fn new(steps: Vec<(f64, Color)>, upper: f64) -> Result<Self> {
        let Some(&(last, _)) = steps.last() else {
            return Err(ComputeError::EmptyScale);
        };

        for (threshold, _) in &steps {
            if !threshold.is_finite() {
                return Err(ComputeError::NonFiniteThreshold(*threshold));
            }
        }
        for pair in steps.windows(2) {
            let (previous, next) = (pair[0].0, pair[1].0);
            if next <= previous {
                return Err(ComputeError::UnorderedThresholds { previous, next });
            }
        }
        if !upper.is_finite() || upper <= last {
            return Err(ComputeError::InvalidUpperBound { upper, last });
        }

        let buckets = steps
            .iter()
            .enumerate()
            .map(|(index, (lower, color))| ColorBucket {
                lower: *lower,
                upper: steps.get(index + 1).map_or(upper, |(next, _)| *next),
                color: *color,
            })
            .collect();

        Ok(Self { buckets })
    }

    /// Parses steps written as `threshold:#RRGGBB` separated by commas, e.g.
    /// `0:#FFFFFF,1:#FFE9D3,40:#E8B7A2,51:#CA4532`.
    pub fn parse_steps(raw: &str) -> Result<Vec<(f64, Color)>> {
        raw.split(',')
            .map(str::trim)
            .filter(|step| !step.is_empty())
            .map(|step| {
                let invalid = |reason: String| ComputeError::InvalidStep {
                    step: step.to_string(),
                    reason,
                };
                let (threshold, color) = step
                    .split_once(':')
                    .ok_or_else(|| invalid("expected threshold:#RRGGBB".to_string()))?;
                let threshold = f64::from_str(threshold.trim())
                    .map_err(|e| invalid(format!("bad threshold: {}", e)))?;
                let color = Color::from_str(color).map_err(invalid)?;
                Ok((threshold, color))
            })
            .collect()
    }

    /// Returns the color of the bucket containing `value`.
    pub fn classify(&self, value: f64) -> Color {
        let first = &self.buckets[0];
        if value.is_nan() || value < first.lower {
            return first.color;
        }

        self.buckets
            .iter()
            .find(|bucket| bucket.contains(value))
            .unwrap_or(self.last_bucket())
            .color
    }

    pub fn buckets(&self) -> &[ColorBucket] {
        &self.buckets
    }

    pub fn palette(&self) -> Vec<Color> {
        self.buckets.iter().map(|bucket| bucket.color).collect()
    }

    /// All boundaries, ascending; one more than the palette length.
    pub fn boundaries(&self) -> Vec<f64> {
        self.buckets
            .iter()
            .map(|bucket| bucket.lower)
            .chain(std::iter::once(self.last_bucket().upper))
            .collect()
    }

    fn last_bucket(&self) -> &ColorBucket {
        &self.buckets[self.buckets.len() - 1]
    }
}

impl Default for ColorScale {
    fn default() -> Self {
        let buckets = DEFAULT_PALETTE
            .iter()
            .enumerate()
            .map(|(index, color)| ColorBucket {
                lower: DEFAULT_BOUNDARIES[index],
                upper: DEFAULT_BOUNDARIES[index + 1],
                color: *color,
            })
            .collect();
        Self { buckets }
    }
}
