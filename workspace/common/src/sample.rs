use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One hourly load forecast point as reported by the data provider.
///
/// `day` uses the provider's 1 (Monday) to 7 (Sunday) numbering. Other codes
/// can appear on the wire and are filtered out when the grid is built.
/// `hour` is taken verbatim and never range-checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Sample {
    /// Hour of day, used as the grid row key
    pub hour: i64,
    /// Day of week code, 1 = Monday .. 7 = Sunday
    pub day: i64,
    /// Forecast load value
    pub value: f64,
}

impl Sample {
    pub fn new(hour: i64, day: i64, value: f64) -> Self {
        Self { hour, day, value }
    }
}
