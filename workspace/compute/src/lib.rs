pub mod converters;
pub mod days;
pub mod error;
pub mod grid;
pub mod scale;

pub use days::{DAYS_PER_WEEK, DayTable, WEEK};
pub use error::{ComputeError, Result};
pub use grid::{GridBuilder, LoadGrid, hour_label};
pub use scale::{ColorBucket, ColorScale};
