use common::Sample;
use std::collections::BTreeMap;
use tracing::{debug, instrument, trace};

use crate::days::{DAYS_PER_WEEK, DayTable};

/// Dense hour-by-day matrix built from a sparse load history.
///
/// Rows are the distinct hours seen in the input, ascending. Every row has
/// exactly [`DAYS_PER_WEEK`] cells in Monday..Sunday order, and cells without
/// a sample hold `0`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoadGrid {
    hours: Vec<i64>,
    cells: Vec<[f64; DAYS_PER_WEEK]>,
}

impl LoadGrid {
    pub fn hours(&self) -> &[i64] {
        &self.hours
    }

    pub fn cells(&self) -> &[[f64; DAYS_PER_WEEK]] {
        &self.cells
    }

    /// Iterates `(hour, row)` pairs in row order.
    pub fn rows(&self) -> impl Iterator<Item = (i64, &[f64; DAYS_PER_WEEK])> {
        self.hours.iter().copied().zip(self.cells.iter())
    }

    pub fn row(&self, hour: i64) -> Option<&[f64; DAYS_PER_WEEK]> {
        self.hours
            .binary_search(&hour)
            .ok()
            .map(|index| &self.cells[index])
    }

    pub fn row_count(&self) -> usize {
        self.hours.len()
    }

    pub fn column_count(&self) -> usize {
        DAYS_PER_WEEK
    }

    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }

    /// `H:00-(H+1):00` for every row.
    pub fn row_labels(&self) -> Vec<String> {
        self.hours.iter().map(|hour| hour_label(*hour)).collect()
    }
}

/// Formats the row label of an hour, e.g. `9:00-10:00`.
pub fn hour_label(hour: i64) -> String {
    format!("{}:00-{}:00", hour, hour.saturating_add(1))
}

/// Turns a flat load history into a [`LoadGrid`].
#[derive(Debug, Clone, Default)]
pub struct GridBuilder {
    days: DayTable,
}

impl GridBuilder {
    pub fn new(days: DayTable) -> Self {
        Self { days }
    }

    pub fn days(&self) -> &DayTable {
        &self.days
    }

    /// Builds the grid for one branch.
    ///
    /// Samples with an unrecognized day code are skipped. When several
    /// samples share a (day, hour) cell the largest value is kept, so the
    /// result does not depend on input order. An empty or fully filtered
    /// input yields an empty grid; deciding what that means is up to the
    /// caller.
    #[instrument(skip_all, fields(samples = samples.len()))]
    pub fn build(&self, samples: &[Sample]) -> LoadGrid {
        let mut matrix: BTreeMap<i64, [Option<f64>; DAYS_PER_WEEK]> = BTreeMap::new();
        let mut dropped = 0usize;

        for sample in samples {
            let Some(day) = self.days.normalize(sample.day) else {
                trace!(day = sample.day, hour = sample.hour, "Skipping sample with unrecognized day");
                dropped += 1;
                continue;
            };

            let cell = &mut matrix.entry(sample.hour).or_insert([None; DAYS_PER_WEEK])
                [self.days.column(day)];
            *cell = Some(match *cell {
                Some(existing) => existing.max(sample.value),
                None => sample.value,
            });
        }

        if dropped > 0 {
            debug!(dropped, "Dropped samples with unrecognized day codes");
        }

        let (hours, cells): (Vec<i64>, Vec<[f64; DAYS_PER_WEEK]>) = matrix
            .into_iter()
            .map(|(hour, row)| (hour, row.map(|cell| cell.unwrap_or(0.0))))
            .unzip();

        debug!(rows = hours.len(), "Built load grid");
        LoadGrid { hours, cells }
    }
}
