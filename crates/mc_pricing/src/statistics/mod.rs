//! Statistics gatherers.
//!
//! A gatherer receives one discounted value per simulated path and reports
//! the aggregate so far as a list of rows.
//!
//! # Key Components
//!
//! - [`StatisticsGatherer`]: capability consumed by the engine
//! - [`StatisticsMean`]: running mean
//! - [`StatisticsMoments`]: running mean and variance with standard error
//! - [`ConvergenceTable`]: snapshots an inner gatherer at 2, 4, 8, … paths

mod convergence;
mod mean;

pub use convergence::ConvergenceTable;
pub use mean::{StatisticsMean, StatisticsMoments};

/// One reported aggregate.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatisticsRow {
    /// Number of paths the aggregate covers.
    pub paths: usize,
    /// Aggregate value.
    pub value: f64,
}

impl StatisticsRow {
    /// Creates a row.
    #[inline]
    pub fn new(paths: usize, value: f64) -> Self {
        Self { paths, value }
    }
}

/// Accumulates per-path results.
pub trait StatisticsGatherer {
    /// Records the discounted value of one path.
    fn record_one_result(&mut self, value: f64);

    /// Aggregate so far. Empty when nothing has been recorded.
    fn results_so_far(&self) -> Vec<StatisticsRow>;

    /// Number of results recorded.
    fn paths_recorded(&self) -> usize;
}

impl<S: StatisticsGatherer + ?Sized> StatisticsGatherer for &mut S {
    #[inline]
    fn record_one_result(&mut self, value: f64) {
        (**self).record_one_result(value)
    }

    fn results_so_far(&self) -> Vec<StatisticsRow> {
        (**self).results_so_far()
    }

    fn paths_recorded(&self) -> usize {
        (**self).paths_recorded()
    }
}
