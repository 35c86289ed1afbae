//! Convergence table.

use tracing::trace;

use super::{StatisticsGatherer, StatisticsRow};

/// First path count at which a row is recorded.
const FIRST_MILESTONE: usize = 2;

/// Records the inner gatherer's aggregate at path counts 2, 4, 8, 16, ….
///
/// `results_so_far` returns the recorded rows followed, when the current
/// count is not itself a recorded milestone, by the inner aggregate at the
/// current count. Memory grows as `O(log n)`.
///
/// # Examples
///
/// ```rust
/// use mc_pricing::statistics::{ConvergenceTable, StatisticsGatherer, StatisticsMean};
///
/// let mut table = ConvergenceTable::new(StatisticsMean::new());
/// for i in 0..7 {
///     table.record_one_result(i as f64);
/// }
///
/// let paths: Vec<usize> = table.results_so_far().iter().map(|r| r.paths).collect();
/// assert_eq!(paths, vec![2, 4, 7]);
/// ```
#[derive(Debug, Clone)]
pub struct ConvergenceTable<S> {
    inner: S,
    rows: Vec<StatisticsRow>,
    next_milestone: usize,
    paths_done: usize,
}

impl<S: StatisticsGatherer> ConvergenceTable<S> {
    /// Wraps `inner`.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            rows: Vec::new(),
            next_milestone: FIRST_MILESTONE,
            paths_done: 0,
        }
    }

    /// The wrapped gatherer.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Rows recorded at milestones only.
    pub fn milestone_rows(&self) -> &[StatisticsRow] {
        &self.rows
    }

    /// Consumes the table and returns the wrapped gatherer.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: StatisticsGatherer> StatisticsGatherer for ConvergenceTable<S> {
    fn record_one_result(&mut self, value: f64) {
        self.inner.record_one_result(value);
        self.paths_done += 1;

        if self.paths_done == self.next_milestone {
            self.next_milestone *= 2;
            for row in self.inner.results_so_far() {
                trace!(paths = self.paths_done, value = row.value, "convergence milestone");
                self.rows.push(StatisticsRow::new(self.paths_done, row.value));
            }
        }
    }

    fn results_so_far(&self) -> Vec<StatisticsRow> {
        let mut rows = self.rows.clone();
        let flushed = self.rows.last().map_or(0, |row| row.paths);

        if self.paths_done > 0 && flushed != self.paths_done {
            rows.extend(
                self.inner
                    .results_so_far()
                    .into_iter()
                    .map(|row| StatisticsRow::new(self.paths_done, row.value)),
            );
        }
        rows
    }

    fn paths_recorded(&self) -> usize {
        self.paths_done
    }
}
