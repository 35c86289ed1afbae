//! Running mean and moments.

use super::{StatisticsGatherer, StatisticsRow};

/// z-score for a two-sided 95% interval.
const Z_95: f64 = 1.96;
/// z-score for a two-sided 99% interval.
const Z_99: f64 = 2.576;

/// Running mean: `(sum, count)`.
///
/// # Examples
///
/// ```rust
/// use mc_pricing::statistics::{StatisticsGatherer, StatisticsMean};
///
/// let mut stats = StatisticsMean::new();
/// assert_eq!(stats.mean(), None);
///
/// stats.record_one_result(1.0);
/// stats.record_one_result(3.0);
/// assert_eq!(stats.mean(), Some(2.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatisticsMean {
    running_sum: f64,
    paths_done: usize,
}

impl StatisticsMean {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mean of the recorded values, `None` before the first record.
    #[inline]
    pub fn mean(&self) -> Option<f64> {
        (self.paths_done > 0).then(|| self.running_sum / self.paths_done as f64)
    }

    /// Folds another accumulator into this one.
    pub fn merge(&mut self, other: &StatisticsMean) {
        self.running_sum += other.running_sum;
        self.paths_done += other.paths_done;
    }
}

impl StatisticsGatherer for StatisticsMean {
    #[inline]
    fn record_one_result(&mut self, value: f64) {
        self.running_sum += value;
        self.paths_done += 1;
    }

    fn results_so_far(&self) -> Vec<StatisticsRow> {
        self.mean()
            .map(|mean| StatisticsRow::new(self.paths_done, mean))
            .into_iter()
            .collect()
    }

    fn paths_recorded(&self) -> usize {
        self.paths_done
    }
}

/// Running mean and variance (Welford), mergeable across workers.
///
/// Reports the mean through [`StatisticsGatherer::results_so_far`] and exposes
/// the standard error and confidence half-widths directly.
///
/// # Examples
///
/// ```rust
/// use mc_pricing::statistics::{StatisticsGatherer, StatisticsMoments};
///
/// let mut stats = StatisticsMoments::new();
/// for x in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
///     stats.record_one_result(x);
/// }
/// assert!((stats.mean().unwrap() - 5.0).abs() < 1e-12);
/// assert!((stats.variance().unwrap() - 32.0 / 7.0).abs() < 1e-12);
/// assert!(stats.std_error().unwrap() > 0.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatisticsMoments {
    count: usize,
    mean: f64,
    /// Sum of squared deviations from the running mean.
    m2: f64,
}

impl StatisticsMoments {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mean, `None` before the first record.
    #[inline]
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }

    /// Unbiased sample variance, `None` with fewer than two records.
    pub fn variance(&self) -> Option<f64> {
        (self.count > 1).then(|| self.m2 / (self.count - 1) as f64)
    }

    /// Standard error of the mean, `sqrt(variance / n)`.
    pub fn std_error(&self) -> Option<f64> {
        self.variance()
            .map(|variance| (variance / self.count as f64).sqrt())
    }

    /// Half-width of the 95% confidence interval.
    pub fn confidence_95(&self) -> Option<f64> {
        self.std_error().map(|se| Z_95 * se)
    }

    /// Half-width of the 99% confidence interval.
    pub fn confidence_99(&self) -> Option<f64> {
        self.std_error().map(|se| Z_99 * se)
    }

    /// Folds another accumulator into this one (Chan et al. pairwise update).
    pub fn merge(&mut self, other: &StatisticsMoments) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = other.clone();
            return;
        }

        let n_a = self.count as f64;
        let n_b = other.count as f64;
        let n = n_a + n_b;
        let delta = other.mean - self.mean;

        self.mean += delta * n_b / n;
        self.m2 += other.m2 + delta * delta * n_a * n_b / n;
        self.count += other.count;
    }
}

impl StatisticsGatherer for StatisticsMoments {
    #[inline]
    fn record_one_result(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    fn results_so_far(&self) -> Vec<StatisticsRow> {
        self.mean()
            .map(|mean| StatisticsRow::new(self.count, mean))
            .into_iter()
            .collect()
    }

    fn paths_recorded(&self) -> usize {
        self.count
    }
}
