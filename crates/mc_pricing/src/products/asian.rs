//! Asian options.
//!
//! The payoff is applied to the average of the spots observed at the
//! averaging dates:
//!
//! - **Arithmetic**: `A = (1/n) Σ S_i`
//! - **Geometric**: `G = exp((1/n) Σ ln S_i)`, accumulated in log space
//!
//! Payment happens once, at the delivery time, which may fall after the last
//! averaging date.

use mc_core::Payoff;

use super::{validate_payment_time, validate_times, CashFlow, PathDependent, ProductError};

/// Averaging rule for [`AsianOption`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Averaging {
    /// Arithmetic mean of the observed spots.
    #[default]
    Arithmetic,
    /// Geometric mean of the observed spots.
    Geometric,
}

impl Averaging {
    /// Averages `spots` (assumed non-empty).
    #[inline]
    pub fn average(&self, spots: &[f64]) -> f64 {
        let n = spots.len() as f64;
        match self {
            Averaging::Arithmetic => spots.iter().sum::<f64>() / n,
            Averaging::Geometric => (spots.iter().map(|s| s.ln()).sum::<f64>() / n).exp(),
        }
    }
}

/// Discretely monitored Asian option.
///
/// # Examples
///
/// ```rust
/// use mc_core::Payoff;
/// use mc_pricing::products::{AsianOption, Averaging, PathDependent};
///
/// let asian = AsianOption::new(
///     vec![0.25, 0.5, 0.75, 1.0],
///     1.0,
///     Payoff::call(100.0),
///     Averaging::Arithmetic,
/// )
/// .unwrap();
///
/// let flows = asian.cash_flows(&[100.0, 110.0, 120.0, 130.0], Vec::new());
/// assert_eq!(flows[0].amount, 15.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AsianOption {
    look_at_times: Vec<f64>,
    delivery: f64,
    payoff: Payoff,
    averaging: Averaging,
}

impl AsianOption {
    /// Creates an Asian option.
    ///
    /// # Errors
    ///
    /// - `EmptyObservationTimes` / `InvalidObservationTime` for bad averaging dates
    /// - `InvalidPaymentTime` if `delivery` is not positive
    pub fn new(
        look_at_times: Vec<f64>,
        delivery: f64,
        payoff: Payoff,
        averaging: Averaging,
    ) -> Result<Self, ProductError> {
        validate_times(&look_at_times)?;
        validate_payment_time(delivery)?;
        Ok(Self {
            look_at_times,
            delivery,
            payoff,
            averaging,
        })
    }

    /// Evenly spaced averaging dates `expiry/n, 2·expiry/n, …, expiry`,
    /// delivered at expiry.
    pub fn with_equal_spacing(
        expiry: f64,
        number_of_dates: usize,
        payoff: Payoff,
        averaging: Averaging,
    ) -> Result<Self, ProductError> {
        let n = number_of_dates as f64;
        let times = (1..=number_of_dates).map(|i| expiry * i as f64 / n).collect();
        Self::new(times, expiry, payoff, averaging)
    }

    /// Delivery time.
    #[inline]
    pub fn delivery(&self) -> f64 {
        self.delivery
    }

    /// Averaging rule.
    #[inline]
    pub fn averaging(&self) -> Averaging {
        self.averaging
    }

    /// The payoff applied to the average.
    #[inline]
    pub fn payoff(&self) -> &Payoff {
        &self.payoff
    }
}

impl PathDependent for AsianOption {
    fn look_at_times(&self) -> &[f64] {
        &self.look_at_times
    }

    fn max_number_of_cash_flows(&self) -> usize {
        1
    }

    fn possible_cash_flow_times(&self) -> Vec<f64> {
        vec![self.delivery]
    }

    #[inline]
    fn cash_flows(&self, spots: &[f64], mut flows: Vec<CashFlow>) -> Vec<CashFlow> {
        let average = self.averaging.average(spots);
        flows.clear();
        flows.push(CashFlow::new(self.payoff.evaluate(average), 0));
        flows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_arithmetic_average() {
        assert_relative_eq!(
            Averaging::Arithmetic.average(&[100.0, 105.0, 110.0, 95.0, 100.0]),
            102.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_geometric_average() {
        assert_relative_eq!(Averaging::Geometric.average(&[2.0, 8.0]), 4.0, epsilon = 1e-12);
        assert_relative_eq!(
            Averaging::Geometric.average(&[100.0, 100.0, 100.0]),
            100.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_geometric_put_pays_on_geometric_mean() {
        let asian =
            AsianOption::new(vec![1.0, 2.0], 2.0, Payoff::put(10.0), Averaging::Geometric).unwrap();
        let flows = asian.cash_flows(&[2.0, 8.0], Vec::new());
        assert_eq!(flows.len(), 1);
        assert_relative_eq!(flows[0].amount, 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_delivery_after_last_date() {
        let asian =
            AsianOption::new(vec![0.5, 1.0], 1.25, Payoff::call(0.0), Averaging::Arithmetic)
                .unwrap();
        assert_eq!(asian.possible_cash_flow_times(), vec![1.25]);
        assert_eq!(asian.max_number_of_cash_flows(), 1);
    }

    #[test]
    fn test_equal_spacing() {
        let asian =
            AsianOption::with_equal_spacing(2.0, 4, Payoff::call(100.0), Averaging::Arithmetic)
                .unwrap();
        assert_eq!(asian.look_at_times(), &[0.5, 1.0, 1.5, 2.0]);
        assert_eq!(asian.delivery(), 2.0);
    }

    #[test]
    fn test_rejects_bad_dates() {
        assert_eq!(
            AsianOption::new(vec![], 1.0, Payoff::call(1.0), Averaging::Arithmetic),
            Err(ProductError::EmptyObservationTimes)
        );
        assert_eq!(
            AsianOption::new(vec![1.0, 0.5], 1.0, Payoff::call(1.0), Averaging::Arithmetic),
            Err(ProductError::InvalidObservationTime { index: 1, time: 0.5 })
        );
        assert_eq!(
            AsianOption::with_equal_spacing(1.0, 0, Payoff::call(1.0), Averaging::Geometric),
            Err(ProductError::EmptyObservationTimes)
        );
    }
}
