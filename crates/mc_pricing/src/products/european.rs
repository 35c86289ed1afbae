//! European options.
//!
//! A single observation at expiry, paid at expiry.

use mc_core::Payoff;

use super::{validate_payment_time, CashFlow, PathDependent, ProductError};

/// European option: observes the spot once at expiry and pays there.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EuropeanOption {
    times: [f64; 1],
    payoff: Payoff,
}

impl EuropeanOption {
    /// Creates a European option.
    ///
    /// # Errors
    ///
    /// `ProductError::InvalidPaymentTime` if `expiry` is not positive.
    pub fn new(expiry: f64, payoff: Payoff) -> Result<Self, ProductError> {
        validate_payment_time(expiry)?;
        Ok(Self {
            times: [expiry],
            payoff,
        })
    }

    /// Time to expiry.
    #[inline]
    pub fn expiry(&self) -> f64 {
        self.times[0]
    }

    /// The payoff applied to the terminal spot.
    #[inline]
    pub fn payoff(&self) -> &Payoff {
        &self.payoff
    }
}

impl PathDependent for EuropeanOption {
    fn look_at_times(&self) -> &[f64] {
        &self.times
    }

    fn max_number_of_cash_flows(&self) -> usize {
        1
    }

    fn possible_cash_flow_times(&self) -> Vec<f64> {
        self.times.to_vec()
    }

    #[inline]
    fn cash_flows(&self, spots: &[f64], mut flows: Vec<CashFlow>) -> Vec<CashFlow> {
        flows.clear();
        flows.push(CashFlow::new(self.payoff.evaluate(spots[0]), 0));
        flows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_flow_at_expiry() {
        let option = EuropeanOption::new(1.5, Payoff::put(100.0)).unwrap();
        assert_eq!(option.look_at_times(), &[1.5]);
        assert_eq!(option.possible_cash_flow_times(), vec![1.5]);

        let flows = option.cash_flows(&[80.0], vec![CashFlow::new(99.0, 0); 3]);
        assert_eq!(flows, vec![CashFlow::new(20.0, 0)]);
    }

    #[test]
    fn test_rejects_non_positive_expiry() {
        assert_eq!(
            EuropeanOption::new(0.0, Payoff::call(1.0)),
            Err(ProductError::InvalidPaymentTime { time: 0.0 })
        );
    }
}
