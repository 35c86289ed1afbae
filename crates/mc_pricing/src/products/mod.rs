//! Path-dependent products.
//!
//! A product tells the engine which times it needs the underlying simulated
//! at, when it can pay, and how one simulated path turns into cash flows.
//!
//! # Key Components
//!
//! - [`PathDependent`]: capability trait consumed by the engine
//! - [`CashFlow`]: an amount paid at one of the product's cash-flow times
//! - [`EuropeanOption`]: single observation, single payment
//! - [`AsianOption`]: arithmetic or geometric average over observation dates
//!
//! The trait is open: products defined outside this crate can be simulated
//! by implementing [`PathDependent`].

mod asian;
mod european;

pub use asian::{AsianOption, Averaging};
pub use european::EuropeanOption;

use thiserror::Error;

/// An amount paid at `possible_cash_flow_times()[time_index]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CashFlow {
    /// Undiscounted amount.
    pub amount: f64,
    /// Index into the product's cash-flow times.
    pub time_index: usize,
}

impl CashFlow {
    /// Creates a cash flow.
    #[inline]
    pub fn new(amount: f64, time_index: usize) -> Self {
        Self { amount, time_index }
    }
}

/// Product capability consumed by the simulation engine.
///
/// # Contract
///
/// - `look_at_times()` is non-empty and strictly increasing
/// - `possible_cash_flow_times().len() == max_number_of_cash_flows()`
/// - `cash_flows` emits at most `max_number_of_cash_flows()` flows, each with
///   `time_index < max_number_of_cash_flows()`
///
/// The engine checks the first two at construction and panics on a
/// violation of the last.
pub trait PathDependent: Send + Sync {
    /// Times at which the underlying must be observed.
    fn look_at_times(&self) -> &[f64];

    /// Upper bound on the number of cash flows per path.
    fn max_number_of_cash_flows(&self) -> usize;

    /// Times at which cash flows may be paid.
    fn possible_cash_flow_times(&self) -> Vec<f64>;

    /// Maps one path of spots (one per look-at time) to cash flows.
    ///
    /// `flows` is a reusable buffer: implementations clear it, fill it and
    /// hand it back.
    fn cash_flows(&self, spots: &[f64], flows: Vec<CashFlow>) -> Vec<CashFlow>;
}

impl<P: PathDependent + ?Sized> PathDependent for Box<P> {
    fn look_at_times(&self) -> &[f64] {
        (**self).look_at_times()
    }

    fn max_number_of_cash_flows(&self) -> usize {
        (**self).max_number_of_cash_flows()
    }

    fn possible_cash_flow_times(&self) -> Vec<f64> {
        (**self).possible_cash_flow_times()
    }

    fn cash_flows(&self, spots: &[f64], flows: Vec<CashFlow>) -> Vec<CashFlow> {
        (**self).cash_flows(spots, flows)
    }
}

/// Product construction errors.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// No observation times were supplied.
    #[error("Product requires at least one observation time")]
    EmptyObservationTimes,

    /// Observation times are not strictly increasing and positive.
    #[error("Observation time {index} at t = {time} is not strictly increasing and positive")]
    InvalidObservationTime {
        /// Position of the offending time
        index: usize,
        /// The offending time
        time: f64,
    },

    /// Expiry or delivery time is not positive.
    #[error("Invalid payment time: t = {time}")]
    InvalidPaymentTime {
        /// The offending time
        time: f64,
    },
}

/// Checks that `times` is non-empty, finite, positive and strictly increasing.
pub(crate) fn validate_times(times: &[f64]) -> Result<(), ProductError> {
    if times.is_empty() {
        return Err(ProductError::EmptyObservationTimes);
    }

    let mut previous = 0.0;
    for (index, &time) in times.iter().enumerate() {
        if !time.is_finite() || time <= previous {
            return Err(ProductError::InvalidObservationTime { index, time });
        }
        previous = time;
    }
    Ok(())
}

pub(crate) fn validate_payment_time(time: f64) -> Result<(), ProductError> {
    if time.is_finite() && time > 0.0 {
        Ok(())
    } else {
        Err(ProductError::InvalidPaymentTime { time })
    }
}
