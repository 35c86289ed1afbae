//! Payoff definitions.
//!
//! A payoff maps a single spot value (or an average of spots) to a cash
//! amount. Products use it to turn a simulated path into cash flows.

/// Exact (non-smoothed) payoff functions.
///
/// # Variants
/// - `Call`: `max(S - K, 0)`
/// - `Put`: `max(K - S, 0)`
/// - `DigitalCall`: 1 if `S > K` else 0
/// - `DigitalPut`: 1 if `S < K` else 0
/// - `DoubleDigital`: 1 if `lower <= S <= upper` else 0
/// - `Forward`: `S - K`
///
/// # Examples
/// ```
/// use mc_core::payoff::Payoff;
///
/// assert_eq!(Payoff::put(100.0).evaluate(90.0), 10.0);
/// assert_eq!(Payoff::double_digital(90.0, 110.0).evaluate(110.0), 1.0);
/// assert_eq!(Payoff::forward(100.0).evaluate(90.0), -10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Payoff {
    /// Vanilla call.
    Call {
        /// Strike price
        strike: f64,
    },
    /// Vanilla put.
    Put {
        /// Strike price
        strike: f64,
    },
    /// Cash-or-nothing call paying 1.
    DigitalCall {
        /// Strike price
        strike: f64,
    },
    /// Cash-or-nothing put paying 1.
    DigitalPut {
        /// Strike price
        strike: f64,
    },
    /// Pays 1 when the spot lies in the closed band.
    DoubleDigital {
        /// Lower barrier (inclusive)
        lower: f64,
        /// Upper barrier (inclusive)
        upper: f64,
    },
    /// Linear forward payoff.
    Forward {
        /// Delivery price
        strike: f64,
    },
}

impl Payoff {
    /// Creates a call payoff.
    pub fn call(strike: f64) -> Self {
        Payoff::Call { strike }
    }

    /// Creates a put payoff.
    pub fn put(strike: f64) -> Self {
        Payoff::Put { strike }
    }

    /// Creates a digital call payoff.
    pub fn digital_call(strike: f64) -> Self {
        Payoff::DigitalCall { strike }
    }

    /// Creates a digital put payoff.
    pub fn digital_put(strike: f64) -> Self {
        Payoff::DigitalPut { strike }
    }

    /// Creates a double digital payoff on `[lower, upper]`.
    pub fn double_digital(lower: f64, upper: f64) -> Self {
        Payoff::DoubleDigital { lower, upper }
    }

    /// Creates a forward payoff.
    pub fn forward(strike: f64) -> Self {
        Payoff::Forward { strike }
    }

    /// Evaluates the payoff at `spot`.
    #[inline]
    pub fn evaluate(&self, spot: f64) -> f64 {
        match *self {
            Payoff::Call { strike } => (spot - strike).max(0.0),
            Payoff::Put { strike } => (strike - spot).max(0.0),
            Payoff::DigitalCall { strike } => indicator(spot > strike),
            Payoff::DigitalPut { strike } => indicator(spot < strike),
            Payoff::DoubleDigital { lower, upper } => indicator(spot >= lower && spot <= upper),
            Payoff::Forward { strike } => spot - strike,
        }
    }

    /// Short lowercase name, used in reports.
    pub fn name(&self) -> &'static str {
        match self {
            Payoff::Call { .. } => "call",
            Payoff::Put { .. } => "put",
            Payoff::DigitalCall { .. } => "digital_call",
            Payoff::DigitalPut { .. } => "digital_put",
            Payoff::DoubleDigital { .. } => "double_digital",
            Payoff::Forward { .. } => "forward",
        }
    }
}

#[inline]
fn indicator(condition: bool) -> f64 {
    if condition {
        1.0
    } else {
        0.0
    }
}
