//! Deterministic time-dependent coefficients.
//!
//! A [`Parameter`] is a scalar function of time (a rate, a dividend yield or a
//! volatility) that the simulation only ever queries through definite
//! integrals. Supported shapes:
//! - `Constant`: a single value for all times
//! - `PiecewiseConstant`: flat segments between increasing breakpoints
//!
//! Parameters are immutable after construction and are cheap to clone, so the
//! engine and each path generator own their own copies.

use thiserror::Error;

/// Errors raised when constructing a [`Parameter`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParameterError {
    /// No breakpoints were supplied.
    #[error("Piecewise parameter requires at least one breakpoint")]
    EmptyBreakpoints,

    /// Breakpoint and value vectors have different lengths.
    #[error("Breakpoint count {times} does not match value count {values}")]
    LengthMismatch {
        /// Number of breakpoints
        times: usize,
        /// Number of values
        values: usize,
    },

    /// Breakpoints are not strictly increasing and positive.
    #[error("Breakpoint {index} at t = {time} is not strictly increasing and positive")]
    InvalidBreakpoint {
        /// Position of the offending breakpoint
        index: usize,
        /// The offending time
        time: f64,
    },

    /// A value is NaN or infinite.
    #[error("Parameter value {index} is not finite: {value}")]
    NonFiniteValue {
        /// Position of the offending value
        index: usize,
        /// The offending value
        value: f64,
    },
}

/// Deterministic scalar function of time, queried by integral.
///
/// # Variants
/// - `Constant`: `f(t) = c`
/// - `PiecewiseConstant`: `f(t) = values[i]` for `times[i-1] <= t < times[i]`
///   (with `times[-1]` taken as `-inf`); the last value extends flat beyond the
///   last breakpoint
///
/// # Examples
/// ```
/// use mc_core::parameters::Parameter;
///
/// let rate = Parameter::constant(0.05);
/// assert!((rate.integral(0.0, 2.0) - 0.10).abs() < 1e-15);
///
/// let vol = Parameter::piecewise_constant(vec![1.0, 2.0], vec![0.2, 0.3]).unwrap();
/// assert!((vol.integral_square(0.0, 2.0) - (0.04 + 0.09)).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Parameter {
    /// Constant value.
    Constant(f64),
    /// Flat segments between breakpoints.
    PiecewiseConstant {
        /// Right end of each segment (strictly increasing, positive)
        times: Vec<f64>,
        /// Value on each segment
        values: Vec<f64>,
    },
}

impl Parameter {
    /// Creates a constant parameter.
    #[inline]
    pub fn constant(value: f64) -> Self {
        Parameter::Constant(value)
    }

    /// Creates a piecewise-constant parameter.
    ///
    /// # Errors
    /// - `EmptyBreakpoints` if `times` is empty
    /// - `LengthMismatch` if `times` and `values` differ in length
    /// - `InvalidBreakpoint` if a time is non-positive or not strictly increasing
    /// - `NonFiniteValue` if a value is NaN or infinite
    pub fn piecewise_constant(times: Vec<f64>, values: Vec<f64>) -> Result<Self, ParameterError> {
        if times.is_empty() {
            return Err(ParameterError::EmptyBreakpoints);
        }
        if times.len() != values.len() {
            return Err(ParameterError::LengthMismatch {
                times: times.len(),
                values: values.len(),
            });
        }

        let mut previous = 0.0;
        for (index, &time) in times.iter().enumerate() {
            if !time.is_finite() || time <= previous {
                return Err(ParameterError::InvalidBreakpoint { index, time });
            }
            previous = time;
        }

        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(ParameterError::NonFiniteValue { index, value });
        }

        Ok(Parameter::PiecewiseConstant { times, values })
    }

    /// Value of the parameter at time `t`.
    pub fn value(&self, t: f64) -> f64 {
        match self {
            Parameter::Constant(c) => *c,
            Parameter::PiecewiseConstant { times, values } => {
                let segment = times.partition_point(|&end| end <= t);
                values[segment.min(values.len() - 1)]
            }
        }
    }

    /// Definite integral `∫_{t1}^{t2} f(s) ds`.
    ///
    /// Orientation is respected: `integral(t2, t1) == -integral(t1, t2)`.
    pub fn integral(&self, t1: f64, t2: f64) -> f64 {
        self.oriented(t1, t2, |v| v)
    }

    /// Definite integral of the square `∫_{t1}^{t2} f(s)² ds`.
    pub fn integral_square(&self, t1: f64, t2: f64) -> f64 {
        self.oriented(t1, t2, |v| v * v)
    }

    /// Average value over `[t1, t2]`.
    ///
    /// Returns the instantaneous value at `t1` when `t1 == t2`.
    pub fn mean(&self, t1: f64, t2: f64) -> f64 {
        if t1 == t2 {
            return self.value(t1);
        }
        self.integral(t1, t2) / (t2 - t1)
    }

    /// Root-mean-square value over `[t1, t2]`.
    ///
    /// Returns the absolute instantaneous value at `t1` when `t1 == t2`.
    pub fn rms(&self, t1: f64, t2: f64) -> f64 {
        if t1 == t2 {
            return self.value(t1).abs();
        }
        (self.integral_square(t1, t2) / (t2 - t1)).sqrt()
    }

    fn oriented(&self, t1: f64, t2: f64, g: impl Fn(f64) -> f64) -> f64 {
        if t2 < t1 {
            -self.segment_sum(t2, t1, g)
        } else {
            self.segment_sum(t1, t2, g)
        }
    }

    /// Sum of `g(value) * overlap` over segments intersecting `[lo, hi]`.
    fn segment_sum(&self, lo: f64, hi: f64, g: impl Fn(f64) -> f64) -> f64 {
        match self {
            Parameter::Constant(c) => g(*c) * (hi - lo),
            Parameter::PiecewiseConstant { times, values } => {
                let last = times.len() - 1;
                let mut total = 0.0;
                let mut start = f64::NEG_INFINITY;
                for (i, &value) in values.iter().enumerate() {
                    let end = if i == last { f64::INFINITY } else { times[i] };
                    let overlap = hi.min(end) - lo.max(start);
                    if overlap > 0.0 {
                        total += g(value) * overlap;
                    }
                    if end >= hi {
                        break;
                    }
                    start = end;
                }
                total
            }
        }
    }
}

impl Default for Parameter {
    fn default() -> Self {
        Parameter::Constant(0.0)
    }
}

impl From<f64> for Parameter {
    fn from(value: f64) -> Self {
        Parameter::Constant(value)
    }
}
