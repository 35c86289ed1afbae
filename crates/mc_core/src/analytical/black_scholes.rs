//! Black-Scholes closed forms with a continuous dividend yield.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·e^(-dT)·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·e^(-dT)·N(-d₁)
//! **Forward**: F = S·e^(-dT) - K·e^(-rT)
//! **Digital Call**: e^(-rT)·N(d₂)
//! **Digital Put**: e^(-rT)·N(-d₂)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r - d + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T

use super::error::AnalyticalError;
use crate::math::norm_cdf;

/// Black-Scholes model with constant coefficients.
///
/// # Examples
/// ```
/// use mc_core::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0, 0.05, 0.0, 0.2).unwrap();
/// let call = bs.call(100.0, 1.0).unwrap();
/// let put = bs.put(100.0, 1.0).unwrap();
/// let forward = bs.forward(100.0, 1.0).unwrap();
///
/// assert!((call - put - forward).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes {
    /// Spot price (S)
    spot: f64,
    /// Risk-free rate (r)
    rate: f64,
    /// Continuous dividend yield (d)
    dividend: f64,
    /// Volatility (σ)
    volatility: f64,
}

impl BlackScholes {
    /// Creates a new Black-Scholes model.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0
    pub fn new(spot: f64, rate: f64, dividend: f64, volatility: f64) -> Result<Self, AnalyticalError> {
        if spot.is_nan() || spot <= 0.0 {
            return Err(AnalyticalError::InvalidSpot { spot });
        }
        if volatility.is_nan() || volatility <= 0.0 {
            return Err(AnalyticalError::InvalidVolatility { volatility });
        }

        Ok(Self {
            spot,
            rate,
            dividend,
            volatility,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the dividend yield.
    #[inline]
    pub fn dividend(&self) -> f64 {
        self.dividend
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Computes (d₁, d₂).
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidStrike` if strike <= 0
    /// - `AnalyticalError::InvalidExpiry` if expiry <= 0
    pub fn d1_d2(&self, strike: f64, expiry: f64) -> Result<(f64, f64), AnalyticalError> {
        check_contract(strike, expiry)?;

        let vol_sqrt_t = self.volatility * expiry.sqrt();
        let log_moneyness = (self.spot / strike).ln();
        let drift = (self.rate - self.dividend + 0.5 * self.volatility * self.volatility) * expiry;
        let d1 = (log_moneyness + drift) / vol_sqrt_t;

        Ok((d1, d1 - vol_sqrt_t))
    }

    /// European call price.
    pub fn call(&self, strike: f64, expiry: f64) -> Result<f64, AnalyticalError> {
        let (d1, d2) = self.d1_d2(strike, expiry)?;
        Ok(self.forward_spot(expiry) * norm_cdf(d1) - strike * self.discount(expiry) * norm_cdf(d2))
    }

    /// European put price.
    pub fn put(&self, strike: f64, expiry: f64) -> Result<f64, AnalyticalError> {
        let (d1, d2) = self.d1_d2(strike, expiry)?;
        Ok(strike * self.discount(expiry) * norm_cdf(-d2) - self.forward_spot(expiry) * norm_cdf(-d1))
    }

    /// Forward contract value, `S·e^(-dT) - K·e^(-rT)`.
    pub fn forward(&self, strike: f64, expiry: f64) -> Result<f64, AnalyticalError> {
        check_contract(strike, expiry)?;
        Ok(self.forward_spot(expiry) - strike * self.discount(expiry))
    }

    /// Cash-or-nothing digital call paying 1.
    pub fn digital_call(&self, strike: f64, expiry: f64) -> Result<f64, AnalyticalError> {
        let (_, d2) = self.d1_d2(strike, expiry)?;
        Ok(self.discount(expiry) * norm_cdf(d2))
    }

    /// Cash-or-nothing digital put paying 1.
    pub fn digital_put(&self, strike: f64, expiry: f64) -> Result<f64, AnalyticalError> {
        let (_, d2) = self.d1_d2(strike, expiry)?;
        Ok(self.discount(expiry) * norm_cdf(-d2))
    }

    #[inline]
    fn discount(&self, expiry: f64) -> f64 {
        (-self.rate * expiry).exp()
    }

    #[inline]
    fn forward_spot(&self, expiry: f64) -> f64 {
        self.spot * (-self.dividend * expiry).exp()
    }
}

fn check_contract(strike: f64, expiry: f64) -> Result<(), AnalyticalError> {
    if strike.is_nan() || strike <= 0.0 {
        return Err(AnalyticalError::InvalidStrike { strike });
    }
    if expiry.is_nan() || expiry <= 0.0 {
        return Err(AnalyticalError::InvalidExpiry { expiry });
    }
    Ok(())
}
