//! Closed-form Black-Scholes formulas.
//!
//! Used as an independent reference for the Monte Carlo engine: European
//! call, put, forward and digital prices under constant rate, dividend yield
//! and volatility.

pub mod black_scholes;
pub mod error;

pub use black_scholes::BlackScholes;
pub use error::AnalyticalError;
