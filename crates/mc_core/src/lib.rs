//! # mc_core: Foundation for Monte Carlo Exotic Pricing
//!
//! ## Layer Role
//!
//! mc_core is the bottom layer of the workspace and has no dependency on the
//! other `mc_*` crates. It provides:
//! - Deterministic time-dependent coefficients queried by integral (`parameters`)
//! - Standard normal density, cumulative and inverse cumulative functions (`math`)
//! - The payoff evaluation contract used by products (`payoff`)
//! - Closed-form Black-Scholes references for verification (`analytical`)
//!
//! ## Usage Examples
//!
//! ```rust
//! use mc_core::math::inverse_cumulative_normal;
//! use mc_core::parameters::Parameter;
//! use mc_core::payoff::Payoff;
//!
//! let vol = Parameter::constant(0.2);
//! assert!((vol.integral_square(0.0, 1.0) - 0.04).abs() < 1e-15);
//!
//! let call = Payoff::call(100.0);
//! assert_eq!(call.evaluate(110.0), 10.0);
//!
//! assert!(inverse_cumulative_normal(0.5).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `Parameter` and `Payoff`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod math;
pub mod parameters;
pub mod payoff;

pub use parameters::{Parameter, ParameterError};
pub use payoff::Payoff;
