//! Numerical building blocks shared by the simulation kernel.
//!
//! - [`distributions`]: standard normal density, cumulative distribution and
//!   its inverse (Beasley-Springer-Moro)

pub mod distributions;

pub use distributions::{inverse_cumulative_normal, norm_cdf, norm_pdf};
