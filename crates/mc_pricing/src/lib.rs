//! # mc_pricing: Monte Carlo Engine for Path-Dependent Derivatives
//!
//! ## Layer Role
//!
//! mc_pricing sits on top of `mc_core` and contains the simulation pipeline:
//! - Random streams: Park-Miller, Mersenne Twister and the antithetic
//!   decorator (`rng`)
//! - Path-dependent products and their cash flows (`products`)
//! - Path generation and the exotic engine, sequential and parallel (`mc`)
//! - Statistics gatherers and the convergence table (`statistics`)
//!
//! ## Usage Example
//!
//! ```rust
//! use mc_core::analytical::BlackScholes;
//! use mc_core::{Parameter, Payoff};
//! use mc_pricing::mc::ExoticEngine;
//! use mc_pricing::products::EuropeanOption;
//! use mc_pricing::rng::ParkMiller;
//! use mc_pricing::statistics::{StatisticsGatherer, StatisticsMoments};
//!
//! let product = EuropeanOption::new(1.0, Payoff::call(100.0)).unwrap();
//! let mut engine = ExoticEngine::black_scholes(
//!     product,
//!     ParkMiller::new(1, 1),
//!     100.0,
//!     Parameter::constant(0.05),
//!     Parameter::constant(0.0),
//!     Parameter::constant(0.2),
//! )
//! .unwrap();
//!
//! let mut stats = StatisticsMoments::new();
//! engine.do_simulation(&mut stats, 50_000);
//!
//! let exact = BlackScholes::new(100.0, 0.05, 0.0, 0.2).unwrap().call(100.0, 1.0).unwrap();
//! let error = (stats.mean().unwrap() - exact).abs();
//! assert!(error < 5.0 * stats.std_error().unwrap());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Serialisation for statistics rows, cash flows and products

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod mc;
pub mod products;
pub mod rng;
pub mod statistics;

pub use mc::{ExoticEngine, SimulationConfig};
pub use products::{CashFlow, PathDependent};
pub use rng::RandomStream;
pub use statistics::{StatisticsGatherer, StatisticsRow};
