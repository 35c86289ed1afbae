//! Monte Carlo simulation engine.
//!
//! # Architecture
//!
//! ```text
//! ExoticEngine<P, G>
//! ├── P: PathDependent       (look-at times, cash-flow times, cash flows)
//! ├── G: PathGenerator       (one spot per look-at time)
//! │   └── BlackScholesPathGenerator<R: RandomStream>
//! ├── discounts              (exp(-∫r) per cash-flow time, immutable)
//! └── drivers
//!     ├── do_simulation()            sequential
//!     ├── do_simulation_parallel()   rayon, ordered recording
//!     └── mean_parallel()            rayon, merged moments
//! ```
//!
//! Data flows one way: generator → spots → product → cash flows → discounted
//! value → gatherer.
//!
//! # Examples
//!
//! ```rust
//! use mc_core::{Parameter, Payoff};
//! use mc_pricing::mc::{ExoticEngine, SimulationConfig};
//! use mc_pricing::products::{AsianOption, Averaging};
//! use mc_pricing::rng::{AntiThetic, ParkMiller};
//! use mc_pricing::statistics::{ConvergenceTable, StatisticsGatherer, StatisticsMean};
//!
//! let asian = AsianOption::with_equal_spacing(1.0, 12, Payoff::call(100.0), Averaging::Arithmetic)
//!     .unwrap();
//! let mut engine = ExoticEngine::black_scholes(
//!     asian,
//!     AntiThetic::new(ParkMiller::new(12, 1)),
//!     100.0,
//!     Parameter::constant(0.05),
//!     Parameter::constant(0.0),
//!     Parameter::constant(0.2),
//! )
//! .unwrap();
//!
//! let config = SimulationConfig::builder().n_paths(4_096).build().unwrap();
//! let mut table = ConvergenceTable::new(StatisticsMean::new());
//! engine.do_simulation_parallel(&mut table, &config);
//!
//! let rows = table.results_so_far();
//! assert_eq!(rows.last().unwrap().paths, 4_096);
//! ```

mod config;
mod engine;
mod error;
mod parallel;
mod paths;

pub use config::{
    SimulationConfig, SimulationConfigBuilder, DEFAULT_CHUNKS_PER_WAVE, DEFAULT_CHUNK_SIZE,
    DEFAULT_SEED, MAX_PATHS,
};
pub use engine::ExoticEngine;
pub use error::{ConfigError, EngineError};
pub use paths::{BlackScholesPathGenerator, PathGenerator};
