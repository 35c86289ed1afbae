//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Market arguments,
//! stream selection and the simulation runner are shared here.

pub mod parity;
pub mod price;

use clap::Args;
use mc_core::analytical::BlackScholes;
use mc_core::Parameter;
use mc_pricing::mc::ExoticEngine;
use mc_pricing::products::PathDependent;
use mc_pricing::rng::{AntiThetic, MersenneTwister, ParkMiller, RandomStream};
use mc_pricing::statistics::{
    ConvergenceTable, StatisticsGatherer, StatisticsMoments, StatisticsRow,
};
use serde::Serialize;
use tracing::info;

use crate::config::{GeneratorKind, OutputFormat, Overrides, PricingConfig};
use crate::Result;

/// Flat lognormal market for one underlying.
#[derive(Debug, Clone, Copy, Args, Serialize)]
pub struct MarketArgs {
    /// Initial spot
    #[arg(long, default_value_t = 100.0)]
    pub spot: f64,

    /// Continuously compounded risk-free rate
    #[arg(long, default_value_t = 0.05)]
    pub rate: f64,

    /// Continuous dividend yield
    #[arg(long, default_value_t = 0.0)]
    pub dividend: f64,

    /// Volatility
    #[arg(long, default_value_t = 0.2)]
    pub vol: f64,
}

impl MarketArgs {
    /// Closed-form reference on the same market.
    pub fn closed_form(&self) -> Result<BlackScholes> {
        Ok(BlackScholes::new(self.spot, self.rate, self.dividend, self.vol)?)
    }
}

/// Simulation arguments; each overrides the file and environment settings.
#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    /// Number of Monte Carlo paths
    #[arg(long)]
    pub paths: Option<usize>,

    /// Generator seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Uniform generator
    #[arg(long, value_enum)]
    pub generator: Option<GeneratorKind>,

    /// Use antithetic sampling
    #[arg(long)]
    pub antithetic: bool,

    /// Simulate chunks of paths in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

impl RunArgs {
    /// Converts to configuration overrides.
    pub fn overrides(&self, log_level: Option<String>) -> Overrides {
        Overrides {
            log_level,
            paths: self.paths,
            seed: self.seed,
            generator: self.generator,
            antithetic: self.antithetic,
            parallel: self.parallel,
            format: self.format,
        }
    }
}

/// Outcome of one simulation run.
#[derive(Debug, Clone, Serialize)]
pub struct Estimate {
    /// Number of paths simulated
    pub paths: usize,
    /// Monte Carlo price
    pub price: f64,
    /// Standard error, absent below two paths
    pub std_error: Option<f64>,
    /// 95% confidence half-width
    pub confidence_95: Option<f64>,
    /// Running mean at 2, 4, 8, … paths and at the final count
    pub convergence: Vec<StatisticsRow>,
}

/// Prices `product` under the configured stream.
pub fn simulate(
    product: Box<dyn PathDependent>,
    market: &MarketArgs,
    config: &PricingConfig,
) -> Result<Estimate> {
    let seed = config.seed;
    match (config.generator, config.antithetic) {
        (GeneratorKind::ParkMiller, false) => run(product, ParkMiller::new(1, seed), market, config),
        (GeneratorKind::ParkMiller, true) => {
            run(product, AntiThetic::new(ParkMiller::new(1, seed)), market, config)
        }
        (GeneratorKind::Mersenne, false) => {
            run(product, MersenneTwister::new(1, seed), market, config)
        }
        (GeneratorKind::Mersenne, true) => {
            run(product, AntiThetic::new(MersenneTwister::new(1, seed)), market, config)
        }
    }
}

fn run<R: RandomStream>(
    product: Box<dyn PathDependent>,
    stream: R,
    market: &MarketArgs,
    config: &PricingConfig,
) -> Result<Estimate> {
    let mut engine = ExoticEngine::black_scholes(
        product,
        stream,
        market.spot,
        Parameter::constant(market.rate),
        Parameter::constant(market.dividend),
        Parameter::constant(market.vol),
    )?;

    let mut table = ConvergenceTable::new(StatisticsMoments::new());
    if config.parallel {
        engine.do_simulation_parallel(&mut table, &config.simulation_config()?);
    } else {
        engine.do_simulation(&mut table, config.paths);
    }

    let convergence = table.results_so_far();
    let moments = table.into_inner();
    let estimate = Estimate {
        paths: moments.paths_recorded(),
        price: moments.mean().unwrap_or(f64::NAN),
        std_error: moments.std_error(),
        confidence_95: moments.confidence_95(),
        convergence,
    };
    info!(
        paths = estimate.paths,
        price = estimate.price,
        "Simulation complete"
    );
    Ok(estimate)
}

fn format_optional(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.6}", v))
}

/// Prints the convergence table and the final estimate.
pub fn print_estimate(estimate: &Estimate) {
    println!("\n┌──────────────┬──────────────────┐");
    println!("│ Paths        │ Mean             │");
    println!("├──────────────┼──────────────────┤");
    for row in &estimate.convergence {
        println!("│ {:>12} │ {:>16.6} │", row.paths, row.value);
    }
    println!("└──────────────┴──────────────────┘");
    println!("Price:          {:.6}", estimate.price);
    println!("Std error:      {}", format_optional(estimate.std_error));
    println!("95% half-width: {}", format_optional(estimate.confidence_95));
}
