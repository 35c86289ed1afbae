//! mcprice - Command Line Monte Carlo Pricer
//!
//! Prices European and Asian options by simulation under Black-Scholes
//! dynamics and checks the result against closed forms.
//!
//! # Commands
//!
//! - `mcprice price` - Simulate one product and print its convergence table
//! - `mcprice parity` - Check put-call parity on identical streams
//!
//! # Configuration
//!
//! Simulation settings are read from `mcprice.toml` (if present), then from
//! `MCPRICE_*` environment variables, then from command-line flags. `RUST_LOG`
//! overrides the configured log level.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use commands::parity::ParityArgs;
use commands::price::PriceArgs;
use crate::config::{LogLevel, PricingConfig};

/// Monte Carlo exotic option pricer
#[derive(Parser)]
#[command(name = "mcprice")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "mcprice.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a European or Asian option by simulation
    Price(PriceArgs),

    /// Check put-call parity on identical streams
    Parity(ParityArgs),
}

impl Cli {
    fn overrides(&self) -> crate::config::Overrides {
        let log_level = self
            .log_level
            .clone()
            .or_else(|| self.verbose.then(|| "debug".to_string()));
        let run = match &self.command {
            Commands::Price(args) => &args.run,
            Commands::Parity(args) => &args.run,
        };
        run.overrides(log_level)
    }
}

fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config: PricingConfig = crate::config::build_config(Some(&cli.config), &cli.overrides())?;
    init_tracing(config.log_level);
    debug!(?config, "Configuration loaded");

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match &cli.command {
        Commands::Price(args) => commands::price::run(args, &config),
        Commands::Parity(args) => commands::parity::run(args, &config),
    }
}
