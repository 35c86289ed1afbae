//! Run configuration management
//!
//! Settings are layered from an optional TOML file, `MCPRICE_*` environment
//! variables and command-line arguments, in increasing order of precedence.

use std::path::Path;
use std::str::FromStr;

use clap::ValueEnum;
use mc_pricing::mc::{
    SimulationConfig, DEFAULT_CHUNKS_PER_WAVE, DEFAULT_CHUNK_SIZE, DEFAULT_SEED,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix of the environment variables read by [`PricingConfig::load`].
pub const ENV_PREFIX: &str = "MCPRICE";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error(transparent)]
    Simulation(#[from] mc_pricing::mc::ConfigError),
}

/// Log levels accepted in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

/// Underlying uniform generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum GeneratorKind {
    #[default]
    ParkMiller,
    Mersenne,
}

/// Report format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Simulation settings shared by every command.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Default tracing level when `RUST_LOG` is unset
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Number of Monte Carlo paths
    pub paths: usize,
    /// Generator seed
    pub seed: u64,
    /// Uniform generator
    pub generator: GeneratorKind,
    /// Wrap the generator in the antithetic decorator
    pub antithetic: bool,
    /// Use the ordered parallel driver
    pub parallel: bool,
    /// Paths per parallel chunk
    pub chunk_size: usize,
    /// Chunks evaluated per parallel wave
    pub chunks_per_wave: usize,
    /// Report format
    pub format: OutputFormat,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            paths: 100_000,
            seed: DEFAULT_SEED,
            generator: GeneratorKind::ParkMiller,
            antithetic: false,
            parallel: false,
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunks_per_wave: DEFAULT_CHUNKS_PER_WAVE,
            format: OutputFormat::Table,
        }
    }
}

/// Command-line overrides. `None` leaves the lower layers untouched.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub log_level: Option<String>,
    pub paths: Option<usize>,
    pub seed: Option<u64>,
    pub generator: Option<GeneratorKind>,
    pub antithetic: bool,
    pub parallel: bool,
    pub format: Option<OutputFormat>,
}

impl PricingConfig {
    /// Load configuration from an optional file and the environment.
    ///
    /// A missing file is not an error; a malformed one is.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path).required(false));
        }
        let settings = builder
            .add_source(::config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &Overrides) -> Result<(), ConfigError> {
        if let Some(level) = &cli.log_level {
            self.log_level = LogLevel::from_str(level)?;
        }
        if let Some(paths) = cli.paths {
            self.paths = paths;
        }
        if let Some(seed) = cli.seed {
            self.seed = seed;
        }
        if let Some(generator) = cli.generator {
            self.generator = generator;
        }
        if cli.antithetic {
            self.antithetic = true;
        }
        if cli.parallel {
            self.parallel = true;
        }
        if let Some(format) = cli.format {
            self.format = format;
        }
        Ok(())
    }

    /// Engine-level configuration for this run.
    pub fn simulation_config(&self) -> Result<SimulationConfig, ConfigError> {
        Ok(SimulationConfig::builder()
            .n_paths(self.paths)
            .seed(self.seed)
            .chunk_size(self.chunk_size)
            .chunks_per_wave(self.chunks_per_wave)
            .build()?)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.simulation_config().map(|_| ())
    }
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(path: Option<&Path>, cli: &Overrides) -> Result<PricingConfig, ConfigError> {
    let mut config = PricingConfig::load(path)?;
    config.merge_with_cli(cli)?;
    config.validate()?;
    Ok(config)
}
