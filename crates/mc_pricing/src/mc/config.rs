//! Simulation configuration.
//!
//! This module provides the configuration type and builder for sequential
//! and parallel simulation runs.

use super::error::ConfigError;

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 100_000_000;

/// Default number of paths evaluated by one parallel task.
pub const DEFAULT_CHUNK_SIZE: usize = 8_192;

/// Default number of chunks evaluated between two gatherer flushes.
pub const DEFAULT_CHUNKS_PER_WAVE: usize = 32;

/// Default seed.
pub const DEFAULT_SEED: u64 = 1;

/// Simulation configuration.
///
/// Immutable configuration specifying run parameters.
/// Use [`SimulationConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use mc_pricing::mc::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .n_paths(100_000)
///     .seed(42)
///     .chunk_size(1_000)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_paths(), 100_000);
/// assert_eq!(config.chunk_size(), 1_000);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Number of simulation paths.
    n_paths: usize,
    /// Seed for the random stream.
    seed: u64,
    /// Paths per parallel task.
    chunk_size: usize,
    /// Tasks per wave.
    chunks_per_wave: usize,
}

impl SimulationConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Returns the number of simulation paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Returns the seed.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the number of paths per parallel task.
    ///
    /// Odd values are rounded up when chunks are formed so antithetic pairs
    /// never straddle two tasks.
    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns the number of tasks evaluated between two gatherer flushes.
    #[inline]
    pub fn chunks_per_wave(&self) -> usize {
        self.chunks_per_wave
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `n_paths` is 0 or greater than 100,000,000
    /// - `chunk_size` is 0
    /// - `chunks_per_wave` is 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_paths == 0 || self.n_paths > MAX_PATHS {
            return Err(ConfigError::InvalidPathCount(self.n_paths));
        }
        if self.chunk_size == 0 {
            return Err(ConfigError::InvalidChunkSize(self.chunk_size));
        }
        if self.chunks_per_wave == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "chunks_per_wave",
                value: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for [`SimulationConfig`].
#[derive(Clone, Debug, Default)]
pub struct SimulationConfigBuilder {
    n_paths: Option<usize>,
    seed: Option<u64>,
    chunk_size: Option<usize>,
    chunks_per_wave: Option<usize>,
}

impl SimulationConfigBuilder {
    /// Sets the number of simulation paths, in [1, 100_000_000].
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the number of paths per parallel task.
    #[inline]
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    /// Sets the number of tasks per wave.
    #[inline]
    pub fn chunks_per_wave(mut self, chunks_per_wave: usize) -> Self {
        self.chunks_per_wave = Some(chunks_per_wave);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `n_paths` is not set or any value is invalid.
    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        let n_paths = self.n_paths.ok_or(ConfigError::InvalidParameter {
            name: "n_paths",
            value: "must be specified".to_string(),
        })?;

        let config = SimulationConfig {
            n_paths,
            seed: self.seed.unwrap_or(DEFAULT_SEED),
            chunk_size: self.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE),
            chunks_per_wave: self.chunks_per_wave.unwrap_or(DEFAULT_CHUNKS_PER_WAVE),
        };

        config.validate()?;
        Ok(config)
    }
}
