//! CLI error type.

use mc_core::analytical::AnalyticalError;
use mc_pricing::mc::EngineError;
use mc_pricing::products::ProductError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `mcprice` commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or failed validation.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Product construction failed.
    #[error("Product error: {0}")]
    Product(#[from] ProductError),

    /// Engine construction failed.
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Closed-form reference could not be evaluated.
    #[error("Closed-form error: {0}")]
    Analytical(#[from] AnalyticalError),

    /// Report serialisation failed.
    #[error("Serialisation error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
