//! Error types for the simulation engine.
//!
//! This module defines structured error types for configuration validation
//! and for the product/generator contracts checked at engine construction.

use std::fmt;

use thiserror::Error;

use crate::products::{validate_times, ProductError};

/// Configuration error for simulation runs.
///
/// These errors occur during construction when invalid parameters are provided.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Path count outside valid range [1, 100_000_000].
    InvalidPathCount(usize),
    /// Chunk size of zero.
    InvalidChunkSize(usize),
    /// Invalid parameter value with name and description.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPathCount(count) => {
                write!(
                    f,
                    "Invalid path count {}: must be in range [1, 100_000_000]",
                    count
                )
            }
            Self::InvalidChunkSize(size) => {
                write!(f, "Invalid chunk size {}: must be at least 1", size)
            }
            Self::InvalidParameter { name, value } => {
                write!(f, "Invalid parameter '{}': {}", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Engine and path generator construction errors.
///
/// Each variant is a broken contract between a product, a path generator and
/// the engine, detected before any path is simulated.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum EngineError {
    /// `possible_cash_flow_times().len() != max_number_of_cash_flows()`.
    #[error("Product declares {declared} cash flows but {actual} cash-flow times")]
    CashFlowTimesMismatch {
        /// `max_number_of_cash_flows()`
        declared: usize,
        /// Length of `possible_cash_flow_times()`
        actual: usize,
    },

    /// Product has no observation times.
    #[error("Product has no observation times")]
    EmptyObservationTimes,

    /// Observation times are not strictly increasing and positive.
    #[error("Observation time {index} at t = {time} is not strictly increasing and positive")]
    NonIncreasingTimes {
        /// Position of the offending time
        index: usize,
        /// The offending time
        time: f64,
    },

    /// Path generator dimension differs from the product's observation count.
    #[error("Path generator produces {actual} spots but product observes {expected} times")]
    DimensionMismatch {
        /// Number of look-at times
        expected: usize,
        /// Generator dimension
        actual: usize,
    },

    /// Initial spot is not positive.
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot
        spot: f64,
    },
}

/// Look-at time validation with the product error mapped into the engine's.
pub(crate) fn check_observation_times(times: &[f64]) -> Result<(), EngineError> {
    validate_times(times).map_err(|err| match err {
        ProductError::InvalidObservationTime { index, time } => {
            EngineError::NonIncreasingTimes { index, time }
        }
        _ => EngineError::EmptyObservationTimes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidPathCount(0);
        assert!(err.to_string().contains("Invalid path count 0"));

        let err = ConfigError::InvalidChunkSize(0);
        assert!(err.to_string().contains("Invalid chunk size 0"));

        let err = ConfigError::InvalidParameter {
            name: "chunks_per_wave",
            value: "must be at least 1".to_string(),
        };
        assert!(err.to_string().contains("chunks_per_wave"));
    }

    #[test]
    fn test_engine_error_display() {
        let err = EngineError::CashFlowTimesMismatch {
            declared: 2,
            actual: 1,
        };
        assert_eq!(
            err.to_string(),
            "Product declares 2 cash flows but 1 cash-flow times"
        );
    }

    #[test]
    fn test_check_observation_times() {
        assert_eq!(
            check_observation_times(&[]),
            Err(EngineError::EmptyObservationTimes)
        );
        assert_eq!(
            check_observation_times(&[1.0, 0.5]),
            Err(EngineError::NonIncreasingTimes { index: 1, time: 0.5 })
        );
        assert!(check_observation_times(&[0.5, 1.0]).is_ok());
    }

    #[test]
    fn test_observation_times_agree_with_product_validation() {
        let cases: [&[f64]; 5] = [&[], &[0.0], &[0.5, f64::NAN], &[1.0, 2.0, 2.0], &[0.25, 0.5]];
        for times in cases {
            match (validate_times(times), check_observation_times(times)) {
                (Ok(()), Ok(())) => {}
                (Err(ProductError::EmptyObservationTimes), Err(EngineError::EmptyObservationTimes)) => {}
                (
                    Err(ProductError::InvalidObservationTime { index, .. }),
                    Err(EngineError::NonIncreasingTimes { index: engine_index, .. }),
                ) => assert_eq!(index, engine_index),
                (product, engine) => panic!("{:?}: {:?} vs {:?}", times, product, engine),
            }
        }
        assert!(matches!(
            check_observation_times(&[0.5, f64::INFINITY]),
            Err(EngineError::NonIncreasingTimes { index: 1, .. })
        ));
    }
}
