//! Error types for random number generation and resampling.
//!
//! This module defines structured error types for distribution parameters,
//! resampling inputs and configuration validation.

use thiserror::Error;

/// Invalid parameter supplied to a distribution constructor.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum DistributionError {
    /// Parameter outside its domain.
    #[error("Invalid distribution parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
}

/// Error raised while turning weights into a resampling index.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ResampleError {
    /// No weights were supplied.
    #[error("Cannot resample from an empty weight vector")]
    EmptyWeights,

    /// A weight is negative, infinite or NaN.
    #[error("Invalid weight {value} at index {index}")]
    InvalidWeight {
        /// Position of the weight.
        index: usize,
        /// Offending value.
        value: f64,
    },

    /// Every weight is zero.
    #[error("Total weight is zero")]
    ZeroTotalWeight,

    /// Replication counts do not add up to the requested sample size.
    #[error("Replication counts sum to {actual}, expected {expected}")]
    ReplicationMismatch {
        /// Requested sample size.
        expected: usize,
        /// Sum of the supplied counts.
        actual: usize,
    },

    /// Incremental weights of the wrong length.
    #[error("Weight length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Current number of weights.
        expected: usize,
        /// Length of the supplied slice.
        actual: usize,
    },
}

/// Configuration error for resampling and sampler setup.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// ESS threshold outside (0, 1].
    #[error("Invalid ESS threshold {0}: must be in range (0, 1]")]
    InvalidThreshold(f64),

    /// Population of zero particles.
    #[error("Invalid particle count {0}: must be at least 1")]
    InvalidParticleCount(usize),

    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
}
