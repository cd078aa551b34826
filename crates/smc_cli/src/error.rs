//! CLI error types

use std::path::PathBuf;

use smc_core::StateError;
use smc_random::{ConfigError, DistributionError, ResampleError};
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors raised by the `smc` commands
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read config file {path}: {source}")]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("State error: {0}")]
    State(#[from] StateError),

    #[error("Resampling error: {0}")]
    Resample(#[from] ResampleError),

    #[error("Distribution error: {0}")]
    Distribution(#[from] DistributionError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
