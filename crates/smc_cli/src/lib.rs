//! SMC command-line library
//!
//! Backs the `smc` binary: configuration loading, the constant-velocity
//! tracking model and the command implementations.
//!
//! # Commands
//!
//! - `smc filter` - Run a particle filter over a synthetic track
//! - `smc check` - Validate and print the active configuration

pub mod commands;
pub mod config;
pub mod error;
pub mod model;

pub use error::{CliError, Result};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
