//! Filter configuration management
//!
//! Handles loading configuration from TOML files and CLI arguments.

use serde::Deserialize;
use smc_core::MatrixLayout;
use smc_random::config::ResampleConfig;
use smc_random::{ConfigError, ResampleScheme};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{CliError, Result};

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(CliError::InvalidArgument(format!(
                "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                s
            ))),
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

/// Particle filter configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Number of particles
    pub particles: usize,
    /// Number of observations in the synthetic track
    pub steps: usize,
    /// Storage layout of the population
    pub layout: MatrixLayout,
    /// Resampling scheme
    pub scheme: ResampleScheme,
    /// Resample when ESS falls below this fraction of the population
    pub threshold: f64,
    /// Master seed for the track and the filter
    pub seed: u64,
    /// Log level
    pub log_level: LogLevel,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            particles: 1000,
            steps: 100,
            layout: MatrixLayout::RowMajor,
            scheme: ResampleScheme::Stratified,
            threshold: 0.5,
            seed: 101,
            log_level: LogLevel::Info,
        }
    }
}

impl FilterConfig {
    /// Create a new FilterConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CliError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content)?;
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: FilterConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.particles == 0 {
            return Err(ConfigError::InvalidParticleCount(self.particles));
        }
        if self.steps == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "steps",
                value: "must be at least 1".to_string(),
            });
        }
        self.resample_config().map(|_| ())
    }

    /// Resampling configuration derived from this filter configuration
    pub fn resample_config(&self) -> std::result::Result<ResampleConfig, ConfigError> {
        ResampleConfig::builder()
            .scheme(self.scheme)
            .threshold(self.threshold)
            .seed(self.seed)
            .build()
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) {
        if let Some(particles) = cli.particles {
            self.particles = particles;
        }
        if let Some(steps) = cli.steps {
            self.steps = steps;
        }
        if let Some(layout) = cli.layout {
            self.layout = layout;
        }
        if let Some(scheme) = cli.scheme {
            self.scheme = scheme;
        }
        if let Some(threshold) = cli.threshold {
            self.threshold = threshold;
        }
        if let Some(seed) = cli.seed {
            self.seed = seed;
        }
        if let Some(log_level) = cli.log_level {
            self.log_level = log_level;
        }
    }
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Particle count override
    pub particles: Option<usize>,
    /// Step count override
    pub steps: Option<usize>,
    /// Layout override
    pub layout: Option<MatrixLayout>,
    /// Scheme override
    pub scheme: Option<ResampleScheme>,
    /// ESS threshold override
    pub threshold: Option<f64>,
    /// Seed override
    pub seed: Option<u64>,
    /// Log level override
    pub log_level: Option<LogLevel>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Config file
/// 3. Default values
pub fn build_config(cli: &CliArgs) -> Result<FilterConfig> {
    let mut config = match &cli.config_file {
        Some(path) => FilterConfig::from_file(path)?,
        None => FilterConfig::default(),
    };
    config.merge_with_cli(cli);
    config.validate()?;
    Ok(config)
}
