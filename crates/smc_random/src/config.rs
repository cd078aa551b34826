//! Resampling configuration.
//!
//! This module provides [`ResampleConfig`] and its builder, which fix the
//! resampling scheme, the effective sample size trigger and the seed of a
//! sampler run.

pub use crate::error::ConfigError;
use crate::resample::ResampleScheme;

/// Default ESS threshold, as a fraction of the population size.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Resampling configuration.
///
/// Immutable once built. Use [`ResampleConfigBuilder`] to construct
/// instances.
///
/// # Examples
///
/// ```rust
/// use smc_random::config::ResampleConfig;
/// use smc_random::resample::ResampleScheme;
///
/// let config = ResampleConfig::builder()
///     .scheme(ResampleScheme::Residual)
///     .threshold(0.8)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.scheme(), ResampleScheme::Residual);
/// assert_eq!(config.seed(), Some(42));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResampleConfig {
    /// Resampling algorithm.
    scheme: ResampleScheme,
    /// Resample when ESS < threshold × population size.
    threshold: f64,
    /// Optional seed for reproducibility.
    seed: Option<u64>,
}

impl Default for ResampleConfig {
    fn default() -> Self {
        Self {
            scheme: ResampleScheme::default(),
            threshold: DEFAULT_THRESHOLD,
            seed: None,
        }
    }
}

impl ResampleConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> ResampleConfigBuilder {
        ResampleConfigBuilder::default()
    }

    /// Returns the resampling scheme.
    #[inline]
    pub fn scheme(&self) -> ResampleScheme {
        self.scheme
    }

    /// Returns the ESS threshold fraction.
    #[inline]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Returns the optional seed.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidThreshold`] unless the threshold lies
    /// in (0, 1].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.threshold > 0.0 && self.threshold <= 1.0) {
            return Err(ConfigError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }
}

/// Builder for [`ResampleConfig`].
#[derive(Clone, Debug, Default)]
pub struct ResampleConfigBuilder {
    scheme: ResampleScheme,
    threshold: Option<f64>,
    seed: Option<u64>,
}

impl ResampleConfigBuilder {
    /// Sets the resampling scheme.
    #[inline]
    pub fn scheme(mut self, scheme: ResampleScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Sets the ESS threshold fraction.
    ///
    /// # Arguments
    ///
    /// * `threshold` - Fraction in (0, 1]; 1 resamples at every step
    #[inline]
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if validation fails.
    pub fn build(self) -> Result<ResampleConfig, ConfigError> {
        let config = ResampleConfig {
            scheme: self.scheme,
            threshold: self.threshold.unwrap_or(DEFAULT_THRESHOLD),
            seed: self.seed,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = ResampleConfig::builder().build().unwrap();
        assert_eq!(config, ResampleConfig::default());
        assert_eq!(config.scheme(), ResampleScheme::Stratified);
        assert_eq!(config.threshold(), 0.5);
        assert_eq!(config.seed(), None);
    }

    #[test]
    fn test_threshold_bounds() {
        assert!(ResampleConfig::builder().threshold(1.0).build().is_ok());
        assert_eq!(
            ResampleConfig::builder().threshold(0.0).build(),
            Err(ConfigError::InvalidThreshold(0.0))
        );
        assert!(ResampleConfig::builder().threshold(1.01).build().is_err());
        assert!(ResampleConfig::builder().threshold(f64::NAN).build().is_err());
    }
}
