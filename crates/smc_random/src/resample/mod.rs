//! # Resampling
//!
//! Resampling turns the importance weights of a population into a parent
//! index for the state matrix `select` operation. It runs in two steps:
//!
//! 1. A [`ResampleScheme`] draws replication counts summing to the output size.
//! 2. [`replication_to_index`] lays those counts out so that every surviving
//!    particle keeps its own slot, which lets `select` compact in place.
//!
//! [`Resampler`] owns the scheme, the ESS trigger and the scratch buffers,
//! and runs both steps.
//!
//! ## Usage Example
//!
//! ```rust
//! use smc_random::resample::{is_compaction_safe, ResampleScheme, Resampler};
//! use smc_random::rng::SmcRng;
//!
//! let mut rng = SmcRng::from_seed(42);
//! let mut resampler = Resampler::new(ResampleScheme::Systematic);
//!
//! let weights = [0.1, 0.0, 0.6, 0.3];
//! let index = resampler.index(&weights, 4, &mut rng).unwrap();
//! assert_eq!(index.len(), 4);
//! assert!(is_compaction_safe(&index, 4));
//! assert!(!index.contains(&1));
//! ```

mod index;
mod scheme;

pub use index::{is_compaction_safe, replication_to_index};
pub use scheme::{ParseSchemeError, ResampleScheme};

use tracing::debug;

use crate::config::{ResampleConfig, DEFAULT_THRESHOLD};
use crate::error::ResampleError;
use crate::rng::SmcRng;
use crate::weights::Weights;
use scheme::Scratch;

/// Resampling driver.
#[derive(Clone, Debug)]
pub struct Resampler {
    scheme: ResampleScheme,
    threshold: f64,
    scratch: Scratch,
    normalised: Vec<f64>,
}

impl Resampler {
    /// Resampler for `scheme` with the default ESS threshold of one half.
    pub fn new(scheme: ResampleScheme) -> Self {
        Self {
            scheme,
            threshold: DEFAULT_THRESHOLD,
            scratch: Scratch::default(),
            normalised: Vec::new(),
        }
    }

    /// Resampler following a validated configuration.
    pub fn from_config(config: &ResampleConfig) -> Self {
        Self {
            scheme: config.scheme(),
            threshold: config.threshold(),
            scratch: Scratch::default(),
            normalised: Vec::new(),
        }
    }

    /// Resampling scheme.
    #[inline]
    pub fn scheme(&self) -> ResampleScheme {
        self.scheme
    }

    /// ESS threshold as a fraction of the population size.
    #[inline]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Draws replication counts summing to `n_out` from `weights`.
    ///
    /// The weights must be non-negative and finite; they need not sum to one.
    ///
    /// # Errors
    ///
    /// - [`ResampleError::EmptyWeights`] if `weights` is empty
    /// - [`ResampleError::InvalidWeight`] for a negative or non-finite weight
    /// - [`ResampleError::ZeroTotalWeight`] if every weight is zero
    pub fn replication(
        &mut self,
        weights: &[f64],
        n_out: usize,
        rng: &mut SmcRng,
    ) -> Result<Vec<usize>, ResampleError> {
        self.normalise(weights)?;
        let mut replication = vec![0; weights.len()];
        scheme::replicate(
            self.scheme,
            &self.normalised,
            n_out,
            rng,
            &mut self.scratch,
            &mut replication,
        );
        debug_assert_eq!(replication.iter().sum::<usize>(), n_out);
        Ok(replication)
    }

    /// Draws a parent index of length `n_out` that `select` can apply in
    /// place to a population of `weights.len()` particles.
    ///
    /// # Errors
    ///
    /// As for [`replication`](Self::replication).
    pub fn index(
        &mut self,
        weights: &[f64],
        n_out: usize,
        rng: &mut SmcRng,
    ) -> Result<Vec<usize>, ResampleError> {
        let replication = self.replication(weights, n_out, rng)?;
        let index = replication_to_index(&replication, n_out)?;
        debug_assert!(is_compaction_safe(&index, weights.len()));
        Ok(index)
    }

    /// Resamples when the effective sample size drops below the threshold.
    ///
    /// Returns the parent index (same population size) and resets `weights`
    /// to uniform, or `None` when the population is still balanced.
    ///
    /// # Errors
    ///
    /// As for [`replication`](Self::replication).
    pub fn resample_if_degenerate(
        &mut self,
        weights: &mut Weights,
        rng: &mut SmcRng,
    ) -> Result<Option<Vec<usize>>, ResampleError> {
        let n = weights.len();
        let ess = weights.ess();
        if n == 0 || ess >= self.threshold * n as f64 {
            return Ok(None);
        }

        let index = self.index(weights.data(), n, rng)?;
        debug!(
            scheme = %self.scheme,
            ess,
            size = n,
            "resampling triggered"
        );
        weights.reset();
        Ok(Some(index))
    }

    fn normalise(&mut self, weights: &[f64]) -> Result<(), ResampleError> {
        if weights.is_empty() {
            return Err(ResampleError::EmptyWeights);
        }
        if let Some((index, &value)) = weights
            .iter()
            .enumerate()
            .find(|&(_, &w)| !w.is_finite() || w < 0.0)
        {
            return Err(ResampleError::InvalidWeight { index, value });
        }
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return Err(ResampleError::ZeroTotalWeight);
        }

        self.normalised.clear();
        self.normalised.extend(weights.iter().map(|w| w / total));
        Ok(())
    }
}
