//! Importance weights of a particle population.
//!
//! Weights are accumulated on the log scale and normalised with the
//! log-sum-exp shift, so likelihoods far below `f64::MIN_POSITIVE` still
//! produce usable normalised weights.

use crate::error::ResampleError;

/// Normalised importance weights with their log-scale accumulator.
///
/// # Examples
///
/// ```rust
/// use smc_random::weights::Weights;
///
/// let mut weights = Weights::new(4);
/// assert_eq!(weights.ess(), 4.0);
///
/// weights.add_log(&[0.0, -1000.0, -1000.0, -1000.0]).unwrap();
/// assert!(weights.data()[0] > 0.999);
/// assert!(weights.ess() < 1.01);
///
/// weights.reset();
/// assert_eq!(weights.data(), &[0.25; 4]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Weights {
    /// Unnormalised log weights, shifted so the maximum is zero.
    log_w: Vec<f64>,
    /// Normalised weights, summing to one.
    w: Vec<f64>,
}

impl Weights {
    /// Uniform weights for `n` particles.
    pub fn new(n: usize) -> Self {
        let mut weights = Self {
            log_w: Vec::new(),
            w: Vec::new(),
        };
        weights.resize(n);
        weights
    }

    /// Number of particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.w.len()
    }

    /// Whether there are no particles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w.is_empty()
    }

    /// Changes the number of particles and resets to uniform.
    pub fn resize(&mut self, n: usize) {
        self.log_w.resize(n, 0.0);
        self.w.resize(n, 0.0);
        self.reset();
    }

    /// Resets to uniform weights, as after resampling.
    pub fn reset(&mut self) {
        self.log_w.fill(0.0);
        let uniform = 1.0 / self.w.len().max(1) as f64;
        self.w.fill(uniform);
    }

    /// Normalised weights.
    #[inline]
    pub fn data(&self) -> &[f64] {
        &self.w
    }

    /// Log weights, shifted so the largest is zero.
    #[inline]
    pub fn log_data(&self) -> &[f64] {
        &self.log_w
    }

    /// Multiplies each weight by `exp(incremental[k])` and renormalises.
    ///
    /// # Errors
    ///
    /// - [`ResampleError::LengthMismatch`] if `incremental.len() != len()`
    /// - [`ResampleError::InvalidWeight`] if a resulting log weight is NaN
    ///   or `+inf`
    /// - [`ResampleError::ZeroTotalWeight`] if every weight becomes zero
    ///
    /// Weights are unchanged on error.
    pub fn add_log(&mut self, incremental: &[f64]) -> Result<(), ResampleError> {
        if incremental.len() != self.len() {
            return Err(ResampleError::LengthMismatch {
                expected: self.len(),
                actual: incremental.len(),
            });
        }
        if self.is_empty() {
            return Ok(());
        }
        if let Some((index, &value)) = incremental
            .iter()
            .enumerate()
            .find(|&(_, &v)| v.is_nan() || v == f64::INFINITY)
        {
            return Err(ResampleError::InvalidWeight { index, value });
        }

        let max = self
            .log_w
            .iter()
            .zip(incremental)
            .map(|(a, b)| a + b)
            .fold(f64::NEG_INFINITY, f64::max);
        if max == f64::NEG_INFINITY {
            return Err(ResampleError::ZeroTotalWeight);
        }

        for (lw, inc) in self.log_w.iter_mut().zip(incremental) {
            *lw += inc - max;
        }
        self.normalise_from_log();
        Ok(())
    }

    /// Replaces the weights by `exp(log_weights)`, normalised.
    ///
    /// # Errors
    ///
    /// As for [`add_log`](Self::add_log).
    pub fn set_log(&mut self, log_weights: &[f64]) -> Result<(), ResampleError> {
        if log_weights.len() != self.len() {
            return Err(ResampleError::LengthMismatch {
                expected: self.len(),
                actual: log_weights.len(),
            });
        }
        let saved = std::mem::take(&mut self.log_w);
        self.log_w = vec![0.0; saved.len()];
        let result = self.add_log(log_weights);
        if result.is_err() {
            self.log_w = saved;
        }
        result
    }

    fn normalise_from_log(&mut self) {
        for (w, &lw) in self.w.iter_mut().zip(&self.log_w) {
            *w = lw.exp();
        }
        // The maximum term is exp(0) = 1, so the sum is at least one.
        let sum: f64 = self.w.iter().sum();
        for w in &mut self.w {
            *w /= sum;
        }
    }

    /// Effective sample size, `1 / Σ w²`.
    ///
    /// Equals `len()` for uniform weights and 1 when one particle carries
    /// all the mass. Zero for an empty population.
    pub fn ess(&self) -> f64 {
        if self.w.is_empty() {
            return 0.0;
        }
        1.0 / self.w.iter().map(|w| w * w).sum::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_uniform_start() {
        let weights = Weights::new(5);
        assert_eq!(weights.len(), 5);
        assert_relative_eq!(weights.data().iter().sum::<f64>(), 1.0);
        assert_relative_eq!(weights.ess(), 5.0, epsilon = 1e-12);
        assert_eq!(Weights::new(0).ess(), 0.0);
    }

    #[test]
    fn test_add_log_accumulates() {
        let mut weights = Weights::new(2);
        weights.add_log(&[0.0, 2.0_f64.ln()]).unwrap();
        weights.add_log(&[0.0, 2.0_f64.ln()]).unwrap();
        assert_relative_eq!(weights.data()[0], 0.2, epsilon = 1e-12);
        assert_relative_eq!(weights.data()[1], 0.8, epsilon = 1e-12);
        assert_relative_eq!(weights.ess(), 1.0 / 0.68, epsilon = 1e-12);
    }

    #[test]
    fn test_extreme_log_weights_are_stable() {
        let mut weights = Weights::new(3);
        weights.add_log(&[-5000.0, -5001.0, f64::NEG_INFINITY]).unwrap();
        let e = (-1.0_f64).exp();
        assert_relative_eq!(weights.data()[0], 1.0 / (1.0 + e), epsilon = 1e-12);
        assert_eq!(weights.data()[2], 0.0);
        assert_eq!(weights.log_data()[0], 0.0);
    }

    #[test]
    fn test_errors_leave_weights_unchanged() {
        let mut weights = Weights::new(2);
        weights.add_log(&[0.0, 1.0]).unwrap();
        let before = weights.clone();

        assert_eq!(
            weights.add_log(&[0.0]),
            Err(ResampleError::LengthMismatch {
                expected: 2,
                actual: 1
            })
        );
        assert!(matches!(
            weights.add_log(&[f64::NAN, 0.0]),
            Err(ResampleError::InvalidWeight { index: 0, .. })
        ));
        assert_eq!(
            weights.add_log(&[f64::NEG_INFINITY; 2]),
            Err(ResampleError::ZeroTotalWeight)
        );
        assert_eq!(
            weights.set_log(&[f64::NEG_INFINITY; 2]),
            Err(ResampleError::ZeroTotalWeight)
        );
        assert_eq!(weights, before);
    }

    #[test]
    fn test_set_log_replaces() {
        let mut weights = Weights::new(2);
        weights.add_log(&[0.0, 10.0]).unwrap();
        weights.set_log(&[1.0, 1.0]).unwrap();
        assert_relative_eq!(weights.data()[0], 0.5);
    }

    #[test]
    fn test_resize_resets() {
        let mut weights = Weights::new(2);
        weights.add_log(&[0.0, 3.0]).unwrap();
        weights.resize(4);
        assert_eq!(weights.data(), &[0.25; 4]);
        assert_eq!(weights.log_data(), &[0.0; 4]);
    }
}
