//! Continuous distributions used by particle move kernels.
//!
//! Parameters are checked once, when the distribution is built; sampling is
//! then infallible. Each type implements [`rand_distr::Distribution`], so it
//! works with [`SmcRng`](super::SmcRng) and any other `rand` generator.

use rand::Rng;
use rand_distr::Distribution;

use super::u01::U01Interval;
use crate::error::DistributionError;

fn require(name: &'static str, value: f64, ok: bool) -> Result<(), DistributionError> {
    if ok {
        Ok(())
    } else {
        Err(DistributionError::InvalidParameter { name, value })
    }
}

/// Normal distribution N(mean, sd²).
///
/// # Examples
///
/// ```rust
/// use smc_random::rng::{Normal, SmcRng};
/// use rand_distr::Distribution;
///
/// let mut rng = SmcRng::from_seed(3);
/// let noise = Normal::new(0.0, 0.02_f64.sqrt()).unwrap();
/// let x = noise.sample(&mut rng);
/// assert!(x.is_finite());
///
/// assert!(Normal::new(0.0, -1.0).is_err());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Normal {
    mean: f64,
    sd: f64,
    inner: rand_distr::Normal<f64>,
}

impl Normal {
    /// Builds N(mean, sd²).
    ///
    /// # Errors
    ///
    /// [`DistributionError::InvalidParameter`] if `mean` is not finite or
    /// `sd` is negative or not finite.
    pub fn new(mean: f64, sd: f64) -> Result<Self, DistributionError> {
        require("mean", mean, mean.is_finite())?;
        require("sd", sd, sd.is_finite() && sd >= 0.0)?;
        let inner = rand_distr::Normal::new(mean, sd)
            .map_err(|_| DistributionError::InvalidParameter { name: "sd", value: sd })?;
        Ok(Self { mean, sd, inner })
    }

    /// Mean.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Standard deviation.
    pub fn sd(&self) -> f64 {
        self.sd
    }
}

impl Distribution<f64> for Normal {
    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.inner.sample(rng)
    }
}

/// Exponential distribution with rate `lambda`.
///
/// Sampled by inversion, `-ln(U) / lambda` with `U` on `(0, 1]`, so the
/// logarithm is always finite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Exponential {
    lambda: f64,
}

impl Exponential {
    /// Builds an exponential distribution.
    ///
    /// # Errors
    ///
    /// [`DistributionError::InvalidParameter`] unless `lambda` is positive
    /// and finite.
    pub fn new(lambda: f64) -> Result<Self, DistributionError> {
        require("lambda", lambda, lambda.is_finite() && lambda > 0.0)?;
        Ok(Self { lambda })
    }

    /// Rate parameter.
    pub fn lambda(&self) -> f64 {
        self.lambda
    }
}

impl Distribution<f64> for Exponential {
    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        -U01Interval::OpenClosed.sample(rng).ln() / self.lambda
    }
}

/// Laplace distribution with location `a` and scale `b`.
///
/// # Examples
///
/// ```rust
/// use smc_random::rng::Laplace;
///
/// let laplace = Laplace::new(1.0, 2.0).unwrap();
/// assert_eq!(laplace.location(), 1.0);
/// assert!(Laplace::new(0.0, 0.0).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Laplace {
    a: f64,
    b: f64,
}

impl Laplace {
    /// Builds a Laplace distribution.
    ///
    /// # Errors
    ///
    /// [`DistributionError::InvalidParameter`] if `a` is not finite or `b`
    /// is not positive and finite.
    pub fn new(a: f64, b: f64) -> Result<Self, DistributionError> {
        require("location", a, a.is_finite())?;
        require("scale", b, b.is_finite() && b > 0.0)?;
        Ok(Self { a, b })
    }

    /// Location parameter.
    pub fn location(&self) -> f64 {
        self.a
    }

    /// Scale parameter.
    pub fn scale(&self) -> f64 {
        self.b
    }

    /// Inverse CDF applied to one open-interval uniform.
    #[inline]
    fn transform(&self, u: f64) -> f64 {
        let u = u - 0.5;
        if u > 0.0 {
            self.a - self.b * (1.0 - 2.0 * u).ln()
        } else {
            self.a + self.b * (1.0 + 2.0 * u).ln()
        }
    }
}

impl Distribution<f64> for Laplace {
    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.transform(U01Interval::Open.sample(rng))
    }
}
