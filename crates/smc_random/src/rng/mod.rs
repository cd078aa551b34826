//! # Random Number Generation
//!
//! Random number facilities for particle samplers: a seeded generator with
//! single-draw and batch output, standard uniforms with explicit endpoint
//! conventions, and the continuous distributions used by move kernels.
//!
//! ## Module Structure
//!
//! - [`prng`]: Seeded generator with stream splitting
//! - [`u01`]: Unit-interval conversions
//! - [`distribution`]: Normal, exponential and Laplace distributions
//!
//! ## Usage Example
//!
//! ```rust
//! use smc_random::rng::{Laplace, SmcRng};
//!
//! let mut rng = SmcRng::from_seed(12345);
//!
//! // Per-worker streams for parallel move kernels
//! let mut worker = rng.split(3);
//!
//! let mut buffer = vec![0.0; 1000];
//! worker.fill_with(&Laplace::new(0.0, 1.0).unwrap(), &mut buffer);
//! rng.fill_normal(&mut buffer);
//! ```

pub mod distribution;
pub mod prng;
pub mod u01;

pub use distribution::{Exponential, Laplace, Normal};
pub use prng::SmcRng;
pub use u01::U01Interval;
