//! # smc_random: Randomness and Resampling for Particle Samplers
//!
//! ## Role
//!
//! smc_random supplies everything a particle sampler draws at random and
//! the resampling step that feeds `smc_core`'s in-place compaction:
//!
//! - Seeded generator with batch output: [`rng::SmcRng`]
//! - Move-kernel distributions: [`rng::Normal`], [`rng::Exponential`], [`rng::Laplace`]
//! - Importance weights and ESS: [`weights::Weights`]
//! - Resampling schemes and index layout: [`resample`]
//! - Configuration: [`config::ResampleConfig`]
//! - Error types: [`error`]
//!
//! ## Usage Example
//!
//! ```rust
//! use smc_random::config::ResampleConfig;
//! use smc_random::resample::{ResampleScheme, Resampler};
//! use smc_random::rng::SmcRng;
//! use smc_random::weights::Weights;
//!
//! let config = ResampleConfig::builder()
//!     .scheme(ResampleScheme::Systematic)
//!     .threshold(0.5)
//!     .seed(7)
//!     .build()
//!     .unwrap();
//!
//! let mut rng = SmcRng::from_seed(config.seed().unwrap_or(0));
//! let mut resampler = Resampler::from_config(&config);
//! let mut weights = Weights::new(4);
//!
//! weights.add_log(&[0.0, -50.0, -50.0, -50.0]).unwrap();
//! let index = resampler.resample_if_degenerate(&mut weights, &mut rng).unwrap();
//! assert_eq!(index, Some(vec![0, 0, 0, 0]));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for [`resample::ResampleScheme`] and
//!   [`config::ResampleConfig`]

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod error;
pub mod resample;
pub mod rng;
pub mod weights;

pub use config::ResampleConfig;
pub use error::{ConfigError, DistributionError, ResampleError};
pub use resample::{ResampleScheme, Resampler};
pub use rng::SmcRng;
pub use weights::Weights;
