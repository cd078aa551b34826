//! # smc_core: Particle Population Storage
//!
//! ## Role
//!
//! smc_core holds the per-particle state of a Sequential Monte Carlo sampler
//! and implements the operation that runs once per generation of every
//! particle filter iteration: resampling compaction.
//!
//! - Contiguous storage: [`buffer::StateBuffer`]
//! - Dimension policy: [`dim::Fixed`] and [`dim::Dynamic`]
//! - Row-major population: [`state::RowMajorMatrix`]
//! - Column-major population: [`state::ColMajorMatrix`]
//! - Per-particle views: [`particle::ParticleIndex`], [`particle::ParticleIndexMut`]
//! - Error types: [`error::StateError`]
//!
//! ## Memory Layout
//!
//! Both matrices store `size × dim` values in a single contiguous buffer:
//!
//! ```text
//! row-major:    (i, j) -> i * dim + j
//! column-major: (i, j) -> i + j * size
//! ```
//!
//! The two layouts are never physically interchangeable. Conversion goes
//! through [`state::StateMatrix::read_state_matrix`] with an explicit target
//! [`MatrixLayout`].
//!
//! ## Usage Example
//!
//! ```rust
//! use smc_core::dim::Fixed;
//! use smc_core::state::{RowMajorMatrix, StateMatrix};
//!
//! let mut state = RowMajorMatrix::<f64, Fixed<2>>::new(4);
//! for i in 0..4 {
//!     state.state_unpack(i, &[(i + 1) as f64; 2]).unwrap();
//! }
//!
//! // Rows 1 and 3 die, rows 0 and 2 each leave two offspring
//! state.select(4, Some(&[0, 0, 2, 2])).unwrap();
//!
//! assert_eq!(state.state_pack(1).unwrap(), vec![1.0, 1.0]);
//! assert_eq!(state.state_pack(3).unwrap(), vec![3.0, 3.0]);
//! ```
//!
//! ## Threading
//!
//! Every mutating operation takes `&mut self`; resampling is a
//! synchronisation barrier in the enclosing sampler loop. Parallel
//! per-particle kernels operate on [`state::StateMatrix::data_mut`] (or on
//! row / column slices) strictly between `select` calls.
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for [`MatrixLayout`]

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod buffer;
pub mod dim;
pub mod error;
pub mod layout;
pub mod particle;
pub mod state;

pub use dim::{Dimension, Dynamic, Fixed};
pub use error::StateError;
pub use layout::MatrixLayout;
pub use particle::{ParticleIndex, ParticleIndexMut};
pub use state::{ColMajorMatrix, RowMajorMatrix, StateMatrix, StatePack};
