//! Dimension policy for state matrices.
//!
//! A population carries either a compile-time dimension ([`Fixed`]) or a
//! run-time one ([`Dynamic`]). Every algorithm in [`crate::state`] is written
//! against [`Dimension::get`], so the same code serves both.
//!
//! Operations that change the dimension (`with_dim`, `resize_with_dim`,
//! `resize_dim`) are only implemented for matrices parameterised by
//! [`Dynamic`]. Calling them on a fixed-dimension matrix does not compile:
//!
//! ```compile_fail
//! use smc_core::dim::Fixed;
//! use smc_core::state::RowMajorMatrix;
//!
//! let mut state = RowMajorMatrix::<f64, Fixed<3>>::new(10);
//! state.resize_dim(4);
//! ```

use std::fmt::Debug;

/// Dimension descriptor attached to a population.
pub trait Dimension: Copy + Default + Debug + PartialEq + Eq + Send + Sync + 'static {
    /// The dimension when known at compile time.
    const FIXED: Option<usize>;

    /// Current dimension.
    fn get(&self) -> usize;
}

/// Compile-time constant dimension.
///
/// # Examples
///
/// ```rust
/// use smc_core::dim::{Dimension, Fixed};
///
/// assert_eq!(Fixed::<4>.get(), 4);
/// assert_eq!(Fixed::<4>::FIXED, Some(4));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Fixed<const D: usize>;

impl<const D: usize> Dimension for Fixed<D> {
    const FIXED: Option<usize> = Some(D);

    #[inline]
    fn get(&self) -> usize {
        D
    }
}

/// Run-time dimension stored per instance, zero by default.
///
/// # Examples
///
/// ```rust
/// use smc_core::dim::{Dimension, Dynamic};
///
/// let mut d = Dynamic::default();
/// assert_eq!(d.get(), 0);
/// d.set(3);
/// assert_eq!(d.get(), 3);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Dynamic(usize);

impl Dynamic {
    /// Creates a dynamic dimension with the given value.
    #[inline]
    pub fn new(dim: usize) -> Self {
        Self(dim)
    }

    /// Changes the stored dimension.
    #[inline]
    pub fn set(&mut self, dim: usize) {
        self.0 = dim;
    }
}

impl Dimension for Dynamic {
    const FIXED: Option<usize> = None;

    #[inline]
    fn get(&self) -> usize {
        self.0
    }
}
