//! Per-particle handles into a state matrix.
//!
//! A handle binds a particle id to a borrowed [`StateMatrix`]. It is built
//! fresh for each access (typically inside a per-particle move or weight
//! kernel) and never stored, so the borrow checker guarantees no handle
//! outlives a `select`.

use crate::error::StateError;
use crate::state::{check_column, check_pack, check_row, StateMatrix, StatePack};

/// Read-only view of one particle.
///
/// # Examples
///
/// ```rust
/// use smc_core::dim::Fixed;
/// use smc_core::state::{RowMajorMatrix, StateMatrix};
///
/// let mut state = RowMajorMatrix::<f64, Fixed<2>>::new(3);
/// state.state_unpack(1, &[4.0, 5.0]).unwrap();
///
/// let p = state.particle(1).unwrap();
/// assert_eq!(p.at(1).unwrap(), 5.0);
/// assert!(p.at(2).is_err());
/// ```
#[derive(Debug)]
pub struct ParticleIndex<'a, M: StateMatrix> {
    id: usize,
    state: &'a M,
}

impl<'a, M: StateMatrix> Clone for ParticleIndex<'a, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, M: StateMatrix> Copy for ParticleIndex<'a, M> {}

impl<'a, M: StateMatrix> ParticleIndex<'a, M> {
    /// Binds particle `id` of `state`.
    ///
    /// # Errors
    ///
    /// [`StateError::RowOutOfRange`] if `id >= state.size()`.
    pub fn new(state: &'a M, id: usize) -> Result<Self, StateError> {
        check_row(id, state.size())?;
        Ok(Self { id, state })
    }

    /// Particle id.
    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }

    /// Dimension of the particle.
    #[inline]
    pub fn dim(&self) -> usize {
        self.state.dim()
    }

    /// The matrix this handle points into.
    #[inline]
    pub fn state(&self) -> &'a M {
        self.state
    }

    /// Unchecked coordinate read.
    #[inline]
    pub fn get(&self, j: usize) -> M::Value {
        self.state.get(self.id, j)
    }

    /// Checked coordinate read.
    ///
    /// # Errors
    ///
    /// [`StateError::ColumnOutOfRange`] if `j >= dim()`.
    #[inline]
    pub fn at(&self, j: usize) -> Result<M::Value, StateError> {
        check_column(j, self.dim())?;
        Ok(self.get(j))
    }

    /// Copies the particle into a dense vector.
    pub fn pack(&self) -> StatePack<M::Value> {
        (0..self.dim()).map(|j| self.get(j)).collect()
    }
}

/// Mutable view of one particle.
///
/// # Examples
///
/// ```rust
/// use smc_core::dim::Fixed;
/// use smc_core::state::{ColMajorMatrix, StateMatrix};
///
/// let mut state = ColMajorMatrix::<f64, Fixed<2>>::new(3);
/// {
///     let mut p = state.particle_mut(2).unwrap();
///     p.set(0, 1.5);
///     *p.at_mut(1).unwrap() += 2.0;
/// }
/// assert_eq!(state.state_pack(2).unwrap(), vec![1.5, 2.0]);
/// ```
#[derive(Debug)]
pub struct ParticleIndexMut<'a, M: StateMatrix> {
    id: usize,
    state: &'a mut M,
}

impl<'a, M: StateMatrix> ParticleIndexMut<'a, M> {
    /// Binds particle `id` of `state` for writing.
    ///
    /// # Errors
    ///
    /// [`StateError::RowOutOfRange`] if `id >= state.size()`.
    pub fn new(state: &'a mut M, id: usize) -> Result<Self, StateError> {
        check_row(id, state.size())?;
        Ok(Self { id, state })
    }

    /// Particle id.
    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }

    /// Dimension of the particle.
    #[inline]
    pub fn dim(&self) -> usize {
        self.state.dim()
    }

    /// Reborrows as a read-only handle.
    #[inline]
    pub fn as_view(&self) -> ParticleIndex<'_, M> {
        ParticleIndex {
            id: self.id,
            state: &*self.state,
        }
    }

    /// Unchecked coordinate read.
    #[inline]
    pub fn get(&self, j: usize) -> M::Value {
        self.state.get(self.id, j)
    }

    /// Unchecked coordinate write.
    #[inline]
    pub fn set(&mut self, j: usize, value: M::Value) {
        self.state.set(self.id, j, value);
    }

    /// Checked coordinate read.
    ///
    /// # Errors
    ///
    /// [`StateError::ColumnOutOfRange`] if `j >= dim()`.
    #[inline]
    pub fn at(&self, j: usize) -> Result<M::Value, StateError> {
        check_column(j, self.dim())?;
        Ok(self.get(j))
    }

    /// Checked mutable coordinate access.
    ///
    /// # Errors
    ///
    /// [`StateError::ColumnOutOfRange`] if `j >= dim()`.
    #[inline]
    pub fn at_mut(&mut self, j: usize) -> Result<&mut M::Value, StateError> {
        check_column(j, self.dim())?;
        let offset = self.state.offset(self.id, j);
        Ok(&mut self.state.data_mut()[offset])
    }

    /// Copies the particle into a dense vector.
    pub fn pack(&self) -> StatePack<M::Value> {
        self.as_view().pack()
    }

    /// Overwrites the particle with the first `dim()` values of `pack`.
    ///
    /// # Errors
    ///
    /// [`StateError::PackTooSmall`] if `pack.len() < dim()`.
    pub fn unpack(&mut self, pack: &[M::Value]) -> Result<(), StateError> {
        check_pack(pack.len(), self.dim())?;
        self.state.state_unpack(self.id, pack)
    }
}
