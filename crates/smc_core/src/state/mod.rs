//! State matrices: the particle population and its resampling compaction.
//!
//! Two concrete layouts implement the shared [`StateMatrix`] capability set:
//!
//! - [`RowMajorMatrix`]: one contiguous row per particle; a particle copy is
//!   a single block move.
//! - [`ColMajorMatrix`]: one contiguous column per coordinate; per-dimension
//!   vector kernels run over contiguous memory.
//!
//! The layout is chosen at the type level. Nothing on the hot path branches
//! on the layout at run time.
//!
//! # Resampling Compaction
//!
//! [`StateMatrix::select`] replaces the population according to a parent
//! index array. Let `a[k]` be `index[k]` and `r[k]` the number of positions
//! holding `k`. The compaction is done in place and is correct whenever
//!
//! ```text
//! r[k] > 0 and k < N   =>   a[k] = k
//! ```
//!
//! i.e. every surviving particle that also owns a destination slot keeps its
//! own slot. Destinations are then processed in ascending order. A slot `dst`
//! with `a[dst] != dst` has `r[dst] = 0`, so it is never read as a source and
//! overwriting it cannot clobber a pending copy. A slot with `a[dst] = dst`
//! is left untouched. The same argument holds column by column, which is why
//! the column-major in-place pass is safe for every such index.
//!
//! Index arrays built by `replication_to_index` in `smc_random` always
//! satisfy the condition. Arrays that violate it produce unspecified values
//! but never touch memory outside the buffer: every parent is bounds-checked
//! before the first write.

mod col_major;
mod row_major;

pub use col_major::ColMajorMatrix;
pub use row_major::RowMajorMatrix;

use crate::error::StateError;
use crate::layout::MatrixLayout;
use crate::particle::{ParticleIndex, ParticleIndexMut};

/// Dense vector holding one particle's full state.
pub type StatePack<T> = Vec<T>;

/// Capability set shared by both population layouts.
pub trait StateMatrix: Sized {
    /// Element type stored for each coordinate.
    type Value: Copy;

    /// Native physical layout.
    const LAYOUT: MatrixLayout;

    /// Number of particles.
    fn size(&self) -> usize;

    /// Dimension of each particle.
    fn dim(&self) -> usize;

    /// Native physical layout.
    #[inline]
    fn layout(&self) -> MatrixLayout {
        Self::LAYOUT
    }

    /// Flat buffer in native layout. Its length is always `size * dim`.
    fn data(&self) -> &[Self::Value];

    /// Mutable flat buffer in native layout.
    fn data_mut(&mut self) -> &mut [Self::Value];

    /// Flat offset of `(i, j)` without checking the logical shape.
    fn offset(&self, i: usize, j: usize) -> usize;

    /// Grows or shrinks the population to `n` particles, keeping the values
    /// of particles `0..min(n, size)`. New particles are zero.
    fn resize(&mut self, n: usize);

    /// Reserves room for `n` particles at the current dimension.
    fn reserve(&mut self, n: usize);

    /// Releases unused capacity.
    fn shrink_to_fit(&mut self);

    /// Copies every coordinate of particle `src` onto particle `dst`.
    ///
    /// No-op when `src == dst`.
    ///
    /// # Errors
    ///
    /// [`StateError::RowOutOfRange`] if either id is not below `size()`.
    fn duplicate(&mut self, src: usize, dst: usize) -> Result<(), StateError>;

    /// Replaces the population by `n` particles where particle `dst` becomes
    /// a copy of the current particle `index[dst]`.
    ///
    /// With an empty population or `index == None` this only resizes to `n`.
    /// See the [module documentation](self) for the condition the index must
    /// satisfy for the in-place compaction to be exact.
    ///
    /// # Errors
    ///
    /// - [`StateError::IndexTooShort`] if `index` has fewer than `n` entries
    /// - [`StateError::ParentOutOfRange`] if a parent is not below `size()`
    ///
    /// The population is unchanged on error.
    fn select(&mut self, n: usize, index: Option<&[usize]>) -> Result<(), StateError>;

    /// Copies particle `i` into a dense vector of length `dim()`.
    ///
    /// # Errors
    ///
    /// [`StateError::RowOutOfRange`] if `i >= size()`.
    fn state_pack(&self, i: usize) -> Result<StatePack<Self::Value>, StateError>;

    /// Overwrites particle `i` with the first `dim()` values of `pack`.
    ///
    /// # Errors
    ///
    /// - [`StateError::RowOutOfRange`] if `i >= size()`
    /// - [`StateError::PackTooSmall`] if `pack.len() < dim()`
    fn state_unpack(&mut self, i: usize, pack: &[Self::Value]) -> Result<(), StateError>;

    /// Appends coordinate `j` of every particle, in population order.
    ///
    /// # Errors
    ///
    /// [`StateError::ColumnOutOfRange`] if `j >= dim()`.
    fn read_state<E: Extend<Self::Value>>(&self, j: usize, out: &mut E) -> Result<(), StateError>;

    /// Appends the whole population flattened in `layout` order, whatever the
    /// native layout.
    fn read_state_matrix<E: Extend<Self::Value>>(&self, layout: MatrixLayout, out: &mut E);

    /// Unchecked element read.
    ///
    /// # Panics
    ///
    /// Panics if the computed offset is outside the buffer.
    #[inline]
    fn get(&self, i: usize, j: usize) -> Self::Value {
        self.data()[self.offset(i, j)]
    }

    /// Unchecked element write.
    ///
    /// # Panics
    ///
    /// Panics if the computed offset is outside the buffer.
    #[inline]
    fn set(&mut self, i: usize, j: usize, value: Self::Value) {
        let offset = self.offset(i, j);
        self.data_mut()[offset] = value;
    }

    /// Checked element access.
    ///
    /// # Errors
    ///
    /// [`StateError::IndexOutOfRange`] if `i >= size()` or `j >= dim()`.
    #[inline]
    fn at(&self, i: usize, j: usize) -> Result<&Self::Value, StateError> {
        check_element(i, j, self.size(), self.dim())?;
        let offset = self.offset(i, j);
        Ok(&self.data()[offset])
    }

    /// Checked mutable element access.
    ///
    /// # Errors
    ///
    /// [`StateError::IndexOutOfRange`] if `i >= size()` or `j >= dim()`.
    #[inline]
    fn at_mut(&mut self, i: usize, j: usize) -> Result<&mut Self::Value, StateError> {
        check_element(i, j, self.size(), self.dim())?;
        let offset = self.offset(i, j);
        Ok(&mut self.data_mut()[offset])
    }

    /// Read-only handle on particle `i`.
    ///
    /// # Errors
    ///
    /// [`StateError::RowOutOfRange`] if `i >= size()`.
    #[inline]
    fn particle(&self, i: usize) -> Result<ParticleIndex<'_, Self>, StateError> {
        ParticleIndex::new(self, i)
    }

    /// Mutable handle on particle `i`.
    ///
    /// # Errors
    ///
    /// [`StateError::RowOutOfRange`] if `i >= size()`.
    #[inline]
    fn particle_mut(&mut self, i: usize) -> Result<ParticleIndexMut<'_, Self>, StateError> {
        ParticleIndexMut::new(self, i)
    }
}

#[inline]
pub(crate) fn check_element(i: usize, j: usize, size: usize, dim: usize) -> Result<(), StateError> {
    if i >= size || j >= dim {
        return Err(StateError::IndexOutOfRange {
            row: i,
            col: j,
            size,
            dim,
        });
    }
    Ok(())
}

#[inline]
pub(crate) fn check_row(i: usize, size: usize) -> Result<(), StateError> {
    if i >= size {
        return Err(StateError::RowOutOfRange { row: i, size });
    }
    Ok(())
}

#[inline]
pub(crate) fn check_column(j: usize, dim: usize) -> Result<(), StateError> {
    if j >= dim {
        return Err(StateError::ColumnOutOfRange { col: j, dim });
    }
    Ok(())
}

#[inline]
pub(crate) fn check_pack(len: usize, dim: usize) -> Result<(), StateError> {
    if len < dim {
        return Err(StateError::PackTooSmall {
            expected: dim,
            actual: len,
        });
    }
    Ok(())
}

/// Validates a parent index against the population it is applied to and
/// returns its first `n` entries.
pub(crate) fn check_selection(index: &[usize], n: usize, size: usize) -> Result<&[usize], StateError> {
    if index.len() < n {
        return Err(StateError::IndexTooShort {
            expected: n,
            actual: index.len(),
        });
    }
    let index = &index[..n];
    if let Some((position, &parent)) = index.iter().enumerate().find(|&(_, &p)| p >= size) {
        return Err(StateError::ParentOutOfRange {
            position,
            parent,
            size,
        });
    }
    Ok(index)
}

#[cfg(test)]
mod tests;
