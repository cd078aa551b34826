//! Row-major population: each particle is a contiguous row.

use std::ops::{Index, IndexMut};

use num_traits::Zero;
use tracing::{debug, trace};

use super::{check_column, check_pack, check_row, check_selection, StateMatrix, StatePack};
use crate::buffer::StateBuffer;
use crate::dim::{Dimension, Dynamic};
use crate::error::StateError;
use crate::layout::MatrixLayout;

/// `size × dim` population stored row by row.
///
/// Element `(i, j)` lives at offset `i * dim + j`. Copying a particle is a
/// single block move of `dim` values, which makes this layout the natural
/// choice when per-particle kernels dominate.
///
/// # Type Parameters
///
/// * `T` - Value type of each coordinate (e.g. `f64`)
/// * `D` - Dimension policy, [`Fixed<N>`](crate::dim::Fixed) or [`Dynamic`]
///
/// # Examples
///
/// ```rust
/// use smc_core::dim::Dynamic;
/// use smc_core::state::{RowMajorMatrix, StateMatrix};
///
/// let mut state = RowMajorMatrix::<f64, Dynamic>::with_dim(3, 2);
/// state.set(2, 1, 5.0);
/// assert_eq!(state.row_data(2), &[0.0, 5.0]);
///
/// state.resize_dim(3);
/// assert_eq!(state.row_data(2), &[0.0, 5.0, 0.0]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RowMajorMatrix<T, D: Dimension = Dynamic> {
    size: usize,
    dim: D,
    data: StateBuffer<T>,
}

impl<T: Copy + Zero, D: Dimension> RowMajorMatrix<T, D> {
    /// Creates a population of `n` zero particles.
    ///
    /// A [`Dynamic`] matrix created this way has dimension 0.
    pub fn new(n: usize) -> Self {
        let dim = D::default();
        Self {
            size: n,
            dim,
            data: StateBuffer::zeroed(n * dim.get()),
        }
    }

    /// Contiguous values of particle `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= size()`.
    #[inline]
    pub fn row_data(&self, i: usize) -> &[T] {
        let d = self.dim.get();
        &self.data.as_slice()[i * d..(i + 1) * d]
    }

    /// Mutable contiguous values of particle `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= size()`.
    #[inline]
    pub fn row_data_mut(&mut self, i: usize) -> &mut [T] {
        let d = self.dim.get();
        &mut self.data.as_mut_slice()[i * d..(i + 1) * d]
    }

    #[inline]
    fn copy_row(&mut self, src: usize, dst: usize) {
        let d = self.dim.get();
        self.data.copy_block(src * d, dst * d, d);
    }
}

impl<T: Copy + Zero> RowMajorMatrix<T, Dynamic> {
    /// Creates a population of `n` zero particles of dimension `dim`.
    pub fn with_dim(n: usize, dim: usize) -> Self {
        Self {
            size: n,
            dim: Dynamic::new(dim),
            data: StateBuffer::zeroed(n * dim),
        }
    }

    /// Changes both the population size and the dimension.
    ///
    /// Particles `0..min(n, size)` keep coordinates `0..min(dim, old_dim)`;
    /// everything else is zero. Changing the dimension re-strides every row,
    /// so a fresh buffer is filled and swapped in.
    pub fn resize_with_dim(&mut self, n: usize, dim: usize) {
        let old_dim = self.dim.get();
        if dim == old_dim {
            self.resize(n);
            return;
        }

        let mut tmp = StateBuffer::zeroed(n * dim);
        let rows = n.min(self.size);
        let cols = dim.min(old_dim);
        if cols > 0 {
            let src = self.data.as_slice();
            let dst = tmp.as_mut_slice();
            for r in 0..rows {
                dst[r * dim..r * dim + cols].copy_from_slice(&src[r * old_dim..r * old_dim + cols]);
            }
        }
        debug!(
            from_size = self.size,
            to_size = n,
            from_dim = old_dim,
            to_dim = dim,
            "row-major state reallocated"
        );

        self.data = tmp;
        self.size = n;
        self.dim.set(dim);
    }

    /// Changes the dimension, keeping the population size.
    #[inline]
    pub fn resize_dim(&mut self, dim: usize) {
        self.resize_with_dim(self.size, dim);
    }
}

impl<T: Copy + Zero, D: Dimension> Default for RowMajorMatrix<T, D> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<T: Copy + Zero, D: Dimension> StateMatrix for RowMajorMatrix<T, D> {
    type Value = T;

    const LAYOUT: MatrixLayout = MatrixLayout::RowMajor;

    #[inline]
    fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn dim(&self) -> usize {
        self.dim.get()
    }

    #[inline]
    fn data(&self) -> &[T] {
        self.data.as_slice()
    }

    #[inline]
    fn data_mut(&mut self) -> &mut [T] {
        self.data.as_mut_slice()
    }

    #[inline]
    fn offset(&self, i: usize, j: usize) -> usize {
        i * self.dim.get() + j
    }

    fn resize(&mut self, n: usize) {
        if n == self.size {
            return;
        }
        self.size = n;
        self.data.resize(n * self.dim.get());
    }

    fn reserve(&mut self, n: usize) {
        let wanted = n * self.dim.get();
        self.data.reserve(wanted.saturating_sub(self.data.len()));
    }

    fn shrink_to_fit(&mut self) {
        self.data.shrink_to_fit();
    }

    fn duplicate(&mut self, src: usize, dst: usize) -> Result<(), StateError> {
        check_row(src, self.size)?;
        check_row(dst, self.size)?;
        if src != dst {
            self.copy_row(src, dst);
        }
        Ok(())
    }

    fn select(&mut self, n: usize, index: Option<&[usize]>) -> Result<(), StateError> {
        let index = match index {
            Some(index) if self.size != 0 => check_selection(index, n, self.size)?,
            _ => {
                self.resize(n);
                return Ok(());
            }
        };

        trace!(from = self.size, to = n, "row-major select");
        if n > self.size {
            self.resize(n);
        }
        // Ascending destinations: a row overwritten here is never a parent.
        for (dst, &src) in index.iter().enumerate() {
            if src != dst {
                self.copy_row(src, dst);
            }
        }
        if n < self.size {
            self.resize(n);
        }
        Ok(())
    }

    fn state_pack(&self, i: usize) -> Result<StatePack<T>, StateError> {
        check_row(i, self.size)?;
        Ok(self.row_data(i).to_vec())
    }

    fn state_unpack(&mut self, i: usize, pack: &[T]) -> Result<(), StateError> {
        check_row(i, self.size)?;
        let d = self.dim.get();
        check_pack(pack.len(), d)?;
        self.row_data_mut(i).copy_from_slice(&pack[..d]);
        Ok(())
    }

    fn read_state<E: Extend<T>>(&self, j: usize, out: &mut E) -> Result<(), StateError> {
        let d = self.dim.get();
        check_column(j, d)?;
        out.extend((0..self.size).map(|i| self.data.as_slice()[i * d + j]));
        Ok(())
    }

    fn read_state_matrix<E: Extend<T>>(&self, layout: MatrixLayout, out: &mut E) {
        let data = self.data.as_slice();
        match layout {
            MatrixLayout::RowMajor => out.extend(data.iter().copied()),
            MatrixLayout::ColMajor => {
                let d = self.dim.get();
                let n = self.size;
                out.extend((0..d).flat_map(|j| (0..n).map(move |i| data[i * d + j])));
            }
        }
    }
}

impl<T: Copy, D: Dimension> Index<(usize, usize)> for RowMajorMatrix<T, D> {
    type Output = T;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        &self.data.as_slice()[i * self.dim.get() + j]
    }
}

impl<T: Copy, D: Dimension> IndexMut<(usize, usize)> for RowMajorMatrix<T, D> {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        let d = self.dim.get();
        &mut self.data.as_mut_slice()[i * d + j]
    }
}
