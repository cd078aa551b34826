//! Column-major population: each coordinate is a contiguous column.

use std::ops::{Index, IndexMut};

use num_traits::Zero;
use tracing::{debug, trace};

use super::{check_column, check_pack, check_row, check_selection, StateMatrix, StatePack};
use crate::buffer::StateBuffer;
use crate::dim::{Dimension, Dynamic};
use crate::error::StateError;
use crate::layout::MatrixLayout;

/// `size × dim` population stored column by column.
///
/// Element `(i, j)` lives at offset `i + j * size`. A particle is spread
/// across `dim` columns with stride `size`, so per-coordinate vector kernels
/// (e.g. adding a noise vector to every position) run over contiguous memory
/// while per-particle copies are strided.
///
/// # Type Parameters
///
/// * `T` - Value type of each coordinate (e.g. `f64`)
/// * `D` - Dimension policy, [`Fixed<N>`](crate::dim::Fixed) or [`Dynamic`]
///
/// # Examples
///
/// ```rust
/// use smc_core::dim::Fixed;
/// use smc_core::state::{ColMajorMatrix, StateMatrix};
///
/// let mut state = ColMajorMatrix::<f64, Fixed<2>>::new(3);
/// state.col_data_mut(1).copy_from_slice(&[1.0, 2.0, 3.0]);
/// assert_eq!(state.state_pack(2).unwrap(), vec![0.0, 3.0]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ColMajorMatrix<T, D: Dimension = Dynamic> {
    size: usize,
    dim: D,
    data: StateBuffer<T>,
}

impl<T: Copy + Zero, D: Dimension> ColMajorMatrix<T, D> {
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

    /// Contiguous values of coordinate `j` for every particle.
    ///
    /// # Panics
    ///
    /// Panics if `j >= dim()`.
    #[inline]
    pub fn col_data(&self, j: usize) -> &[T] {
        let n = self.size;
        &self.data.as_slice()[j * n..(j + 1) * n]
    }

    /// Mutable contiguous values of coordinate `j`.
    ///
    /// # Panics
    ///
    /// Panics if `j >= dim()`.
    #[inline]
    pub fn col_data_mut(&mut self, j: usize) -> &mut [T] {
        let n = self.size;
        &mut self.data.as_mut_slice()[j * n..(j + 1) * n]
    }

    /// Mutable views of every column at once, for kernels that combine
    /// coordinates (e.g. `pos += delta * vel`).
    pub fn columns_mut(&mut self) -> Vec<&mut [T]> {
        let n = self.size;
        if n == 0 {
            return (0..self.dim.get()).map(|_| <&mut [T]>::default()).collect();
        }
        self.data.as_mut_slice().chunks_mut(n).collect()
    }

    /// Copies the first `min(n, size)` values of the first `cols` columns
    /// into a fresh `n × dim` buffer.
    fn restride(&self, n: usize, dim: usize, cols: usize) -> StateBuffer<T> {
        let mut tmp = StateBuffer::zeroed(n * dim);
        let rows = n.min(self.size);
        if rows > 0 {
            let dst = tmp.as_mut_slice();
            for d in 0..cols {
                dst[d * n..d * n + rows].copy_from_slice(&self.col_data(d)[..rows]);
            }
        }
        tmp
    }
}

impl<T: Copy + Zero> ColMajorMatrix<T, Dynamic> {
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
    /// everything else is zero. When only the dimension changes, whole
    /// columns are appended or dropped in place.
    pub fn resize_with_dim(&mut self, n: usize, dim: usize) {
        let old_dim = self.dim.get();
        if n == self.size {
            if dim != old_dim {
                self.data.resize(n * dim);
                self.dim.set(dim);
            }
            return;
        }

        let tmp = self.restride(n, dim, dim.min(old_dim));
        debug!(
            from_size = self.size,
            to_size = n,
            from_dim = old_dim,
            to_dim = dim,
            "column-major state reallocated"
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

impl<T: Copy + Zero, D: Dimension> Default for ColMajorMatrix<T, D> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<T: Copy + Zero, D: Dimension> StateMatrix for ColMajorMatrix<T, D> {
    type Value = T;

    const LAYOUT: MatrixLayout = MatrixLayout::ColMajor;

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
        i + j * self.size
    }

    fn resize(&mut self, n: usize) {
        if n == self.size {
            return;
        }
        let d = self.dim.get();
        if d == 0 {
            self.size = n;
            return;
        }

        // Every column moves once the column length changes.
        let tmp = self.restride(n, d, d);
        debug!(from_size = self.size, to_size = n, dim = d, "column-major state reallocated");
        self.data = tmp;
        self.size = n;
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
            self.data.copy_strided(src, dst, self.size, self.dim.get());
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

        let d = self.dim.get();
        if n == self.size {
            trace!(size = n, dim = d, "column-major select in place");
            // Each column is an independent pass with ascending destinations.
            for col in self.data.as_mut_slice().chunks_exact_mut(n) {
                for (dst, &src) in index.iter().enumerate() {
                    if src != dst {
                        col[dst] = col[src];
                    }
                }
            }
            return Ok(());
        }

        debug!(from = self.size, to = n, dim = d, "column-major select into fresh buffer");
        let old = self.size;
        let mut tmp = StateBuffer::zeroed(n * d);
        {
            let src = self.data.as_slice();
            let dst = tmp.as_mut_slice();
            for j in 0..d {
                let src_col = &src[j * old..(j + 1) * old];
                let dst_col = &mut dst[j * n..(j + 1) * n];
                for (slot, &parent) in dst_col.iter_mut().zip(index) {
                    *slot = src_col[parent];
                }
            }
        }
        self.data = tmp;
        self.size = n;
        Ok(())
    }

    fn state_pack(&self, i: usize) -> Result<StatePack<T>, StateError> {
        check_row(i, self.size)?;
        let n = self.size;
        let data = self.data.as_slice();
        Ok((0..self.dim.get()).map(|j| data[i + j * n]).collect())
    }

    fn state_unpack(&mut self, i: usize, pack: &[T]) -> Result<(), StateError> {
        check_row(i, self.size)?;
        let d = self.dim.get();
        check_pack(pack.len(), d)?;
        let n = self.size;
        let data = self.data.as_mut_slice();
        for (j, &value) in pack[..d].iter().enumerate() {
            data[i + j * n] = value;
        }
        Ok(())
    }

    fn read_state<E: Extend<T>>(&self, j: usize, out: &mut E) -> Result<(), StateError> {
        check_column(j, self.dim.get())?;
        out.extend(self.col_data(j).iter().copied());
        Ok(())
    }

    fn read_state_matrix<E: Extend<T>>(&self, layout: MatrixLayout, out: &mut E) {
        let data = self.data.as_slice();
        match layout {
            MatrixLayout::ColMajor => out.extend(data.iter().copied()),
            MatrixLayout::RowMajor => {
                let d = self.dim.get();
                let n = self.size;
                out.extend((0..n).flat_map(|i| (0..d).map(move |j| data[i + j * n])));
            }
        }
    }
}

impl<T: Copy, D: Dimension> Index<(usize, usize)> for ColMajorMatrix<T, D> {
    type Output = T;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        &self.data.as_slice()[i + j * self.size]
    }
}

impl<T: Copy, D: Dimension> IndexMut<(usize, usize)> for ColMajorMatrix<T, D> {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        let n = self.size;
        &mut self.data.as_mut_slice()[i + j * n]
    }
}
