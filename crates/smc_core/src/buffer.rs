//! Owned contiguous storage for population values.
//!
//! [`StateBuffer`] is the leaf of the crate: a resizable linear block of
//! fixed-width elements that the state matrices index into. It keeps the
//! growth rules in one place (new elements are zero, shrinking drops the
//! tail) and provides the block moves used by compaction.

use num_traits::Zero;

/// Resizable owned buffer of `T`.
///
/// # Examples
///
/// ```rust
/// use smc_core::buffer::StateBuffer;
///
/// let mut buf = StateBuffer::<f64>::zeroed(4);
/// buf.as_mut_slice()[0] = 1.0;
/// buf.copy_block(0, 2, 1);
/// assert_eq!(buf.as_slice(), &[1.0, 0.0, 1.0, 0.0]);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StateBuffer<T> {
    data: Vec<T>,
}

impl<T: Copy + Zero> StateBuffer<T> {
    /// Creates a buffer of `len` zero values.
    pub fn zeroed(len: usize) -> Self {
        Self {
            data: vec![T::zero(); len],
        }
    }

    /// Grows or shrinks to `len` elements. Existing prefix is preserved and
    /// new elements are zero.
    #[inline]
    pub fn resize(&mut self, len: usize) {
        self.data.resize(len, T::zero());
    }
}

impl<T: Copy> StateBuffer<T> {
    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Allocated capacity in elements.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Reserves room for at least `additional` more elements.
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.data.reserve(additional);
    }

    /// Releases unused capacity.
    #[inline]
    pub fn shrink_to_fit(&mut self) {
        self.data.shrink_to_fit();
    }

    /// Read-only view of the whole buffer.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable view of the whole buffer.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Copies `len` elements starting at `src` to `dst`. Ranges may overlap.
    ///
    /// # Panics
    ///
    /// Panics if either range exceeds the buffer.
    #[inline]
    pub fn copy_block(&mut self, src: usize, dst: usize, len: usize) {
        self.data.copy_within(src..src + len, dst);
    }

    /// Copies `count` elements spaced `stride` apart, starting at `src`, onto
    /// the same pattern starting at `dst`.
    ///
    /// # Panics
    ///
    /// Panics if the last strided element exceeds the buffer.
    #[inline]
    pub fn copy_strided(&mut self, src: usize, dst: usize, stride: usize, count: usize) {
        for k in 0..count {
            let offset = k * stride;
            self.data[dst + offset] = self.data[src + offset];
        }
    }
}

impl<T> From<Vec<T>> for StateBuffer<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

impl<T> From<StateBuffer<T>> for Vec<T> {
    fn from(buffer: StateBuffer<T>) -> Self {
        buffer.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_buffer() {
        let buf = StateBuffer::<f64>::zeroed(8);
        assert_eq!(buf.len(), 8);
        assert!(buf.as_slice().iter().all(|&v| v == 0.0));
        assert!(StateBuffer::<f64>::zeroed(0).is_empty());
    }

    #[test]
    fn test_resize_preserves_prefix() {
        let mut buf = StateBuffer::from(vec![1.0, 2.0, 3.0]);
        buf.resize(5);
        assert_eq!(buf.as_slice(), &[1.0, 2.0, 3.0, 0.0, 0.0]);
        buf.resize(2);
        assert_eq!(buf.as_slice(), &[1.0, 2.0]);
    }

    #[test]
    fn test_copy_block_overlapping() {
        let mut buf = StateBuffer::from(vec![1, 2, 3, 4, 5]);
        buf.copy_block(0, 1, 3);
        assert_eq!(buf.as_slice(), &[1, 1, 2, 3, 5]);
    }

    #[test]
    fn test_copy_strided() {
        // Two columns of length 3 stored column-major: copy row 0 onto row 2
        let mut buf = StateBuffer::from(vec![1, 2, 3, 10, 20, 30]);
        buf.copy_strided(0, 2, 3, 2);
        assert_eq!(buf.as_slice(), &[1, 2, 1, 10, 20, 10]);
    }

    #[test]
    fn test_reserve_and_shrink() {
        let mut buf = StateBuffer::<f64>::zeroed(4);
        buf.reserve(100);
        assert!(buf.capacity() >= 104);
        buf.shrink_to_fit();
        assert_eq!(buf.len(), 4);
    }
}
