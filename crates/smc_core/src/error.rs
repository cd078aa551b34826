//! Error types for state matrix operations.
//!
//! Every error is detected before the buffer is touched, so a failed call
//! leaves the population exactly as it was.

use thiserror::Error;

/// Precondition violation reported by a state matrix.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StateError {
    /// Element access outside the logical `size × dim` shape.
    #[error("Index ({row}, {col}) out of range for state matrix of {size} x {dim}")]
    IndexOutOfRange {
        /// Requested particle.
        row: usize,
        /// Requested coordinate.
        col: usize,
        /// Number of particles.
        size: usize,
        /// Dimension of each particle.
        dim: usize,
    },

    /// Particle id not smaller than the population size.
    #[error("Particle {row} out of range for population of size {size}")]
    RowOutOfRange {
        /// Requested particle.
        row: usize,
        /// Number of particles.
        size: usize,
    },

    /// Coordinate not smaller than the dimension.
    #[error("Coordinate {col} out of range for dimension {dim}")]
    ColumnOutOfRange {
        /// Requested coordinate.
        col: usize,
        /// Dimension of each particle.
        dim: usize,
    },

    /// Pack vector shorter than the dimension.
    #[error("Pack size is too small: expected at least {expected}, got {actual}")]
    PackTooSmall {
        /// Required length (the dimension).
        expected: usize,
        /// Length of the supplied pack.
        actual: usize,
    },

    /// Fewer parent indices than requested offspring.
    #[error("Resample index too short: expected {expected} entries, got {actual}")]
    IndexTooShort {
        /// Requested sample size.
        expected: usize,
        /// Length of the supplied index.
        actual: usize,
    },

    /// Parent index not smaller than the current population size.
    #[error("Parent {parent} at position {position} out of range for population of size {size}")]
    ParentOutOfRange {
        /// Destination slot holding the bad parent.
        position: usize,
        /// Offending parent id.
        parent: usize,
        /// Population size before selection.
        size: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_error_display() {
        let err = StateError::IndexOutOfRange {
            row: 5,
            col: 1,
            size: 4,
            dim: 2,
        };
        assert_eq!(
            err.to_string(),
            "Index (5, 1) out of range for state matrix of 4 x 2"
        );

        let err = StateError::PackTooSmall {
            expected: 4,
            actual: 3,
        };
        assert!(err.to_string().contains("expected at least 4, got 3"));

        let err = StateError::ParentOutOfRange {
            position: 2,
            parent: 9,
            size: 4,
        };
        assert!(err.to_string().contains("Parent 9 at position 2"));
    }
}
