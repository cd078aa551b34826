//! Physical memory layout tag.

use std::fmt;
use std::str::FromStr;

/// Memory arrangement of an `N × D` population matrix.
///
/// Used both as the native layout of a state matrix and as the target
/// ordering for [`read_state_matrix`](crate::state::StateMatrix::read_state_matrix).
///
/// # Examples
///
/// ```rust
/// use smc_core::MatrixLayout;
///
/// assert_eq!(MatrixLayout::RowMajor.offset(1, 2, 4, 3), 5);
/// assert_eq!(MatrixLayout::ColMajor.offset(1, 2, 4, 3), 9);
/// assert_eq!("col".parse::<MatrixLayout>().unwrap(), MatrixLayout::ColMajor);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MatrixLayout {
    /// Each particle is a contiguous row of `dim` values.
    #[default]
    RowMajor,
    /// Each coordinate is a contiguous column of `size` values.
    ColMajor,
}

impl MatrixLayout {
    /// Returns the flat offset of element `(i, j)` in a `size × dim` matrix
    /// stored in this layout.
    #[inline]
    pub fn offset(self, i: usize, j: usize, size: usize, dim: usize) -> usize {
        match self {
            MatrixLayout::RowMajor => i * dim + j,
            MatrixLayout::ColMajor => i + j * size,
        }
    }

    /// Short lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            MatrixLayout::RowMajor => "row_major",
            MatrixLayout::ColMajor => "col_major",
        }
    }
}

impl fmt::Display for MatrixLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown layout name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Unknown matrix layout: {0}. Must be one of: row_major, col_major")]
pub struct ParseLayoutError(pub String);

impl FromStr for MatrixLayout {
    type Err = ParseLayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "row_major" | "row" | "rowmajor" => Ok(MatrixLayout::RowMajor),
            "col_major" | "col" | "colmajor" | "column_major" => Ok(MatrixLayout::ColMajor),
            _ => Err(ParseLayoutError(s.to_string())),
        }
    }
}
