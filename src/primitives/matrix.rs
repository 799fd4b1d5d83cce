//! Dense column-major matrix storage.
//!
//! ## Purpose
//!
//! This module provides [`Matrix`], the only type in the crate that owns
//! numeric memory. Lazy expressions are forced into a `Matrix` by
//! [`materialize`](crate::math::expr::materialize), and a `Matrix` can be fed
//! back into an expression tree as a dense leaf.
//!
//! ## Design notes
//!
//! * **Column-major**: Element `(i, j)` lives at `i + rows * j`, the same layout
//!   used by `nalgebra`, so conversions are plain slice copies.
//! * **Immutable from outside**: Only the materializer writes cells.
//!
//! ## Invariants
//!
//! * `data.len() == rows * cols` at all times.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt;
use core::ops::Index;
use nalgebra::{DMatrix, Scalar};
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::FitError;

/// Linear offset of `(i, j)` in column-major storage with `rows` rows.
#[inline]
pub(crate) const fn column_major_index(rows: usize, i: usize, j: usize) -> usize {
    i + rows * j
}

// ============================================================================
// Matrix
// ============================================================================

/// Dense matrix with column-major storage.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Float> Matrix<T> {
    /// Create a `rows x cols` matrix filled with zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![T::zero(); rows * cols],
        }
    }

    /// Create a matrix from column-major data.
    pub fn from_column_slice(rows: usize, cols: usize, data: &[T]) -> Result<Self, FitError> {
        if data.len() != rows * cols {
            return Err(FitError::ShapeMismatch {
                op: "from_column_slice",
                left: (rows, cols),
                right: (data.len(), 1),
            });
        }
        Ok(Self {
            rows,
            cols,
            data: data.to_vec(),
        })
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Element at `(i, j)`, or `None` when out of range.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<T> {
        if i < self.rows && j < self.cols {
            Some(self.data[column_major_index(self.rows, i, j)])
        } else {
            None
        }
    }

    #[inline]
    pub(crate) fn set(&mut self, i: usize, j: usize, value: T) {
        let idx = column_major_index(self.rows, i, j);
        self.data[idx] = value;
    }

    /// Column-major view of the elements.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consume the matrix and return its column-major elements.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Copy of row `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= rows`.
    pub fn row(&self, i: usize) -> Vec<T> {
        assert!(i < self.rows, "row index {} out of range", i);
        (0..self.cols).map(|j| self[(i, j)]).collect()
    }

    /// All rows, top to bottom.
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        (0..self.rows).map(|i| self.row(i)).collect()
    }
}

impl<T: Float + Scalar> Matrix<T> {
    /// Convert into an `nalgebra` dynamic matrix.
    pub fn to_dmatrix(&self) -> DMatrix<T> {
        DMatrix::from_column_slice(self.rows, self.cols, &self.data)
    }

    /// Copy an `nalgebra` dynamic matrix.
    pub fn from_dmatrix(m: &DMatrix<T>) -> Self {
        Self {
            rows: m.nrows(),
            cols: m.ncols(),
            data: m.as_slice().to_vec(),
        }
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        debug_assert!(i < self.rows && j < self.cols);
        &self.data[column_major_index(self.rows, i, j)]
    }
}

impl<T: Float + fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            for j in 0..self.cols {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:>12.6}", self[(i, j)])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_is_column_major() {
        assert_eq!(column_major_index(3, 0, 0), 0);
        assert_eq!(column_major_index(3, 2, 0), 2);
        assert_eq!(column_major_index(3, 0, 1), 3);
        assert_eq!(column_major_index(3, 1, 2), 7);
    }
}
