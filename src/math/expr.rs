//! Lazy matrix expressions.
//!
//! ## Purpose
//!
//! This module provides the [`Expression`] capability (shape plus element
//! access) and [`Expr`], a handle to an immutable expression node. Matrix
//! formulas are composed from leaves, views and combinators without allocating
//! any intermediate storage; [`materialize`] forces an expression into a dense
//! [`Matrix`].
//!
//! ## Design notes
//!
//! * **Closed node set**: Every node is one variant of a private `Node` enum;
//!   evaluation is a single `match`.
//! * **Shared operands**: `Expr` wraps an `Arc`, so cloning a handle shares the
//!   sub-expression. Several parents may point at the same node; a node can only
//!   point at nodes built before it, so cycles cannot form.
//! * **Checked at construction**: `subtract`, `matmul` and `reshape` verify
//!   operand shapes when the node is built. Evaluation never fails.
//! * **Recompute, don't cache**: `value_at` re-evaluates the whole sub-tree on
//!   every call. A product of two combinators costs `rows * cols * inner` calls
//!   into its operands, compounding with depth. Call [`Expr::materialized`] on a
//!   shared operand that is expensive to recompute.
//!
//! ## Key concepts
//!
//! * **Leaves**: column vector, dense matrix, constant fill (ones).
//! * **Views**: reshape, transpose, scale.
//! * **Combinators**: subtract, matrix product.
//!
//! ## Invariants
//!
//! * `rows`, `cols` and `value_at` are pure: repeated calls return identical results.
//! * Node shapes are fixed at construction.
//!
//! ## Non-goals
//!
//! * This module does not memoize implicitly.
//! * This module does not provide sparse storage or broadcasting.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::sync::Arc;
#[cfg(feature = "std")]
use std::sync::Arc;

// External dependencies
use log::trace;
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::FitError;
use crate::primitives::matrix::Matrix;

// ============================================================================
// Expression Capability
// ============================================================================

/// Anything with a shape and per-element values.
///
/// Indices are 0-based; `i` is the row and `j` the column.
pub trait Expression<T> {
    /// Number of rows.
    fn rows(&self) -> usize;

    /// Number of columns.
    fn cols(&self) -> usize;

    /// Element at `(i, j)`.
    ///
    /// # Panics
    ///
    /// May panic when `(i, j)` is outside the declared shape.
    fn value_at(&self, i: usize, j: usize) -> T;

    /// `(rows, cols)`.
    #[inline]
    fn shape(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    /// Number of elements.
    #[inline]
    fn numel(&self) -> usize {
        self.rows() * self.cols()
    }
}

impl<T: Float> Expression<T> for Matrix<T> {
    #[inline]
    fn rows(&self) -> usize {
        Matrix::rows(self)
    }

    #[inline]
    fn cols(&self) -> usize {
        Matrix::cols(self)
    }

    #[inline]
    fn value_at(&self, i: usize, j: usize) -> T {
        self[(i, j)]
    }
}

// ============================================================================
// Expression Nodes
// ============================================================================

#[derive(Debug)]
enum Node<T> {
    ColumnVector(Arc<[T]>),
    Dense(Matrix<T>),
    Ones { rows: usize, cols: usize },
    Reshape { src: Expr<T>, rows: usize, cols: usize },
    Transpose(Expr<T>),
    Scale(T, Expr<T>),
    Subtract(Expr<T>, Expr<T>),
    MatMul(Expr<T>, Expr<T>),
}

/// Shared handle to an immutable lazy expression node.
#[derive(Debug)]
pub struct Expr<T> {
    node: Arc<Node<T>>,
}

impl<T> Clone for Expr<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            node: Arc::clone(&self.node),
        }
    }
}

impl<T: Float> Expr<T> {
    fn wrap(node: Node<T>) -> Self {
        Self {
            node: Arc::new(node),
        }
    }

    // ========================================================================
    // Leaves
    // ========================================================================

    /// An `n x 1` column vector over `data`.
    pub fn column_vector(data: impl Into<Arc<[T]>>) -> Self {
        Self::wrap(Node::ColumnVector(data.into()))
    }

    /// A dense matrix used as a leaf.
    pub fn dense(matrix: Matrix<T>) -> Self {
        Self::wrap(Node::Dense(matrix))
    }

    /// A `rows x cols` matrix of ones.
    pub fn ones(rows: usize, cols: usize) -> Self {
        Self::wrap(Node::Ones { rows, cols })
    }

    // ========================================================================
    // Views
    // ========================================================================

    /// Repack `src`, read as a flat column-major buffer, into `rows` rows.
    ///
    /// Fails with [`FitError::InvalidReshape`] when `rows` is zero, does not
    /// divide the element count of `src`, or that count overflows `usize`.
    pub fn reshape(src: &Expr<T>, rows: usize) -> Result<Self, FitError> {
        let len = Self::flat_len(src, rows)?;
        if rows == 0 || len % rows != 0 {
            return Err(FitError::InvalidReshape { len, rows });
        }
        Ok(Self::reshape_unchecked(src, rows, len / rows))
    }

    /// Like [`Expr::reshape`], but a trailing remainder is dropped.
    ///
    /// The column count is `len / rows` (integer division), so the last
    /// `len % rows` elements of `src` are never read. `rows` must still be
    /// non-zero, and the element count of `src` must fit in `usize`.
    pub fn reshape_truncated(src: &Expr<T>, rows: usize) -> Result<Self, FitError> {
        let len = Self::flat_len(src, rows)?;
        if rows == 0 {
            return Err(FitError::InvalidReshape { len, rows });
        }
        Ok(Self::reshape_unchecked(src, rows, len / rows))
    }

    fn flat_len(src: &Expr<T>, rows: usize) -> Result<usize, FitError> {
        src.rows()
            .checked_mul(src.cols())
            .ok_or(FitError::InvalidReshape {
                len: usize::MAX,
                rows,
            })
    }

    fn reshape_unchecked(src: &Expr<T>, rows: usize, cols: usize) -> Self {
        Self::wrap(Node::Reshape {
            src: src.clone(),
            rows,
            cols,
        })
    }

    /// Swap rows and columns.
    pub fn transpose(src: &Expr<T>) -> Self {
        Self::wrap(Node::Transpose(src.clone()))
    }

    /// Multiply every element by `s`.
    pub fn scale(s: T, x: &Expr<T>) -> Self {
        Self::wrap(Node::Scale(s, x.clone()))
    }

    // ========================================================================
    // Combinators
    // ========================================================================

    /// Element-wise `a - b`. Both operands must have the same shape.
    pub fn subtract(a: &Expr<T>, b: &Expr<T>) -> Result<Self, FitError> {
        if a.shape() != b.shape() {
            return Err(FitError::ShapeMismatch {
                op: "subtract",
                left: a.shape(),
                right: b.shape(),
            });
        }
        Ok(Self::wrap(Node::Subtract(a.clone(), b.clone())))
    }

    /// Matrix product `a * b`. Requires `a.cols() == b.rows()`.
    pub fn matmul(a: &Expr<T>, b: &Expr<T>) -> Result<Self, FitError> {
        if a.cols() != b.rows() {
            return Err(FitError::ShapeMismatch {
                op: "matmul",
                left: a.shape(),
                right: b.shape(),
            });
        }
        Ok(Self::wrap(Node::MatMul(a.clone(), b.clone())))
    }

    // ========================================================================
    // Evaluation
    // ========================================================================

    /// Evaluate this expression once and return it as a dense leaf.
    ///
    /// Later reads through the returned handle cost one lookup per element
    /// instead of a re-evaluation of the sub-tree.
    pub fn materialized(&self) -> Self {
        Self::dense(materialize(self))
    }

    /// Name of the node kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match &*self.node {
            Node::ColumnVector(_) => "column_vector",
            Node::Dense(_) => "dense",
            Node::Ones { .. } => "ones",
            Node::Reshape { .. } => "reshape",
            Node::Transpose(_) => "transpose",
            Node::Scale(..) => "scale",
            Node::Subtract(..) => "subtract",
            Node::MatMul(..) => "matmul",
        }
    }

    /// True when both handles point at the same node.
    #[inline]
    pub fn ptr_eq(a: &Expr<T>, b: &Expr<T>) -> bool {
        Arc::ptr_eq(&a.node, &b.node)
    }
}

impl<T: Float> From<Matrix<T>> for Expr<T> {
    fn from(matrix: Matrix<T>) -> Self {
        Self::dense(matrix)
    }
}

impl<T: Float> Expression<T> for Expr<T> {
    fn rows(&self) -> usize {
        match &*self.node {
            Node::ColumnVector(data) => data.len(),
            Node::Dense(m) => m.rows(),
            Node::Ones { rows, .. } | Node::Reshape { rows, .. } => *rows,
            Node::Transpose(src) => src.cols(),
            Node::Scale(_, x) => x.rows(),
            Node::Subtract(a, _) | Node::MatMul(a, _) => a.rows(),
        }
    }

    fn cols(&self) -> usize {
        match &*self.node {
            Node::ColumnVector(_) => 1,
            Node::Dense(m) => m.cols(),
            Node::Ones { cols, .. } | Node::Reshape { cols, .. } => *cols,
            Node::Transpose(src) => src.rows(),
            Node::Scale(_, x) => x.cols(),
            Node::Subtract(a, _) => a.cols(),
            Node::MatMul(_, b) => b.cols(),
        }
    }

    fn value_at(&self, i: usize, j: usize) -> T {
        match &*self.node {
            Node::ColumnVector(data) => {
                debug_assert_eq!(j, 0);
                data[i]
            }
            Node::Dense(m) => m[(i, j)],
            Node::Ones { .. } => T::one(),
            Node::Reshape { src, rows, .. } => {
                let k = i + rows * j;
                let src_rows = src.rows();
                src.value_at(k % src_rows, k / src_rows)
            }
            Node::Transpose(src) => src.value_at(j, i),
            Node::Scale(s, x) => *s * x.value_at(i, j),
            Node::Subtract(a, b) => a.value_at(i, j) - b.value_at(i, j),
            Node::MatMul(a, b) => (0..a.cols()).fold(T::zero(), |sum, k| {
                sum + a.value_at(i, k) * b.value_at(k, j)
            }),
        }
    }
}

// ============================================================================
// Materialization
// ============================================================================

/// Evaluate every element of `expr` into a new dense matrix.
///
/// Each destination cell is filled by exactly one `value_at` call; what that
/// call costs depends on the sub-tree beneath it.
///
/// # Panics
///
/// Panics if `rows * cols` overflows `usize` or the allocation fails.
pub fn materialize<T, E>(expr: &E) -> Matrix<T>
where
    T: Float,
    E: Expression<T> + ?Sized,
{
    let (rows, cols) = expr.shape();
    trace!("materializing {}x{} expression", rows, cols);

    let mut dst = Matrix::zeros(rows, cols);
    for j in 0..cols {
        for i in 0..rows {
            dst.set(i, j, expr.value_at(i, j));
        }
    }
    dst
}
