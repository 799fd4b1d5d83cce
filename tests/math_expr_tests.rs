#![cfg(feature = "dev")]
//! Tests for lazy matrix expressions.
//!
//! ## Test Organization
//!
//! 1. **Leaves** - Column vectors, dense leaves, constant fills
//! 2. **Views** - Reshape, transpose, scale
//! 3. **Combinators** - Subtract, matrix product
//! 4. **Construction Errors** - Shape checks at build time
//! 5. **Sharing and Materialization** - DAG reuse, purity, idempotence

use approx::assert_relative_eq;

use lazyfit::internals::math::expr::{materialize, Expr, Expression};
use lazyfit::internals::primitives::errors::FitError;
use lazyfit::internals::primitives::matrix::Matrix;

fn col(data: &[f64]) -> Expr<f64> {
    Expr::column_vector(data)
}

// ============================================================================
// Leaf Tests
// ============================================================================

/// A column vector is `n x 1` and reads its buffer in order.
#[test]
fn test_column_vector_shape_and_values() {
    let v = col(&[1.0, 2.0, 3.0]);

    assert_eq!(v.shape(), (3, 1));
    assert_eq!(v.numel(), 3);
    assert_eq!(v.value_at(0, 0), 1.0);
    assert_eq!(v.value_at(2, 0), 3.0);
}

/// `ones` reports its shape and reads 1 everywhere.
#[test]
fn test_ones() {
    let o = Expr::<f64>::ones(2, 3);
    let m = materialize(&o);

    assert_eq!(m.shape(), (2, 3));
    assert!(m.as_slice().iter().all(|&v| v == 1.0));
}

/// A dense leaf reads through to the matrix.
#[test]
fn test_dense_leaf() {
    let m = Matrix::from_column_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]).unwrap();
    let e: Expr<f64> = m.clone().into();

    assert_eq!(e.kind(), "dense");
    assert_eq!(materialize(&e), m);
}

// ============================================================================
// View Tests
// ============================================================================

/// Reshape reads the source as a flat column-major buffer.
#[test]
fn test_reshape_column_major() {
    let v = col(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    let x = Expr::reshape(&v, 2).unwrap();

    assert_eq!(x.shape(), (2, 3));
    assert_eq!(
        materialize(&x).to_rows(),
        vec![vec![1.0, 3.0, 5.0], vec![2.0, 4.0, 6.0]]
    );
}

/// Reshaping back to a column returns the original buffer.
#[test]
fn test_reshape_roundtrip() {
    let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    let v = col(&data);
    let x = Expr::reshape(&v, 3).unwrap();
    let back = Expr::reshape(&x, 6).unwrap();

    assert_eq!(back.shape(), (6, 1));
    assert_eq!(materialize(&back).as_slice(), &data);
}

/// A length that `rows` does not divide is rejected by the strict reshape.
#[test]
fn test_reshape_not_divisible() {
    let v = col(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    let result = Expr::reshape(&v, 2);

    assert!(matches!(
        result,
        Err(FitError::InvalidReshape { len: 5, rows: 2 })
    ));
}

/// The truncating reshape drops the trailing remainder.
#[test]
fn test_reshape_truncated_drops_remainder() {
    let v = col(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    let x = Expr::reshape_truncated(&v, 2).unwrap();

    assert_eq!(x.shape(), (2, 2));
    assert_eq!(
        materialize(&x).to_rows(),
        vec![vec![1.0, 3.0], vec![2.0, 4.0]]
    );
}

/// Zero rows is rejected by both reshapes.
#[test]
fn test_reshape_zero_rows() {
    let v = col(&[1.0, 2.0]);

    assert!(matches!(
        Expr::reshape(&v, 0),
        Err(FitError::InvalidReshape { len: 2, rows: 0 })
    ));
    assert!(matches!(
        Expr::reshape_truncated(&v, 0),
        Err(FitError::InvalidReshape { len: 2, rows: 0 })
    ));
}

/// An element count that overflows `usize` is rejected instead of wrapping.
#[test]
fn test_reshape_overflowing_element_count() {
    let huge = Expr::<f64>::ones(usize::MAX, 2);

    assert!(matches!(
        Expr::reshape(&huge, 2),
        Err(FitError::InvalidReshape { rows: 2, .. })
    ));
    assert!(matches!(
        Expr::reshape_truncated(&huge, 2),
        Err(FitError::InvalidReshape { rows: 2, .. })
    ));
}

/// Transposing twice gives back the original values.
#[test]
fn test_transpose_involution() {
    let x = Expr::reshape(&col(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]), 2).unwrap();
    let t = Expr::transpose(&x);
    let tt = Expr::transpose(&t);

    assert_eq!(t.shape(), (3, 2));
    assert_eq!(t.value_at(2, 1), x.value_at(1, 2));
    assert_eq!(materialize(&tt), materialize(&x));
}

/// Scale multiplies every element.
#[test]
fn test_scale() {
    let x = Expr::reshape(&col(&[1.0, 2.0, 3.0, 4.0]), 2).unwrap();
    let s = Expr::scale(0.5, &x);

    assert_eq!(s.shape(), (2, 2));
    assert_eq!(materialize(&s).as_slice(), &[0.5, 1.0, 1.5, 2.0]);
}

// ============================================================================
// Combinator Tests
// ============================================================================

/// Element-wise subtraction of equal shapes.
#[test]
fn test_subtract() {
    let a = Expr::reshape(&col(&[5.0, 6.0, 7.0, 8.0]), 2).unwrap();
    let b = Expr::<f64>::ones(2, 2);
    let d = Expr::subtract(&a, &b).unwrap();

    assert_eq!(materialize(&d).as_slice(), &[4.0, 5.0, 6.0, 7.0]);
}

/// Matrix product against a hand-computed result.
#[test]
fn test_matmul_values() {
    // A = [[1, 3, 5], [2, 4, 6]]
    let a = Expr::reshape(&col(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]), 2).unwrap();
    // A * A' = [[35, 44], [44, 56]]
    let g = Expr::matmul(&a, &Expr::transpose(&a)).unwrap();
    let m = materialize(&g);

    assert_eq!(m.shape(), (2, 2));
    assert_relative_eq!(m[(0, 0)], 35.0);
    assert_relative_eq!(m[(0, 1)], 44.0);
    assert_relative_eq!(m[(1, 0)], 44.0);
    assert_relative_eq!(m[(1, 1)], 56.0);
}

/// Matrix product agrees with nalgebra.
#[test]
fn test_matmul_matches_nalgebra() {
    let a_data: Vec<f64> = (0..12).map(|k| (k as f64) * 0.5 - 2.0).collect();
    let b_data: Vec<f64> = (0..8).map(|k| 1.0 / (k as f64 + 1.0)).collect();

    let a = Matrix::from_column_slice(3, 4, &a_data).unwrap();
    let b = Matrix::from_column_slice(4, 2, &b_data).unwrap();

    let lazy = materialize(&Expr::matmul(&Expr::dense(a.clone()), &Expr::dense(b.clone())).unwrap());
    let eager = a.to_dmatrix() * b.to_dmatrix();

    assert_eq!(lazy.shape(), (3, 2));
    for (x, y) in lazy.as_slice().iter().zip(eager.as_slice()) {
        assert_relative_eq!(*x, *y, epsilon = 1e-12);
    }
}

/// `ones(1, n) * x'` sums each row of `x`.
#[test]
fn test_ones_product_sums_rows() {
    let x = Expr::reshape(&col(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]), 2).unwrap();
    let sums = Expr::matmul(&Expr::ones(1, 3), &Expr::transpose(&x)).unwrap();

    assert_eq!(sums.shape(), (1, 2));
    assert_relative_eq!(sums.value_at(0, 0), 9.0);
    assert_relative_eq!(sums.value_at(0, 1), 12.0);
}

// ============================================================================
// Construction Error Tests
// ============================================================================

/// Subtracting different shapes fails at construction.
#[test]
fn test_subtract_shape_mismatch() {
    let a = Expr::<f64>::ones(2, 3);
    let b = Expr::<f64>::ones(3, 2);

    assert_eq!(
        Expr::subtract(&a, &b).unwrap_err(),
        FitError::ShapeMismatch {
            op: "subtract",
            left: (2, 3),
            right: (3, 2),
        }
    );
}

/// A product with mismatched inner dimensions fails at construction.
#[test]
fn test_matmul_shape_mismatch() {
    let a = Expr::<f64>::ones(2, 3);

    assert_eq!(
        Expr::matmul(&a, &a).unwrap_err(),
        FitError::ShapeMismatch {
            op: "matmul",
            left: (2, 3),
            right: (2, 3),
        }
    );
}

// ============================================================================
// Sharing and Materialization Tests
// ============================================================================

/// Cloning a handle shares the node rather than copying it.
#[test]
fn test_shared_subexpression() {
    let x = Expr::reshape(&col(&[1.0, 2.0, 3.0, 4.0]), 2).unwrap();
    let alias = x.clone();

    assert!(Expr::ptr_eq(&x, &alias));
    assert!(!Expr::ptr_eq(&x, &Expr::transpose(&x)));

    // x - x, both operands the same node
    let zero = Expr::subtract(&x, &alias).unwrap();
    assert!(materialize(&zero).as_slice().iter().all(|&v| v == 0.0));
}

/// Reads are pure: repeated evaluation gives identical values.
#[test]
fn test_value_at_is_pure() {
    let x = Expr::reshape(&col(&[0.1, 0.2, 0.3, 0.4, 0.5, 0.6]), 3).unwrap();
    let g = Expr::matmul(&Expr::transpose(&x), &x).unwrap();

    let first = g.value_at(1, 0);
    for _ in 0..5 {
        assert_eq!(g.value_at(1, 0), first);
    }
}

/// Materializing a materialized expression changes nothing.
#[test]
fn test_materialize_idempotent() {
    let x = Expr::reshape(&col(&[1.0, -2.0, 3.5, 0.25, 8.0, -1.0]), 3).unwrap();
    let g = Expr::scale(2.0, &Expr::matmul(&x, &Expr::transpose(&x)).unwrap());

    let once = materialize(&g);
    let twice = materialize(&once);
    assert_eq!(once, twice);

    let leaf = g.materialized();
    assert_eq!(leaf.kind(), "dense");
    assert_eq!(materialize(&leaf), once);
}

/// Reshape works over non-column sources.
#[test]
fn test_reshape_of_transpose() {
    // x' = [[1, 2], [3, 4], [5, 6]], flat column-major [1, 3, 5, 2, 4, 6]
    let x = Expr::reshape(&col(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]), 2).unwrap();
    let flat = Expr::reshape(&Expr::transpose(&x), 6).unwrap();

    assert_eq!(
        materialize(&flat).as_slice(),
        &[1.0, 3.0, 5.0, 2.0, 4.0, 6.0]
    );
}

/// An empty expression materializes to an empty matrix.
#[test]
fn test_materialize_empty() {
    let e = Expr::<f64>::ones(0, 3);
    let m = materialize(&e);
    assert_eq!(m.shape(), (0, 3));
    assert!(m.as_slice().is_empty());
}
