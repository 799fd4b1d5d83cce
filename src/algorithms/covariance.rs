//! Sample covariance as a composition of lazy matrix expressions.
//!
//! ## Purpose
//!
//! This module computes the unbiased sample covariance matrix of `N` samples of
//! dimension `dim` by composing the lazy expression nodes of
//! [`crate::math::expr`].
//!
//! ## Design notes
//!
//! * **Formula**: With `X` the `dim x N` sample matrix (one sample per column):
//!
//! ```text
//! mu         = (1/N)     * ones(1, N) * X'        (1 x dim, materialized)
//! mu_rep     = (ones(N, 1) * mu)'                 (dim x N)
//! Xc         = X - mu_rep
//! covariance = (1/(N-1)) * Xc * Xc'               (dim x dim)
//! ```
//!
//! * **Asymmetric materialization**: `mu` is forced to dense storage as soon as
//!   it is built. Left lazy, every element of `Xc` would re-sum a whole row of
//!   `X`. Everything else stays lazy until the final materialization.
//!
//! ## Invariants
//!
//! * The result is `dim x dim` and symmetric up to rounding.
//!
//! ## Non-goals
//!
//! * This module does not use an online (Welford) update.

// External dependencies
use log::debug;
use num_traits::Float;

// Internal dependencies
use crate::math::expr::{materialize, Expr};
use crate::math::from_count;
use crate::primitives::errors::FitError;
use crate::primitives::matrix::Matrix;

// ============================================================================
// Covariance
// ============================================================================

/// The covariance formula for one dataset, built but not yet evaluated.
#[derive(Debug, Clone)]
pub struct Covariance<T> {
    dim: usize,
    samples: usize,
    mean: Matrix<T>,
    centered: Expr<T>,
    covariance: Expr<T>,
}

impl<T: Float> Covariance<T> {
    /// Build the formula for `data`, laid out sample by sample.
    ///
    /// `data` holds `dim * N` values; the `dim` features of each sample are
    /// contiguous. Only the mean is evaluated here.
    pub fn new(dim: usize, data: &[T]) -> Result<Self, FitError> {
        if dim == 0 {
            return Err(FitError::InvalidDimension(dim));
        }
        if data.is_empty() {
            return Err(FitError::EmptyInput);
        }

        let v = Expr::<T>::column_vector(data);
        let x = Expr::reshape(&v, dim)?;
        let n = data.len() / dim;
        if n < 2 {
            return Err(FitError::InsufficientSamples { got: n, min: 2 });
        }
        debug!("building covariance formula: dim={}, samples={}", dim, n);

        let inv_n = T::one() / from_count::<T>(n);
        let feature_sums = Expr::matmul(&Expr::ones(1, n), &Expr::transpose(&x))?;
        let mean = materialize(&Expr::scale(inv_n, &feature_sums));

        let mean_repeated = Expr::transpose(&Expr::matmul(
            &Expr::ones(n, 1),
            &Expr::dense(mean.clone()),
        )?);
        let centered = Expr::subtract(&x, &mean_repeated)?;

        let inv_dof = T::one() / from_count::<T>(n - 1);
        let scatter = Expr::matmul(&centered, &Expr::transpose(&centered))?;
        let covariance = Expr::scale(inv_dof, &scatter);

        Ok(Self {
            dim,
            samples: n,
            mean,
            centered,
            covariance,
        })
    }

    /// Sample dimensionality.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of samples `N`.
    #[inline]
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Per-feature means as a `1 x dim` row vector.
    #[inline]
    pub fn mean(&self) -> &Matrix<T> {
        &self.mean
    }

    /// The centered samples `X - mu`, `dim x N`, still lazy.
    #[inline]
    pub fn centered(&self) -> &Expr<T> {
        &self.centered
    }

    /// The unevaluated `dim x dim` covariance expression.
    #[inline]
    pub fn expression(&self) -> &Expr<T> {
        &self.covariance
    }

    /// Evaluate the covariance matrix.
    pub fn matrix(&self) -> Matrix<T> {
        materialize(&self.covariance)
    }
}

/// Compute the unbiased sample covariance of `data` in one call.
pub fn covariance_matrix<T: Float>(dim: usize, data: &[T]) -> Result<Matrix<T>, FitError> {
    Ok(Covariance::new(dim, data)?.matrix())
}
