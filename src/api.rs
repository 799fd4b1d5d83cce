//! High-level API for covariance and circle fitting.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry points: a fluent builder
//! for configuring the circle-fit optimizer, and free functions for the four
//! core calls (covariance, loss, gradient, optimize).
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters.
//! * **Validated**: Hyperparameters are validated when `.build()` is called;
//!   input data is validated on every call.
//! * **Explicit**: Hyperparameters travel with the fitter, never through global state.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`CircleFitBuilder`] via `CircleFit::new()`.
//! 2. Chain configuration methods (`.step_size()`, `.iterations()`, etc.).
//! 3. Call `.build()` to obtain a validated [`CircleFitter`].

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::covariance::covariance_matrix;
use crate::algorithms::gradient::gradient as loss_gradient;
use crate::algorithms::loss::{loss, residuals};
use crate::engine::validator::Validator;

// Publicly re-exported types
pub use crate::algorithms::covariance::Covariance;
pub use crate::engine::optimizer::{
    GradientDescent, OptimizerConfig, OptimizerOutput, DEFAULT_ITERATIONS, DEFAULT_STEP_SIZE,
};
pub use crate::engine::output::{FitResult, Iterate};
pub use crate::math::dual::DualNumber;
pub use crate::math::expr::{materialize, Expr, Expression};
pub use crate::primitives::errors::FitError;
pub use crate::primitives::matrix::Matrix;
pub use crate::primitives::params::{Axis, CircleParams};

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for configuring the circle-fit optimizer.
#[derive(Debug, Clone)]
pub struct CircleFitBuilder<T> {
    /// Gradient-descent step size (default: 0.25).
    pub step_size: Option<T>,

    /// Number of gradient-descent iterations (default: 30).
    pub iterations: Option<usize>,

    /// Record every iterate and its loss.
    pub return_history: Option<bool>,

    /// Return per-point residuals of the fitted circle.
    pub return_residuals: Option<bool>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for CircleFitBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> CircleFitBuilder<T> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            step_size: None,
            iterations: None,
            return_history: None,
            return_residuals: None,
            duplicate_param: None,
        }
    }

    /// Set the gradient-descent step size.
    pub fn step_size(mut self, step_size: T) -> Self {
        if self.step_size.is_some() {
            self.duplicate_param = Some("step_size");
        }
        self.step_size = Some(step_size);
        self
    }

    /// Set the number of gradient-descent iterations.
    pub fn iterations(mut self, iterations: usize) -> Self {
        if self.iterations.is_some() {
            self.duplicate_param = Some("iterations");
        }
        self.iterations = Some(iterations);
        self
    }

    /// Include every iterate and its loss in the result.
    pub fn return_history(mut self) -> Self {
        self.return_history = Some(true);
        self
    }

    /// Include per-point residuals in the result.
    pub fn return_residuals(mut self) -> Self {
        self.return_residuals = Some(true);
        self
    }

    /// Validate the configuration and build a fitter.
    pub fn build(self) -> Result<CircleFitter<T>, FitError> {
        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let defaults = OptimizerConfig::<T>::default();
        let config = OptimizerConfig {
            step_size: self.step_size.unwrap_or(defaults.step_size),
            iterations: self.iterations.unwrap_or(defaults.iterations),
            return_history: self.return_history.unwrap_or(false),
            return_residuals: self.return_residuals.unwrap_or(false),
        };

        // Validate step size
        Validator::validate_step_size(config.step_size)?;

        Ok(CircleFitter { config })
    }
}

// ============================================================================
// Circle Fitter
// ============================================================================

/// A validated circle-fit configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleFitter<T> {
    config: OptimizerConfig<T>,
}

impl<T: Float> CircleFitter<T> {
    /// The validated optimizer configuration.
    #[inline]
    pub fn config(&self) -> &OptimizerConfig<T> {
        &self.config
    }

    /// Loss of `params` over the flat `(x, y)` point buffer `data`.
    ///
    /// Returns [`FitError::DomainError`] if the loss is not finite.
    pub fn loss(&self, data: &[T], params: CircleParams<T>) -> Result<T, FitError> {
        Validator::validate_points(data)?;
        Validator::validate_params(&params)?;

        let value = loss(data, &params);
        if !value.is_finite() {
            return Err(FitError::DomainError(format!(
                "non-finite loss at {}",
                params_f64(&params)
            )));
        }
        Ok(value)
    }

    /// Gradient of the loss at `params`.
    ///
    /// A point at the circle center has no defined derivative; that case, like
    /// any other non-finite partial, is reported as [`FitError::DomainError`].
    pub fn gradient(
        &self,
        data: &[T],
        params: CircleParams<T>,
    ) -> Result<CircleParams<T>, FitError> {
        Validator::validate_points(data)?;
        Validator::validate_params(&params)?;

        let grad = loss_gradient(data, &params);
        if !grad.is_finite() {
            return Err(FitError::DomainError(format!(
                "non-finite gradient at {}",
                params_f64(&params)
            )));
        }
        Ok(grad)
    }

    /// Run gradient descent from `initial`.
    ///
    /// The loop always runs the configured number of iterations. If the final
    /// parameters or loss are not finite (a point at the circle center, or a
    /// diverging step size), [`FitError::DomainError`] is returned.
    pub fn fit(&self, data: &[T], initial: CircleParams<T>) -> Result<FitResult<T>, FitError> {
        Validator::validate_points(data)?;
        Validator::validate_params(&initial)?;

        let output = GradientDescent::from_config(self.config).run(data, initial);
        let params = output.params;
        let final_loss = loss(data, &params);

        if !params.is_finite() || !final_loss.is_finite() {
            return Err(FitError::DomainError(format!(
                "non-finite result after {} iterations",
                self.config.iterations
            )));
        }

        let residuals = if self.config.return_residuals {
            Some(residuals(data, &params))
        } else {
            None
        };

        Ok(FitResult {
            params,
            loss: final_loss,
            points: data.len() / 2,
            iterations: self.config.iterations,
            step_size: self.config.step_size,
            history: output.history,
            residuals,
        })
    }
}

/// Widen parameters to `f64` for error messages.
fn params_f64<T: Float>(params: &CircleParams<T>) -> CircleParams<f64> {
    params.map(|_, v| v.to_f64().unwrap_or(f64::NAN))
}

// ============================================================================
// Free Functions
// ============================================================================

/// Unbiased sample covariance of `data`: `dim` features per sample, sample-major.
pub fn materialize_covariance<T: Float>(dim: usize, data: &[T]) -> Result<Matrix<T>, FitError> {
    Validator::validate_samples(data, dim)?;
    covariance_matrix(dim, data)
}

/// Circle-fit loss of `params` over the flat `(x, y)` point buffer `data`.
pub fn evaluate_loss<T: Float>(data: &[T], params: CircleParams<T>) -> Result<T, FitError> {
    CircleFitBuilder::new().build()?.loss(data, params)
}

/// Gradient of the circle-fit loss at `params`.
pub fn gradient<T: Float>(
    data: &[T],
    params: CircleParams<T>,
) -> Result<CircleParams<T>, FitError> {
    CircleFitBuilder::new().build()?.gradient(data, params)
}

/// Run `iterations` gradient-descent steps of size `step_size` from `initial`.
pub fn optimize<T: Float>(
    data: &[T],
    initial: CircleParams<T>,
    step_size: T,
    iterations: usize,
) -> Result<CircleParams<T>, FitError> {
    let fitter = CircleFitBuilder::new()
        .step_size(step_size)
        .iterations(iterations)
        .build()?;
    Ok(fitter.fit(data, initial)?.params)
}
