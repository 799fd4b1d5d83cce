//! Input validation for covariance data, circle-fit data and optimizer settings.
//!
//! ## Purpose
//!
//! This module provides the checks run before any computation: buffer
//! lengths, sample counts, finiteness of every value, and optimizer
//! hyperparameters.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive.
//! * **Generics**: Validation is generic over `Float` types.
//!
//! ## Invariants
//!
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not transform or filter input data.
//! * This module does not compute anything beyond the checks.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::FitError;
use crate::primitives::params::{Axis, CircleParams};

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for inputs and configuration.
///
/// All methods return `Result<(), FitError>` and fail fast upon identifying
/// the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Core Input Validation
    // ========================================================================

    /// Validate covariance input: `dim` features per sample, at least two samples.
    pub fn validate_samples<T: Float>(data: &[T], dim: usize) -> Result<(), FitError> {
        // Check 1: Dimension
        if dim == 0 {
            return Err(FitError::InvalidDimension(dim));
        }

        // Check 2: Non-empty
        if data.is_empty() {
            return Err(FitError::EmptyInput);
        }

        // Check 3: Whole samples
        if data.len() % dim != 0 {
            return Err(FitError::InvalidReshape {
                len: data.len(),
                rows: dim,
            });
        }

        // Check 4: Unbiased estimate needs N - 1 > 0
        let n = data.len() / dim;
        if n < 2 {
            return Err(FitError::InsufficientSamples { got: n, min: 2 });
        }

        // Check 5: All values finite
        Self::validate_finite(data, "data")
    }

    /// Validate a flat `(x, y)` point buffer holding at least one point.
    pub fn validate_points<T: Float>(data: &[T]) -> Result<(), FitError> {
        if data.is_empty() {
            return Err(FitError::EmptyInput);
        }

        if data.len() % 2 != 0 {
            return Err(FitError::InvalidPointData { len: data.len() });
        }

        Self::validate_finite(data, "points")
    }

    /// Validate that every element of `values` is finite.
    pub fn validate_finite<T: Float>(values: &[T], name: &str) -> Result<(), FitError> {
        for (i, &val) in values.iter().enumerate() {
            if !val.is_finite() {
                return Err(FitError::InvalidNumericValue(format!(
                    "{}[{}]={}",
                    name,
                    i,
                    val.to_f64().unwrap_or(f64::NAN)
                )));
            }
        }
        Ok(())
    }

    /// Validate that all circle parameters are finite.
    pub fn validate_params<T: Float>(params: &CircleParams<T>) -> Result<(), FitError> {
        for axis in Axis::ALL {
            let val = *params.get(axis);
            if !val.is_finite() {
                return Err(FitError::InvalidNumericValue(format!(
                    "{}={}",
                    axis.name(),
                    val.to_f64().unwrap_or(f64::NAN)
                )));
            }
        }
        Ok(())
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate the gradient-descent step size.
    pub fn validate_step_size<T: Float>(step_size: T) -> Result<(), FitError> {
        if !step_size.is_finite() || step_size <= T::zero() {
            return Err(FitError::InvalidStepSize(
                step_size.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(duplicate_param: Option<&'static str>) -> Result<(), FitError> {
        if let Some(param) = duplicate_param {
            return Err(FitError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}
