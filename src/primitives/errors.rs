//! Error types for expression construction, covariance, and circle fitting.
//!
//! ## Purpose
//!
//! This module defines [`FitError`], the single error type returned by every
//! fallible operation in the crate: building lazy expressions, computing a
//! covariance matrix, evaluating the circle loss, and running the optimizer.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Errors are raised at the first violated precondition.
//! * **Construction-time shapes**: Shape mismatches are reported when a node is
//!   built, never during evaluation.
//! * **no_std**: `Display` is hand-written; `std::error::Error` is only
//!   implemented when the `std` feature is enabled.
//!
//! ## Non-goals
//!
//! * This module does not attempt recovery; every error is a local report to
//!   the caller.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::string::String;

use core::fmt;

/// Errors produced by lazyfit operations.
#[derive(Debug, Clone, PartialEq)]
pub enum FitError {
    /// Input data is empty.
    EmptyInput,

    /// Sample dimensionality must be at least 1.
    InvalidDimension(usize),

    /// Operand shapes are incompatible for a binary expression.
    ShapeMismatch {
        /// Name of the operation being built.
        op: &'static str,
        /// Shape `(rows, cols)` of the left operand.
        left: (usize, usize),
        /// Shape `(rows, cols)` of the right operand.
        right: (usize, usize),
    },

    /// The source element count is not a multiple of the target row count.
    InvalidReshape {
        /// Number of elements in the source expression.
        len: usize,
        /// Requested number of rows.
        rows: usize,
    },

    /// Not enough samples for the requested statistic.
    InsufficientSamples {
        /// Number of samples supplied.
        got: usize,
        /// Minimum number of samples required.
        min: usize,
    },

    /// A flat `(x, y)` point buffer has an odd length.
    InvalidPointData {
        /// Length of the supplied buffer.
        len: usize,
    },

    /// Input contains a non-finite value.
    InvalidNumericValue(String),

    /// Optimizer step size must be finite and positive.
    InvalidStepSize(f64),

    /// The optimizer produced a non-finite result (NaN/Inf).
    DomainError(String),

    /// A builder parameter was set more than once.
    DuplicateParameter {
        /// Name of the repeated parameter.
        parameter: &'static str,
    },
}

impl fmt::Display for FitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitError::EmptyInput => write!(f, "Input data is empty"),
            FitError::InvalidDimension(dim) => {
                write!(f, "Invalid dimension: {} (must be at least 1)", dim)
            }
            FitError::ShapeMismatch { op, left, right } => write!(
                f,
                "Shape mismatch in {}: left is {}x{}, right is {}x{}",
                op, left.0, left.1, right.0, right.1
            ),
            FitError::InvalidReshape { len, rows } => write!(
                f,
                "Invalid reshape: {} elements cannot be split into {} rows",
                len, rows
            ),
            FitError::InsufficientSamples { got, min } => {
                write!(f, "Too few samples: got {}, need at least {}", got, min)
            }
            FitError::InvalidPointData { len } => write!(
                f,
                "Invalid point data: length {} is not a whole number of (x, y) pairs",
                len
            ),
            FitError::InvalidNumericValue(msg) => write!(f, "Invalid numeric value: {}", msg),
            FitError::InvalidStepSize(step) => {
                write!(f, "Invalid step size: {} (must be > 0 and finite)", step)
            }
            FitError::DomainError(msg) => write!(f, "Domain error: {}", msg),
            FitError::DuplicateParameter { parameter } => write!(
                f,
                "Parameter '{}' was set multiple times. Each parameter can only be configured once.",
                parameter
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FitError {}
