//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides the two numeric engines the algorithms are built from:
//! - Lazy matrix expressions and their materialization
//! - Dual numbers for forward-mode differentiation
//!
//! These are reusable building blocks with no covariance- or circle-specific logic.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Lazy matrix expressions.
pub mod expr;

/// Forward-mode dual numbers.
pub mod dual;

// External dependencies
use num_traits::Float;

/// Convert a count to `T`; NaN if the count is not representable.
#[inline]
pub(crate) fn from_count<T: Float>(n: usize) -> T {
    T::from(n).unwrap_or_else(T::nan)
}
