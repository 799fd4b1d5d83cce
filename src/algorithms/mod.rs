//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer contains the two computations the crate exists for:
//! - The sample covariance formula, composed from lazy expressions
//! - The circle-fit loss and its forward-mode gradient
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Sample covariance.
pub mod covariance;

/// Circle-fit loss and residuals.
pub mod loss;

/// Three-pass gradient of the loss.
pub mod gradient;
