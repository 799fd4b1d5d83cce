//! # lazyfit: Lazy Matrix Expressions and Forward-Mode Fitting for Rust
//!
//! Two small numeric engines and the computations built on them:
//!
//! - a **lazy matrix expression algebra** used to compute the unbiased sample
//!   covariance matrix of a dataset, and
//! - a **forward-mode dual-number differentiator** driving a gradient-descent
//!   fit of a circle (center and radius) to 2-D points.
//!
//! ## Lazy matrix expressions
//!
//! An [`Expr`](prelude::Expr) describes a matrix without storing it. Leaves
//! (column vectors, dense matrices, constant fills) are combined through views
//! (reshape, transpose, scale) and combinators (subtract, matrix product).
//! Nothing is computed until [`materialize`](prelude::materialize) walks the
//! expression once per output cell.
//!
//! ```rust
//! use lazyfit::prelude::*;
//!
//! let v = Expr::<f64>::column_vector(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
//! let x = Expr::reshape(&v, 2)?;                 // 2x3, column-major
//! let gram = Expr::matmul(&x, &Expr::transpose(&x))?;
//!
//! let m = materialize(&gram);
//! assert_eq!(m.shape(), (2, 2));
//! assert_eq!(m[(0, 0)], 1.0 + 9.0 + 25.0);
//! # Result::<(), FitError>::Ok(())
//! ```
//!
//! Sub-expressions are shared, not copied: handing the same `Expr` to two
//! parents builds a DAG. Every read re-evaluates the whole sub-tree, so an
//! operand that is both expensive and reused should be materialized first
//! (see [`Expr::materialized`](prelude::Expr::materialized)).
//!
//! ## Sample covariance
//!
//! ```rust
//! use lazyfit::prelude::*;
//!
//! // Four 2-D samples, features of each sample contiguous.
//! let data = [0.0_f64, 0.0, 2.0, 0.0, 0.0, 2.0, 2.0, 2.0];
//! let cov = materialize_covariance(2, &data)?;
//!
//! assert!((cov[(0, 0)] - 4.0 / 3.0).abs() < 1e-12);
//! assert!(cov[(0, 1)].abs() < 1e-12);
//! # Result::<(), FitError>::Ok(())
//! ```
//!
//! ## Circle fitting
//!
//! The loss is the mean squared distance from the points to the circle. Its
//! gradient is computed with dual numbers: three forward passes, one per
//! parameter.
//!
//! ```rust
//! use lazyfit::prelude::*;
//!
//! // Points on the circle centred at (5, 5) with radius 3.
//! let points = [8.0_f64, 5.0, 5.0, 8.0, 2.0, 5.0, 5.0, 2.0];
//!
//! let fitter = CircleFit::new()
//!     .step_size(0.25)
//!     .iterations(200)
//!     .build()?;
//!
//! let result = fitter.fit(&points, CircleParams::new(4.0, 4.0, 2.0))?;
//! assert!((result.params.r - 3.0).abs() < 0.01);
//! println!("{}", result);
//! # Result::<(), FitError>::Ok(())
//! ```
//!
//! The same operations are available as free functions:
//! [`evaluate_loss`](prelude::evaluate_loss), [`gradient`](prelude::gradient)
//! and [`optimize`](prelude::optimize).
//!
//! ## Errors
//!
//! Every fallible call returns `Result<_, FitError>`. Shapes are checked when
//! an expression node is built; inputs are checked before any computation.
//!
//! ## Features
//!
//! - `std` (default): standard library support. Without it the crate is
//!   `no_std` + `alloc`.
//! - `serde`: serialization of parameters and the JSON problem formats in
//!   [`problem`].
//! - `cli`: the `lazyfit` command-line runner.
//!
//! ## Logging
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade: `debug` for
//! formula construction and optimizer runs, `trace` for every optimizer step
//! and materialization. Install any logger to see the output.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// ============================================================================
// Internal Modules
// ============================================================================

// Layer 1: Primitives - data structures.
//
// Contains the error type, dense matrix storage and the circle parameter triple.
mod primitives;

// Layer 2: Math - numeric engines.
//
// Contains lazy matrix expressions with materialization, and dual numbers.
mod math;

// Layer 3: Algorithms - covariance and circle-fit computations.
//
// Contains the covariance formula, the circle loss, and its forward-mode gradient.
mod algorithms;

// Layer 4: Engine - orchestration and execution control.
//
// Contains validation, the gradient-descent loop, and result assembly.
mod engine;

// Layer 5: High-level API.
//
// Provides the `CircleFit` builder and the free-function entry points.
mod api;

/// JSON problem and result formats.
#[cfg(feature = "serde")]
pub mod problem;

// ============================================================================
// Prelude
// ============================================================================

/// Standard lazyfit prelude.
///
/// This module is intended to be wildcard-imported for convenient access
/// to the most commonly used types:
///
/// ```
/// use lazyfit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{
        evaluate_loss, gradient, materialize, materialize_covariance, optimize, Axis,
        CircleFitBuilder as CircleFit, CircleFitter, CircleParams, Covariance, DualNumber,
        Expr, Expression, FitError, FitResult, GradientDescent, Iterate, Matrix,
        OptimizerConfig, OptimizerOutput, DEFAULT_ITERATIONS, DEFAULT_STEP_SIZE,
    };
}

// ============================================================================
// Internal API
// ============================================================================

/// Internal modules for development and testing.
///
/// This module re-exports internal modules for development and testing purposes.
/// It is only available with the `dev` feature enabled.
///
/// **Warning**: These are internal implementation details and may change without notice.
/// Do not use in production code.
#[cfg(feature = "dev")]
pub mod internals {
    /// Internal primitive types.
    pub mod primitives {
        pub use crate::primitives::*;
    }
    /// Internal numeric engines.
    pub mod math {
        pub use crate::math::*;
    }
    /// Internal algorithms.
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    /// Internal execution engine.
    pub mod engine {
        pub use crate::engine::*;
    }
    /// Internal API.
    pub mod api {
        pub use crate::api::*;
    }
}
