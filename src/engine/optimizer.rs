//! Fixed-iteration gradient descent for the circle fit.
//!
//! ## Purpose
//!
//! This module provides the execution engine of the circle fit: it repeatedly
//! evaluates the forward-mode gradient of the loss and steps against it.
//!
//! ## Design notes
//!
//! * **Update rule**: `params <- params + (-step_size) * gradient(params)`.
//! * **Fixed length**: The loop always runs exactly `iterations` steps. There is
//!   no convergence test, no adaptive step and no divergence guard.
//! * **Explicit configuration**: Step size and iteration count come from an
//!   [`OptimizerConfig`] passed in by the caller.
//! * **Optional history**: Recording every iterate (and its loss) costs one
//!   extra plain loss evaluation per step, so it is off by default.
//!
//! ## Invariants
//!
//! * The recorded history, when enabled, has `iterations + 1` entries and starts
//!   with the initial parameters.
//!
//! ## Non-goals
//!
//! * This module does not validate input data (handled by `validator`).
//! * This module does not implement line search or momentum.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use log::{debug, log_enabled, trace, Level};
use num_traits::Float;

// Internal dependencies
use crate::algorithms::gradient::gradient;
use crate::algorithms::loss::loss;
use crate::engine::output::Iterate;
use crate::primitives::params::CircleParams;

// ============================================================================
// Defaults
// ============================================================================

/// Default gradient-descent step size.
pub const DEFAULT_STEP_SIZE: f64 = 0.25;

/// Default number of gradient-descent iterations.
pub const DEFAULT_ITERATIONS: usize = 30;

// ============================================================================
// Configuration
// ============================================================================

/// Hyperparameters of a gradient-descent run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizerConfig<T> {
    /// Step size applied to the negative gradient.
    pub step_size: T,

    /// Number of update steps.
    pub iterations: usize,

    /// Record every iterate and its loss.
    pub return_history: bool,

    /// Compute per-point residuals of the final circle.
    pub return_residuals: bool,
}

impl<T: Float> Default for OptimizerConfig<T> {
    fn default() -> Self {
        Self {
            step_size: T::from(DEFAULT_STEP_SIZE).unwrap_or_else(T::nan),
            iterations: DEFAULT_ITERATIONS,
            return_history: false,
            return_residuals: false,
        }
    }
}

// ============================================================================
// Output
// ============================================================================

/// Raw output of one optimizer run.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerOutput<T> {
    /// Parameters after the last step.
    pub params: CircleParams<T>,

    /// Every iterate, starting with the initial parameters (if requested).
    pub history: Option<Vec<Iterate<T>>>,
}

// ============================================================================
// Gradient Descent
// ============================================================================

/// Fixed-iteration gradient-descent executor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientDescent<T> {
    config: OptimizerConfig<T>,
}

impl<T: Float> Default for GradientDescent<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> GradientDescent<T> {
    /// Create an executor with default parameters.
    pub fn new() -> Self {
        Self::from_config(OptimizerConfig::default())
    }

    /// Create an executor from an `OptimizerConfig`.
    pub fn from_config(config: OptimizerConfig<T>) -> Self {
        Self { config }
    }

    /// Set the step size.
    pub fn step_size(mut self, step_size: T) -> Self {
        self.config.step_size = step_size;
        self
    }

    /// Set the number of iterations.
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.config.iterations = iterations;
        self
    }

    /// Enable or disable history recording.
    pub fn return_history(mut self, enabled: bool) -> Self {
        self.config.return_history = enabled;
        self
    }

    /// The active configuration.
    #[inline]
    pub fn config(&self) -> &OptimizerConfig<T> {
        &self.config
    }

    // ========================================================================
    // Main Entry Point
    // ========================================================================

    /// Run gradient descent from `initial` over the flat point buffer `data`.
    pub fn run(&self, data: &[T], initial: CircleParams<T>) -> OptimizerOutput<T> {
        let OptimizerConfig {
            step_size,
            iterations,
            return_history,
            ..
        } = self.config;

        debug!(
            "gradient descent: points={}, step_size={}, iterations={}",
            data.len() / 2,
            step_size.to_f64().unwrap_or(f64::NAN),
            iterations
        );

        let mut history = if return_history {
            let mut h = Vec::with_capacity(iterations + 1);
            h.push(Iterate::new(initial, loss(data, &initial)));
            Some(h)
        } else {
            None
        };

        let mut params = initial;
        for iteration in 0..iterations {
            let grad = gradient(data, &params);
            params = params + grad.scale(-step_size);

            if log_enabled!(Level::Trace) {
                trace!(
                    "iteration {}: params={}, gradient={}",
                    iteration + 1,
                    to_f64_params(&params),
                    to_f64_params(&grad)
                );
            }
            if let Some(h) = history.as_mut() {
                h.push(Iterate::new(params, loss(data, &params)));
            }
        }

        debug!("gradient descent finished: params={}", to_f64_params(&params));

        OptimizerOutput { params, history }
    }
}

/// Widen parameters to `f64` for log output.
fn to_f64_params<T: Float>(params: &CircleParams<T>) -> CircleParams<f64> {
    params.map(|_, v| v.to_f64().unwrap_or(f64::NAN))
}
