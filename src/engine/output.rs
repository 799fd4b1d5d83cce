//! Result types for the circle fit.
//!
//! ## Purpose
//!
//! This module defines [`FitResult`], the value returned by
//! [`CircleFitter::fit`](crate::api::CircleFitter::fit), and [`Iterate`], one
//! entry of the optional optimization history. `FitResult` implements
//! `Display` as a human-readable report.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt::{Display, Formatter, LowerExp, Result};
use num_traits::Float;

// Internal dependencies
use crate::primitives::params::CircleParams;

/// Parameters and loss at one optimizer step.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Iterate<T> {
    /// Parameters after this step.
    pub params: CircleParams<T>,
    /// Plain loss at `params`.
    pub loss: T,
}

impl<T> Iterate<T> {
    /// Pair parameters with their loss.
    #[inline]
    pub const fn new(params: CircleParams<T>, loss: T) -> Self {
        Self { params, loss }
    }
}

/// Outcome of a circle fit.
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult<T> {
    /// Fitted circle.
    pub params: CircleParams<T>,

    /// Loss at the fitted circle.
    pub loss: T,

    /// Number of points fitted.
    pub points: usize,

    /// Number of gradient steps taken.
    pub iterations: usize,

    /// Step size used.
    pub step_size: T,

    /// Every iterate from the initial guess on (if requested).
    pub history: Option<Vec<Iterate<T>>>,

    /// Signed distance of each point to the fitted circle (if requested).
    pub residuals: Option<Vec<T>>,
}

impl<T: Float> FitResult<T> {
    /// Root-mean-square distance of the points to the fitted circle.
    #[inline]
    pub fn rms_distance(&self) -> T {
        self.loss.sqrt()
    }
}

impl<T: Float + Display + LowerExp> Display for FitResult<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Data points: {}", self.points)?;
        writeln!(f, "  Iterations:  {}", self.iterations)?;
        writeln!(f, "  Step size:   {}", self.step_size)?;
        writeln!(f)?;

        writeln!(f, "Circle:")?;
        writeln!(f, "  cx:   {:.6}", self.params.cx)?;
        writeln!(f, "  cy:   {:.6}", self.params.cy)?;
        writeln!(f, "  r:    {:.6}", self.params.r)?;
        writeln!(f, "  Loss: {:.6e}", self.loss)?;

        if let Some(history) = &self.history {
            writeln!(f)?;
            writeln!(f, "History:")?;
            writeln!(
                f,
                "  {:>6} {:>12} {:>12} {:>12} {:>14}",
                "Iter", "cx", "cy", "r", "Loss"
            )?;
            writeln!(f, "  {}", "-".repeat(60))?;
            for (i, it) in history.iter().enumerate() {
                writeln!(
                    f,
                    "  {:>6} {:>12.6} {:>12.6} {:>12.6} {:>14.6e}",
                    i, it.params.cx, it.params.cy, it.params.r, it.loss
                )?;
            }
        }

        if let Some(residuals) = &self.residuals {
            writeln!(f)?;
            writeln!(f, "Residuals:")?;
            for (i, r) in residuals.iter().enumerate() {
                writeln!(f, "  {:>6} {:>12.6}", i, r)?;
            }
        }

        Ok(())
    }
}
