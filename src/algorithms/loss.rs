//! Circle-fit loss: mean squared distance from the points to a circle.
//!
//! ## Purpose
//!
//! This module evaluates the objective minimized by the circle fit,
//!
//! ```text
//! L(cx, cy, r) = (1/N) * sum_k (sqrt((x_k - cx)^2 + (y_k - cy)^2) - r)^2
//! ```
//!
//! once over dual numbers (value and one partial derivative) and once over
//! plain floats (value only, for reporting).
//!
//! ## Design notes
//!
//! * **Flat points**: Points are a flat `[x0, y0, x1, y1, ...]` buffer.
//! * **Constants vs parameters**: Point coordinates enter the dual pass as
//!   constants; only the parameters can carry a derivative.
//! * **Agreement**: Both passes perform the same operations in the same order,
//!   so the plain loss equals the value part of the dual loss.
//!
//! ## Invariants
//!
//! * Callers pass at least one point and an even-length buffer
//!   (see [`crate::engine::validator::Validator::validate_points`]).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::dual::DualNumber;
use crate::math::from_count;
use crate::primitives::params::CircleParams;

/// Iterate `(x, y)` pairs of a flat point buffer.
#[inline]
pub(crate) fn points<T: Copy>(data: &[T]) -> impl Iterator<Item = (T, T)> + '_ {
    data.chunks_exact(2).map(|p| (p[0], p[1]))
}

// ============================================================================
// Loss
// ============================================================================

/// Plain loss value at `params`.
pub fn loss<T: Float>(data: &[T], params: &CircleParams<T>) -> T {
    let n = data.len() / 2;
    let sum = points(data).fold(T::zero(), |sum, (x, y)| {
        let dx = x - params.cx;
        let dy = y - params.cy;
        let dist_to_center = (dx * dx + dy * dy).sqrt();
        let dist_to_circle = dist_to_center - params.r;
        sum + dist_to_circle * dist_to_circle
    });
    sum * (T::one() / from_count::<T>(n))
}

/// Loss over dual-number parameters.
///
/// The derivative of the result is the partial derivative of the loss along
/// whichever parameter was seeded as a variable.
pub fn loss_dual<T: Float>(data: &[T], params: &CircleParams<DualNumber<T>>) -> DualNumber<T> {
    let n = data.len() / 2;
    let sum = points(data).fold(DualNumber::constant(T::zero()), |sum, (x, y)| {
        let x = DualNumber::constant(x);
        let y = DualNumber::constant(y);
        let dist_to_center = ((x - params.cx).square() + (y - params.cy).square()).sqrt();
        let dist_to_circle = dist_to_center - params.r;
        sum + dist_to_circle.square()
    });
    sum * DualNumber::constant(T::one() / from_count::<T>(n))
}

// ============================================================================
// Residuals
// ============================================================================

/// Signed distance from each point to the circle (`> 0` outside, `< 0` inside).
pub fn residuals<T: Float>(data: &[T], params: &CircleParams<T>) -> Vec<T> {
    points(data)
        .map(|(x, y)| {
            let dx = x - params.cx;
            let dy = y - params.cy;
            (dx * dx + dy * dy).sqrt() - params.r
        })
        .collect()
}
