//! Gradient of the circle loss by forward-mode differentiation.
//!
//! ## Purpose
//!
//! This module assembles the gradient of the circle loss from three dual-number
//! passes, one per parameter.
//!
//! ## Design notes
//!
//! * **One pass per input**: Pass `k` lifts parameter `k` as a variable and the
//!   other two as constants; the derivative of that pass is `dL/dp_k`.
//! * **Cost**: Three full walks over the points. Forward mode scales with the
//!   number of inputs, which is fixed at three here.
//!
//! ## Non-goals
//!
//! * This module does not implement reverse-mode accumulation.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::loss::loss_dual;
use crate::math::dual::DualNumber;
use crate::primitives::params::{Axis, CircleParams};

impl<T: Float> CircleParams<T> {
    /// Lift to dual numbers with only `axis` seeded as the variable.
    pub fn seeded(&self, axis: Axis) -> CircleParams<DualNumber<T>> {
        self.map(|a, v| {
            if a == axis {
                DualNumber::variable(v)
            } else {
                DualNumber::constant(v)
            }
        })
    }
}

/// Partial derivative of the loss along `axis`.
#[inline]
pub fn partial<T: Float>(data: &[T], params: &CircleParams<T>, axis: Axis) -> T {
    loss_dual(data, &params.seeded(axis)).derivative()
}

/// Gradient `(dL/dcx, dL/dcy, dL/dr)` of the loss at `params`.
pub fn gradient<T: Float>(data: &[T], params: &CircleParams<T>) -> CircleParams<T> {
    params.map(|axis, _| partial(data, params, axis))
}
