//! Dual numbers for forward-mode automatic differentiation.
//!
//! ## Purpose
//!
//! This module provides [`DualNumber`], a `(value, derivative)` pair that
//! carries the partial derivative of a scalar expression with respect to one
//! designated input alongside its value.
//!
//! ## Design notes
//!
//! * **Operator traits**: `+`, `-`, `*` and unary `-` follow the sum, difference
//!   and product rules; `sqrt` follows the chain rule.
//! * **No graph**: Derivatives flow forward with the values; nothing is recorded.
//! * **Unguarded domain**: `sqrt` of a negative value yields NaN, which then
//!   propagates through every later operation.
//!
//! ## Key concepts
//!
//! * **Seeding**: [`DualNumber::variable`] marks the input being differentiated
//!   (derivative 1); every other input is a [`DualNumber::constant`] (derivative 0).
//!
//! ## Non-goals
//!
//! * This module does not provide reverse-mode accumulation.
//! * This module does not carry more than one derivative channel.

// External dependencies
use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};
use num_traits::Float;

// ============================================================================
// DualNumber
// ============================================================================

/// A value together with its derivative with respect to one input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DualNumber<T> {
    value: T,
    deriv: T,
}

impl<T: Float> DualNumber<T> {
    /// Create a dual number from a value and a derivative.
    #[inline]
    pub const fn new(value: T, deriv: T) -> Self {
        Self { value, deriv }
    }

    /// The input being differentiated: derivative 1.
    #[inline]
    pub fn variable(value: T) -> Self {
        Self::new(value, T::one())
    }

    /// Any other input: derivative 0.
    #[inline]
    pub fn constant(value: T) -> Self {
        Self::new(value, T::zero())
    }

    /// The value component.
    #[inline]
    pub fn value(&self) -> T {
        self.value
    }

    /// The derivative component.
    #[inline]
    pub fn derivative(&self) -> T {
        self.deriv
    }

    /// Square root: `(√a, a' / (2√a))`.
    ///
    /// Not guarded: a negative value gives NaN, and a zero value gives an
    /// infinite (or NaN, for a zero derivative) derivative.
    #[inline]
    pub fn sqrt(self) -> Self {
        let s = self.value.sqrt();
        let half = T::one() / (T::one() + T::one());
        Self::new(s, (half / s) * self.deriv)
    }

    /// `self * self`, differentiated through the product rule.
    #[inline]
    pub fn square(self) -> Self {
        self * self
    }
}

impl<T: Float> Add for DualNumber<T> {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.value + other.value, self.deriv + other.deriv)
    }
}

impl<T: Float> Sub for DualNumber<T> {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.value - other.value, self.deriv - other.deriv)
    }
}

impl<T: Float> Mul for DualNumber<T> {
    type Output = Self;

    // Product rule
    #[inline]
    fn mul(self, other: Self) -> Self {
        Self::new(
            self.value * other.value,
            self.value * other.deriv + self.deriv * other.value,
        )
    }
}

impl<T: Float> Neg for DualNumber<T> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.value, -self.deriv)
    }
}

impl<T: Float> From<T> for DualNumber<T> {
    /// Lift a plain value as a constant.
    #[inline]
    fn from(value: T) -> Self {
        Self::constant(value)
    }
}

impl<T: fmt::Display> fmt::Display for DualNumber<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{value={}, deriv={}}}", self.value, self.deriv)
    }
}
