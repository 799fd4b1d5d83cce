//! Circle parameters: the optimization state of the circle fit.
//!
//! ## Purpose
//!
//! This module defines [`CircleParams`], the `(cx, cy, r)` triple that the
//! gradient-descent optimizer updates, and [`Axis`], which names one of its
//! three components.
//!
//! ## Design notes
//!
//! * **Generic element**: `CircleParams<S>` holds plain floats for the optimizer
//!   state and gradients, and `DualNumber`s while a loss pass is running.
//! * **Vector space only**: Addition and scaling are the only arithmetic needed.

// External dependencies
use core::fmt;
use core::ops::{Add, Mul};
use num_traits::Float;

// ============================================================================
// Axis
// ============================================================================

/// One of the three circle parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Center x coordinate.
    Cx,

    /// Center y coordinate.
    Cy,

    /// Radius.
    R,
}

impl Axis {
    /// All axes in storage order.
    pub const ALL: [Axis; 3] = [Axis::Cx, Axis::Cy, Axis::R];

    /// Short parameter name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Axis::Cx => "cx",
            Axis::Cy => "cy",
            Axis::R => "r",
        }
    }
}

// ============================================================================
// CircleParams
// ============================================================================

/// Circle center and radius.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CircleParams<S> {
    /// Center x coordinate.
    pub cx: S,
    /// Center y coordinate.
    pub cy: S,
    /// Radius.
    pub r: S,
}

impl<S> CircleParams<S> {
    /// Create parameters from center and radius.
    #[inline]
    pub const fn new(cx: S, cy: S, r: S) -> Self {
        Self { cx, cy, r }
    }

    /// Component for `axis`.
    #[inline]
    pub fn get(&self, axis: Axis) -> &S {
        match axis {
            Axis::Cx => &self.cx,
            Axis::Cy => &self.cy,
            Axis::R => &self.r,
        }
    }

    /// Apply `f` to every component, passing the component's axis.
    pub fn map<U, F>(self, mut f: F) -> CircleParams<U>
    where
        F: FnMut(Axis, S) -> U,
    {
        CircleParams {
            cx: f(Axis::Cx, self.cx),
            cy: f(Axis::Cy, self.cy),
            r: f(Axis::R, self.r),
        }
    }

    /// Components as `[cx, cy, r]`.
    #[inline]
    pub fn into_array(self) -> [S; 3] {
        [self.cx, self.cy, self.r]
    }
}

impl<T: Float> CircleParams<T> {
    /// Multiply every component by `s`.
    #[inline]
    pub fn scale(self, s: T) -> Self {
        Self::new(s * self.cx, s * self.cy, s * self.r)
    }

    /// True when all three components are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.cx.is_finite() && self.cy.is_finite() && self.r.is_finite()
    }
}

impl<S> From<[S; 3]> for CircleParams<S> {
    fn from([cx, cy, r]: [S; 3]) -> Self {
        Self::new(cx, cy, r)
    }
}

impl<S: Add<Output = S>> Add for CircleParams<S> {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.cx + other.cx, self.cy + other.cy, self.r + other.r)
    }
}

impl<T: Float> Mul<T> for CircleParams<T> {
    type Output = Self;

    #[inline]
    fn mul(self, s: T) -> Self {
        self.scale(s)
    }
}

impl<S: fmt::Display> fmt::Display for CircleParams<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{cx={}, cy={}, r={}}}", self.cx, self.cy, self.r)
    }
}
