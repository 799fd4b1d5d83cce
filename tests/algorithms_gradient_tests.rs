#![cfg(feature = "dev")]
//! Tests for the circle loss and its forward-mode gradient.
//!
//! ## Test Organization
//!
//! 1. **Loss Values** - Closed-form losses and residuals
//! 2. **Plain vs Dual** - Both passes agree on the loss value
//! 3. **Gradient** - Closed-form partials and finite-difference agreement

use approx::assert_relative_eq;
use rand::prelude::*;

use lazyfit::internals::algorithms::gradient::{gradient, partial};
use lazyfit::internals::algorithms::loss::{loss, loss_dual, residuals};
use lazyfit::internals::primitives::params::{Axis, CircleParams};

/// `n` points on the circle `(cx, cy, r)`, evenly spaced.
fn circle_points(cx: f64, cy: f64, r: f64, n: usize) -> Vec<f64> {
    (0..n)
        .flat_map(|k| {
            let t = 2.0 * std::f64::consts::PI * k as f64 / n as f64;
            [cx + r * t.cos(), cy + r * t.sin()]
        })
        .collect()
}

fn random_points(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .flat_map(|_| {
            let t: f64 = rng.random_range(0.0..std::f64::consts::TAU);
            let r: f64 = 4.0 + rng.random_range(-0.5..0.5);
            [1.0 + r * t.cos(), -2.0 + r * t.sin()]
        })
        .collect()
}

// ============================================================================
// Loss Value Tests
// ============================================================================

/// Points exactly on the circle give zero loss.
#[test]
fn test_loss_zero_on_circle() {
    let data = circle_points(5.0, 5.0, 3.0, 12);
    assert_relative_eq!(loss(&data, &CircleParams::new(5.0, 5.0, 3.0)), 0.0, epsilon = 1e-12);
}

/// Concentric circle: every point is off by the radius difference.
#[test]
fn test_loss_concentric() {
    let data = circle_points(0.0, 0.0, 2.0, 8);
    let l = loss(&data, &CircleParams::new(0.0, 0.0, 3.5));
    assert_relative_eq!(l, 1.5 * 1.5, epsilon = 1e-12);
}

/// The loss is a mean, not a sum.
#[test]
fn test_loss_is_mean() {
    // Distances 5 and 3 to a radius-4 circle at the origin: errors 1 and -1.
    let data = [3.0, 4.0, 0.0, 3.0];
    let l = loss(&data, &CircleParams::new(0.0, 0.0, 4.0));
    assert_relative_eq!(l, 1.0, epsilon = 1e-12);
}

/// Residuals are signed: positive outside, negative inside.
#[test]
fn test_residuals_signed() {
    let data = [3.0, 4.0, 0.0, 3.0];
    let res = residuals(&data, &CircleParams::new(0.0, 0.0, 4.0));

    assert_eq!(res.len(), 2);
    assert_relative_eq!(res[0], 1.0, epsilon = 1e-12);
    assert_relative_eq!(res[1], -1.0, epsilon = 1e-12);
}

// ============================================================================
// Plain vs Dual Tests
// ============================================================================

/// The value part of every seeded dual pass equals the plain loss.
#[test]
fn test_dual_value_matches_plain() {
    let data = random_points(25, 3);
    let params = CircleParams::new(0.5, -1.5, 3.0);
    let plain = loss(&data, &params);

    for axis in Axis::ALL {
        let dual = loss_dual(&data, &params.seeded(axis));
        assert_relative_eq!(dual.value(), plain, max_relative = 1e-14);
    }
}

/// Seeding marks exactly one component as the variable.
#[test]
fn test_seeded_marks_one_axis() {
    let params = CircleParams::new(1.0, 2.0, 3.0);
    let seeded = params.seeded(Axis::Cy);

    assert_eq!(seeded.cx.derivative(), 0.0);
    assert_eq!(seeded.cy.derivative(), 1.0);
    assert_eq!(seeded.r.derivative(), 0.0);
    assert_eq!(seeded.cy.value(), 2.0);
}

// ============================================================================
// Gradient Tests
// ============================================================================

/// One point at distance 5 from a radius-4 circle at the origin.
#[test]
fn test_gradient_closed_form() {
    let data = [3.0, 4.0];
    let g = gradient(&data, &CircleParams::new(0.0, 0.0, 4.0));

    // dL/dr = -2 (d - r), dL/dc = 2 (d - r) (c - p) / d
    assert_relative_eq!(g.r, -2.0, epsilon = 1e-12);
    assert_relative_eq!(g.cx, -1.2, epsilon = 1e-12);
    assert_relative_eq!(g.cy, -1.6, epsilon = 1e-12);

    assert_eq!(partial(&data, &CircleParams::new(0.0, 0.0, 4.0), Axis::R), g.r);
}

/// The gradient vanishes at an exact fit.
#[test]
fn test_gradient_zero_at_optimum() {
    let data = circle_points(5.0, 5.0, 3.0, 16);
    let g = gradient(&data, &CircleParams::new(5.0, 5.0, 3.0));

    assert_relative_eq!(g.cx, 0.0, epsilon = 1e-10);
    assert_relative_eq!(g.cy, 0.0, epsilon = 1e-10);
    assert_relative_eq!(g.r, 0.0, epsilon = 1e-10);
}

/// Forward-mode partials agree with central finite differences.
#[test]
fn test_gradient_matches_finite_differences() {
    let h = 1e-6;
    let data = random_points(40, 42);
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..10 {
        let params = CircleParams::new(
            rng.random_range(-1.0..3.0),
            rng.random_range(-4.0..0.0),
            rng.random_range(2.0..6.0),
        );
        let g = gradient(&data, &params);

        for axis in Axis::ALL {
            let bump = CircleParams::new(0.0, 0.0, 0.0).map(|a, _| if a == axis { h } else { 0.0 });
            let forward = loss(&data, &(params + bump));
            let backward = loss(&data, &(params + bump.scale(-1.0)));
            let numeric = (forward - backward) / (2.0 * h);

            assert_relative_eq!(*g.get(axis), numeric, max_relative = 1e-4, epsilon = 1e-6);
        }
    }
}

/// A point at the circle center makes the gradient non-finite.
#[test]
fn test_gradient_point_at_center_is_not_finite() {
    let data = [0.0, 0.0, 1.0, 0.0];
    let g = gradient(&data, &CircleParams::new(0.0, 0.0, 1.0));
    assert!(!g.is_finite());
}
