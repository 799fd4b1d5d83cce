#![cfg(feature = "dev")]
//! Tests for forward-mode dual numbers.
//!
//! Each test checks the value and derivative of a small expression against
//! closed-form calculus.

use approx::assert_relative_eq;

use lazyfit::internals::math::dual::DualNumber;

/// Seeding: variables carry derivative 1, constants 0.
#[test]
fn test_variable_and_constant() {
    let x = DualNumber::variable(2.5);
    let c = DualNumber::constant(2.5);
    let lifted: DualNumber<f64> = 2.5f64.into();

    assert_eq!(x.value(), 2.5);
    assert_eq!(x.derivative(), 1.0);
    assert_eq!(c.derivative(), 0.0);
    assert_eq!(lifted, c);
}

/// Sum and difference rules.
#[test]
fn test_add_sub() {
    let x = DualNumber::new(3.0, 1.0);
    let y = DualNumber::new(5.0, -2.0);

    let s = x + y;
    assert_eq!((s.value(), s.derivative()), (8.0, -1.0));

    let d = x - y;
    assert_eq!((d.value(), d.derivative()), (-2.0, 3.0));

    let n = -x;
    assert_eq!((n.value(), n.derivative()), (-3.0, -1.0));
}

/// Product rule: (uv)' = u v' + u' v.
#[test]
fn test_product_rule() {
    let u = DualNumber::new(3.0, 2.0);
    let v = DualNumber::new(4.0, -1.0);
    let p = u * v;

    assert_relative_eq!(p.value(), 12.0);
    assert_relative_eq!(p.derivative(), 3.0 * -1.0 + 2.0 * 4.0);
}

/// d/dx x^2 = 2x.
#[test]
fn test_square() {
    let x = DualNumber::variable(3.0);
    let y = x.square();

    assert_relative_eq!(y.value(), 9.0);
    assert_relative_eq!(y.derivative(), 6.0);
}

/// d/dx sqrt(x) = 1 / (2 sqrt(x)).
#[test]
fn test_sqrt() {
    let x = DualNumber::variable(4.0);
    let y = x.sqrt();

    assert_relative_eq!(y.value(), 2.0);
    assert_relative_eq!(y.derivative(), 0.25);
}

/// sqrt(x^2) = x for x > 0, derivative 1.
#[test]
fn test_sqrt_of_square() {
    let y = DualNumber::variable(3.0).square().sqrt();

    assert_relative_eq!(y.value(), 3.0);
    assert_relative_eq!(y.derivative(), 1.0);
}

/// Chain rule through a composite: f(x) = (sqrt(x^2 + 16) - 1)^2 at x = 3.
#[test]
fn test_composite_chain_rule() {
    let x = DualNumber::variable(3.0);
    let sixteen = DualNumber::constant(16.0);
    let one = DualNumber::constant(1.0);

    let f = ((x.square() + sixteen).sqrt() - one).square();

    // sqrt(25) = 5, f = 16, f' = 2 * 4 * (3 / 5)
    assert_relative_eq!(f.value(), 16.0);
    assert_relative_eq!(f.derivative(), 4.8, epsilon = 1e-12);
}

/// sqrt of a negative value propagates NaN instead of panicking.
#[test]
fn test_sqrt_negative_is_nan() {
    let y = DualNumber::<f64>::variable(-1.0).sqrt();
    assert!(y.value().is_nan());
    assert!(y.derivative().is_nan());

    let z = y + DualNumber::constant(1.0);
    assert!(z.value().is_nan());
}

/// sqrt at zero has an unbounded derivative.
#[test]
fn test_sqrt_zero() {
    let y = DualNumber::<f64>::variable(0.0).sqrt();
    assert_eq!(y.value(), 0.0);
    assert!(y.derivative().is_infinite());
}

/// Works over `f32` as well.
#[test]
fn test_f32() {
    let y = DualNumber::<f32>::variable(2.0).square();
    assert_relative_eq!(y.derivative(), 4.0f32);
}

#[test]
fn test_display() {
    let d = DualNumber::new(1.5, -0.5);
    assert_eq!(format!("{}", d), "{value=1.5, deriv=-0.5}");
}
