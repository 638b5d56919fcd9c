//! Tolerance-aware scalar and angle comparisons.
//!
//! Every predicate takes an explicit precision. Nothing here keeps state.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// `|a - b| <= prec`.
#[must_use]
pub fn is_equal(a: f64, b: f64, prec: f64) -> bool {
    (a - b).abs() <= prec
}

/// `a` is less than `b` by more than `prec`.
#[must_use]
pub fn is_less(a: f64, b: f64, prec: f64) -> bool {
    (b - a) > prec
}

/// `a` is greater than `b` by more than `prec`.
#[must_use]
pub fn is_greater(a: f64, b: f64, prec: f64) -> bool {
    (a - b) > prec
}

#[must_use]
pub fn is_less_or_equal(a: f64, b: f64, prec: f64) -> bool {
    !is_greater(a, b, prec)
}

#[must_use]
pub fn is_greater_or_equal(a: f64, b: f64, prec: f64) -> bool {
    !is_less(a, b, prec)
}

#[must_use]
pub fn is_zero(a: f64, prec: f64) -> bool {
    is_equal(a, 0.0, prec)
}

/// `value` lies in the closed range spanned by `a` and `b` (either order), bounds
/// widened by `prec`.
#[must_use]
pub fn is_between(value: f64, a: f64, b: f64, prec: f64) -> bool {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    is_greater_or_equal(value, lo, prec) && is_less_or_equal(value, hi, prec)
}

/// `value` lies strictly inside the range spanned by `a` and `b`, at least `prec`
/// away from both bounds.
#[must_use]
pub fn is_within(value: f64, a: f64, b: f64, prec: f64) -> bool {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    is_greater(value, lo, prec) && is_less(value, hi, prec)
}

/// Normalises an angle to `[0, 2π)`.
#[must_use]
pub fn angle_mod(angle: f64) -> f64 {
    let result = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if result >= TAU {
        0.0
    } else {
        result
    }
}

/// Compares two angles modulo `2π`.
#[must_use]
pub fn is_equal_angle(a: f64, b: f64, prec: f64) -> bool {
    let diff = angle_mod(a - b);
    diff <= prec || TAU - diff <= prec
}

/// Compares two directions modulo `π`, i.e. whether they describe parallel lines.
#[must_use]
pub fn is_parallel_angle(a: f64, b: f64, prec: f64) -> bool {
    let diff = (a - b).rem_euclid(PI);
    diff <= prec || PI - diff <= prec
}

/// Whether the directions `a` and `b` are perpendicular within `prec`.
#[must_use]
pub fn is_perpendicular_angle(a: f64, b: f64, prec: f64) -> bool {
    is_parallel_angle(a - b - FRAC_PI_2, 0.0, prec)
}

/// Remainder of `value / modulus`, snapped to 0 when within `prec` of 0 or of
/// `±modulus`.
#[must_use]
pub fn f_mod(value: f64, modulus: f64, prec: f64) -> f64 {
    if modulus == 0.0 {
        return value;
    }
    let result = value % modulus;
    if is_zero(result, prec) || is_equal(result.abs(), modulus.abs(), prec) {
        0.0
    } else {
        result
    }
}

/// Rounds `value` to the nearest multiple of `modulus`.
#[must_use]
pub fn round(value: f64, modulus: f64) -> f64 {
    if modulus == 0.0 {
        return value;
    }
    (value / modulus + 0.5).floor() * modulus
}

/// Rounds `value` up to a multiple of `modulus`, unless it already sits within
/// `tolerance` of a multiple, in which case it rounds to that multiple.
#[must_use]
pub fn round_up(value: f64, modulus: f64, tolerance: f64) -> f64 {
    if modulus == 0.0 {
        return value;
    }
    let nearest = round(value, modulus);
    if is_equal(value, nearest, tolerance) {
        return nearest;
    }
    (value / modulus).ceil() * modulus
}

/// Rounds `value` down to a multiple of `modulus`, unless it already sits within
/// `tolerance` of a multiple, in which case it rounds to that multiple.
#[must_use]
pub fn round_down(value: f64, modulus: f64, tolerance: f64) -> f64 {
    if modulus == 0.0 {
        return value;
    }
    let nearest = round(value, modulus);
    if is_equal(value, nearest, tolerance) {
        return nearest;
    }
    (value / modulus).floor() * modulus
}
