//! 2D arc math on raw coordinates.
//!
//! Sweep convention: positive sweeps run anticlockwise, negative sweeps
//! clockwise, and `|sweep| <= 2π`. A zero sweep is a straight segment.
use std::f64::consts::TAU;

use super::tolerance::angle_mod;

/// Centre and radius of the arc spanning the chord `(x0, y0) → (x1, y1)` with
/// the given signed sweep.
///
/// Returns `None` for a zero chord or a zero sweep.
#[must_use]
pub fn centre_from_chord(x0: f64, y0: f64, x1: f64, y1: f64, sweep: f64) -> Option<(f64, f64, f64)> {
    let dx = x1 - x0;
    let dy = y1 - y0;
    let chord = dx.hypot(dy);
    if chord <= f64::EPSILON || sweep == 0.0 {
        return None;
    }
    let half = chord * 0.5;
    let half_sweep = sweep * 0.5;
    let radius = half / half_sweep.sin().abs();
    // Signed distance from the chord midpoint to the centre, left of the chord.
    let apothem = half * half_sweep.cos() / half_sweep.sin();
    let (nx, ny) = (-dy / chord, dx / chord);
    let mx = (x0 + x1) * 0.5;
    let my = (y0 + y1) * 0.5;
    Some((mx + nx * apothem, my + ny * apothem, radius))
}

/// Signed sweep from `start` to `end` in the requested rotation.
///
/// Anticlockwise results lie in `(0, 2π]`, clockwise results in `[-2π, 0)`;
/// coincident angles give a full turn.
#[must_use]
pub fn sweep_between(start: f64, end: f64, clockwise: bool) -> f64 {
    let ccw = angle_mod(end - start);
    if clockwise {
        if ccw == 0.0 {
            -TAU
        } else {
            ccw - TAU
        }
    } else if ccw == 0.0 {
        TAU
    } else {
        ccw
    }
}

/// Angular distance from `start` to `angle` measured in the sweep's sense,
/// in `[0, 2π)`.
#[must_use]
pub fn angle_offset(angle: f64, start: f64, sweep: f64) -> f64 {
    if sweep < 0.0 {
        angle_mod(start - angle)
    } else {
        angle_mod(angle - start)
    }
}

/// Area between an arc and its chord, signed like the sweep.
#[must_use]
pub fn segment_area(radius: f64, sweep: f64) -> f64 {
    radius * radius * 0.5 * (sweep - sweep.sin())
}

/// Angular step that keeps chords within `tolerance` of a circle of `radius`.
#[must_use]
pub fn facet_step(radius: f64, tolerance: f64) -> f64 {
    2.0 * (radius / (radius + tolerance)).acos()
}

/// Point on a circle at `angle`.
#[must_use]
pub fn point_at(cx: f64, cy: f64, radius: f64, angle: f64) -> (f64, f64) {
    let (s, c) = angle.sin_cos();
    (cx + radius * c, cy + radius * s)
}

/// Bulge factor `tan(sweep / 4)` of a sweep.
#[must_use]
pub fn bulge_from_sweep(sweep: f64) -> f64 {
    (sweep / 4.0).tan()
}

/// Sweep of a bulge factor.
#[must_use]
pub fn sweep_from_bulge(bulge: f64) -> f64 {
    4.0 * bulge.atan()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn quarter_circle_from_chord() {
        let (cx, cy, r) = centre_from_chord(1.0, 0.0, 0.0, 1.0, FRAC_PI_2).unwrap();
        assert_relative_eq!(cx, 0.0, epsilon = 1e-12);
        assert_relative_eq!(cy, 0.0, epsilon = 1e-12);
        assert_relative_eq!(r, 1.0, epsilon = 1e-12);

        let (cx, cy, r) = centre_from_chord(1.0, 0.0, 0.0, 1.0, -FRAC_PI_2).unwrap();
        assert_relative_eq!(cx, 1.0, epsilon = 1e-12);
        assert_relative_eq!(cy, 1.0, epsilon = 1e-12);
        assert_relative_eq!(r, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn semicircle_centre_is_chord_midpoint() {
        let (cx, cy, r) = centre_from_chord(-2.0, 0.0, 2.0, 0.0, PI).unwrap();
        assert_relative_eq!(cx, 0.0, epsilon = 1e-12);
        assert_relative_eq!(cy, 0.0, epsilon = 1e-12);
        assert_relative_eq!(r, 2.0, epsilon = 1e-12);
        assert!(centre_from_chord(1.0, 1.0, 1.0, 1.0, PI).is_none());
    }

    #[test]
    fn sweeps_between_angles() {
        assert_relative_eq!(sweep_between(0.0, FRAC_PI_2, false), FRAC_PI_2);
        assert_relative_eq!(sweep_between(0.0, FRAC_PI_2, true), FRAC_PI_2 - TAU);
        assert_relative_eq!(sweep_between(1.0, 1.0, false), TAU);
        assert_relative_eq!(angle_offset(-FRAC_PI_2, 0.0, -PI), FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn segment_area_of_semicircle() {
        assert_relative_eq!(segment_area(1.0, PI), FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(segment_area(1.0, -PI), -FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn bulge_conversions() {
        assert_relative_eq!(bulge_from_sweep(PI), 1.0, epsilon = 1e-12);
        assert_relative_eq!(sweep_from_bulge(-1.0), -PI, epsilon = 1e-12);
        assert!(facet_step(10.0, 0.01) > 0.0);
    }
}
