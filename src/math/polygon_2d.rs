use std::f64::consts::PI;

/// Signed area of a closed ring in the XY plane, straight edges only.
///
/// Positive for anticlockwise rings, negative for clockwise ones. Uses the
/// form `Σ x[i+1]·(y[i+2] − y[i]) / 2`.
#[must_use]
pub fn signed_area(points: &[(f64, f64)]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let (x1, _) = points[(i + 1) % n];
        let (_, y0) = points[i];
        let (_, y2) = points[(i + 2) % n];
        sum += x1 * (y2 - y0);
    }
    sum * 0.5
}

/// Direction, modulo `π`, that is furthest from every angle in `azimuths`.
///
/// The angles are folded into `[0, π)`, the sentinel `π` is added, and the
/// midpoint of the widest gap between neighbours is returned.
#[must_use]
pub fn widest_gap_direction(azimuths: impl IntoIterator<Item = f64>) -> f64 {
    let mut angles: Vec<f64> = azimuths.into_iter().map(|a| a.rem_euclid(PI)).collect();
    angles.push(0.0);
    angles.push(PI);
    angles.sort_by(f64::total_cmp);
    let mut best = (0.0, PI * 0.5);
    for pair in angles.windows(2) {
        let gap = pair[1] - pair[0];
        if gap > best.0 {
            best = (gap, (pair[0] + pair[1]) * 0.5);
        }
    }
    best.1
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_4;

    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn unit_square_areas() {
        let ccw = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
        assert_relative_eq!(signed_area(&ccw), 1.0, epsilon = 1e-12);
        let cw: Vec<_> = ccw.iter().rev().copied().collect();
        assert_relative_eq!(signed_area(&cw), -1.0, epsilon = 1e-12);
        assert_relative_eq!(signed_area(&ccw[..2]), 0.0);
    }

    #[test]
    fn gap_direction_avoids_edges() {
        // Axis-aligned edges leave the diagonals free.
        let dir = widest_gap_direction([0.0, PI * 0.5, PI, -PI * 0.5]);
        assert_relative_eq!(dir, FRAC_PI_4, epsilon = 1e-12);
    }
}
