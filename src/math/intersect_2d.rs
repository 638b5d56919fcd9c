//! Unbounded 2D line/circle and circle/circle crossings on raw coordinates.
//!
//! These return candidate points only; callers classify them against the
//! bounded entities they came from.

/// Crossings of the line through `(px, py)` with direction `(dx, dy)` and the
/// circle at `(cx, cy)` of radius `r`.
///
/// A line within `prec / 100` of tangency yields the single foot point.
#[must_use]
#[allow(clippy::too_many_arguments)]
pub fn line_circle(px: f64, py: f64, dx: f64, dy: f64, cx: f64, cy: f64, r: f64, prec: f64) -> Vec<(f64, f64)> {
    let len = dx.hypot(dy);
    if len <= f64::EPSILON || r <= 0.0 {
        return Vec::new();
    }
    let (ux, uy) = (dx / len, dy / len);
    // Foot of the perpendicular from the centre.
    let t = (cx - px) * ux + (cy - py) * uy;
    let bx = px + ux * t;
    let by = py + uy * t;
    let span = (cx - bx).hypot(cy - by);
    if span > r + prec {
        return Vec::new();
    }
    if (span - r).abs() <= prec / 100.0 || span > r {
        return vec![(bx, by)];
    }
    let half = (r * r - span * span).sqrt();
    vec![(bx - ux * half, by - uy * half), (bx + ux * half, by + uy * half)]
}

/// Crossings of two circles.
///
/// Concentric circles have none; touching circles yield one point on the
/// centre line.
#[must_use]
#[allow(clippy::too_many_arguments)]
pub fn circle_circle(c1x: f64, c1y: f64, r1: f64, c2x: f64, c2y: f64, r2: f64, prec: f64) -> Vec<(f64, f64)> {
    let dx = c2x - c1x;
    let dy = c2y - c1y;
    let d = dx.hypot(dy);
    if d <= prec || d > r1 + r2 + prec || d < (r1 - r2).abs() - prec {
        return Vec::new();
    }
    let azimuth = dy.atan2(dx);
    if (d - (r1 + r2)).abs() <= prec {
        return vec![super::arc_2d::point_at(c1x, c1y, r1, azimuth)];
    }
    if (d - (r1 - r2).abs()).abs() <= prec {
        // Internal tangency: the contact lies on the far side of the larger circle.
        let angle = if r1 >= r2 { azimuth } else { azimuth + std::f64::consts::PI };
        return vec![super::arc_2d::point_at(c1x, c1y, r1, angle)];
    }
    let offset = (d * d - r2 * r2 + r1 * r1) / (2.0 * d);
    let inc = (offset / r1).clamp(-1.0, 1.0).acos();
    vec![
        super::arc_2d::point_at(c1x, c1y, r1, azimuth - inc),
        super::arc_2d::point_at(c1x, c1y, r1, azimuth + inc),
    ]
}
