use super::FacetParams;
use crate::geometry::{Arc, Point};
use crate::math::arc_2d::facet_step;

/// Walks an arc in chords no further than the tolerance from the curve.
///
/// Yields the end of each chord in order, so the last item is the arc's end
/// point and the start point is never produced.
#[derive(Debug, Clone)]
pub struct Faceter {
    arc: Arc,
    segments: usize,
    next: usize,
}

impl Faceter {
    #[must_use]
    pub fn new(arc: Arc, params: FacetParams) -> Self {
        let segments = segment_count(&arc, &params);
        Self { arc, segments, next: 1 }
    }

    /// Number of chords the arc is split into.
    #[must_use]
    pub fn segments(&self) -> usize {
        self.segments
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn segment_count(arc: &Arc, params: &FacetParams) -> usize {
    let min = params.min_segments.max(1);
    let max = params.max_segments.max(min);
    let step = facet_step(arc.radius(), params.tolerance.max(f64::EPSILON));
    if step.is_nan() || step <= 0.0 {
        return max;
    }
    let wanted = (arc.sweep().abs() / step).ceil();
    if wanted >= max as f64 {
        max
    } else {
        (wanted as usize).clamp(min, max)
    }
}

impl Iterator for Faceter {
    type Item = Point;

    #[allow(clippy::cast_precision_loss)]
    fn next(&mut self) -> Option<Point> {
        if self.next > self.segments {
            return None;
        }
        let t = self.next as f64 / self.segments as f64;
        self.next += 1;
        Some(self.arc.point_at_angle(self.arc.start_angle() + self.arc.sweep() * t))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.segments + 1).saturating_sub(self.next);
        (left, Some(left))
    }
}

impl ExactSizeIterator for Faceter {}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use super::*;
    use crate::geometry::Curve;

    #[test]
    fn chords_stay_within_tolerance() {
        let arc = Arc::new_2d(Point::xy(0.0, 0.0), 10.0, 0.0, PI).unwrap();
        let params = FacetParams::with_tolerance(0.01);
        let points: Vec<Point> = Faceter::new(arc, params).collect();
        assert!(points.len() > 1);
        assert!(points.last().unwrap().is_equal(&arc.end_point(), 1e-9));

        let mut prev = arc.start_point();
        for p in &points {
            let mid = prev.midpoint(p);
            let sagitta = 10.0 - mid.length_from_2d(arc.centre());
            assert!(sagitta <= 0.01 + 1e-9, "sagitta {sagitta}");
            prev = *p;
        }
    }

    #[test]
    fn segment_limits_apply() {
        let arc = Arc::new_2d(Point::xy(0.0, 0.0), 1.0, 0.0, -FRAC_PI_2).unwrap();
        let coarse = FacetParams { tolerance: 10.0, min_segments: 3, max_segments: 8 };
        assert_eq!(Faceter::new(arc, coarse).segments(), 3);
        let fine = FacetParams { tolerance: 1e-9, min_segments: 1, max_segments: 8 };
        let f = Faceter::new(arc, fine);
        assert_eq!(f.len(), 8);
        assert!(f.last().unwrap().is_equal(&Point::xy(0.0, -1.0), 1e-12));
    }
}
