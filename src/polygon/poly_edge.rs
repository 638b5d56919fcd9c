use std::f64::consts::{PI, TAU};

use super::{PolyPoint, Rotation};
use crate::geometry::{Arc, BoundingBox, Curve, Line, Point};
use crate::intersect::Position;
use crate::math::arc_2d::{angle_offset, sweep_between};
use crate::math::tolerance::is_equal_angle;
use crate::math::{Vector3, VectorExt, EPS_ANGLE};

/// An edge rebuilt from two consecutive polygon vertices.
///
/// The sweep of `end` decides whether the edge is a straight segment or a
/// circular arc in the XY plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PolyEdge {
    pub origin: Point,
    pub end: PolyPoint,
}

impl PolyEdge {
    #[must_use]
    pub const fn new(origin: Point, end: PolyPoint) -> Self {
        Self { origin, end }
    }

    #[must_use]
    pub fn is_arc(&self) -> bool {
        self.end.is_arc()
    }

    /// The arc this edge describes, or `None` for a straight or degenerate edge.
    #[must_use]
    pub fn as_arc(&self) -> Option<Arc> {
        if !self.is_arc() {
            return None;
        }
        Arc::from_edge(&self.origin, &self.end.point, self.end.sweep)
    }

    /// The chord of the edge.
    #[must_use]
    pub fn as_line(&self) -> Line {
        Line::new(self.origin, self.end.point)
    }

    #[must_use]
    pub fn length_2d(&self) -> f64 {
        match self.as_arc() {
            Some(arc) => arc.radius() * arc.sweep().abs(),
            None => self.as_line().length_2d(),
        }
    }

    #[must_use]
    pub fn length_3d(&self) -> f64 {
        match self.as_arc() {
            Some(arc) => {
                let flat = arc.radius() * arc.sweep().abs();
                flat.hypot(self.end.z - self.origin.z)
            }
            None => self.as_line().length(),
        }
    }

    #[must_use]
    pub fn midpoint(&self) -> Point {
        match self.as_arc() {
            Some(arc) => arc.midpoint().with_z((self.origin.z + self.end.z) * 0.5),
            None => self.origin.midpoint(&self.end.point),
        }
    }

    /// Point at fraction `t` of the way along the edge, clamped to `[0, 1]`,
    /// with `z` interpolated.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point {
        let t = t.clamp(0.0, 1.0);
        match self.as_arc() {
            Some(arc) => {
                let z = self.origin.z + (self.end.z - self.origin.z) * t;
                arc.point_at_angle(arc.start_angle() + arc.sweep() * t).with_z(z)
            }
            None => self.origin.lerp(&self.end.point, t),
        }
    }

    /// Arc centre, or the chord midpoint for a straight edge.
    #[must_use]
    pub fn centre(&self) -> Point {
        match self.as_arc() {
            Some(arc) => *arc.centre(),
            None => self.origin.midpoint(&self.end.point),
        }
    }

    /// Unit XY tangent in the direction of travel at `p`.
    #[must_use]
    pub fn tangent_at(&self, p: &Point) -> Option<Vector3> {
        match self.as_arc() {
            Some(arc) => arc.tangent_at(&p.with_z(arc.centre().z)),
            None => {
                let d = self.end.point - self.origin;
                Vector3::new(d.x, d.y, 0.0).unit()
            }
        }
    }

    #[must_use]
    pub fn start_tangent(&self) -> Option<Vector3> {
        self.tangent_at(&self.origin)
    }

    #[must_use]
    pub fn end_tangent(&self) -> Option<Vector3> {
        self.tangent_at(&self.end.point)
    }

    /// Whether this edge leaves its origin in the direction `previous` arrives.
    #[must_use]
    pub fn is_tangential_to_2d(&self, previous: &PolyEdge) -> bool {
        match (previous.end_tangent(), self.start_tangent()) {
            (Some(a), Some(b)) => is_equal_angle(a.azimuth(), b.azimuth(), EPS_ANGLE),
            _ => false,
        }
    }

    /// Classifies `p` against the edge in XY.
    #[must_use]
    pub fn position_of_2d(&self, p: &Point, prec: f64) -> Position {
        match self.as_arc() {
            Some(arc) => arc.position_of_2d(p, prec),
            None => self.as_line().position_of_2d(p, prec),
        }
    }

    /// Whether the shorter of the two edges lies along the longer one.
    #[must_use]
    pub fn overlaps_2d(&self, other: &PolyEdge, prec: f64) -> bool {
        let (short, long) = if self.length_2d() <= other.length_2d() {
            (self, other)
        } else {
            (other, self)
        };
        [short.origin, short.end.point, short.midpoint()]
            .iter()
            .all(|p| long.position_of_2d(p, prec).is_within())
    }

    /// A copy moved sideways by `shift`; positive shifts move left of travel.
    ///
    /// Returns `None` when an arc would shrink to nothing.
    #[must_use]
    pub fn offset(&self, shift: f64) -> Option<PolyEdge> {
        let Some(arc) = self.as_arc() else {
            let line = self.as_line().offset_2d(shift);
            return Some(PolyEdge::new(line.origin, PolyPoint { point: line.end, ..self.end }));
        };
        // The left side of an anticlockwise arc faces its centre.
        let radius = if arc.is_clockwise() { arc.radius() + shift } else { arc.radius() - shift };
        if radius <= 0.0 {
            return None;
        }
        let centre = arc.centre();
        let origin = centre.moved_polar(radius, arc.start_angle()).with_z(self.origin.z);
        let end = centre.moved_polar(radius, arc.end_angle()).with_z(self.end.z);
        Some(PolyEdge::new(origin, PolyPoint { point: end, ..self.end }))
    }

    /// Lengthens the edge at its end by `length`, following an arc's circle.
    pub fn extend(&mut self, length: f64) {
        let Some(arc) = self.as_arc() else {
            let mut line = self.as_line();
            line.extend(length);
            self.end.point = line.end;
            return;
        };
        let sweep = (arc.sweep() + length / arc.radius() * arc.sweep().signum()).clamp(-TAU, TAU);
        let z = self.end.z;
        self.end.point = arc.centre().moved_polar(arc.radius(), arc.start_angle() + sweep).with_z(z);
        self.end.sweep = sweep;
    }

    /// Moves the end to the projection of `p` onto the edge's carrier.
    pub fn extend_to(&mut self, p: &Point) {
        let Some(arc) = self.as_arc() else {
            self.end.point = self.as_line().closest_point_to_2d(p);
            return;
        };
        let angle = arc.angle_of(p);
        let sweep = sweep_between(arc.start_angle(), angle, arc.is_clockwise());
        let z = self.end.z;
        self.end.point = arc.centre().moved_polar(arc.radius(), angle).with_z(z);
        self.end.sweep = sweep;
    }

    /// Cuts the edge at `at`, which must lie strictly along it.
    ///
    /// `self` keeps its origin and ends at `at` with an anonymous end vertex;
    /// the returned offcut runs from `at` to the original end and keeps its id.
    /// Arc sweeps are shared in proportion. Returns `None` (leaving the edge
    /// unchanged) if `at` is not along the edge.
    pub fn split(&mut self, at: &Point, prec: f64) -> Option<PolyEdge> {
        if self.position_of_2d(at, prec) != Position::Along {
            return None;
        }
        let at = if self.is_arc() {
            *at
        } else {
            self.as_line().closest_point_to_2d(at)
        };
        let (first, second) = match self.as_arc() {
            Some(arc) => {
                let first = angle_offset(arc.angle_of(&at), arc.start_angle(), arc.sweep()) * arc.sweep().signum();
                (first, arc.sweep() - first)
            }
            None => (0.0, 0.0),
        };
        let offcut = PolyEdge::new(at, self.end.with_sweep(second));
        self.end = PolyPoint::new(at, first, 0);
        Some(offcut)
    }

    /// Moves the origin to `to`, keeping an arc's bow through its old midpoint.
    pub fn stretch_origin(&mut self, to: &Point) {
        if let Some(mid) = self.is_arc().then(|| self.midpoint()) {
            self.end.sweep = Arc::from_three_points(to, &mid, &self.end.point).map_or(0.0, |arc| arc.sweep());
        }
        self.origin = *to;
    }

    /// Moves the end to `to`, keeping an arc's bow through its old midpoint.
    pub fn stretch_end(&mut self, to: &Point) {
        if let Some(mid) = self.is_arc().then(|| self.midpoint()) {
            self.end.sweep = Arc::from_three_points(&self.origin, &mid, to).map_or(0.0, |arc| arc.sweep());
        }
        self.end.point = *to;
    }

    /// Swaps the endpoints and negates the sweep.
    pub fn flip(&mut self) {
        std::mem::swap(&mut self.origin, &mut self.end.point);
        self.end.sweep = -self.end.sweep;
    }

    /// Bends the edge into an arc of radius `|radius|` over the same chord.
    ///
    /// A negative radius picks the major arc. Without an explicit rotation the
    /// current bend direction is kept, defaulting to anticlockwise. If the chord
    /// is longer than the diameter the edge is straightened and `false` is
    /// returned.
    pub fn set_radius(&mut self, radius: f64, rotation: Option<Rotation>, prec: f64) -> bool {
        let span = self.origin.length_from_2d(&self.end.point);
        let limit = radius.abs() * 2.0;
        if radius == 0.0 || span <= prec || span > limit + prec {
            self.end.sweep = 0.0;
            return false;
        }
        let clockwise = match rotation {
            Some(r) => r == Rotation::Clockwise,
            None => self.end.sweep < 0.0,
        };
        let magnitude = if span >= limit - prec {
            PI
        } else {
            let minor = 2.0 * (span / limit).asin();
            if radius < 0.0 {
                TAU - minor
            } else {
                minor
            }
        };
        self.end.sweep = if clockwise { -magnitude } else { magnitude };
        true
    }

    #[must_use]
    pub fn bounds(&self) -> BoundingBox {
        let mut bounds = self.as_line().bounds();
        if let Some(arc_bounds) = self.as_arc().and_then(|arc| arc.bounds()) {
            bounds.merge(&arc_bounds);
        }
        bounds
    }
}

impl Curve for PolyEdge {
    fn start_point(&self) -> Point {
        self.origin
    }

    fn end_point(&self) -> Point {
        self.end.point
    }

    fn midpoint(&self) -> Point {
        PolyEdge::midpoint(self)
    }

    fn length(&self) -> f64 {
        self.length_3d()
    }

    fn position_of_2d(&self, p: &Point, prec: f64) -> Position {
        PolyEdge::position_of_2d(self, p, prec)
    }

    fn tangent_at(&self, p: &Point) -> Option<Vector3> {
        PolyEdge::tangent_at(self, p)
    }
}
