use std::f64::consts::{FRAC_PI_2, TAU};

use crate::geometry::{BoundingBox, Line, Plane, Point};
use crate::intersect::Position;
use crate::math::arc_2d::{angle_offset, centre_from_chord, segment_area, sweep_between};
use crate::math::intersect_2d::{circle_circle, line_circle};
use crate::math::tolerance::is_equal_angle;
use crate::math::{Vector3, VectorExt, EPS};
use crate::transform::{Level, Leveller};

use super::{Curve, LinearEquation};

/// A circular arc in 3D.
///
/// `start_angle` is measured in the frame where `normal` points up (see
/// [`Leveller`]); for arcs in the XY plane with an upward normal that is the
/// usual azimuth. A positive `sweep` turns anticlockwise about the normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    centre: Point,
    normal: Vector3,
    radius: f64,
    start_angle: f64,
    sweep: f64,
}

impl Arc {
    /// Returns `None` unless `radius > 0`, `sweep != 0` and `normal` is not empty.
    /// Sweeps beyond a full turn are clamped to `±2π`.
    #[must_use]
    pub fn new(centre: Point, radius: f64, start_angle: f64, sweep: f64, normal: &Vector3) -> Option<Self> {
        let normal = normal.unit()?;
        if radius <= 0.0 || sweep == 0.0 || !radius.is_finite() || !sweep.is_finite() {
            return None;
        }
        Some(Self {
            centre,
            normal,
            radius,
            start_angle,
            sweep: sweep.clamp(-TAU, TAU),
        })
    }

    /// An arc in a horizontal plane, normal `+Z`.
    #[must_use]
    pub fn new_2d(centre: Point, radius: f64, start_angle: f64, sweep: f64) -> Option<Self> {
        Self::new(centre, radius, start_angle, sweep, &Vector3::z())
    }

    /// The arc around `centre` from `p1` to `p2` in the requested rotation.
    ///
    /// The radius is taken from `p1`. The normal is the upward-facing normal of
    /// the plane through the three points, or `+Z` if they are collinear.
    #[must_use]
    pub fn from_centre_points(centre: &Point, p1: &Point, p2: &Point, clockwise: bool) -> Option<Self> {
        let mut normal = (p1 - centre).cross(&(p2 - centre));
        if normal.is_zero_length_within(EPS * EPS) {
            normal = Vector3::z();
        } else if normal.z < 0.0 {
            normal = -normal;
        }
        let leveller = Leveller::new(&normal);
        let c = centre.levelled(&leveller);
        let a = p1.levelled(&leveller);
        let b = p2.levelled(&leveller);
        let start = c.azimuth_to(&a);
        let sweep = sweep_between(start, c.azimuth_to(&b), clockwise);
        Self::new(*centre, c.length_from_2d(&a), start, sweep, &normal)
    }

    /// The arc passing through three consecutive points.
    ///
    /// Returns `None` if the points are collinear or coincident.
    #[must_use]
    pub fn from_three_points(p1: &Point, p2: &Point, p3: &Point) -> Option<Self> {
        let mut normal = (p2 - p1).cross(&(p3 - p2));
        if normal.is_zero_length_within(EPS * EPS) {
            return None;
        }
        if normal.z < 0.0 {
            normal = -normal;
        }
        let leveller = Leveller::new(&normal);
        let (a, b, c) = (p1.levelled(&leveller), p2.levelled(&leveller), p3.levelled(&leveller));
        let bisect_ab = LinearEquation::from_points(&a, &b)?.perpendicular(&a.midpoint(&b));
        let bisect_bc = LinearEquation::from_points(&b, &c)?.perpendicular(&b.midpoint(&c));
        let centre = bisect_ab.intersection_with(&bisect_bc)?.with_z(a.z);
        let turn = (b - a).cross(&(c - b)).z;
        let start = centre.azimuth_to(&a);
        let sweep = sweep_between(start, centre.azimuth_to(&c), turn < 0.0);
        let centre = centre.levelled(&leveller.reversed());
        Self::new(centre, centre.length_from(p1), start, sweep, &normal)
    }

    /// The arc edge from `origin` to `end` with the given sweep, in the plane
    /// of the chord with an upward normal.
    ///
    /// Returns `None` for a zero chord or a zero sweep.
    #[must_use]
    pub fn from_edge(origin: &Point, end: &Point, sweep: f64) -> Option<Self> {
        let (cx, cy, radius) = centre_from_chord(origin.x, origin.y, end.x, end.y, sweep)?;
        let centre = Point::new(cx, cy, origin.z);
        Self::new_2d(centre, radius, centre.azimuth_to(origin), sweep)
    }

    #[must_use]
    pub fn centre(&self) -> &Point {
        &self.centre
    }

    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[must_use]
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.sweep
    }

    #[must_use]
    pub fn end_angle(&self) -> f64 {
        self.start_angle + self.sweep
    }

    #[must_use]
    pub fn is_clockwise(&self) -> bool {
        self.sweep < 0.0
    }

    /// Whether the arc lies in a horizontal plane.
    #[must_use]
    pub fn is_horizontal(&self) -> bool {
        self.normal.is_parallel(&Vector3::z(), EPS)
    }

    /// The leveller for this arc's plane.
    #[must_use]
    pub fn leveller(&self) -> Leveller {
        Leveller::new(&self.normal)
    }

    /// The supporting plane.
    #[must_use]
    pub fn plane(&self) -> Option<Plane> {
        Plane::from_point(&self.centre, &self.normal)
    }

    /// Point on the full circle at `angle` (measured in the arc's frame).
    #[must_use]
    pub fn point_at_angle(&self, angle: f64) -> Point {
        let leveller = self.leveller();
        let mut p = self.centre.levelled(&leveller);
        p.move_polar(self.radius, angle);
        p.levelled(&leveller.reversed())
    }

    /// Angle of `p` around the centre, in the arc's frame.
    #[must_use]
    pub fn angle_of(&self, p: &Point) -> f64 {
        let leveller = self.leveller();
        self.centre.levelled(&leveller).azimuth_to(&p.levelled(&leveller))
    }

    /// Signed area between the arc and its chord; unsigned unless `is_signed`.
    #[must_use]
    pub fn area(&self, is_signed: bool) -> f64 {
        let area = segment_area(self.radius, self.sweep);
        if is_signed {
            area
        } else {
            area.abs()
        }
    }

    /// The same arc traversed from end to origin.
    #[must_use]
    pub fn reversed(&self) -> Arc {
        Arc {
            start_angle: self.end_angle(),
            sweep: -self.sweep,
            ..*self
        }
    }

    /// Exact XY bounds, or `None` if the arc is not horizontal.
    #[must_use]
    pub fn bounds(&self) -> Option<BoundingBox> {
        if !self.is_horizontal() {
            return None;
        }
        let mut bounds = BoundingBox::new(self.start_point(), self.end_point());
        for k in 0..4_i32 {
            let world = f64::from(k) * FRAC_PI_2;
            let mut p = self.centre;
            p.move_polar(self.radius, world);
            if angle_offset(self.angle_of(&p), self.start_angle, self.sweep) <= self.sweep.abs() {
                bounds.merge_point(&p);
            }
        }
        Some(bounds)
    }

    /// Classifies `p` against the arc, ignoring the height of `p`.
    ///
    /// `Outside`/`Inside` the circle, or on it: `Origin`, `End`, `Along` the
    /// sweep or `Radial` elsewhere on the circle. Expects a horizontal arc.
    #[must_use]
    pub fn position_of_2d(&self, p: &Point, prec: f64) -> Position {
        self.position_in_plane(&p.with_z(self.centre.z), prec)
    }

    /// As [`Arc::position_of_2d`], but `Undefined` if `p` is off the arc's plane.
    #[must_use]
    pub fn position_of_3d(&self, p: &Point, prec: f64) -> Position {
        let leveller = self.leveller();
        let c = self.centre.levelled(&leveller);
        if (p.levelled(&leveller).z - c.z).abs() > prec {
            return Position::Undefined;
        }
        self.position_in_plane(p, prec)
    }

    fn position_in_plane(&self, p: &Point, prec: f64) -> Position {
        let leveller = self.leveller();
        let c = self.centre.levelled(&leveller);
        let q = p.levelled(&leveller);
        let dist = c.length_from_2d(&q);
        if dist > self.radius + prec {
            return Position::Outside;
        }
        if dist < self.radius - prec {
            return Position::Inside;
        }
        let angle = c.azimuth_to(&q);
        let angle_prec = prec / self.radius;
        if is_equal_angle(angle, self.start_angle, angle_prec) {
            Position::Origin
        } else if is_equal_angle(angle, self.end_angle(), angle_prec) {
            Position::End
        } else if angle_offset(angle, self.start_angle, self.sweep) <= self.sweep.abs() {
            Position::Along
        } else {
            Position::Radial
        }
    }

    /// Radial projection of `p` onto the full circle.
    ///
    /// Returns `None` when `p` projects onto the centre.
    #[must_use]
    pub fn closest_point_to_3d(&self, p: &Point) -> Option<Point> {
        let leveller = self.leveller();
        let c = self.centre.levelled(&leveller);
        let q = p.levelled(&leveller);
        if c.length_from_2d(&q) <= f64::EPSILON {
            return None;
        }
        Some(c.moved_polar(self.radius, c.azimuth_to(&q)).levelled(&leveller.reversed()))
    }

    /// Nearest point of the arc itself to `p` in XY.
    #[must_use]
    pub fn closest_point_along_2d(&self, p: &Point, prec: f64) -> Point {
        let mut candidates = vec![self.start_point(), self.end_point()];
        let d = p - &self.centre;
        for (x, y) in line_circle(self.centre.x, self.centre.y, d.x, d.y, self.centre.x, self.centre.y, self.radius, prec) {
            let q = Point::new(x, y, self.centre.z);
            if self.position_of_2d(&q, prec).is_within() {
                candidates.push(q);
            }
        }
        candidates
            .into_iter()
            .min_by(|a, b| a.length_from_2d(p).total_cmp(&b.length_from_2d(p)))
            .unwrap_or(self.centre)
    }

    /// Unit tangent at `p` in the direction of travel.
    #[must_use]
    pub fn tangent_at(&self, p: &Point) -> Option<Vector3> {
        let leveller = self.leveller();
        let r = p.levelled(&leveller) - self.centre.levelled(&leveller);
        let sign = self.sweep.signum();
        let t = Vector3::new(-r.y * sign, r.x * sign, 0.0);
        t.unit().map(|t| t.levelled(&leveller.reversed()))
    }

    #[must_use]
    pub fn start_tangent(&self) -> Option<Vector3> {
        self.tangent_at(&self.start_point())
    }

    #[must_use]
    pub fn end_tangent(&self) -> Option<Vector3> {
        self.tangent_at(&self.end_point())
    }

    /// Points where the infinite carrier of `line` meets the full circle.
    ///
    /// A line in the arc's plane is solved in 2D after levelling; any other
    /// line contributes at most the point where it pierces the plane.
    #[must_use]
    pub fn line_crossings(&self, line: &Line, prec: f64) -> Vec<Point> {
        let leveller = self.leveller();
        let c = self.centre.levelled(&leveller);
        let l = line.levelled(&leveller);
        let back = leveller.reversed();
        if (l.origin.z - c.z).abs() <= prec && (l.end.z - c.z).abs() <= prec {
            let d = l.direction();
            return line_circle(l.origin.x, l.origin.y, d.x, d.y, c.x, c.y, self.radius, prec)
                .into_iter()
                .map(|(x, y)| Point::new(x, y, c.z).levelled(&back))
                .collect();
        }
        self.plane()
            .and_then(|plane| plane.intersection_with_line(line))
            .filter(|p| (p.length_from(&self.centre) - self.radius).abs() <= prec)
            .into_iter()
            .collect()
    }

    /// Points where the full circles of two arcs meet.
    #[must_use]
    pub fn circle_crossings(&self, other: &Arc, prec: f64) -> Vec<Point> {
        if self.normal.is_parallel(&other.normal, EPS) {
            let leveller = self.leveller();
            let c1 = self.centre.levelled(&leveller);
            let c2 = other.centre.levelled(&leveller);
            if (c1.z - c2.z).abs() > prec {
                return Vec::new();
            }
            let back = leveller.reversed();
            return circle_circle(c1.x, c1.y, self.radius, c2.x, c2.y, other.radius, prec)
                .into_iter()
                .map(|(x, y)| Point::new(x, y, c1.z).levelled(&back))
                .collect();
        }
        let (Some(a), Some(b)) = (self.plane(), other.plane()) else {
            return Vec::new();
        };
        let Some(line) = a.intersection_with_plane(&b) else {
            return Vec::new();
        };
        self.line_crossings(&line, prec)
            .into_iter()
            .filter(|p| (p.length_from(&other.centre) - other.radius).abs() <= prec)
            .collect()
    }

    /// Points where the arc meets a plane.
    #[must_use]
    pub fn intersection_with_plane(&self, plane: &Plane, prec: f64) -> Vec<Point> {
        let Some(own) = self.plane() else {
            return Vec::new();
        };
        let Some(line) = own.intersection_with_plane(plane) else {
            return Vec::new();
        };
        self.line_crossings(&line, prec)
            .into_iter()
            .filter(|p| self.position_of_3d(p, prec).is_within())
            .collect()
    }

    /// Points where two arcs meet, each lying on both arcs.
    #[must_use]
    pub fn intersection_with_arc(&self, other: &Arc, prec: f64) -> Vec<Point> {
        self.circle_crossings(other, prec)
            .into_iter()
            .filter(|p| self.position_of_3d(p, prec).is_within() && other.position_of_3d(p, prec).is_within())
            .collect()
    }
}

impl Curve for Arc {
    fn start_point(&self) -> Point {
        self.point_at_angle(self.start_angle)
    }

    fn end_point(&self) -> Point {
        self.point_at_angle(self.end_angle())
    }

    fn midpoint(&self) -> Point {
        self.point_at_angle(self.start_angle + self.sweep * 0.5)
    }

    fn length(&self) -> f64 {
        self.radius * self.sweep.abs()
    }

    fn position_of_2d(&self, p: &Point, prec: f64) -> Position {
        Arc::position_of_2d(self, p, prec)
    }

    fn tangent_at(&self, p: &Point) -> Option<Vector3> {
        Arc::tangent_at(self, p)
    }
}

impl Level for Arc {
    fn level(&mut self, leveller: &Leveller) {
        let start = self.start_point().levelled(leveller);
        self.centre.level(leveller);
        self.normal.level(leveller);
        self.start_angle = self.angle_of(&start);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_relative_eq;

    use super::*;

    fn quarter() -> Arc {
        Arc::new_2d(Point::xy(0.0, 0.0), 1.0, 0.0, FRAC_PI_2).unwrap()
    }

    #[test]
    fn invalid_arcs_are_rejected() {
        assert!(Arc::new_2d(Point::default(), 0.0, 0.0, 1.0).is_none());
        assert!(Arc::new_2d(Point::default(), 1.0, 0.0, 0.0).is_none());
        assert!(Arc::new(Point::default(), 1.0, 0.0, 1.0, &Vector3::zeros()).is_none());
        assert!(Arc::from_edge(&Point::xy(1.0, 1.0), &Point::xy(1.0, 1.0), PI).is_none());
    }

    #[test]
    fn endpoints_and_length() {
        let a = quarter();
        assert!(a.start_point().is_equal(&Point::xy(1.0, 0.0), 1e-12));
        assert!(a.end_point().is_equal(&Point::xy(0.0, 1.0), 1e-12));
        let h = 0.5_f64.sqrt();
        assert!(a.midpoint().is_equal(&Point::xy(h, h), 1e-12));
        assert_relative_eq!(a.length(), FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn from_edge_reconstructs_centre() {
        let a = Arc::from_edge(&Point::xy(1.0, 0.0), &Point::xy(0.0, 1.0), FRAC_PI_2).unwrap();
        assert!(a.centre().is_equal(&Point::xy(0.0, 0.0), 1e-12));
        assert_relative_eq!(a.radius(), 1.0, epsilon = 1e-12);
        assert!(a.end_point().is_equal(&Point::xy(0.0, 1.0), 1e-12));

        let cw = Arc::from_edge(&Point::xy(1.0, 0.0), &Point::xy(0.0, 1.0), -FRAC_PI_2).unwrap();
        assert!(cw.centre().is_equal(&Point::xy(1.0, 1.0), 1e-12));
        assert!(cw.end_point().is_equal(&Point::xy(0.0, 1.0), 1e-12));
    }

    #[test]
    fn from_three_points_both_senses() {
        let a = Arc::from_three_points(&Point::xy(1.0, 0.0), &Point::xy(0.0, 1.0), &Point::xy(-1.0, 0.0)).unwrap();
        assert!(a.centre().is_equal(&Point::xy(0.0, 0.0), 1e-9));
        assert_relative_eq!(a.sweep(), PI, epsilon = 1e-9);

        let b = Arc::from_three_points(&Point::xy(-1.0, 0.0), &Point::xy(0.0, 1.0), &Point::xy(1.0, 0.0)).unwrap();
        assert_relative_eq!(b.sweep(), -PI, epsilon = 1e-9);
        assert!(b.end_point().is_equal(&Point::xy(1.0, 0.0), 1e-9));
        assert!(Arc::from_three_points(&Point::xy(0.0, 0.0), &Point::xy(1.0, 1.0), &Point::xy(2.0, 2.0)).is_none());
    }

    #[test]
    fn from_centre_points_direction() {
        let c = Point::default();
        let ccw = Arc::from_centre_points(&c, &Point::xy(1.0, 0.0), &Point::xy(0.0, 1.0), false).unwrap();
        assert_relative_eq!(ccw.sweep(), FRAC_PI_2, epsilon = 1e-12);
        let cw = Arc::from_centre_points(&c, &Point::xy(1.0, 0.0), &Point::xy(0.0, 1.0), true).unwrap();
        assert_relative_eq!(cw.sweep(), FRAC_PI_2 - TAU, epsilon = 1e-12);
    }

    #[test]
    fn classification() {
        let a = quarter();
        let h = 0.5_f64.sqrt();
        assert_eq!(a.position_of_2d(&Point::xy(1.0, 0.0), EPS), Position::Origin);
        assert_eq!(a.position_of_2d(&Point::xy(0.0, 1.0), EPS), Position::End);
        assert_eq!(a.position_of_2d(&Point::xy(h, h), EPS), Position::Along);
        assert_eq!(a.position_of_2d(&Point::xy(-h, -h), EPS), Position::Radial);
        assert_eq!(a.position_of_2d(&Point::xy(0.1, 0.1), EPS), Position::Inside);
        assert_eq!(a.position_of_2d(&Point::xy(2.0, 2.0), EPS), Position::Outside);
        assert_eq!(a.position_of_3d(&Point::new(h, h, 1.0), EPS), Position::Undefined);
    }

    #[test]
    fn bounds_include_cardinal_extremes() {
        let semi = Arc::new_2d(Point::xy(0.0, 0.0), 2.0, 0.0, PI).unwrap();
        let b = semi.bounds().unwrap();
        assert_relative_eq!(b.max.y, 2.0, epsilon = 1e-12);
        assert_relative_eq!(b.min.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(b.min.x, -2.0, epsilon = 1e-12);
        let tilted = Arc::new(Point::default(), 1.0, 0.0, PI, &Vector3::x()).unwrap();
        assert!(tilted.bounds().is_none());
    }

    #[test]
    fn area_and_reverse() {
        let semi = Arc::new_2d(Point::xy(0.0, 0.0), 1.0, 0.0, PI).unwrap();
        assert_relative_eq!(semi.area(true), FRAC_PI_2, epsilon = 1e-12);
        let r = semi.reversed();
        assert_relative_eq!(r.area(true), -FRAC_PI_2, epsilon = 1e-12);
        assert!(r.start_point().is_equal(&semi.end_point(), 1e-12));
    }

    #[test]
    fn closest_points_and_tangents() {
        let a = quarter();
        assert!(a.closest_point_to_3d(&Point::xy(3.0, 0.0)).unwrap().is_equal(&Point::xy(1.0, 0.0), 1e-12));
        let h = 0.5_f64.sqrt();
        assert!(a.closest_point_along_2d(&Point::xy(2.0, 2.0), EPS).is_equal(&Point::xy(h, h), 1e-12));
        assert!(a.closest_point_along_2d(&Point::xy(3.0, -3.0), EPS).is_equal(&Point::xy(1.0, 0.0), 1e-12));
        let t = a.start_tangent().unwrap();
        assert_relative_eq!(t, Vector3::y(), epsilon = 1e-12);
        // Travelling back clockwise from (0, 1) heads towards +X.
        let t = a.reversed().start_tangent().unwrap();
        assert_relative_eq!(t, Vector3::x(), epsilon = 1e-12);
    }

    #[test]
    fn crossings_with_lines_and_arcs() {
        let circle = Arc::new_2d(Point::xy(0.0, 0.0), 1.0, 0.0, TAU).unwrap();
        let line = Line::new(Point::xy(-2.0, 0.0), Point::xy(2.0, 0.0));
        assert_eq!(circle.line_crossings(&line, EPS).len(), 2);

        let vertical = Line::new(Point::new(1.0, 0.0, -1.0), Point::new(1.0, 0.0, 1.0));
        assert_eq!(circle.line_crossings(&vertical, EPS).len(), 1);

        let other = Arc::new_2d(Point::xy(1.0, 0.0), 1.0, 0.0, TAU).unwrap();
        assert_eq!(circle.intersection_with_arc(&other, EPS).len(), 2);

        let upper = Arc::new_2d(Point::xy(0.0, 0.0), 1.0, 0.0, PI).unwrap();
        let hits = upper.intersection_with_arc(&other, EPS);
        assert_eq!(hits.len(), 1);
        assert!(hits[0].y > 0.0);
    }

    #[test]
    fn levelling_keeps_shape() {
        let a = quarter();
        let l = Leveller::new(&Vector3::new(1.0, 1.0, 0.5));
        let moved = a.levelled(&l);
        assert!(moved.start_point().is_equal(&a.start_point().levelled(&l), 1e-9));
        assert!(moved.end_point().is_equal(&a.end_point().levelled(&l), 1e-9));
        let back = moved.levelled(&l.reversed());
        assert!(back.midpoint().is_equal(&a.midpoint(), 1e-9));
    }
}
