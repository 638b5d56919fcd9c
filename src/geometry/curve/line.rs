use crate::geometry::{BoundingBox, LinearEquation, Plane, Point};
use crate::intersect::Position;
use crate::math::{Matrix4, Vector3, VectorExt};
use crate::transform::{Level, Leveller};

use super::Curve;

/// A straight segment from `origin` to `end`.
///
/// Length, azimuth and midpoint are derived on demand.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Line {
    pub origin: Point,
    pub end: Point,
}

impl Line {
    #[must_use]
    pub const fn new(origin: Point, end: Point) -> Self {
        Self { origin, end }
    }

    /// Vector from origin to end.
    #[must_use]
    pub fn direction(&self) -> Vector3 {
        self.end - self.origin
    }

    #[must_use]
    pub fn length_2d(&self) -> f64 {
        self.origin.length_from_2d(&self.end)
    }

    #[must_use]
    pub fn azimuth(&self) -> f64 {
        self.origin.azimuth_to(&self.end)
    }

    #[must_use]
    pub fn altitude(&self) -> f64 {
        self.origin.altitude_to(&self.end)
    }

    /// The implicit XY equation, or `None` if the line has no XY extent.
    #[must_use]
    pub fn equation(&self) -> Option<LinearEquation> {
        LinearEquation::from_points(&self.origin, &self.end)
    }

    #[must_use]
    pub fn reversed(&self) -> Line {
        Line::new(self.end, self.origin)
    }

    /// Point at parameter `t`; 0 is the origin and 1 the end.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point {
        self.origin.lerp(&self.end, t)
    }

    /// Copy shifted sideways in XY; positive shifts move left.
    #[must_use]
    pub fn offset_2d(&self, shift: f64) -> Line {
        let len = self.length_2d();
        if len == 0.0 {
            return *self;
        }
        let d = self.direction();
        let n = Vector3::new(-d.y / len * shift, d.x / len * shift, 0.0);
        Line::new(self.origin + n, self.end + n)
    }

    /// Lengthens (or, for a negative `length`, shortens) the line at its end.
    pub fn extend(&mut self, length: f64) {
        if let Some(dir) = self.direction().unit() {
            self.end += dir * length;
        }
    }

    /// Foot of the perpendicular from `p` on the infinite XY carrier, with `z`
    /// interpolated along the line.
    #[must_use]
    pub fn closest_point_to_2d(&self, p: &Point) -> Point {
        self.point_at(self.parameter_2d(p))
    }

    /// As [`Line::closest_point_to_2d`], clamped to the segment.
    #[must_use]
    pub fn closest_point_along_2d(&self, p: &Point) -> Point {
        self.point_at(self.parameter_2d(p).clamp(0.0, 1.0))
    }

    /// XY distance from `p` to the segment.
    #[must_use]
    pub fn length_to_2d(&self, p: &Point) -> f64 {
        self.closest_point_along_2d(p).length_from_2d(p)
    }

    /// Foot of the 3D perpendicular from `p` on the infinite carrier.
    #[must_use]
    pub fn closest_point_to_3d(&self, p: &Point) -> Option<Point> {
        let plane = Plane::from_point(p, &(self.origin - self.end))?;
        plane.intersection_with_line(self)
    }

    /// Position on the line, or `Undefined` if `p` is off the XY carrier.
    ///
    /// `Origin`/`End` when the perpendicular through that endpoint passes
    /// within `prec` of `p`; `Along` between them; `Before`/`After` beyond.
    #[must_use]
    pub fn position_of_2d(&self, p: &Point, prec: f64) -> Position {
        let Some(eq) = self.equation() else {
            return Position::Undefined;
        };
        if eq.length_to(p) > prec {
            return Position::Undefined;
        }
        let len = self.length_2d();
        let along = self.parameter_2d(p) * len;
        classify_along(along, len, prec)
    }

    /// 3D variant of [`Line::position_of_2d`].
    #[must_use]
    pub fn position_of_3d(&self, p: &Point, prec: f64) -> Position {
        let d = self.direction();
        let len = d.norm();
        if len <= f64::EPSILON {
            return Position::Undefined;
        }
        let u = d / len;
        let rel = p - &self.origin;
        let along = rel.dot(&u);
        if (rel - u * along).norm() > prec {
            return Position::Undefined;
        }
        classify_along(along, len, prec)
    }

    /// Crossing of the two XY carriers, `z` interpolated along `self`.
    #[must_use]
    pub fn intersection_with_2d(&self, other: &Line) -> Option<Point> {
        let x = self.equation()?.intersection_with(&other.equation()?)?;
        Some(self.closest_point_to_2d(&x))
    }

    /// Crossing of two coplanar 3D carriers.
    ///
    /// Both lines are levelled into the plane they share and solved in 2D.
    /// Returns `None` for parallel or skew lines.
    #[must_use]
    pub fn intersection_with_3d(&self, other: &Line, prec: f64) -> Option<Point> {
        let normal = self.direction().cross(&other.direction());
        if normal.is_zero_length_within(prec * prec) {
            return None;
        }
        let leveller = Leveller::new(&normal);
        let a = self.levelled(&leveller);
        let b = other.levelled(&leveller);
        if (a.origin.z - b.origin.z).abs() > prec {
            return None;
        }
        let x = a.intersection_with_2d(&b)?;
        Some(x.with_z(a.origin.z).levelled(&leveller.reversed()))
    }

    #[must_use]
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.origin, self.end)
    }

    #[must_use]
    pub fn transformed(&self, matrix: &Matrix4) -> Line {
        Line::new(self.origin.transform(matrix), self.end.transform(matrix))
    }

    /// XY projection parameter of `p`, 0 at the origin and 1 at the end.
    fn parameter_2d(&self, p: &Point) -> f64 {
        let d = self.direction();
        let len_sq = d.x * d.x + d.y * d.y;
        if len_sq == 0.0 {
            return 0.0;
        }
        ((p.x - self.origin.x) * d.x + (p.y - self.origin.y) * d.y) / len_sq
    }
}

fn classify_along(along: f64, len: f64, prec: f64) -> Position {
    if along.abs() <= prec {
        Position::Origin
    } else if (along - len).abs() <= prec {
        Position::End
    } else if along < 0.0 {
        Position::Before
    } else if along > len {
        Position::After
    } else {
        Position::Along
    }
}

impl Curve for Line {
    fn start_point(&self) -> Point {
        self.origin
    }

    fn end_point(&self) -> Point {
        self.end
    }

    fn midpoint(&self) -> Point {
        self.origin.midpoint(&self.end)
    }

    fn length(&self) -> f64 {
        self.origin.length_from(&self.end)
    }

    fn position_of_2d(&self, p: &Point, prec: f64) -> Position {
        Line::position_of_2d(self, p, prec)
    }

    fn tangent_at(&self, _p: &Point) -> Option<Vector3> {
        self.direction().unit()
    }
}

impl Level for Line {
    fn level(&mut self, leveller: &Leveller) {
        self.origin.level(leveller);
        self.end.level(leveller);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::EPS;

    fn x_axis() -> Line {
        Line::new(Point::xy(0.0, 0.0), Point::xy(10.0, 0.0))
    }

    #[test]
    fn position_on_segment() {
        let l = x_axis();
        assert_eq!(l.position_of_2d(&Point::xy(0.0, 0.0), EPS), Position::Origin);
        assert_eq!(l.position_of_2d(&Point::xy(10.0, 0.0), EPS), Position::End);
        assert_eq!(l.position_of_2d(&Point::xy(4.0, 0.0), EPS), Position::Along);
        assert_eq!(l.position_of_2d(&Point::xy(-1.0, 0.0), EPS), Position::Before);
        assert_eq!(l.position_of_2d(&Point::xy(11.0, 0.0), EPS), Position::After);
        assert_eq!(l.position_of_2d(&Point::xy(4.0, 1.0), EPS), Position::Undefined);
        assert_eq!(l.position_of_3d(&Point::new(4.0, 0.0, 1.0), EPS), Position::Undefined);
    }

    #[test]
    fn closest_points() {
        let l = x_axis();
        let p = Point::xy(12.0, 3.0);
        assert!(l.closest_point_to_2d(&p).is_equal(&Point::xy(12.0, 0.0), 1e-12));
        assert!(l.closest_point_along_2d(&p).is_equal(&Point::xy(10.0, 0.0), 1e-12));
        assert_relative_eq!(l.length_to_2d(&p), 13.0_f64.sqrt(), epsilon = 1e-12);
        let foot = l.closest_point_to_3d(&Point::new(3.0, 4.0, 5.0)).unwrap();
        assert!(foot.is_equal(&Point::xy(3.0, 0.0), 1e-12));
    }

    #[test]
    fn crossing_in_2d() {
        let a = Line::new(Point::xy(0.0, 0.0), Point::xy(4.0, 4.0));
        let b = Line::new(Point::xy(0.0, 4.0), Point::xy(4.0, 0.0));
        assert!(a.intersection_with_2d(&b).unwrap().is_equal(&Point::xy(2.0, 2.0), 1e-9));
        assert!(a.intersection_with_2d(&a.offset_2d(1.0)).is_none());
    }

    #[test]
    fn crossing_in_3d() {
        let a = Line::new(Point::new(0.0, 0.0, 0.0), Point::new(2.0, 2.0, 2.0));
        let b = Line::new(Point::new(2.0, 0.0, 0.0), Point::new(0.0, 2.0, 2.0));
        let x = a.intersection_with_3d(&b, EPS).unwrap();
        assert!(x.is_equal(&Point::new(1.0, 1.0, 1.0), 1e-9));

        let skew = Line::new(Point::new(0.0, 0.0, 5.0), Point::new(0.0, 1.0, 5.0));
        assert!(x_axis().intersection_with_3d(&skew, EPS).is_none());
    }

    #[test]
    fn offset_and_extend() {
        let l = x_axis().offset_2d(2.0);
        assert!(l.origin.is_equal(&Point::xy(0.0, 2.0), 1e-12));
        let mut e = x_axis();
        e.extend(5.0);
        assert!(e.end.is_equal(&Point::xy(15.0, 0.0), 1e-12));
        assert!(e.reversed().origin.is_equal(&e.end, 0.0));
    }
}
