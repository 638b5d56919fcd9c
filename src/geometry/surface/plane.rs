use crate::error::{GeometryError, Result};
use crate::geometry::{BoundingBox, Line, Point};
use crate::intersect::Position;
use crate::math::{Vector3, VectorExt, EPS};
use crate::transform::{Level, Leveller};

/// An infinite plane: the points `P` with `normal · P = offset`.
///
/// The normal is always unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    offset: f64,
    normal: Vector3,
}

impl Default for Plane {
    fn default() -> Self {
        Self::horizontal(0.0)
    }
}

impl Plane {
    /// A plane from its offset along the unit normal.
    ///
    /// Returns `None` if `normal` is empty.
    #[must_use]
    pub fn new(offset: f64, normal: &Vector3) -> Option<Self> {
        let normal = normal.unit()?;
        Some(Self { offset, normal })
    }

    /// The plane through `point` with the given normal.
    #[must_use]
    pub fn from_point(point: &Point, normal: &Vector3) -> Option<Self> {
        let normal = normal.unit()?;
        Some(Self {
            offset: normal.dot(&point.coords()),
            normal,
        })
    }

    /// The plane through three points, normal by the right-hand rule on `a → b → c`.
    ///
    /// Returns `None` if the points are collinear.
    #[must_use]
    pub fn from_points(a: &Point, b: &Point, c: &Point) -> Option<Self> {
        let normal = (b - a).cross(&(c - a));
        if normal.is_zero_length_within(EPS * EPS) {
            return None;
        }
        Self::from_point(a, &normal)
    }

    /// The plane `z = height`.
    #[must_use]
    pub fn horizontal(height: f64) -> Self {
        Self {
            offset: height,
            normal: Vector3::z(),
        }
    }

    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    pub fn set_offset(&mut self, offset: f64) {
        self.offset = offset;
    }

    /// Replaces the normal, keeping the offset.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] if `normal` is empty; the plane is
    /// left unchanged.
    pub fn set_normal(&mut self, normal: &Vector3) -> Result<()> {
        self.normal = normal.unit().ok_or(GeometryError::ZeroVector)?;
        Ok(())
    }

    /// Signed distance from the plane, positive on the side the normal points to.
    #[must_use]
    pub fn length_to(&self, p: &Point) -> f64 {
        self.normal.dot(&p.coords()) - self.offset
    }

    /// `Front`, `Along` or `Back`.
    #[must_use]
    pub fn position_of(&self, p: &Point, prec: f64) -> Position {
        let len = self.length_to(p);
        if len > prec {
            Position::Front
        } else if len < -prec {
            Position::Back
        } else {
            Position::Along
        }
    }

    /// Orthogonal projection of `p` onto the plane.
    #[must_use]
    pub fn closest_point_to(&self, p: &Point) -> Point {
        *p - self.normal * self.length_to(p)
    }

    /// Height of the plane above `(x, y)`, or `None` for a vertical plane.
    #[must_use]
    pub fn height_at(&self, x: f64, y: f64) -> Option<f64> {
        if self.normal.z.abs() <= EPS {
            return None;
        }
        Some((self.offset - self.normal.x * x - self.normal.y * y) / self.normal.z)
    }

    /// Where the infinite carrier of `line` meets the plane.
    ///
    /// Returns `None` when the line is parallel to the plane or has no length.
    #[must_use]
    pub fn intersection_with_line(&self, line: &Line) -> Option<Point> {
        let dir = line.direction().unit()?;
        let denom = self.normal.dot(&dir);
        if denom.abs() <= EPS {
            return None;
        }
        let t = -self.length_to(&line.origin) / denom;
        Some(line.origin + dir * t)
    }

    /// The line where two planes meet, with a unit-length direction.
    ///
    /// Returns `None` when the planes are parallel.
    #[must_use]
    pub fn intersection_with_plane(&self, other: &Plane) -> Option<Line> {
        let dir = self.normal.cross(&other.normal);
        if dir.is_zero_length_within(EPS) {
            return None;
        }
        let (n1, n2) = (&self.normal, &other.normal);
        let (o1, o2) = (self.offset, other.offset);
        // Clear the coordinate where the direction is largest and solve the
        // remaining 2x2 system.
        let (ax, ay, az) = (dir.x.abs(), dir.y.abs(), dir.z.abs());
        let origin = if az >= ax && az >= ay {
            Point::new((o1 * n2.y - o2 * n1.y) / dir.z, (n1.x * o2 - n2.x * o1) / dir.z, 0.0)
        } else if ay >= ax {
            Point::new((n1.z * o2 - n2.z * o1) / dir.y, 0.0, (o1 * n2.x - o2 * n1.x) / dir.y)
        } else {
            Point::new(0.0, (o1 * n2.z - o2 * n1.z) / dir.x, (n1.y * o2 - n2.y * o1) / dir.x)
        };
        let dir = dir.normalize();
        Some(Line::new(origin, origin + dir))
    }

    /// Whether the plane passes strictly between corners of `bounds`.
    #[must_use]
    pub fn cuts_through(&self, bounds: &BoundingBox, prec: f64) -> bool {
        let mut front = false;
        let mut back = false;
        for corner in bounds.corners() {
            match self.position_of(&corner, prec) {
                Position::Front => front = true,
                Position::Back => back = true,
                _ => {}
            }
        }
        front && back
    }
}

impl Level for Plane {
    fn level(&mut self, leveller: &Leveller) {
        self.normal = leveller.apply_vector(&self.normal);
    }
}
