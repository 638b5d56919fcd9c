use super::rotater::{Axis, Rotater};
use crate::geometry::Point;
use crate::math::{Matrix3, Vector3, VectorExt};

/// Composite rotation that maps a plane normal onto `+Z`.
///
/// The rotaters are applied in slot order: about Y, then about X, then an
/// optional spin about Z. [`Leveller::reverse`] swaps the first and last
/// slots and reverses each rotater, so the reversed leveller undoes the
/// forward one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leveller {
    rotaters: [Rotater; 3],
}

impl Default for Leveller {
    fn default() -> Self {
        Self {
            rotaters: [
                Rotater::identity(Axis::Y),
                Rotater::identity(Axis::X),
                Rotater::identity(Axis::Z),
            ],
        }
    }
}

impl Leveller {
    /// The leveller taking `normal` to `+Z`.
    ///
    /// An empty normal gives the identity.
    #[must_use]
    pub fn new(normal: &Vector3) -> Self {
        Self::with_azimuth(normal, 0.0)
    }

    /// As [`Leveller::new`], followed by a rotation of `-z_angle` about Z.
    #[must_use]
    pub fn with_azimuth(normal: &Vector3, z_angle: f64) -> Self {
        let Some(n) = normal.unit() else {
            return Self::default();
        };
        let rho = n.x.hypot(n.z);
        let y_angle = if rho > 0.0 { (-n.x).atan2(n.z) } else { 0.0 };
        let x_angle = n.y.atan2(rho);
        Self {
            rotaters: [
                Rotater::new(Axis::Y, y_angle),
                Rotater::new(Axis::X, x_angle),
                Rotater::new(Axis::Z, -z_angle),
            ],
        }
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.rotaters.iter().all(Rotater::is_identity)
    }

    /// Turns this leveller into its inverse.
    pub fn reverse(&mut self) {
        self.rotaters.swap(0, 2);
        for r in &mut self.rotaters {
            r.reverse();
        }
    }

    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut copy = *self;
        copy.reverse();
        copy
    }

    /// The combined linear transform.
    #[must_use]
    pub fn matrix(&self) -> Matrix3 {
        self.rotaters
            .iter()
            .fold(Matrix3::identity(), |acc, r| r.matrix() * acc)
    }

    #[must_use]
    pub fn apply_vector(&self, v: &Vector3) -> Vector3 {
        self.rotaters.iter().fold(*v, |acc, r| r.apply_vector(&acc))
    }

    #[must_use]
    pub fn apply_point(&self, p: &Point) -> Point {
        Point::from(self.apply_vector(&p.coords()))
    }
}

/// Entities that can be carried through a [`Leveller`].
pub trait Level {
    fn level(&mut self, leveller: &Leveller);

    #[must_use]
    fn levelled(&self, leveller: &Leveller) -> Self
    where
        Self: Sized + Clone,
    {
        let mut copy = self.clone();
        copy.level(leveller);
        copy
    }
}

impl Level for Point {
    fn level(&mut self, leveller: &Leveller) {
        *self = leveller.apply_point(self);
    }
}

impl Level for Vector3 {
    fn level(&mut self, leveller: &Leveller) {
        *self = leveller.apply_vector(self);
    }
}
