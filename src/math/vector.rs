use super::{Vector3, EPS};

/// Predicates and polar accessors on [`Vector3`].
///
/// A vector whose magnitude is within tolerance of zero is empty: it has no
/// direction, so it is neither parallel nor perpendicular to anything.
pub trait VectorExt {
    /// Whether the magnitude is within `prec` of zero.
    fn is_zero_length_within(&self, prec: f64) -> bool;

    /// Whether the magnitude is within [`EPS`] of zero.
    fn is_zero_length(&self) -> bool {
        self.is_zero_length_within(EPS)
    }

    /// Unit vector, or `None` for an empty vector.
    fn unit(&self) -> Option<Vector3>;

    /// Whether the unit vectors' cross product is shorter than `prec`.
    fn is_parallel(&self, other: &Vector3, prec: f64) -> bool;

    /// Whether the unit vectors' dot product is smaller than `prec`.
    fn is_perpendicular(&self, other: &Vector3, prec: f64) -> bool;

    /// Angle of the XY projection from the +X axis, in `(-π, π]`.
    fn azimuth(&self) -> f64;

    /// Angle above the XY plane, in `[-π/2, π/2]`.
    fn altitude(&self) -> f64;
}

impl VectorExt for Vector3 {
    fn is_zero_length_within(&self, prec: f64) -> bool {
        self.norm() <= prec
    }

    fn unit(&self) -> Option<Vector3> {
        let len = self.norm();
        if len <= f64::EPSILON {
            None
        } else {
            Some(self / len)
        }
    }

    fn is_parallel(&self, other: &Vector3, prec: f64) -> bool {
        match (self.unit(), other.unit()) {
            (Some(a), Some(b)) => a.cross(&b).norm() <= prec,
            _ => false,
        }
    }

    fn is_perpendicular(&self, other: &Vector3, prec: f64) -> bool {
        match (self.unit(), other.unit()) {
            (Some(a), Some(b)) => a.dot(&b).abs() <= prec,
            _ => false,
        }
    }

    fn azimuth(&self) -> f64 {
        self.y.atan2(self.x)
    }

    fn altitude(&self) -> f64 {
        self.z.atan2(self.x.hypot(self.y))
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    use super::*;

    #[test]
    fn empty_vector_has_no_relations() {
        let zero = Vector3::zeros();
        let x = Vector3::x();
        assert!(zero.is_zero_length());
        assert!(!x.is_zero_length());
        assert!(Vector3::new(0.0, 1e-7, 0.0).is_zero_length());
        assert!(zero.unit().is_none());
        assert!(!zero.is_parallel(&x, EPS));
        assert!(!zero.is_perpendicular(&x, EPS));
    }

    #[test]
    fn parallel_and_perpendicular() {
        let a = Vector3::new(2.0, 0.0, 0.0);
        let b = Vector3::new(-5.0, 0.0, 0.0);
        let c = Vector3::new(0.0, 3.0, 0.0);
        assert!(a.is_parallel(&b, EPS));
        assert!(!a.is_parallel(&c, EPS));
        assert!(a.is_perpendicular(&c, EPS));
        assert!(!a.is_perpendicular(&b, EPS));
    }

    #[test]
    fn polar_angles() {
        let v = Vector3::new(1.0, 1.0, 0.0);
        assert!((v.azimuth() - FRAC_PI_4).abs() < 1e-12);
        let up = Vector3::new(0.0, 0.0, 4.0);
        assert!((up.altitude() - FRAC_PI_2).abs() < 1e-12);
    }
}
