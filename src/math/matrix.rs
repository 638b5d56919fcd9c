//! Affine matrix factories.
//!
//! Matrices are row-major `nalgebra` matrices; `Matrix3` holds linear parts and
//! `Matrix4` homogeneous affine transforms.

use super::{Vector3, EPS};

/// 3x3 linear transformation matrix.
pub type Matrix3 = nalgebra::Matrix3<f64>;

/// 4x4 homogeneous transformation matrix.
pub type Matrix4 = nalgebra::Matrix4<f64>;

/// Right-handed rotation about the X axis.
#[must_use]
pub fn rotation_x(angle: f64) -> Matrix3 {
    let (s, c) = angle.sin_cos();
    #[rustfmt::skip]
    let m = Matrix3::new(
        1.0, 0.0, 0.0,
        0.0, c,   -s,
        0.0, s,   c,
    );
    m
}

/// Right-handed rotation about the Y axis.
#[must_use]
pub fn rotation_y(angle: f64) -> Matrix3 {
    let (s, c) = angle.sin_cos();
    #[rustfmt::skip]
    let m = Matrix3::new(
        c,   0.0, s,
        0.0, 1.0, 0.0,
        -s,  0.0, c,
    );
    m
}

/// Right-handed rotation about the Z axis.
#[must_use]
pub fn rotation_z(angle: f64) -> Matrix3 {
    let (s, c) = angle.sin_cos();
    #[rustfmt::skip]
    let m = Matrix3::new(
        c,   -s,  0.0,
        s,   c,   0.0,
        0.0, 0.0, 1.0,
    );
    m
}

/// Non-uniform scale about the origin.
#[must_use]
pub fn scaling(sx: f64, sy: f64, sz: f64) -> Matrix4 {
    Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz))
}

/// Pure translation.
#[must_use]
pub fn translation(offset: &Vector3) -> Matrix4 {
    Matrix4::new_translation(offset)
}

/// Combines a linear part and a translation into one affine transform.
#[must_use]
pub fn affine(linear: &Matrix3, offset: &Vector3) -> Matrix4 {
    let mut m = linear.to_homogeneous();
    m[(0, 3)] = offset.x;
    m[(1, 3)] = offset.y;
    m[(2, 3)] = offset.z;
    m
}

/// Inverse of `m`, or `None` when the determinant is within tolerance of zero.
#[must_use]
pub fn inverse(m: &Matrix3) -> Option<Matrix3> {
    if m.determinant().abs() <= EPS * EPS {
        return None;
    }
    m.try_inverse()
}

/// Inverse of the affine transform `m`, or `None` when it is singular.
#[must_use]
pub fn inverse_affine(m: &Matrix4) -> Option<Matrix4> {
    if m.determinant().abs() <= EPS * EPS {
        return None;
    }
    m.try_inverse()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn quarter_turns() {
        let x = Vector3::x();
        assert_relative_eq!(rotation_z(FRAC_PI_2) * x, Vector3::y(), epsilon = 1e-12);
        assert_relative_eq!(rotation_y(FRAC_PI_2) * x, -Vector3::z(), epsilon = 1e-12);
        assert_relative_eq!(rotation_x(FRAC_PI_2) * Vector3::y(), Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn inverse_of_rotation_is_transpose() {
        let r = rotation_x(0.3) * rotation_z(1.1);
        let inv = inverse(&r).unwrap();
        assert_relative_eq!(inv, r.transpose(), epsilon = 1e-12);
    }

    #[test]
    fn singular_matrix_has_no_inverse() {
        let m = Matrix3::new(1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 0.0, 0.0, 1.0);
        assert!(inverse(&m).is_none());
        assert!(inverse_affine(&scaling(1.0, 0.0, 1.0)).is_none());
    }

    #[test]
    fn affine_applies_translation_after_linear() {
        let m = affine(&rotation_z(FRAC_PI_2), &Vector3::new(1.0, 0.0, 0.0));
        let p = m.transform_point(&nalgebra::Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-12);
    }
}
