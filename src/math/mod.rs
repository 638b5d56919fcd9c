pub mod arc_2d;
pub mod intersect_2d;
pub mod matrix;
pub mod polygon_2d;
pub mod tolerance;
pub mod vector;

pub use matrix::{Matrix3, Matrix4};
pub use vector::VectorExt;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Homogeneous 4-component vector type.
pub type Vector4 = nalgebra::Vector4<f64>;

/// Default linear tolerance for predicates.
pub const EPS: f64 = 1e-5;

/// Default angular tolerance for predicates (0.1 degrees).
pub const EPS_ANGLE: f64 = std::f64::consts::PI / 1800.0;
