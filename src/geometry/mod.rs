pub mod bbox;
pub mod curve;
pub mod point;
pub mod surface;

pub use bbox::{Anchor, BoundingBox};
pub use curve::{Arc, Curve, Line, LinearEquation};
pub use point::Point;
pub use surface::Plane;
