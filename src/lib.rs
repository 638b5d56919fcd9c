pub mod error;
pub mod geometry;
pub mod intersect;
pub mod math;
pub mod polygon;
pub mod tessellation;
pub mod transform;

pub use error::{PolygeoError, Result};
pub use geometry::{Arc, BoundingBox, Line, Plane, Point};
pub use intersect::{Position, PositionMask, XList};
pub use polygon::{LineSplit, PolyEdge, PolyPoint, Polygon, PolygonSplit, Rotation};
