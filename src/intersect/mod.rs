//! Intersection records, filtered lists and the line/arc intersection engine.

pub mod engine;
mod position;
mod xlist;
mod xpoint;

pub use engine::create_intersect;
pub use position::{Position, PositionMask};
pub use xlist::{XFilter, XList};
pub use xpoint::{Role, XInfo, XPoint};
