//! Rigid rotations used to reduce 3D problems to the XY plane.

mod leveller;
mod rotater;

pub use leveller::{Level, Leveller};
pub use rotater::{Axis, Rotater};
