//! Fundamental geometry and object types.

mod bounds;
mod object;
mod point;

pub use bounds::{Box2D, Box3D};
pub use object::{MapObject, ObjectRecord, ObjectShape, PlannedPath, WALL_CATEGORY};
pub use point::{GridCell, Point2D};
