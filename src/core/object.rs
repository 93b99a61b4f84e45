//! Map object and path types.

use super::bounds::{Box2D, Box3D};
use super::point::Point2D;
use serde::{Deserialize, Serialize};

/// Category label reserved for wall objects.
///
/// Walls are exempt from wall-vs-wall collision checks on insertion.
pub const WALL_CATEGORY: &str = "wall";

/// Geometry carried by a map object.
///
/// A closed variant: solids occupy grid cells and participate in collision
/// checks, trajectories are render-only point sequences.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ObjectShape {
    /// Axis-aligned solid given by floor-corner position and size.
    Solid {
        /// Minimum ("floor") corner `(x, y, z)`.
        position: (f32, f32, f32),
        /// Extent `(width, depth, height)`, all non-negative.
        size: (f32, f32, f32),
    },
    /// Ordered 2D point sequence, used only for rendering.
    Trajectory { points: Vec<Point2D> },
}

/// An object registered in a map.
///
/// Objects are immutable once inserted, except for the identity renaming
/// the map applies to keep ids unique.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapObject {
    pub id: String,
    /// Category label, e.g. `"chair"` or `"wall"`.
    pub category: String,
    pub shape: ObjectShape,
}

impl MapObject {
    /// Create a solid object from position and size.
    pub fn new_solid(
        id: impl Into<String>,
        category: impl Into<String>,
        position: (f32, f32, f32),
        size: (f32, f32, f32),
    ) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            shape: ObjectShape::Solid { position, size },
        }
    }

    /// Create a trajectory object from a point sequence.
    pub fn new_trajectory(id: impl Into<String>, points: Vec<Point2D>) -> Self {
        Self {
            id: id.into(),
            category: "path".to_string(),
            shape: ObjectShape::Trajectory { points },
        }
    }

    /// Relocate a solid object before insertion. No-op for trajectories.
    pub fn with_position(mut self, position: (f32, f32, f32)) -> Self {
        if let ObjectShape::Solid { position: p, .. } = &mut self.shape {
            *p = position;
        }
        self
    }

    /// 3D bounding box, `None` for trajectories.
    pub fn bbox_3d(&self) -> Option<Box3D> {
        match &self.shape {
            ObjectShape::Solid { position, size } => {
                Some(Box3D::from_position_size(*position, *size))
            }
            ObjectShape::Trajectory { .. } => None,
        }
    }

    /// Horizontal footprint, `None` for trajectories.
    pub fn bbox_2d(&self) -> Option<Box2D> {
        self.bbox_3d().map(|b| b.footprint())
    }

    /// Whether this object carries the wall category.
    pub fn is_wall(&self) -> bool {
        self.category == WALL_CATEGORY
    }
}

/// Flat object record shape exchanged with the I/O layer:
/// `{id, label, size: [w, d, h], position: [x, y, z]}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ObjectRecord {
    pub id: String,
    pub label: String,
    pub size: [f32; 3],
    pub position: [f32; 3],
}

impl From<ObjectRecord> for MapObject {
    fn from(r: ObjectRecord) -> Self {
        MapObject::new_solid(
            r.id,
            r.label,
            (r.position[0], r.position[1], r.position[2]),
            (r.size[0], r.size[1], r.size[2]),
        )
    }
}

impl MapObject {
    /// Flatten to the exchange record. `None` for trajectories, which have
    /// no size/position representation.
    pub fn to_record(&self) -> Option<ObjectRecord> {
        match &self.shape {
            ObjectShape::Solid { position, size } => Some(ObjectRecord {
                id: self.id.clone(),
                label: self.category.clone(),
                size: [size.0, size.1, size.2],
                position: [position.0, position.1, position.2],
            }),
            ObjectShape::Trajectory { .. } => None,
        }
    }
}

/// A planned path in world units, in traversal order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "PathRecord", into = "PathRecord")]
pub struct PlannedPath {
    /// Waypoints from start to goal.
    pub points: Vec<Point2D>,
    /// Total polyline length in meters.
    pub length: f32,
}

impl PlannedPath {
    /// Create a path from waypoints, computing its length.
    pub fn new(points: Vec<Point2D>) -> Self {
        let length = points.windows(2).map(|w| w[0].distance(&w[1])).sum();
        Self { points, length }
    }

    /// Check if the path has no waypoints.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of waypoints.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// First waypoint.
    #[inline]
    pub fn first(&self) -> Option<&Point2D> {
        self.points.first()
    }

    /// Last waypoint (goal).
    #[inline]
    pub fn last(&self) -> Option<&Point2D> {
        self.points.last()
    }
}

/// Wire shape of a path: `{points: [[x, y], ...]}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct PathRecord {
    points: Vec<(f32, f32)>,
}

impl From<PathRecord> for PlannedPath {
    fn from(r: PathRecord) -> Self {
        PlannedPath::new(r.points.into_iter().map(Point2D::from).collect())
    }
}

impl From<PlannedPath> for PathRecord {
    fn from(p: PlannedPath) -> Self {
        PathRecord {
            points: p.points.iter().map(|pt| (pt.x, pt.y)).collect(),
        }
    }
}
