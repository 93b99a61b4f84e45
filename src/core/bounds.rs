//! Axis-aligned bounding boxes.
//!
//! [`Box3D`] is derived from an object's floor-corner position and size;
//! [`Box2D`] is its horizontal projection. Two containment rules exist on
//! purpose: grid synthesis covers a cell when its minimum-corner reference
//! point falls in the half-open `[min, max)` range, while the collision
//! sampler tests cell centers inclusively.

use super::point::Point2D;
use serde::{Deserialize, Serialize};

/// Axis-aligned box in the horizontal plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Box2D {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Box2D {
    /// Create a new box from corner coordinates.
    #[inline]
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Width (x extent).
    #[inline]
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    /// Depth (y extent).
    #[inline]
    pub fn depth(&self) -> f32 {
        self.max_y - self.min_y
    }

    /// Inclusive containment test (both boundaries belong to the box).
    #[inline]
    pub fn contains(&self, p: Point2D) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Half-open containment test: `[min, max)` on both axes.
    ///
    /// Used for grid synthesis so adjacent boxes never double-claim the
    /// cell on their shared boundary.
    #[inline]
    pub fn covers_half_open(&self, p: Point2D) -> bool {
        p.x >= self.min_x && p.x < self.max_x && p.y >= self.min_y && p.y < self.max_y
    }

    /// Check if this box overlaps another (inclusive).
    #[inline]
    pub fn intersects(&self, other: &Box2D) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }
}

/// Axis-aligned box in 3D.
///
/// Invariant: `max = min + size` component-wise, with non-negative size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Box3D {
    pub min_x: f32,
    pub min_y: f32,
    pub min_z: f32,
    pub max_x: f32,
    pub max_y: f32,
    pub max_z: f32,
}

impl Box3D {
    /// Build from a floor-corner position and a `(width, depth, height)` size.
    #[inline]
    pub fn from_position_size(position: (f32, f32, f32), size: (f32, f32, f32)) -> Self {
        let (x, y, z) = position;
        let (w, d, h) = size;
        Self {
            min_x: x,
            min_y: y,
            min_z: z,
            max_x: x + w,
            max_y: y + d,
            max_z: z + h,
        }
    }

    /// Horizontal projection.
    #[inline]
    pub fn footprint(&self) -> Box2D {
        Box2D::new(self.min_x, self.min_y, self.max_x, self.max_y)
    }

    /// Vertical extent as `(min_z, max_z)`.
    #[inline]
    pub fn z_range(&self) -> (f32, f32) {
        (self.min_z, self.max_z)
    }

    /// Centroid of the box.
    #[inline]
    pub fn centroid(&self) -> (f32, f32, f32) {
        (
            (self.min_x + self.max_x) * 0.5,
            (self.min_y + self.max_y) * 0.5,
            (self.min_z + self.max_z) * 0.5,
        )
    }

    /// Check whether two boxes overlap vertically.
    ///
    /// Touching ranges (one ends where the other begins) do not count.
    #[inline]
    pub fn z_overlaps(&self, other: &Box3D) -> bool {
        !(self.max_z <= other.min_z || self.min_z >= other.max_z)
    }
}
