//! Map representation and mutation operations.
//!
//! A [`MapRepresentation`] aggregates a canvas, a set of objects and an
//! optional derived [`GridMap`]. Objects are append-only: insertion goes
//! through a collision check, and an accepted object marks its footprint
//! on the grid incrementally. There is no removal primitive; anything that
//! mutates objects outside these operations leaves the grid stale until
//! [`MapRepresentation::build_grid`] is called again.

pub mod collision;
pub mod grid;

pub use grid::{CellState, GridMap};

use crate::core::{MapObject, PlannedPath, WALL_CATEGORY};
use crate::error::{GrihaError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Where the scene description originated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceType {
    GaussianSplatting,
    IsaacSim,
    Other,
}

/// Aggregate of canvas, objects and derived occupancy grid.
///
/// The grid is a derived artifact and is never serialized with the map
/// record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MapRepresentation {
    pub map_id: String,
    pub source_type: SourceType,
    objects: HashMap<String, MapObject>,
    #[serde(default)]
    pub scene_description: String,
    pub canvas_size: Option<(f32, f32)>,
    #[serde(skip)]
    grid: Option<GridMap>,
}

impl MapRepresentation {
    /// Create an empty map.
    pub fn new(map_id: impl Into<String>, canvas_size: Option<(f32, f32)>, source_type: SourceType) -> Self {
        Self {
            map_id: map_id.into(),
            source_type,
            objects: HashMap::new(),
            scene_description: String::new(),
            canvas_size,
            grid: None,
        }
    }

    /// Set or replace the canvas size. Does not touch an existing grid.
    pub fn set_canvas_size(&mut self, canvas_size: (f32, f32)) {
        self.canvas_size = Some(canvas_size);
    }

    /// Registered objects, keyed by id.
    pub fn objects(&self) -> &HashMap<String, MapObject> {
        &self.objects
    }

    /// Look up an object by id.
    pub fn object(&self, id: &str) -> Result<&MapObject> {
        self.objects
            .get(id)
            .ok_or_else(|| GrihaError::NotFound(format!("object '{}'", id)))
    }

    /// The derived occupancy grid, if one has been built.
    pub fn grid(&self) -> Option<&GridMap> {
        self.grid.as_ref()
    }

    /// Full grid synthesis from the current object set.
    ///
    /// Fails with a configuration error when no canvas size is set.
    pub fn build_grid(&mut self, resolution: f32) -> Result<()> {
        let canvas = self.canvas_size.ok_or_else(|| {
            GrihaError::Config("canvas_size must be set before grid synthesis".to_string())
        })?;
        self.grid = Some(GridMap::from_objects(self.objects.values(), canvas, resolution));
        Ok(())
    }

    /// Insert an object without any collision check.
    ///
    /// The id is made unique by appending `_{n}` suffixes if needed, and
    /// the final id is returned. An existing grid is NOT updated; callers
    /// taking this path must rebuild it.
    pub fn insert_object(&mut self, mut object: MapObject) -> String {
        let id = self.unique_id(&object.id);
        object.id = id.clone();
        self.objects.insert(id.clone(), object);
        id
    }

    /// Insert an object after a height-aware collision check, updating the
    /// grid incrementally on acceptance.
    ///
    /// `resolution` is used when the grid does not exist yet and must be
    /// synthesized first. Either the object is fully registered with the
    /// grid updated, or the map is left untouched.
    pub fn add_object_checked(&mut self, object: MapObject, resolution: f32) -> Result<String> {
        self.add_checked_inner(object, resolution, false)
    }

    /// Insert a wall object directly from size and position.
    ///
    /// Walls are exempt from colliding with other walls, but still conflict
    /// with anything else at an intersecting height.
    pub fn add_wall(
        &mut self,
        id: impl Into<String>,
        size: (f32, f32, f32),
        position: (f32, f32, f32),
        resolution: f32,
    ) -> Result<String> {
        let wall = MapObject::new_solid(id, WALL_CATEGORY, position, size);
        self.add_checked_inner(wall, resolution, true)
    }

    fn add_checked_inner(
        &mut self,
        object: MapObject,
        resolution: f32,
        ignore_walls: bool,
    ) -> Result<String> {
        // Validate up front so a rejected insertion leaves no partial state.
        if self.grid.is_none() && self.canvas_size.is_none() {
            return Err(GrihaError::Config(
                "canvas_size must be set before checked insertion".to_string(),
            ));
        }

        let blocked = if ignore_walls {
            collision::check_collision_ignoring_walls(self, &object)
        } else {
            collision::check_collision(self, &object)
        };
        if blocked {
            return Err(GrihaError::CollisionRejected(format!(
                "object '{}' overlaps a registered object at an intersecting height",
                object.id
            )));
        }

        let bbox = object.bbox_2d();
        let id = self.insert_object(object);

        match (&mut self.grid, bbox) {
            (Some(grid), Some(bbox)) => grid.mark_footprint(&bbox),
            (Some(_), None) => {} // trajectories never occupy cells
            (None, _) => self.build_grid(resolution)?,
        }

        log::debug!("map '{}': accepted object '{}'", self.map_id, id);
        Ok(id)
    }

    /// Register a path as a trajectory object for rendering.
    ///
    /// Trajectories never occupy grid cells and never collide.
    pub fn add_trajectory(&mut self, path: &PlannedPath, id: Option<String>) -> String {
        let id = id.unwrap_or_else(|| format!("path_{}", self.objects.len()));
        self.insert_object(MapObject::new_trajectory(id, path.points.clone()))
    }

    /// Find a free id by suffixing `_{n}` until unique.
    fn unique_id(&self, base: &str) -> String {
        if !self.objects.contains_key(base) {
            return base.to_string();
        }
        let mut i = 1;
        loop {
            i += 1;
            let candidate = format!("{}_{}", base, i);
            if !self.objects.contains_key(&candidate) {
                return candidate;
            }
        }
    }
}
