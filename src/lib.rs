//! # Griha-Map: Spatial Map Construction & Navigation Engine
//!
//! Converts a continuous description of an indoor scene (axis-aligned 3D
//! objects, labeled instance polygons, rasterized occupancy sources) into
//! a discrete 2D navigation representation, performs spatial-conflict
//! checks against it, and finds feasible paths across it. Intended as a
//! lightweight occupancy-grid layer between a 3D scene description and a
//! 2D motion planner.
//!
//! ## Features
//!
//! - **Map Representation**: append-only object registry with a derived
//!   dense occupancy grid (half-open minimum-corner coverage rule)
//! - **Height-Aware Collision**: cell-center sampling with vertical-range
//!   overlap, plus a wall-exempt variant and arc-length path checks
//! - **Wall/Instance Rasterizer**: labeled-polygon covering tests and
//!   dominant-value wall extraction with connected-component segmentation
//! - **Path Planner**: obstacle inflation, nearest-free endpoint repair,
//!   8-connected A*, arc-length resampling
//!
//! ## Quick Start
//!
//! ```rust
//! use griha_map::config::PlanningConfig;
//! use griha_map::core::Point2D;
//! use griha_map::map::{MapRepresentation, SourceType};
//! use griha_map::planning::astar_search;
//!
//! let mut map = MapRepresentation::new("demo", Some((10.0, 10.0)), SourceType::Other);
//!
//! // Register a wall along the bottom edge; the grid updates incrementally.
//! map.add_wall("w1", (8.0, 0.2, 2.5), (0.0, 0.0, 0.0), 1.0).unwrap();
//!
//! // Plan across the canvas, clear of the inflated wall.
//! let path = astar_search(
//!     &map,
//!     Point2D::new(0.5, 2.5),
//!     Point2D::new(9.5, 2.5),
//!     &PlanningConfig::default(),
//! )
//! .unwrap();
//! assert!(!path.is_empty());
//! println!("path: {} waypoints, {:.1} m", path.len(), path.length);
//! ```
//!
//! ## Coordinate Conventions
//!
//! World coordinates are in meters with the grid origin at (0, 0); grid
//! cells are row-major with row along Y and col along X. Occupancy
//! decisions use the cell's minimum-corner reference point under the
//! half-open `[min, max)` rule; collision sampling and path
//! materialization use cell centers.
//!
//! ## Architecture
//!
//! - [`core`]: fundamental types (Point2D, GridCell, boxes, MapObject)
//! - [`config`]: configuration types with TOML loading
//! - [`error`]: the crate error type and `Result` alias
//! - [`map`]: MapRepresentation, GridMap and collision checks
//! - [`raster`]: instance and wall rasterization into segment records
//! - [`planning`]: A* planner with inflation, repair and resampling

pub mod config;
pub mod core;
pub mod error;
pub mod map;
pub mod planning;
pub mod raster;

// Re-export main types at crate root
pub use config::EngineConfig;
pub use core::{Box2D, Box3D, GridCell, MapObject, ObjectShape, PlannedPath, Point2D};
pub use error::{GrihaError, Result};
pub use map::{GridMap, MapRepresentation, SourceType};
pub use planning::{astar_search, AStarPlanner};
pub use raster::{InstanceFootprint, Segment, SourceRaster};
