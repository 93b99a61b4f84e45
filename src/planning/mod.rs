//! Path planning over the occupancy grid.

pub mod astar;
pub mod resample;

pub use astar::{inflate, AStarPlanner};
pub use resample::{resample, round1};

use crate::config::PlanningConfig;
use crate::core::{PlannedPath, Point2D};
use crate::error::{GrihaError, Result};
use crate::map::MapRepresentation;

/// Plan a path on a map's derived grid.
///
/// Convenience wrapper around [`AStarPlanner::plan`]; fails with a
/// configuration error when the map has no grid yet.
pub fn astar_search(
    map: &MapRepresentation,
    start: Point2D,
    goal: Point2D,
    config: &PlanningConfig,
) -> Result<PlannedPath> {
    let grid = map.grid().ok_or_else(|| {
        GrihaError::Config("grid must be synthesized before planning".to_string())
    })?;
    AStarPlanner::new(config.clone()).plan(grid, start, goal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{MapRepresentation, SourceType};

    #[test]
    fn test_search_requires_grid() {
        let map = MapRepresentation::new("m", Some((10.0, 10.0)), SourceType::Other);
        let result = astar_search(
            &map,
            Point2D::new(0.5, 0.5),
            Point2D::new(5.5, 5.5),
            &PlanningConfig::default(),
        );
        assert!(matches!(result, Err(GrihaError::Config(_))));
    }

    #[test]
    fn test_search_on_built_grid() {
        let mut map = MapRepresentation::new("m", Some((10.0, 10.0)), SourceType::Other);
        map.build_grid(1.0).unwrap();

        let path = astar_search(
            &map,
            Point2D::new(0.5, 0.5),
            Point2D::new(5.5, 5.5),
            &PlanningConfig::default(),
        )
        .unwrap();
        assert!(!path.is_empty());
    }
}
