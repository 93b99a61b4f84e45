//! Obstacle-inflated A* search over the occupancy grid.
//!
//! Planning never mutates the source grid: inflation produces a derived
//! copy, endpoint repair substitutes the nearest free cell for blocked
//! start/goal points, and the search runs 8-connected with Euclidean move
//! costs in grid-index space.

use crate::config::PlanningConfig;
use crate::core::{GridCell, PlannedPath, Point2D};
use crate::error::{GrihaError, Result};
use crate::map::GridMap;
use log::{debug, trace};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use super::resample::{resample, round1};

/// A* path planner.
pub struct AStarPlanner {
    config: PlanningConfig,
}

impl AStarPlanner {
    /// Create a planner with the given configuration.
    pub fn new(config: PlanningConfig) -> Self {
        Self { config }
    }

    /// Create a planner with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(PlanningConfig::default())
    }

    /// Plan a path between two world points.
    ///
    /// Obstacles are inflated by the collision margin; infeasible endpoints
    /// are repaired to the nearest free cell within the search radius. The
    /// returned path is resampled to uniform arc-length spacing with both
    /// repaired endpoints at cell centers.
    pub fn plan(&self, grid: &GridMap, start: Point2D, goal: Point2D) -> Result<PlannedPath> {
        let inflated = inflate(grid, self.config.collision_margin);

        let start_cell = self.repair_endpoint(&inflated, start)?;
        let goal_cell = self.repair_endpoint(&inflated, goal)?;

        let cells = self.search(&inflated, start_cell, goal_cell, start, goal)?;

        let points: Vec<Point2D> = cells
            .iter()
            .map(|c| {
                let center = inflated.cell_center(c.row as usize, c.col as usize);
                Point2D::new(round1(center.x), round1(center.y))
            })
            .collect();

        let sampled = resample(&points, self.config.resample_step);
        trace!(
            "astar: path with {} waypoints after resampling",
            sampled.len()
        );
        Ok(PlannedPath::new(sampled))
    }

    /// Substitute the nearest free cell when the endpoint maps to an
    /// occupied (or out-of-bounds) cell of the inflated grid.
    fn repair_endpoint(&self, inflated: &GridMap, point: Point2D) -> Result<GridCell> {
        let cell = inflated.world_to_cell(point);
        if inflated.in_bounds(cell) && !inflated.is_occupied(cell) {
            return Ok(cell);
        }

        let res = inflated.resolution();
        let radius = self.config.max_search_radius;
        let radius_cells = (radius / res).ceil() as i32;

        let mut best: Option<(GridCell, f32)> = None;
        for row in cell.row - radius_cells..=cell.row + radius_cells {
            for col in cell.col - radius_cells..=cell.col + radius_cells {
                let candidate = GridCell::new(row, col);
                if !inflated.in_bounds(candidate) || inflated.is_occupied(candidate) {
                    continue;
                }
                let center = inflated.cell_center(row as usize, col as usize);
                let dist = center.distance(&point);
                if dist > radius {
                    continue;
                }
                if best.map_or(true, |(_, d)| dist < d) {
                    best = Some((candidate, dist));
                }
            }
        }

        match best {
            Some((repaired, dist)) => {
                debug!(
                    "astar: repaired endpoint ({:.2}, {:.2}) -> cell ({}, {}), moved {:.2} m",
                    point.x, point.y, repaired.row, repaired.col, dist
                );
                Ok(repaired)
            }
            None => Err(GrihaError::NoFeasibleEndpoint(format!(
                "no free cell within {:.2} m of ({:.2}, {:.2})",
                radius, point.x, point.y
            ))),
        }
    }

    /// 8-connected A* over the inflated grid.
    ///
    /// Returns the cell sequence from start to goal.
    fn search(
        &self,
        inflated: &GridMap,
        start: GridCell,
        goal: GridCell,
        start_world: Point2D,
        goal_world: Point2D,
    ) -> Result<Vec<GridCell>> {
        let mut open_set = BinaryHeap::new();
        let mut came_from: HashMap<GridCell, GridCell> = HashMap::new();
        let mut g_score: HashMap<GridCell, f32> = HashMap::new();

        g_score.insert(start, 0.0);
        open_set.push(AStarNode {
            cell: start,
            f_score: start.distance(&goal),
        });

        while let Some(current) = open_set.pop() {
            if current.cell == goal {
                return Ok(backtrace(&came_from, start, goal));
            }

            let current_g = *g_score.get(&current.cell).unwrap_or(&f32::INFINITY);

            for neighbor in current.cell.neighbors_8() {
                if !inflated.in_bounds(neighbor) || inflated.is_occupied(neighbor) {
                    continue;
                }

                let tentative_g = current_g + current.cell.distance(&neighbor);
                if tentative_g < *g_score.get(&neighbor).unwrap_or(&f32::INFINITY) {
                    came_from.insert(neighbor, current.cell);
                    g_score.insert(neighbor, tentative_g);
                    open_set.push(AStarNode {
                        cell: neighbor,
                        f_score: tentative_g + neighbor.distance(&goal),
                    });
                }
            }
        }

        debug!(
            "astar: open set exhausted, no route from ({:.2}, {:.2}) to ({:.2}, {:.2})",
            start_world.x, start_world.y, goal_world.x, goal_world.y
        );
        Err(GrihaError::NoPath(
            start_world.x,
            start_world.y,
            goal_world.x,
            goal_world.y,
        ))
    }
}

/// Derive an inflated copy of the grid.
///
/// Every occupied cell spreads into the `(2e+1)^2` square neighborhood,
/// `e = ceil(margin / resolution)`, clipped to grid bounds. The source
/// grid is left untouched.
pub fn inflate(grid: &GridMap, margin: f32) -> GridMap {
    let expand = (margin / grid.resolution()).ceil() as i32;
    let mut inflated = grid.clone();
    if expand == 0 {
        return inflated;
    }

    for row in 0..grid.height() as i32 {
        for col in 0..grid.width() as i32 {
            if !grid.is_occupied(GridCell::new(row, col)) {
                continue;
            }
            for dr in -expand..=expand {
                for dc in -expand..=expand {
                    inflated.set_occupied(GridCell::new(row + dr, col + dc));
                }
            }
        }
    }
    inflated
}

/// Walk parent pointers from goal back to start.
fn backtrace(came_from: &HashMap<GridCell, GridCell>, start: GridCell, goal: GridCell) -> Vec<GridCell> {
    let mut cells = vec![goal];
    let mut current = goal;
    while current != start {
        match came_from.get(&current) {
            Some(&prev) => {
                cells.push(prev);
                current = prev;
            }
            None => break,
        }
    }
    cells.reverse();
    cells
}

/// Node in the A* open set.
#[derive(Clone)]
struct AStarNode {
    cell: GridCell,
    f_score: f32,
}

impl Eq for AStarNode {}

impl PartialEq for AStarNode {
    fn eq(&self, other: &Self) -> bool {
        self.cell == other.cell
    }
}

impl Ord for AStarNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (lower f_score = higher priority)
        other
            .f_score
            .partial_cmp(&self.f_score)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for AStarNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlanningConfig;

    fn planner(margin: f32, radius: f32) -> AStarPlanner {
        AStarPlanner::new(PlanningConfig {
            collision_margin: margin,
            max_search_radius: radius,
            resample_step: 0.5,
        })
    }

    fn empty_grid() -> GridMap {
        GridMap::new((10.0, 10.0), 1.0)
    }

    #[test]
    fn test_straight_path_on_empty_grid() {
        let grid = empty_grid();
        let path = planner(0.0, 2.0)
            .plan(&grid, Point2D::new(0.5, 0.5), Point2D::new(9.5, 0.5))
            .unwrap();

        assert!(!path.is_empty());
        assert_eq!(path.first().unwrap(), &Point2D::new(0.5, 0.5));
        assert_eq!(path.last().unwrap(), &Point2D::new(9.5, 0.5));
        // Optimality: resampled length stays within a step of the straight line.
        assert!((path.length - 9.0).abs() <= 0.5);
    }

    #[test]
    fn test_diagonal_path_length() {
        let grid = empty_grid();
        let path = planner(0.0, 2.0)
            .plan(&grid, Point2D::new(0.5, 0.5), Point2D::new(9.5, 9.5))
            .unwrap();

        let straight = Point2D::new(0.5, 0.5).distance(&Point2D::new(9.5, 9.5));
        assert!((path.length - straight).abs() <= 0.6);
    }

    #[test]
    fn test_start_equals_goal() {
        let grid = empty_grid();
        let path = planner(0.0, 2.0)
            .plan(&grid, Point2D::new(2.5, 2.5), Point2D::new(2.5, 2.5))
            .unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(path.points[0], Point2D::new(2.5, 2.5));
    }

    #[test]
    fn test_no_path_when_walled_off() {
        let mut grid = empty_grid();
        // Vertical wall splitting the canvas in two.
        for row in 0..10 {
            grid.set_occupied(GridCell::new(row, 5));
        }

        let result = planner(0.0, 2.0).plan(&grid, Point2D::new(0.5, 5.5), Point2D::new(9.5, 5.5));
        assert!(matches!(result, Err(GrihaError::NoPath(..))));
    }

    #[test]
    fn test_inflation_marks_square_neighborhood() {
        let mut grid = empty_grid();
        grid.set_occupied(GridCell::new(5, 5));

        let inflated = inflate(&grid, 1.0); // one cell of margin
        for dr in -1..=1 {
            for dc in -1..=1 {
                assert!(inflated.is_occupied(GridCell::new(5 + dr, 5 + dc)));
            }
        }
        assert!(!inflated.is_occupied(GridCell::new(5, 7)));
        // Source grid untouched
        assert_eq!(grid.count_occupied(), 1);
    }

    #[test]
    fn test_inflation_zero_margin_is_copy() {
        let mut grid = empty_grid();
        grid.set_occupied(GridCell::new(2, 3));
        assert_eq!(inflate(&grid, 0.0), grid);
    }

    #[test]
    fn test_endpoint_repair_moves_off_obstacle() {
        let mut grid = empty_grid();
        for col in 0..10 {
            grid.set_occupied(GridCell::new(0, col));
        }

        // Start inside the occupied row gets repaired to row 1.
        let path = planner(0.0, 2.0)
            .plan(&grid, Point2D::new(0.5, 0.5), Point2D::new(9.5, 1.5))
            .unwrap();
        assert_eq!(path.first().unwrap(), &Point2D::new(0.5, 1.5));
    }

    #[test]
    fn test_endpoint_repair_respects_radius() {
        let mut grid = empty_grid();
        for col in 0..10 {
            for row in 0..5 {
                grid.set_occupied(GridCell::new(row, col));
            }
        }

        // Nearest free center is 5 rows away; a 1 m radius cannot reach it.
        let result = planner(0.0, 1.0).plan(&grid, Point2D::new(0.5, 0.5), Point2D::new(9.5, 9.5));
        assert!(matches!(result, Err(GrihaError::NoFeasibleEndpoint(_))));

        // A larger radius repairs the start.
        let path = planner(0.0, 6.0)
            .plan(&grid, Point2D::new(0.5, 0.5), Point2D::new(9.5, 9.5))
            .unwrap();
        assert!(!path.is_empty());
    }

    #[test]
    fn test_out_of_bounds_endpoint_repaired_into_grid() {
        let grid = empty_grid();
        let path = planner(0.0, 2.0)
            .plan(&grid, Point2D::new(-0.5, 0.5), Point2D::new(5.5, 0.5))
            .unwrap();
        assert_eq!(path.first().unwrap(), &Point2D::new(0.5, 0.5));
    }

    #[test]
    fn test_planned_path_avoids_inflated_margin() {
        let mut grid = empty_grid();
        for col in 0..10 {
            grid.set_occupied(GridCell::new(5, col.min(7) as i32));
        }

        let path = planner(1.0, 3.0)
            .plan(&grid, Point2D::new(0.5, 0.5), Point2D::new(0.5, 9.5))
            .unwrap();

        let inflated = inflate(&grid, 1.0);
        for p in &path.points {
            let cell = inflated.world_to_cell(*p);
            assert!(
                !inflated.is_occupied(cell),
                "waypoint ({}, {}) lies on inflated obstacle",
                p.x,
                p.y
            );
        }
    }
}
