//! Height-aware collision checks against the grid and object set.

use crate::core::{MapObject, PlannedPath};
use crate::map::MapRepresentation;

/// Check a candidate object against every registered object.
///
/// Returns `true` (blocking collision, candidate must be rejected) iff some
/// grid cell's center lies inside the candidate's footprint and inside a
/// registered solid's footprint, and the two vertical extents overlap.
/// With no grid there is nothing to collide with.
pub fn check_collision(map: &MapRepresentation, candidate: &MapObject) -> bool {
    scan_for_conflict(map, candidate, false)
}

/// Wall-insertion variant: objects labeled `"wall"` are skipped, so walls
/// may overlap each other freely but still conflict with furniture at an
/// intersecting height.
pub fn check_collision_ignoring_walls(map: &MapRepresentation, candidate: &MapObject) -> bool {
    scan_for_conflict(map, candidate, true)
}

fn scan_for_conflict(map: &MapRepresentation, candidate: &MapObject, skip_walls: bool) -> bool {
    let Some(grid) = map.grid() else {
        return false;
    };
    let Some(cand_box3) = candidate.bbox_3d() else {
        // Trajectories have no volume and never conflict.
        return false;
    };
    let cand_box = cand_box3.footprint();

    for row in 0..grid.height() {
        for col in 0..grid.width() {
            let sample = grid.cell_center(row, col);
            if !cand_box.contains(sample) {
                continue;
            }
            for obj in map.objects().values() {
                if skip_walls && obj.is_wall() {
                    continue;
                }
                let Some(obj_box3) = obj.bbox_3d() else {
                    continue;
                };
                if obj_box3.footprint().contains(sample) && cand_box3.z_overlaps(&obj_box3) {
                    log::debug!(
                        "collision: candidate '{}' conflicts with '{}' at ({:.2}, {:.2})",
                        candidate.id,
                        obj.id,
                        sample.x,
                        sample.y
                    );
                    return true;
                }
            }
        }
    }
    false
}

/// Check a path against the occupancy grid by arc-length sampling.
///
/// Every consecutive waypoint pair is sampled at `sample_step` spacing
/// (at least 2 samples per segment); a sample landing on an in-bounds
/// OCCUPIED cell is a collision. Out-of-bounds samples are ignored.
pub fn check_path_collision(
    map: &MapRepresentation,
    path: &PlannedPath,
    resolution: f32,
    sample_step: f32,
) -> bool {
    let Some(grid) = map.grid() else {
        return false;
    };

    for pair in path.points.windows(2) {
        let (p0, p1) = (pair[0], pair[1]);
        let dx = p1.x - p0.x;
        let dy = p1.y - p0.y;
        let dist = (dx * dx + dy * dy).sqrt();
        let steps = ((dist / sample_step) as usize + 1).max(2);

        for s in 0..=steps {
            let t = s as f32 / steps as f32;
            let x = p0.x + t * dx;
            let y = p0.y + t * dy;
            let cell = crate::core::GridCell::new(
                (y / resolution).floor() as i32,
                (x / resolution).floor() as i32,
            );
            if grid.in_bounds(cell) && grid.is_occupied(cell) {
                return true;
            }
        }
    }
    false
}
