//! End-to-end scenarios across map construction, collision checking,
//! rasterization and planning.

use griha_map::config::PlanningConfig;
use griha_map::core::{GridCell, MapObject, Point2D};
use griha_map::map::{GridMap, MapRepresentation, SourceType};
use griha_map::planning::astar_search;
use griha_map::raster::{rasterize_instances, rasterize_walls, InstanceFootprint, SourceRaster};
use griha_map::GrihaError;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// 10x10 m canvas at 1 m resolution with a single 8 x 0.2 m wall along
/// the bottom edge (occupies row 0, cols 0..=7).
fn wall_map() -> MapRepresentation {
    let mut map = MapRepresentation::new("scenario", Some((10.0, 10.0)), SourceType::Other);
    map.add_wall("w1", (8.0, 0.2, 2.5), (0.0, 0.0, 0.0), 1.0)
        .unwrap();
    map
}

fn planning(margin: f32, radius: f32) -> PlanningConfig {
    PlanningConfig {
        collision_margin: margin,
        max_search_radius: radius,
        resample_step: 0.5,
    }
}

#[test]
fn test_wall_occupies_single_row() {
    init_logging();
    let map = wall_map();
    let grid = map.grid().unwrap();

    for col in 0..8 {
        assert!(grid.is_occupied(GridCell::new(0, col)));
    }
    // The wall is 0.2 m thick: row 1 stays free, as does col 8 (x = 8.0
    // sits on the half-open boundary).
    assert!(!grid.is_occupied(GridCell::new(0, 8)));
    assert!(!grid.is_occupied(GridCell::new(1, 0)));
    assert_eq!(grid.count_occupied(), 8);
}

#[test]
fn test_plan_across_canvas_avoids_wall() {
    init_logging();
    let map = wall_map();

    let path = astar_search(
        &map,
        Point2D::new(0.5, 0.5),
        Point2D::new(9.5, 0.5),
        &PlanningConfig::default(),
    )
    .unwrap();

    assert!(!path.is_empty());
    // No waypoint may land on a wall cell.
    let grid = map.grid().unwrap();
    for p in &path.points {
        let cell = grid.world_to_cell(*p);
        assert!(
            !grid.is_occupied(cell),
            "waypoint ({}, {}) lands on the wall",
            p.x,
            p.y
        );
    }
    // Consecutive waypoints are resampled to at most 0.5 m apart.
    for pair in path.points.windows(2) {
        assert!(pair[0].distance(&pair[1]) <= 0.5 + 1e-4);
    }
}

#[test]
fn test_endpoint_repair_radius_gates_feasibility() {
    init_logging();
    let map = wall_map();
    let inside_wall = Point2D::new(0.5, 0.1);

    // With margin 0.3 the inflated wall covers rows 0..=1 up to col 8; the
    // nearest free cell center to (0.5, 0.1) is (0.5, 2.5), 2.4 m away.
    let tight = astar_search(&map, inside_wall, inside_wall, &planning(0.3, 1.0));
    assert!(matches!(tight, Err(GrihaError::NoFeasibleEndpoint(_))));

    let generous = astar_search(&map, inside_wall, inside_wall, &planning(0.3, 2.5)).unwrap();
    assert_eq!(generous.points, vec![Point2D::new(0.5, 2.5)]);
}

#[test]
fn test_wall_exemption_end_to_end() {
    init_logging();
    // 0.25 m cells so the thin wall contains cell centers (y = 0.125).
    let mut map = MapRepresentation::new("m", Some((10.0, 10.0)), SourceType::Other);
    map.add_wall("w1", (8.0, 0.2, 2.5), (0.0, 0.0, 0.0), 0.25)
        .unwrap();

    // A crossing wall overlaps the first one but is accepted.
    map.add_wall("w2", (0.2, 5.0, 2.5), (2.0, 0.0, 0.0), 0.25)
        .unwrap();
    assert_eq!(map.objects().len(), 2);

    // Furniture overlapping the wall is rejected and leaves no trace.
    let occupied_before = map.grid().unwrap().count_occupied();
    let bed = MapObject::new_solid("bed", "bed", (1.0, 0.0, 0.0), (2.0, 2.0, 0.5));
    let err = map.add_object_checked(bed, 0.25).unwrap_err();
    assert!(matches!(err, GrihaError::CollisionRejected(_)));
    assert_eq!(map.objects().len(), 2);
    assert_eq!(map.grid().unwrap().count_occupied(), occupied_before);
}

#[test]
fn test_full_rebuild_matches_incremental_grid() {
    init_logging();
    let mut map = MapRepresentation::new("m", Some((8.0, 8.0)), SourceType::Other);
    map.add_wall("w1", (6.0, 0.2, 2.5), (0.0, 0.0, 0.0), 0.5)
        .unwrap();
    map.add_object_checked(
        MapObject::new_solid("table", "table", (3.0, 3.0, 0.0), (1.5, 1.0, 0.8)),
        0.5,
    )
    .unwrap();
    map.add_object_checked(
        MapObject::new_solid("lamp", "lamp", (6.0, 6.0, 0.0), (0.4, 0.4, 1.6)),
        0.5,
    )
    .unwrap();

    let incremental = map.grid().unwrap().clone();
    map.build_grid(0.5).unwrap();
    assert_eq!(map.grid().unwrap(), &incremental);
}

#[test]
fn test_grayscale_round_trip_preserves_grid() {
    init_logging();
    let map = wall_map();
    let grid = map.grid().unwrap();

    let (w, h, pixels) = grid.to_grayscale();
    assert_eq!((w, h), (10, 10));
    let decoded = GridMap::from_grayscale(w, h, &pixels, 1.0);
    assert_eq!(&decoded, grid);
}

#[test]
fn test_rasterizer_pipeline_is_deterministic() {
    init_logging();
    // An occupancy raster with two wall blobs plus one labeled footprint.
    let mut pixels = vec![255u8; 36];
    for col in 0..4 {
        pixels[2 * 6 + col] = 120; // horizontal run
    }
    pixels[4 * 6 + 5] = 120; // isolated pixel
    let raster = SourceRaster::new(pixels, 6, 6, 0.5, 0.0, 0.0);

    let footprints = [InstanceFootprint::new(
        "table",
        "table_0",
        [
            Point2D::new(0.5, 0.5),
            Point2D::new(2.0, 0.5),
            Point2D::new(2.0, 2.0),
            Point2D::new(0.5, 2.0),
        ],
    )];

    let instances_a = rasterize_instances(&raster, &footprints);
    let instances_b = rasterize_instances(&raster, &footprints);
    assert_eq!(instances_a, instances_b);
    assert_eq!(instances_a.len(), 1);
    assert!(instances_a[0].area > 0);

    let walls_a = rasterize_walls(&raster, 1, 2);
    let walls_b = rasterize_walls(&raster, 1, 2);
    assert_eq!(walls_a, walls_b);
    assert_eq!(walls_a.len(), 2);
    assert!(walls_a.iter().all(|s| s.category_label == "wall"));
    assert_eq!(walls_a[0].instance_id, "wall_1");
    assert_eq!(walls_a[1].instance_id, "wall_2");
}

#[test]
fn test_planner_fails_cleanly_without_grid() {
    init_logging();
    let map = MapRepresentation::new("m", None, SourceType::Other);
    let result = astar_search(
        &map,
        Point2D::new(0.0, 0.0),
        Point2D::new(1.0, 1.0),
        &PlanningConfig::default(),
    );
    assert!(matches!(result, Err(GrihaError::Config(_))));
}
