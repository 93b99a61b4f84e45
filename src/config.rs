//! Engine configuration.
//!
//! All tunables are carried in an explicit [`EngineConfig`] passed into the
//! operations that need them; there is no process-wide mutable state.

use crate::error::Result;
use serde::Deserialize;
use std::path::Path;

/// Top-level engine configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub collision: CollisionConfig,
    #[serde(default)]
    pub planning: PlanningConfig,
    #[serde(default)]
    pub raster: RasterConfig,
}

/// Grid map settings.
#[derive(Clone, Debug, Deserialize)]
pub struct GridConfig {
    /// World length represented by one cell edge (meters).
    #[serde(default = "default_resolution")]
    pub resolution: f32,

    /// Canvas size used when a map is created without one (meters).
    #[serde(default = "default_canvas_size")]
    pub default_canvas_size: (f32, f32),
}

/// Collision detection settings.
#[derive(Clone, Debug, Deserialize)]
pub struct CollisionConfig {
    /// Arc-length spacing between path collision samples (meters).
    #[serde(default = "default_sample_step")]
    pub sample_step: f32,
}

/// Path planning settings.
#[derive(Clone, Debug, Deserialize)]
pub struct PlanningConfig {
    /// Agent clearance radius inflated around obstacles (meters).
    #[serde(default = "default_collision_margin")]
    pub collision_margin: f32,

    /// How far endpoint repair may move an infeasible start/goal (meters).
    #[serde(default = "default_max_search_radius")]
    pub max_search_radius: f32,

    /// Uniform spacing of the resampled output path (meters).
    #[serde(default = "default_resample_step")]
    pub resample_step: f32,
}

/// Source raster settings for wall extraction.
#[derive(Clone, Debug, Deserialize)]
pub struct RasterConfig {
    /// Horizontal shift applied to wall masks to compensate the source
    /// renderer's offset (pixels, shifts left).
    #[serde(default = "default_wall_shift")]
    pub wall_shift: usize,
}

fn default_resolution() -> f32 {
    1.0
}
fn default_canvas_size() -> (f32, f32) {
    (15.0, 12.0)
}
fn default_sample_step() -> f32 {
    0.05
}
fn default_collision_margin() -> f32 {
    0.3
}
fn default_max_search_radius() -> f32 {
    2.0
}
fn default_resample_step() -> f32 {
    0.5
}
fn default_wall_shift() -> usize {
    1
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            resolution: default_resolution(),
            default_canvas_size: default_canvas_size(),
        }
    }
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            sample_step: default_sample_step(),
        }
    }
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            collision_margin: default_collision_margin(),
            max_search_radius: default_max_search_radius(),
            resample_step: default_resample_step(),
        }
    }
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            wall_shift: default_wall_shift(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            collision: CollisionConfig::default(),
            planning: PlanningConfig::default(),
            raster: RasterConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: EngineConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.grid.resolution, 1.0);
        assert_eq!(config.planning.max_search_radius, 2.0);
        assert_eq!(config.planning.resample_step, 0.5);
        assert_eq!(config.raster.wall_shift, 1);
    }

    #[test]
    fn test_partial_toml() {
        let config: EngineConfig = toml::from_str(
            r#"
            [grid]
            resolution = 0.5

            [planning]
            collision_margin = 0.2
            "#,
        )
        .unwrap();

        assert_eq!(config.grid.resolution, 0.5);
        assert_eq!(config.planning.collision_margin, 0.2);
        // Unspecified fields fall back to defaults
        assert_eq!(config.planning.max_search_radius, 2.0);
        assert_eq!(config.collision.sample_step, 0.05);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("griha.toml");
        std::fs::write(&path, "[grid]\nresolution = 0.1\n").unwrap();

        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config.grid.resolution, 0.1);
    }
}
