//! Rasterization of labeled scenes into world-unit segment records.
//!
//! Two independent procedures feed the same output shape: instance
//! rasterization covers labeled quadrilateral footprints against a source
//! raster's pixel lattice, and wall rasterization segments the dominant
//! wall value of an occupancy image into connected components. Both emit
//! [`Segment`] records with every world-unit number rounded to two
//! decimals.

pub mod instances;
pub mod walls;

pub use instances::{rasterize_instances, InstanceFootprint};
pub use walls::{rasterize_walls, select_wall_value};

use serde::{Deserialize, Serialize};

/// Round a world coordinate to two decimal places (record precision).
#[inline]
pub(crate) fn round2(v: f32) -> f32 {
    (v * 100.0).round() / 100.0
}

/// Single-channel source raster with its world placement.
///
/// Image convention: row 0 is the TOP of the raster; `min_x`/`min_y` locate
/// the raster's minimum world corner and `scale` is meters per pixel.
#[derive(Clone, Debug)]
pub struct SourceRaster {
    pub pixels: Vec<u8>,
    pub width: usize,
    pub height: usize,
    pub scale: f32,
    pub min_x: f32,
    pub min_y: f32,
}

impl SourceRaster {
    /// Wrap row-major pixels. `pixels.len()` must equal `width * height`.
    pub fn new(
        pixels: Vec<u8>,
        width: usize,
        height: usize,
        scale: f32,
        min_x: f32,
        min_y: f32,
    ) -> Self {
        debug_assert_eq!(pixels.len(), width * height);
        Self {
            pixels,
            width,
            height,
            scale,
            min_x,
            min_y,
        }
    }

    #[inline]
    pub fn pixel(&self, row: usize, col: usize) -> u8 {
        self.pixels[row * self.width + col]
    }
}

/// One extracted instance or wall component, in world units.
///
/// `bbox_m` is `[xmin, ymin, xmax, ymax]`, `bbox_xywh_m` the same box as
/// `[x, y, w, h]`; `mask_coords_m` lists the covered cell centers as
/// `[y, x]` pairs in row-major pixel order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub category_id: u32,
    pub category_label: String,
    pub instance_id: String,
    pub bbox_m: [f32; 4],
    pub bbox_xywh_m: [f32; 4],
    pub area: usize,
    pub mask_coords_m: Vec<[f32; 2]>,
}

/// Build a segment record from a non-empty set of mask pixels.
///
/// `coords` are `(row, col)` indices into the (already flipped) mask, in
/// row-major order.
pub(crate) fn build_segment(
    raster: &SourceRaster,
    category_id: u32,
    category_label: &str,
    instance_id: String,
    coords: Vec<(usize, usize)>,
) -> Segment {
    let xmin = coords.iter().map(|&(_, x)| x).min().unwrap_or(0);
    let xmax = coords.iter().map(|&(_, x)| x).max().unwrap_or(0);
    let ymin = coords.iter().map(|&(y, _)| y).min().unwrap_or(0);
    let ymax = coords.iter().map(|&(y, _)| y).max().unwrap_or(0);

    let x_left = raster.min_x + xmin as f32 * raster.scale;
    let x_right = raster.min_x + (xmax + 1) as f32 * raster.scale;
    let y_bottom = raster.min_y + ymin as f32 * raster.scale;
    let y_top = raster.min_y + (ymax + 1) as f32 * raster.scale;

    let mask_coords_m = coords
        .iter()
        .map(|&(y, x)| {
            [
                round2(raster.min_y + (y as f32 + 0.5) * raster.scale),
                round2(raster.min_x + (x as f32 + 0.5) * raster.scale),
            ]
        })
        .collect();

    Segment {
        category_id,
        category_label: category_label.to_string(),
        instance_id,
        bbox_m: [
            round2(x_left),
            round2(y_bottom),
            round2(x_right),
            round2(y_top),
        ],
        bbox_xywh_m: [
            round2(x_left),
            round2(y_bottom),
            round2(x_right - x_left),
            round2(y_top - y_bottom),
        ],
        area: coords.len(),
        mask_coords_m,
    }
}
