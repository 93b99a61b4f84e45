//! Wall extraction from an occupancy raster.
//!
//! The wall value is the dominant non-background pixel value; its boolean
//! mask is flipped vertically, shifted horizontally by a small calibration
//! offset, and segmented into 8-connected components. Each component
//! becomes one `"wall"` segment.

use super::{build_segment, Segment, SourceRaster};
use log::debug;

/// Pick the wall pixel value of an occupancy raster.
///
/// Candidates are values strictly between 0 and 250; the one with the
/// highest pixel count wins (smallest value on ties). With no candidate
/// the smallest value present is used. Returns `None` for an empty raster.
pub fn select_wall_value(raster: &SourceRaster) -> Option<u8> {
    let mut counts = [0usize; 256];
    for &p in &raster.pixels {
        counts[p as usize] += 1;
    }

    let mut best: Option<(u8, usize)> = None;
    for v in 1u8..250 {
        let c = counts[v as usize];
        if c > 0 && best.map_or(true, |(_, bc)| c > bc) {
            best = Some((v, c));
        }
    }
    if let Some((v, _)) = best {
        return Some(v);
    }
    (0u8..=255).find(|&v| counts[v as usize] > 0)
}

/// Extract wall segments from an occupancy raster.
///
/// `shift` is the horizontal calibration offset in pixels (mask moves
/// left, vacated columns are cleared). Component instance ids are
/// `wall_1..wall_n` in row-major discovery order; empty components are
/// dropped.
pub fn rasterize_walls(raster: &SourceRaster, shift: usize, category_id: u32) -> Vec<Segment> {
    let (w, h) = (raster.width, raster.height);
    let Some(wall_value) = select_wall_value(raster) else {
        return Vec::new();
    };
    debug!("raster: wall value {} selected", wall_value);

    // Boolean mask, flipped vertically so mask row 0 is the image bottom.
    let mut mask = vec![false; w * h];
    for row in 0..h {
        let flipped = h - 1 - row;
        for col in 0..w {
            mask[flipped * w + col] = raster.pixel(row, col) == wall_value;
        }
    }

    if shift > 0 {
        for row in 0..h {
            let base = row * w;
            for col in 0..w {
                mask[base + col] = if col + shift < w {
                    mask[base + col + shift]
                } else {
                    false
                };
            }
        }
    }

    let (labels, count) = label_components(&mask, w, h);

    // Row-major collection keeps coordinates ordered per component.
    let mut components: Vec<Vec<(usize, usize)>> = vec![Vec::new(); count];
    for row in 0..h {
        for col in 0..w {
            let l = labels[row * w + col];
            if l > 0 {
                components[l - 1].push((row, col));
            }
        }
    }

    components
        .into_iter()
        .enumerate()
        .filter(|(_, coords)| !coords.is_empty())
        .map(|(idx, coords)| {
            build_segment(
                raster,
                category_id,
                "wall",
                format!("wall_{}", idx + 1),
                coords,
            )
        })
        .collect()
}

/// 8-connected component labeling over a boolean mask.
///
/// Labels are assigned from 1 in row-major discovery order; returns the
/// label grid and the component count.
fn label_components(mask: &[bool], w: usize, h: usize) -> (Vec<usize>, usize) {
    let mut labels = vec![0usize; w * h];
    let mut count = 0usize;
    let mut stack = Vec::new();

    for start in 0..w * h {
        if !mask[start] || labels[start] != 0 {
            continue;
        }
        count += 1;
        labels[start] = count;
        stack.push(start);

        while let Some(idx) = stack.pop() {
            let (row, col) = (idx / w, idx % w);
            for dr in -1i64..=1 {
                for dc in -1i64..=1 {
                    if dr == 0 && dc == 0 {
                        continue;
                    }
                    let (nr, nc) = (row as i64 + dr, col as i64 + dc);
                    if nr < 0 || nc < 0 || nr >= h as i64 || nc >= w as i64 {
                        continue;
                    }
                    let nidx = nr as usize * w + nc as usize;
                    if mask[nidx] && labels[nidx] == 0 {
                        labels[nidx] = count;
                        stack.push(nidx);
                    }
                }
            }
        }
    }
    (labels, count)
}
