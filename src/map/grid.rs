//! Dense 2D occupancy grid.
//!
//! Cells are row-major: index = row * width + col, with row along the
//! world Y axis and col along X. A cell is OCCUPIED iff at least one
//! registered object's footprint covers the cell's minimum-corner
//! reference point under the half-open `[min, max)` rule.

use crate::core::{Box2D, GridCell, MapObject, Point2D};

/// Occupancy state of one grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellState {
    Free,
    Occupied,
}

/// Dense 2D occupancy grid with resolution and implicit world origin (0, 0).
#[derive(Clone, Debug, PartialEq)]
pub struct GridMap {
    cells: Vec<CellState>,
    /// Grid width in cells (columns).
    width: usize,
    /// Grid height in cells (rows).
    height: usize,
    /// Meters per cell.
    resolution: f32,
}

impl GridMap {
    /// Create an all-free grid covering `canvas_size` meters at `resolution`.
    pub fn new(canvas_size: (f32, f32), resolution: f32) -> Self {
        let width = (canvas_size.0 / resolution).round() as usize;
        let height = (canvas_size.1 / resolution).round() as usize;
        Self {
            cells: vec![CellState::Free; width * height],
            width,
            height,
            resolution,
        }
    }

    /// Full synthesis: recompute every cell from the given object set.
    ///
    /// Trajectory objects have no footprint and never occupy cells.
    pub fn from_objects<'a, I>(objects: I, canvas_size: (f32, f32), resolution: f32) -> Self
    where
        I: IntoIterator<Item = &'a MapObject>,
    {
        let mut grid = Self::new(canvas_size, resolution);
        for obj in objects {
            if let Some(bbox) = obj.bbox_2d() {
                grid.mark_footprint(&bbox);
            }
        }
        grid
    }

    /// Incrementally mark the cells covered by a newly added footprint.
    ///
    /// Correct only because objects are append-only: a cell marked FREE by
    /// full synthesis never has to be un-marked by a later insertion.
    pub fn mark_footprint(&mut self, bbox: &Box2D) {
        for row in 0..self.height {
            for col in 0..self.width {
                if bbox.covers_half_open(self.reference_point(row, col)) {
                    self.cells[row * self.width + col] = CellState::Occupied;
                }
            }
        }
    }

    /// Grid width in cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Grid dimensions as `(height, width)`.
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Meters per cell.
    #[inline]
    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    /// Minimum-corner reference point of a cell, used for occupancy
    /// decisions.
    #[inline]
    pub fn reference_point(&self, row: usize, col: usize) -> Point2D {
        Point2D::new(col as f32 * self.resolution, row as f32 * self.resolution)
    }

    /// Center point of a cell, used for collision sampling and path
    /// materialization.
    #[inline]
    pub fn cell_center(&self, row: usize, col: usize) -> Point2D {
        Point2D::new(
            (col as f32 + 0.5) * self.resolution,
            (row as f32 + 0.5) * self.resolution,
        )
    }

    /// Map a world point to its (possibly out-of-bounds) cell index.
    #[inline]
    pub fn world_to_cell(&self, p: Point2D) -> GridCell {
        GridCell::new(
            (p.y / self.resolution).floor() as i32,
            (p.x / self.resolution).floor() as i32,
        )
    }

    /// Check if a cell index lies inside the grid.
    #[inline]
    pub fn in_bounds(&self, cell: GridCell) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && (cell.row as usize) < self.height
            && (cell.col as usize) < self.width
    }

    /// Occupancy at a cell. Out-of-bounds cells read as FREE.
    #[inline]
    pub fn state(&self, cell: GridCell) -> CellState {
        if self.in_bounds(cell) {
            self.cells[cell.row as usize * self.width + cell.col as usize]
        } else {
            CellState::Free
        }
    }

    /// Whether an in-bounds cell is occupied.
    #[inline]
    pub fn is_occupied(&self, cell: GridCell) -> bool {
        self.state(cell) == CellState::Occupied
    }

    /// Mark a single cell occupied. Out-of-bounds indices are ignored.
    #[inline]
    pub fn set_occupied(&mut self, cell: GridCell) {
        if self.in_bounds(cell) {
            self.cells[cell.row as usize * self.width + cell.col as usize] = CellState::Occupied;
        }
    }

    /// Number of occupied cells.
    pub fn count_occupied(&self) -> usize {
        self.cells
            .iter()
            .filter(|&&c| c == CellState::Occupied)
            .count()
    }

    /// Export as single-channel grayscale pixels, row 0 first.
    ///
    /// Occupied = 0 (black), free = 255 (white).
    pub fn to_grayscale(&self) -> (usize, usize, Vec<u8>) {
        let pixels = self
            .cells
            .iter()
            .map(|&c| match c {
                CellState::Occupied => 0u8,
                CellState::Free => 255u8,
            })
            .collect();
        (self.width, self.height, pixels)
    }

    /// Rebuild a grid from grayscale pixels, binarizing at the midpoint.
    ///
    /// Values above 127 decode as FREE; the dimensions must match
    /// `canvas_size / resolution` of the grid that produced the raster.
    pub fn from_grayscale(width: usize, height: usize, pixels: &[u8], resolution: f32) -> Self {
        let cells = pixels
            .iter()
            .take(width * height)
            .map(|&p| {
                if p > 127 {
                    CellState::Free
                } else {
                    CellState::Occupied
                }
            })
            .collect();
        Self {
            cells,
            width,
            height,
            resolution,
        }
    }
}
