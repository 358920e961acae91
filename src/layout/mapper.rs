//! Pixel to grid cell lookup (binary search over the final axes).

use super::axis::GridAxis;
use crate::types::{MapMode, MappedCell, Rect};

/// Maps pixel coordinates onto a row/column axis pair.
#[derive(Debug, Clone, Copy)]
pub struct PixelGridMapper<'a> {
    rows: &'a GridAxis,
    cols: &'a GridAxis,
}

impl<'a> PixelGridMapper<'a> {
    pub fn new(rows: &'a GridAxis, cols: &'a GridAxis) -> Self {
        Self { rows, cols }
    }

    /// Grid line pair for `(x, y)` plus the sub-pixel remainders.
    pub fn map_pixel_to_cell(&self, x: i32, y: i32, mode: MapMode) -> MappedCell {
        let (col, dx) = self.cols.locate(x, mode);
        let (row, dy) = self.rows.locate(y, mode);
        MappedCell { row, col, dx, dy }
    }

    /// Top-left and bottom-right grid lines covering `rect`.
    pub fn map_rect(&self, rect: Rect, mode: MapMode) -> (MappedCell, MappedCell) {
        (
            self.map_pixel_to_cell(rect.x, rect.y, mode),
            self.map_pixel_to_cell(rect.right(), rect.bottom(), mode),
        )
    }
}
