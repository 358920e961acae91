use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cell_ref::{cell_ref, range_ref};

/// One dimension of the output grid.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Axis {
    Rows,
    Columns,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Rows => f.write_str("row"),
            Axis::Columns => f.write_str("column"),
        }
    }
}

/// How a pixel coordinate snaps onto grid lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapMode {
    /// Floor: the line at or before the coordinate
    #[default]
    Exact,
    /// Closer of the two surrounding lines, ties to the lower one
    Nearest,
}

/// (row, col) into the grid produced by an axis pair.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellCoordinate {
    pub row: u32,
    pub col: u32,
}

impl CellCoordinate {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for CellCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&cell_ref(self.row, self.col))
    }
}

/// A planned merged region of the grid.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct CellRegion {
    pub start_row: u32,
    pub start_col: u32,
    pub row_span: u32,
    pub col_span: u32,
}

impl CellRegion {
    pub const fn new(start_row: u32, start_col: u32, row_span: u32, col_span: u32) -> Self {
        Self {
            start_row,
            start_col,
            row_span,
            col_span,
        }
    }

    pub const fn origin(&self) -> CellCoordinate {
        CellCoordinate::new(self.start_row, self.start_col)
    }

    /// Exclusive end row
    pub const fn end_row(&self) -> u32 {
        self.start_row.saturating_add(self.row_span)
    }

    /// Exclusive end column
    pub const fn end_col(&self) -> u32 {
        self.start_col.saturating_add(self.col_span)
    }

    pub const fn is_merged(&self) -> bool {
        self.row_span > 1 || self.col_span > 1
    }

    pub const fn contains(&self, row: u32, col: u32) -> bool {
        row >= self.start_row && row < self.end_row() && col >= self.start_col && col < self.end_col()
    }

    pub const fn intersects(&self, other: &CellRegion) -> bool {
        self.start_row < other.end_row()
            && other.start_row < self.end_row()
            && self.start_col < other.end_col()
            && other.start_col < self.end_col()
    }

    /// Every (row, col) covered by the region, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (self.start_row..self.end_row())
            .flat_map(move |r| (self.start_col..self.end_col()).map(move |c| (r, c)))
    }

    /// A1-style reference, e.g. `"B2:C4"` (or `"B2"` for a single cell).
    pub fn a1_ref(&self) -> String {
        range_ref(
            self.start_row,
            self.start_col,
            self.end_row().saturating_sub(1),
            self.end_col().saturating_sub(1),
        )
    }
}

/// Result of mapping a pixel point onto the grid.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MappedCell {
    pub row: u32,
    pub col: u32,
    /// Horizontal pixel offset from the matched column line
    pub dx: i32,
    /// Vertical pixel offset from the matched row line
    pub dy: i32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_region_bounds() {
        let r = CellRegion::new(1, 1, 2, 3);
        assert_eq!(r.end_row(), 3);
        assert_eq!(r.end_col(), 4);
        assert!(r.contains(2, 3));
        assert!(!r.contains(3, 1));
        assert!(r.is_merged());
        assert_eq!(r.cells().count(), 6);
        assert_eq!(r.a1_ref(), "B2:D3");
        assert_eq!(CellRegion::new(0, 0, 1, 1).a1_ref(), "A1");
    }

    #[test]
    fn test_region_intersection() {
        let a = CellRegion::new(0, 0, 2, 2);
        assert!(a.intersects(&CellRegion::new(1, 1, 1, 1)));
        assert!(!a.intersects(&CellRegion::new(2, 0, 1, 5)));
        assert!(!a.intersects(&CellRegion::new(0, 2, 3, 1)));
    }
}
