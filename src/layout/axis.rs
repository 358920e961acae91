//! Final grid axes built from collected cut points.

use std::collections::BTreeSet;

use serde::Serialize;

use super::boundary::BoundarySet;
use super::placement::{table_row_height, Placed};
use super::widths::ColumnWidthPlan;
use crate::config::ExportConfig;
use crate::types::{AdjustmentKind, Axis, Canvas, Diagnostics, MapMode};

/// Strictly increasing pixel cut points for one dimension.
///
/// `n` cut points define `n - 1` grid cells; line `i` is the left/top edge of
/// cell `i`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GridAxis {
    cuts: Vec<i32>,
}

impl Default for GridAxis {
    fn default() -> Self {
        Self { cuts: vec![0] }
    }
}

impl GridAxis {
    /// Build from an ordered set (already unique and sorted).
    pub fn from_set(cuts: &BTreeSet<i32>) -> Self {
        Self {
            cuts: cuts.iter().copied().collect(),
        }
    }

    /// Build from arbitrary cut points; duplicates are removed and the result sorted.
    pub fn from_unsorted(cuts: impl IntoIterator<Item = i32>) -> Self {
        let set: BTreeSet<i32> = cuts.into_iter().collect();
        Self::from_set(&set)
    }

    pub fn cuts(&self) -> &[i32] {
        &self.cuts
    }

    /// Number of grid cells (one less than the number of lines).
    pub fn cell_count(&self) -> u32 {
        u32::try_from(self.cuts.len().saturating_sub(1)).unwrap_or(u32::MAX)
    }

    /// Pixel position of grid line `i`.
    pub fn line(&self, i: u32) -> Option<i32> {
        self.cuts.get(usize::try_from(i).ok()?).copied()
    }

    /// Pixel size of cell `i`.
    pub fn size(&self, i: u32) -> Option<i32> {
        let start = self.line(i)?;
        let end = self.line(i.checked_add(1)?)?;
        Some(end - start)
    }

    /// Pixel sizes of every cell, in order.
    pub fn sizes(&self) -> Vec<i32> {
        self.cuts
            .windows(2)
            .map(|w| match w {
                [a, b] => b - a,
                _ => 0,
            })
            .collect()
    }

    /// Position of the last grid line.
    pub fn extent(&self) -> i32 {
        self.cuts.last().copied().unwrap_or(0)
    }

    pub fn contains(&self, px: i32) -> bool {
        self.cuts.binary_search(&px).is_ok()
    }

    /// Grid line for `coord` plus the pixel remainder from that line.
    ///
    /// `Exact` returns `i` with `axis[i] <= coord < axis[i + 1]`; `Nearest`
    /// rounds to whichever surrounding line is strictly closer, ties going to
    /// the lower index. Coordinates before the first line map to line 0 and
    /// past the last line to the last line.
    pub fn locate(&self, coord: i32, mode: MapMode) -> (u32, i32) {
        let mut idx = match self.cuts.binary_search(&coord) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        if mode == MapMode::Nearest {
            if let (Some(&lo), Some(&hi)) = (self.cuts.get(idx), self.cuts.get(idx + 1)) {
                if coord > lo && i64::from(hi) - i64::from(coord) < i64::from(coord) - i64::from(lo) {
                    idx += 1;
                }
            }
        }
        let line = self.cuts.get(idx).copied().unwrap_or(0);
        (
            u32::try_from(idx).unwrap_or(u32::MAX),
            coord.saturating_sub(line),
        )
    }

    /// Keep at most `max_cells` cells; returns how many lines were dropped.
    fn truncate_cells(&mut self, max_cells: u32) -> usize {
        let keep = usize::try_from(max_cells)
            .unwrap_or(usize::MAX)
            .saturating_add(1);
        if self.cuts.len() <= keep {
            return 0;
        }
        let dropped = self.cuts.len() - keep;
        self.cuts.truncate(keep);
        dropped
    }
}

/// An axis that needed more cells than the format allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityOverflow {
    pub axis: Axis,
    /// Cells the layout needed
    pub required: usize,
    /// Cells the format allows
    pub limit: u32,
}

/// Output of [`AxisBuilder::build`].
#[derive(Debug, Clone)]
pub struct AxisPair {
    pub rows: GridAxis,
    pub cols: GridAxis,
    /// First axis that had to be truncated, if any
    pub overflow: Option<CapacityOverflow>,
}

/// Merges collected cut points into final axes.
#[derive(Debug, Clone)]
pub struct AxisBuilder<'c> {
    config: &'c ExportConfig,
    rows: BTreeSet<i32>,
    cols: BTreeSet<i32>,
}

impl<'c> AxisBuilder<'c> {
    pub fn new(config: &'c ExportConfig, boundaries: BoundarySet) -> Self {
        Self {
            config,
            rows: boundaries.rows,
            cols: boundaries.cols,
        }
    }

    /// Add the internal cuts of a tabular component: column partial sums
    /// strictly inside its width, and every data-row boundary.
    pub fn add_table_cuts(&mut self, placed: &Placed<'_>, plan: &ColumnWidthPlan) {
        let rect = placed.rect;
        let mut acc: i64 = 0;
        for w in &plan.widths {
            acc += i64::from(*w);
            if acc >= i64::from(rect.width) {
                break;
            }
            if let Ok(x) = i32::try_from(i64::from(rect.x) + acc) {
                self.cols.insert(x);
            }
        }

        let rows = placed
            .component
            .table
            .as_ref()
            .map_or(0, |t| t.row_count());
        let row_height = i64::from(table_row_height(placed.component, self.config));
        for k in 1..=i64::from(rows) {
            let Ok(y) = i32::try_from(i64::from(rect.y) + k * row_height) else {
                break;
            };
            if y > rect.bottom() {
                break;
            }
            self.rows.insert(y);
        }
    }

    /// Extend the column axis in unit steps up to `width`. Steps beyond one
    /// past the column cap are only counted; the count is returned.
    fn extend_columns(&mut self, width: i32) -> usize {
        let unit = i64::from(self.config.default_col_width.max(1));
        let width = i64::from(width);
        let mut last = i64::from(self.cols.last().copied().unwrap_or(0));
        if last >= width {
            return 0;
        }
        let steps = (width - last + unit - 1) / unit;
        let lines = i64::try_from(self.cols.len()).unwrap_or(i64::MAX);
        let room = (i64::from(self.config.max_cols) + 2 - lines).max(0);
        let inserted = steps.min(room);
        for _ in 0..inserted {
            last = (last + unit).min(width);
            if let Ok(x) = i32::try_from(last) {
                self.cols.insert(x);
            }
        }
        usize::try_from(steps - inserted).unwrap_or(usize::MAX)
    }

    /// Produce the final axes for `canvas`.
    ///
    /// A top-level canvas extends its column axis in unit-width steps up to
    /// the declared canvas width. Axes longer than the format cap are
    /// truncated, recorded as `Truncated`, and reported in `overflow`.
    pub fn build(mut self, canvas: &Canvas, diagnostics: &mut Diagnostics) -> AxisPair {
        let pending_cols = if canvas.embedded {
            0
        } else {
            self.extend_columns(canvas.width)
        };

        let mut rows = GridAxis::from_set(&self.rows);
        let mut cols = GridAxis::from_set(&self.cols);
        let mut overflow = None;

        for (axis, grid, limit, pending) in [
            (Axis::Rows, &mut rows, self.config.max_rows, 0),
            (Axis::Columns, &mut cols, self.config.max_cols, pending_cols),
        ] {
            let required = grid.cuts.len().saturating_sub(1).saturating_add(pending);
            let dropped = grid.truncate_cells(limit).saturating_add(pending);
            if dropped > 0 {
                diagnostics.record(
                    &canvas.id,
                    AdjustmentKind::Truncated,
                    i64::try_from(dropped).unwrap_or(i64::MAX),
                    format!("{axis} axis needs {required} cells, cap is {limit}"),
                );
                overflow.get_or_insert(CapacityOverflow {
                    axis,
                    required,
                    limit,
                });
            }
        }

        log::debug!(
            "built grid axes for {}: {} rows x {} cols",
            canvas.id,
            rows.cell_count(),
            cols.cell_count()
        );

        AxisPair {
            rows,
            cols,
            overflow,
        }
    }
}
