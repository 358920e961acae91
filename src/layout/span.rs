//! Merged-region planning with write-once cell bookkeeping.

use std::collections::HashSet;

use crate::types::{AdjustmentKind, CellCoordinate, CellRegion, Diagnostics};

/// Cells already consumed by a planned region during one export pass.
#[derive(Debug, Clone, Default)]
pub struct WrittenMask {
    cells: HashSet<(u32, u32)>,
}

impl WrittenMask {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, row: u32, col: u32) -> bool {
        self.cells.contains(&(row, col))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn mark(&mut self, region: &CellRegion) {
        self.cells.extend(region.cells());
    }

    /// Number of columns from `origin` along its row that are still free,
    /// up to `limit`.
    fn free_run(&self, row: u32, start_col: u32, limit: u32) -> u32 {
        (0..limit)
            .find(|dc| self.contains(row, start_col.saturating_add(*dc)))
            .unwrap_or(limit)
    }
}

/// Converts declared spans into non-overlapping regions within the format cap.
#[derive(Debug, Clone, Copy)]
pub struct SpanPlanner {
    max_rows: u32,
    max_cols: u32,
}

impl SpanPlanner {
    pub fn new(max_rows: u32, max_cols: u32) -> Self {
        Self { max_rows, max_cols }
    }

    /// Plan the region anchored at `origin`.
    ///
    /// Returns `None` when the origin is already covered by an earlier region
    /// or lies beyond the format cap. Spans reaching past the cap are clipped
    /// to it, and a rectangle that runs into an earlier region is clipped to
    /// the largest origin-anchored rectangle that stays clear of it. Every
    /// clip is recorded as `Clipped`. The returned region is marked in `mask`.
    pub fn plan(
        &self,
        component_id: &str,
        origin: CellCoordinate,
        row_span: u32,
        col_span: u32,
        mask: &mut WrittenMask,
        diagnostics: &mut Diagnostics,
    ) -> Option<CellRegion> {
        if mask.contains(origin.row, origin.col) {
            diagnostics.record(
                component_id,
                AdjustmentKind::Skipped,
                1,
                format!("{origin} already written"),
            );
            return None;
        }
        if origin.row >= self.max_rows || origin.col >= self.max_cols {
            diagnostics.record(
                component_id,
                AdjustmentKind::Skipped,
                1,
                format!("{origin} beyond grid capacity"),
            );
            return None;
        }

        let mut rows = row_span.max(1);
        let mut cols = col_span.max(1);

        let rows_left = self.max_rows - origin.row;
        if rows > rows_left {
            diagnostics.record(
                component_id,
                AdjustmentKind::Clipped,
                i64::from(rows - rows_left),
                format!("row span at {origin} clipped to capacity"),
            );
            rows = rows_left;
        }
        let cols_left = self.max_cols - origin.col;
        if cols > cols_left {
            diagnostics.record(
                component_id,
                AdjustmentKind::Clipped,
                i64::from(cols - cols_left),
                format!("column span at {origin} clipped to capacity"),
            );
            cols = cols_left;
        }

        let (fit_rows, fit_cols) = fit_clear(mask, origin, rows, cols);
        if (fit_rows, fit_cols) != (rows, cols) {
            let lost = u64::from(rows) * u64::from(cols) - u64::from(fit_rows) * u64::from(fit_cols);
            diagnostics.record(
                component_id,
                AdjustmentKind::Clipped,
                i64::try_from(lost).unwrap_or(i64::MAX),
                format!("span at {origin} overlaps an earlier region"),
            );
        }

        let region = CellRegion::new(origin.row, origin.col, fit_rows, fit_cols);
        mask.mark(&region);
        Some(region)
    }
}

/// Largest rectangle anchored at `origin`, at most `rows x cols`, free of written cells.
fn fit_clear(mask: &WrittenMask, origin: CellCoordinate, rows: u32, cols: u32) -> (u32, u32) {
    if mask.is_empty() {
        return (rows, cols);
    }
    let cols = mask.free_run(origin.row, origin.col, cols);
    let rows = (1..rows)
        .find(|dr| mask.free_run(origin.row.saturating_add(*dr), origin.col, cols) < cols)
        .unwrap_or(rows);
    (rows, cols)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn at(row: u32, col: u32) -> CellCoordinate {
        CellCoordinate::new(row, col)
    }

    #[test]
    fn test_plan_marks_region() {
        let planner = SpanPlanner::new(100, 100);
        let mut mask = WrittenMask::new();
        let mut diagnostics = Diagnostics::new();

        let region = planner.plan("t", at(1, 1), 2, 3, &mut mask, &mut diagnostics).unwrap();
        assert_eq!(region, CellRegion::new(1, 1, 2, 3));
        assert_eq!(mask.len(), 6);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_covered_origin_returns_none() {
        let planner = SpanPlanner::new(100, 100);
        let mut mask = WrittenMask::new();
        let mut diagnostics = Diagnostics::new();
        planner.plan("t", at(0, 0), 2, 2, &mut mask, &mut diagnostics).unwrap();

        assert!(planner.plan("t", at(1, 1), 1, 1, &mut mask, &mut diagnostics).is_none());
        assert_eq!(diagnostics.of_kind(AdjustmentKind::Skipped).count(), 1);
        assert_eq!(mask.len(), 4);
    }

    #[test]
    fn test_span_clipped_at_capacity() {
        let planner = SpanPlanner::new(10, 10);
        let mut mask = WrittenMask::new();
        let mut diagnostics = Diagnostics::new();

        // Rows 8..15 would run 5 rows past the cap of 10
        let region = planner.plan("t", at(8, 0), 7, 1, &mut mask, &mut diagnostics).unwrap();
        assert_eq!(region.row_span, 2);
        assert_eq!(region.end_row(), 10);
        let clipped: Vec<_> = diagnostics.of_kind(AdjustmentKind::Clipped).collect();
        assert_eq!(clipped.len(), 1);
        assert_eq!(clipped[0].magnitude, 5);
    }

    #[test]
    fn test_origin_past_capacity_skipped() {
        let planner = SpanPlanner::new(10, 10);
        let mut mask = WrittenMask::new();
        let mut diagnostics = Diagnostics::new();
        assert!(planner.plan("t", at(10, 0), 1, 1, &mut mask, &mut diagnostics).is_none());
        assert!(mask.is_empty());
    }

    #[test]
    fn test_partial_overlap_clipped() {
        let planner = SpanPlanner::new(100, 100);
        let mut mask = WrittenMask::new();
        let mut diagnostics = Diagnostics::new();
        planner.plan("a", at(2, 2), 1, 1, &mut mask, &mut diagnostics).unwrap();

        // 3x3 from (0,0) would cover (2,2): keep the 2 clear rows
        let region = planner.plan("b", at(0, 0), 3, 3, &mut mask, &mut diagnostics).unwrap();
        assert_eq!(region, CellRegion::new(0, 0, 2, 3));

        // Same row as an earlier region: columns shrink first
        let region = planner.plan("c", at(2, 0), 1, 4, &mut mask, &mut diagnostics).unwrap();
        assert_eq!(region, CellRegion::new(2, 0, 1, 2));
        assert_eq!(diagnostics.of_kind(AdjustmentKind::Clipped).count(), 2);
    }

    #[test]
    fn test_zero_span_treated_as_one() {
        let planner = SpanPlanner::new(100, 100);
        let mut mask = WrittenMask::new();
        let mut diagnostics = Diagnostics::new();
        let region = planner.plan("t", at(0, 0), 0, 0, &mut mask, &mut diagnostics).unwrap();
        assert_eq!(region, CellRegion::new(0, 0, 1, 1));
    }
}
