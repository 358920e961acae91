//! Candidate grid cut points from component edges.

use std::collections::BTreeSet;

use super::placement::Placed;

/// Candidate row and column cut points, always seeded with 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundarySet {
    pub rows: BTreeSet<i32>,
    pub cols: BTreeSet<i32>,
}

impl Default for BoundarySet {
    fn default() -> Self {
        Self {
            rows: BTreeSet::from([0]),
            cols: BTreeSet::from([0]),
        }
    }
}

impl BoundarySet {
    pub fn add_row(&mut self, y: i32) {
        if y >= 0 {
            self.rows.insert(y);
        }
    }

    pub fn add_col(&mut self, x: i32) {
        if x >= 0 {
            self.cols.insert(x);
        }
    }
}

/// Collect mandatory cuts from placed components.
///
/// Grid-bound kinds contribute their top/bottom and left/right edges. A
/// multi-column panel with N columns also contributes N-1 evenly spaced
/// interior x-cuts. Free-floating kinds contribute nothing.
pub fn collect_boundaries(placed: &[Placed<'_>]) -> BoundarySet {
    let mut set = BoundarySet::default();
    for p in placed {
        let caps = p.component.capabilities();
        if !caps.grid_bound {
            continue;
        }
        let rect = p.rect;
        set.add_row(rect.y);
        set.add_row(rect.bottom());
        if p.declared_bottom != rect.bottom() {
            set.add_row(p.declared_bottom);
        }
        set.add_col(rect.x);
        set.add_col(rect.right());

        if caps.multi_column {
            for x in interior_column_cuts(rect.x, rect.width, p.component.column_count()) {
                set.add_col(x);
            }
        }
    }
    set
}

/// The N-1 interior x positions splitting `width` into `columns` even parts.
pub fn interior_column_cuts(left: i32, width: i32, columns: u32) -> Vec<i32> {
    let n = i64::from(columns.max(1));
    (1..n)
        .filter_map(|i| i32::try_from(i64::from(left) + i64::from(width) * i / n).ok())
        .collect()
}
