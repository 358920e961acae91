//! Row-windowed pagination of tabular data.
//!
//! Every page is an independent run of the whole pipeline over a copy of the
//! canvas whose tables only hold the rows of that page's window.

use crate::types::{AdjustmentKind, Canvas, Component, Diagnostics};

/// A half-open range of table data rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowWindow {
    pub start: u32,
    pub len: u32,
}

impl RowWindow {
    pub const fn new(start: u32, len: u32) -> Self {
        Self { start, len }
    }

    pub const fn end(&self) -> u32 {
        self.start.saturating_add(self.len)
    }

    pub const fn contains(&self, row: u32) -> bool {
        row >= self.start && row < self.end()
    }
}

/// Windows of `rows_per_page` rows covering the tallest table. A canvas
/// without tabular data still yields one (empty) page.
pub fn page_windows(canvas: &Canvas, rows_per_page: u32) -> Vec<RowWindow> {
    let per_page = rows_per_page.max(1);
    let tallest = max_table_rows(&canvas.components);
    let pages = tallest.div_ceil(per_page).max(1);
    (0..pages)
        .map(|p| RowWindow::new(p.saturating_mul(per_page), per_page))
        .collect()
}

fn max_table_rows(components: &[Component]) -> u32 {
    components
        .iter()
        .map(|c| {
            let own = if c.capabilities().tabular {
                c.table.as_ref().map_or(0, |t| t.row_count())
            } else {
                0
            };
            own.max(max_table_rows(&c.children))
        })
        .max()
        .unwrap_or(0)
}

/// Copy of `canvas` whose tables hold only the rows inside `window`,
/// rebased to row 0. Spans running past the window end are clipped.
pub fn window_canvas(canvas: &Canvas, window: RowWindow, diagnostics: &mut Diagnostics) -> Canvas {
    let mut out = canvas.clone();
    window_components(&mut out.components, window, diagnostics);
    out
}

fn window_components(components: &mut [Component], window: RowWindow, diagnostics: &mut Diagnostics) {
    for component in components {
        if component.capabilities().tabular {
            if let Some(table) = component.table.as_mut() {
                table.cells.retain(|c| window.contains(c.row));
                for cell in &mut table.cells {
                    cell.row -= window.start;
                    let room = window.len - cell.row;
                    let span = cell.row_span();
                    if span > room {
                        diagnostics.record(
                            &component.id,
                            AdjustmentKind::Clipped,
                            i64::from(span - room),
                            format!("row span at ({}, {}) crosses page end", cell.row, cell.col),
                        );
                        cell.row_span = i32::try_from(room).unwrap_or(i32::MAX);
                    }
                }
            }
        }
        window_components(&mut component.children, window, diagnostics);
    }
}
