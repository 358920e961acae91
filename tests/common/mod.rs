//! Common test utilities: canvas/component builders and assertion helpers.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic,
    clippy::cast_possible_truncation,
    clippy::cast_lossless
)]

use xlgrid::export::{export_report, ExportReport, PageLayout, RecordedPage};
use xlgrid::{
    AdjustmentKind, Canvas, CellRegion, Component, ComponentKind, ExportConfig, Rect, TableCell,
    TableData,
};

// ============================================================================
// Builders
// ============================================================================

/// Top-level canvas with the given components.
pub fn canvas(width: i32, height: i32, components: Vec<Component>) -> Canvas {
    Canvas {
        id: "page".to_string(),
        width,
        height,
        embedded: false,
        components,
    }
}

pub fn component(id: &str, kind: ComponentKind, x: i32, y: i32, w: i32, h: i32) -> Component {
    Component::new(id, kind, Rect::new(x, y, w, h))
}

/// Table with explicit column widths and a `rows` x `widths.len()` grid of values
/// named `"{id}:{row},{col}"`.
pub fn table(id: &str, rect: Rect, widths: &[Option<i32>], rows: u32, row_height: i32) -> Component {
    let cols = widths.len() as u32;
    let cells = (0..rows)
        .flat_map(|r| (0..cols).map(move |c| (r, c)))
        .map(|(r, c)| TableCell::new(r, c, format!("{id}:{r},{c}")))
        .collect();
    let mut component = Component::new(id, ComponentKind::Table, rect);
    component.table = Some(TableData {
        column_widths: widths.to_vec(),
        show_all_columns: false,
        row_height: Some(row_height),
        cells,
    });
    component
}

pub fn with_children(mut parent: Component, children: Vec<Component>) -> Component {
    parent.children = children;
    parent
}

// ============================================================================
// Export helpers
// ============================================================================

/// Export with a recording writer, panicking on failure.
pub fn export(canvas: &Canvas, config: &ExportConfig) -> ExportReport {
    export_report(canvas, config).expect("export failed")
}

/// Layout and output of the only page of a single-page export.
pub fn single_page(canvas: &Canvas, config: &ExportConfig) -> (PageLayout, RecordedPage) {
    let mut report = export(canvas, config);
    assert_eq!(report.pages.len(), 1, "expected a single page");
    let page = report.pages.remove(0);
    (page.layout, page.output)
}

pub fn count_kind(layout: &PageLayout, kind: AdjustmentKind) -> usize {
    layout.diagnostics.iter().filter(|d| d.kind == kind).count()
}

/// Assert that no two regions share a cell.
pub fn assert_disjoint(regions: &[CellRegion]) {
    for (i, a) in regions.iter().enumerate() {
        for b in regions.iter().skip(i + 1) {
            assert!(!a.intersects(b), "regions {a:?} and {b:?} overlap");
        }
    }
}

/// Assert that an axis is strictly increasing.
pub fn assert_strictly_increasing(cuts: &[i32]) {
    for pair in cuts.windows(2) {
        assert!(pair[0] < pair[1], "axis not strictly increasing: {cuts:?}");
    }
}
