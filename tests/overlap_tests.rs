//! Overlap resolution tests for xlgrid
//!
//! Collision-sensitive components (tables, crosstabs, text inputs) that
//! intersect are split along their shallower overlap before the grid is built.
//! Free-floating decorations may overlap freely.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic,
    clippy::cast_possible_truncation,
    clippy::cast_lossless
)]

mod common;

use common::*;
use xlgrid::layout::{bisect, resolve_overlaps, Bisection};
use xlgrid::{AdjustmentKind, ComponentKind, Diagnostics, ExportConfig, Rect};

#[test]
fn test_stacked_tables_split_at_midpoint() {
    let a = Rect::new(40, 0, 600, 200);
    let b = Rect::new(40, 150, 600, 200);
    let (ra, rb, bisection) = bisect(a, b).unwrap();

    assert_eq!(ra.height, 175);
    assert_eq!(rb.y, 175);
    assert_eq!(ra.bottom(), rb.y);
    assert_eq!(bisection, Bisection::Vertical { split: 175, overlap: 50 });
}

#[test]
fn test_side_by_side_split_horizontally() {
    // h = 30 < v = 100
    let a = Rect::new(0, 0, 230, 100);
    let b = Rect::new(200, 0, 200, 100);
    let (ra, rb, bisection) = bisect(a, b).unwrap();

    assert_eq!(ra.right(), 215);
    assert_eq!(rb.x, 215);
    assert_eq!(rb.right(), 400);
    assert_eq!(bisection.overlap(), 30);
}

#[test]
fn test_edge_touching_is_not_an_overlap() {
    assert!(bisect(Rect::new(0, 0, 100, 50), Rect::new(0, 50, 100, 50)).is_none());
    assert!(bisect(Rect::new(0, 0, 100, 50), Rect::new(100, 0, 100, 50)).is_none());
}

#[test]
fn test_resolved_tables_share_a_grid_line() {
    let components = vec![
        component("a", ComponentKind::Table, 0, 0, 600, 200),
        component("b", ComponentKind::Crosstab, 0, 150, 600, 200),
    ];
    let (layout, output) = single_page(&canvas(600, 400, components), &ExportConfig::default());

    assert_eq!(layout.rows.cuts(), &[0, 175, 350]);
    assert_eq!(count_kind(&layout, AdjustmentKind::Bisected), 2);

    let ranges: Vec<_> = output.cells.iter().map(|c| c.range.as_str()).collect();
    assert_eq!(ranges, vec!["A1", "A2"]);
}

#[test]
fn test_text_input_bisected_against_table() {
    let components = vec![
        component("grid", ComponentKind::Table, 0, 0, 600, 200),
        component("search", ComponentKind::TextInput, 0, 150, 600, 200),
    ];
    let (layout, output) = single_page(&canvas(600, 400, components), &ExportConfig::default());

    // Only the table is grid-bound; its bisected bottom is the cut
    assert_eq!(layout.rows.cuts(), &[0, 175]);
    let anchor = &output.anchors[0];
    assert_eq!(anchor.component_id, "search");
    assert_eq!((anchor.from.row, anchor.from.dy), (1, 0));
}

#[test]
fn test_decorations_are_left_alone() {
    let components = vec![
        component("t", ComponentKind::Table, 0, 0, 300, 100),
        component("logo", ComponentKind::Image, 50, 50, 300, 100),
        component("banner", ComponentKind::Shape, 0, 0, 300, 300),
    ];
    let mut diagnostics = Diagnostics::new();
    let resolved = resolve_overlaps(
        &canvas(300, 300, components),
        &ExportConfig::default(),
        &mut diagnostics,
    );

    assert!(diagnostics.is_empty());
    assert_eq!(resolved.components[0].rect(), Rect::new(0, 0, 300, 100));
    assert_eq!(resolved.components[1].rect(), Rect::new(50, 50, 300, 100));
}

#[test]
fn test_siblings_in_nested_canvases_resolved_independently() {
    let inner = vec![
        component("x", ComponentKind::Table, 0, 0, 100, 60),
        component("y", ComponentKind::Table, 0, 40, 100, 60),
    ];
    let components = vec![
        with_children(component("sub", ComponentKind::EmbeddedCanvas, 0, 0, 200, 200), inner),
        // Overlaps "x" in page coordinates, but is not its sibling
        component("z", ComponentKind::Table, 0, 30, 100, 20),
    ];
    let mut diagnostics = Diagnostics::new();
    let resolved = resolve_overlaps(
        &canvas(200, 200, components),
        &ExportConfig::default(),
        &mut diagnostics,
    );

    let children = &resolved.components[0].children;
    assert_eq!(children[0].rect(), Rect::new(0, 0, 100, 50));
    assert_eq!(children[1].rect(), Rect::new(0, 50, 100, 50));
    assert_eq!(resolved.components[1].rect(), Rect::new(0, 30, 100, 20));

    let ids: Vec<_> = diagnostics.iter().map(|d| d.component_id.as_str()).collect();
    assert_eq!(ids, vec!["x", "y"]);
}

#[test]
fn test_input_is_never_modified_in_place() {
    let page = canvas(
        600,
        400,
        vec![
            component("a", ComponentKind::Table, 0, 0, 600, 200),
            component("b", ComponentKind::Table, 0, 150, 600, 200),
        ],
    );
    let mut diagnostics = Diagnostics::new();
    let resolved = resolve_overlaps(&page, &ExportConfig::default(), &mut diagnostics);

    assert_eq!(page.components[0].height, 200);
    assert_eq!(resolved.components[0].height, 175);
}

#[test]
fn test_tables_with_data_keep_the_rows_that_fit() {
    // Ten 20px rows each: both tables render exactly at their declared 200px
    let components = vec![
        table("a", Rect::new(0, 0, 600, 200), &[None], 10, 20),
        table("b", Rect::new(0, 150, 600, 200), &[None], 10, 20),
    ];
    let (layout, output) = single_page(&canvas(600, 400, components), &ExportConfig::default());

    assert_eq!(count_kind(&layout, AdjustmentKind::Bisected), 2);
    assert_eq!(count_kind(&layout, AdjustmentKind::Skipped), 0);
    assert_eq!(count_kind(&layout, AdjustmentKind::Truncated), 2);

    for id in ["a", "b"] {
        let written = output.cells.iter().filter(|c| c.component_id == id).count();
        assert_eq!(written, 8, "rows written for {id}");
    }
    let values: Vec<_> = output.cells.iter().filter_map(|c| c.value.as_deref()).collect();
    assert!(values.contains(&"a:7,0"));
    assert!(!values.contains(&"a:8,0"));
    assert!(!values.contains(&"b:9,0"));

    let regions: Vec<_> = output.cells.iter().map(|c| c.region).collect();
    assert_disjoint(&regions);
}

#[test]
fn test_filter_panel_children_are_stacked_not_bisected() {
    let children = vec![
        component("t1", ComponentKind::Table, 0, 0, 200, 40),
        component("t2", ComponentKind::Table, 0, 0, 200, 40),
    ];
    let panel = with_children(component("panel", ComponentKind::FilterPanel, 0, 0, 200, 200), children);
    let (layout, _) = single_page(&canvas(200, 200, vec![panel]), &ExportConfig::default());

    assert_eq!(layout.rows.cuts(), &[0, 40, 80, 200]);
    assert_eq!(count_kind(&layout, AdjustmentKind::Bisected), 0);
}
