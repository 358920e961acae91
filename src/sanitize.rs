//! Input clamping for configuration errors.
//!
//! Invalid sizes, positions and spans never abort an export. They are
//! clamped into range on a working copy and recorded as `Clamped`.

use crate::config::{ExportConfig, DEFAULT_COL_WIDTH, DEFAULT_ROW_HEIGHT};
use crate::types::{AdjustmentKind, Canvas, Component, Diagnostics, TableData};

/// Return a config whose unit cell sizes are usable.
pub fn sanitize_config(config: &ExportConfig, diagnostics: &mut Diagnostics) -> ExportConfig {
    let mut out = config.clone();
    if out.default_col_width <= 0 {
        diagnostics.record(
            "config",
            AdjustmentKind::Clamped,
            i64::from(out.default_col_width),
            "non-positive default column width",
        );
        out.default_col_width = DEFAULT_COL_WIDTH;
    }
    if out.default_row_height <= 0 {
        diagnostics.record(
            "config",
            AdjustmentKind::Clamped,
            i64::from(out.default_row_height),
            "non-positive default row height",
        );
        out.default_row_height = DEFAULT_ROW_HEIGHT;
    }
    if out.rows_per_page == Some(0) {
        diagnostics.record("config", AdjustmentKind::Clamped, 0, "zero rows per page");
        out.rows_per_page = None;
    }
    out
}

/// Return a copy of `canvas` with every out-of-range value clamped.
pub fn sanitize_canvas(canvas: &Canvas, diagnostics: &mut Diagnostics) -> Canvas {
    let mut out = canvas.clone();
    out.width = clamp_non_negative(&canvas.id, "canvas width", canvas.width, diagnostics);
    out.height = clamp_non_negative(&canvas.id, "canvas height", canvas.height, diagnostics);
    for component in &mut out.components {
        sanitize_component(component, diagnostics);
    }
    out
}

fn sanitize_component(component: &mut Component, diagnostics: &mut Diagnostics) {
    let id = component.id.clone();
    component.x = clamp_non_negative(&id, "x", component.x, diagnostics);
    component.y = clamp_non_negative(&id, "y", component.y, diagnostics);
    component.width = clamp_non_negative(&id, "width", component.width, diagnostics);
    component.height = clamp_non_negative(&id, "height", component.height, diagnostics);

    if let Some(n) = component.column_count {
        if n < 1 {
            diagnostics.record(&id, AdjustmentKind::Clamped, i64::from(n), "column count");
            component.column_count = Some(1);
        }
    }

    if let Some(table) = component.table.as_mut() {
        sanitize_table(&id, table, diagnostics);
    }

    for child in &mut component.children {
        sanitize_component(child, diagnostics);
    }
}

fn sanitize_table(id: &str, table: &mut TableData, diagnostics: &mut Diagnostics) {
    for hint in table.column_widths.iter_mut().flatten() {
        if *hint < 0 {
            diagnostics.record(id, AdjustmentKind::Clamped, i64::from(*hint), "column width");
            *hint = 0;
        }
    }
    if let Some(h) = table.row_height {
        if h <= 0 {
            diagnostics.record(id, AdjustmentKind::Clamped, i64::from(h), "row height");
            table.row_height = None;
        }
    }
    for cell in &mut table.cells {
        if cell.row_span < 1 {
            diagnostics.record(
                id,
                AdjustmentKind::Clamped,
                i64::from(cell.row_span),
                format!("row span at ({}, {})", cell.row, cell.col),
            );
            cell.row_span = 1;
        }
        if cell.col_span < 1 {
            diagnostics.record(
                id,
                AdjustmentKind::Clamped,
                i64::from(cell.col_span),
                format!("column span at ({}, {})", cell.row, cell.col),
            );
            cell.col_span = 1;
        }
    }
}

fn clamp_non_negative(id: &str, what: &str, value: i32, diagnostics: &mut Diagnostics) -> i32 {
    if value < 0 {
        diagnostics.record(id, AdjustmentKind::Clamped, i64::from(value), what);
        0
    } else {
        value
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::types::{ComponentKind, Rect, TableCell};

    #[test]
    fn test_negative_values_clamped_with_diagnostics() {
        let mut table = Component::new("t", ComponentKind::Table, Rect::new(-5, 10, 100, -1));
        table.table = Some(TableData {
            column_widths: vec![Some(-20), None],
            cells: vec![TableCell::new(0, 0, "a").spanning(-3, 0)],
            ..TableData::default()
        });
        let canvas = Canvas {
            id: "page".into(),
            width: -100,
            height: 200,
            embedded: false,
            components: vec![table],
        };

        let mut diagnostics = Diagnostics::new();
        let clean = sanitize_canvas(&canvas, &mut diagnostics);

        assert_eq!(clean.width, 0);
        let t = &clean.components[0];
        assert_eq!(t.rect(), Rect::new(0, 10, 100, 0));
        let data = t.table.as_ref().unwrap();
        assert_eq!(data.column_widths, vec![Some(0), None]);
        assert_eq!((data.cells[0].row_span, data.cells[0].col_span), (1, 1));

        assert_eq!(diagnostics.of_kind(AdjustmentKind::Clamped).count(), 6);
        // The input snapshot is untouched
        assert_eq!(canvas.components[0].x, -5);
    }

    #[test]
    fn test_config_unit_sizes_restored() {
        let mut diagnostics = Diagnostics::new();
        let config = ExportConfig::default().with_unit_cell(0, -4).with_rows_per_page(0);
        let clean = sanitize_config(&config, &mut diagnostics);
        assert_eq!(clean.default_col_width, DEFAULT_COL_WIDTH);
        assert_eq!(clean.default_row_height, DEFAULT_ROW_HEIGHT);
        assert_eq!(clean.rows_per_page, None);
        assert_eq!(diagnostics.len(), 3);
    }
}
