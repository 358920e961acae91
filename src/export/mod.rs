//! Export pipeline.
//!
//! Per page: clamp invalid input, resolve overlaps on a working copy, build
//! the final axes, then visit every component once in document order and
//! hand planned regions and floating anchors to the [`CellWriter`].

mod context;
mod paginate;
mod writer;

pub use context::{ExportContext, PageLayout, PlannedRegion};
pub use paginate::{page_windows, window_canvas, RowWindow};
pub use writer::{
    CellContent, CellPlacement, CellWriter, FloatingAnchor, PageGrid, RecordedAnchor,
    RecordedCell, RecordedPage, RecordingWriter,
};

use serde::Serialize;

use crate::config::ExportConfig;
use crate::error::{Result, XlgridError};
use crate::layout::{
    collect_boundaries, interior_column_cuts, placements, resolve_overlaps, table_row_height,
    AxisBuilder, Placed,
};
use crate::sanitize::{sanitize_canvas, sanitize_config};
use crate::types::{AdjustmentKind, Canvas, Diagnostics, MapMode, Placement, Rect, TableCell};

/// Lay out one page and send it to `writer`.
///
/// # Errors
/// Returns [`XlgridError::CapacityExceeded`] when the grid needs more rows or
/// columns than `config` allows (nothing is written for the page in that
/// case), or any error raised by the writer.
pub fn export_page<W: CellWriter + ?Sized>(
    canvas: &Canvas,
    config: &ExportConfig,
    writer: &mut W,
) -> Result<PageLayout> {
    run_page(0, canvas, config, writer, Diagnostics::new())
}

/// Lay out every page of `canvas`.
///
/// With `rows_per_page` set, tabular data is split into row windows and each
/// window is exported as its own page. The first failing page aborts the
/// export with [`XlgridError::Page`].
///
/// # Errors
/// See [`export_page`].
pub fn export_workbook<W: CellWriter + ?Sized>(
    canvas: &Canvas,
    config: &ExportConfig,
    writer: &mut W,
) -> Result<Vec<PageLayout>> {
    let Some(per_page) = config.rows_per_page.filter(|n| *n > 0) else {
        return Ok(vec![export_page(canvas, config, writer)?]);
    };

    let windows = page_windows(canvas, per_page);
    log::debug!("exporting {} as {} page(s)", canvas.id, windows.len());

    let mut pages = Vec::with_capacity(windows.len());
    for (page, window) in windows.into_iter().enumerate() {
        let mut diagnostics = Diagnostics::new();
        let windowed = window_canvas(canvas, window, &mut diagnostics);
        let layout = run_page(page, &windowed, config, writer, diagnostics).map_err(|e| {
            XlgridError::Page {
                page,
                source: Box::new(e),
            }
        })?;
        pages.push(layout);
    }
    Ok(pages)
}

/// Layouts and recorded placements for every page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportReport {
    pub pages: Vec<ReportPage>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPage {
    pub layout: PageLayout,
    pub output: RecordedPage,
}

/// Export with a [`RecordingWriter`] and pair every layout with what was written.
///
/// # Errors
/// See [`export_workbook`].
pub fn export_report(canvas: &Canvas, config: &ExportConfig) -> Result<ExportReport> {
    let mut writer = RecordingWriter::new();
    let layouts = export_workbook(canvas, config, &mut writer)?;
    let pages = layouts
        .into_iter()
        .zip(writer.into_pages())
        .map(|(layout, output)| ReportPage { layout, output })
        .collect();
    Ok(ExportReport { pages })
}

/// Parse a canvas from JSON, export it and serialize the report.
///
/// # Errors
/// JSON errors, plus everything [`export_report`] can return.
pub fn export_json(canvas_json: &str, config: &ExportConfig) -> Result<String> {
    let canvas: Canvas = serde_json::from_str(canvas_json)?;
    let report = export_report(&canvas, config)?;
    Ok(serde_json::to_string_pretty(&report)?)
}

fn run_page<W: CellWriter + ?Sized>(
    page: usize,
    canvas: &Canvas,
    config: &ExportConfig,
    writer: &mut W,
    mut diagnostics: Diagnostics,
) -> Result<PageLayout> {
    let config = sanitize_config(config, &mut diagnostics);
    let canvas = sanitize_canvas(canvas, &mut diagnostics);
    let resolved = resolve_overlaps(&canvas, &config, &mut diagnostics);
    let mut ctx = ExportContext::new(&config, page, diagnostics);

    let placed = placements(&resolved.components, &config);
    let mut builder = AxisBuilder::new(&config, collect_boundaries(&placed));
    for p in placed.iter().filter(|p| p.component.capabilities().tabular) {
        let plan = ctx.resolve_column_widths(p.component);
        builder.add_table_cuts(p, &plan);
    }

    let axes = builder.build(&resolved, ctx.diagnostics_mut());
    if let Some(overflow) = axes.overflow {
        log::error!(
            "page {page} of {}: {} axis needs {} cells, cap is {}",
            resolved.id,
            overflow.axis,
            overflow.required,
            overflow.limit
        );
        return Err(XlgridError::CapacityExceeded {
            axis: overflow.axis,
            required: overflow.required,
            limit: overflow.limit,
        });
    }
    ctx.set_axes(axes.rows, axes.cols);

    writer.begin_page(PageGrid {
        page,
        rows: ctx.rows(),
        cols: ctx.cols(),
    })?;
    for p in &placed {
        place_component(&mut ctx, p, writer)?;
    }
    writer.end_page()?;

    let layout = ctx.into_layout(&resolved.id);
    log::debug!(
        "page {page} of {}: {} regions, {} diagnostics",
        layout.canvas_id,
        layout.regions.len(),
        layout.diagnostics.len()
    );
    Ok(layout)
}

fn place_component<W: CellWriter + ?Sized>(
    ctx: &mut ExportContext<'_>,
    placed: &Placed<'_>,
    writer: &mut W,
) -> Result<()> {
    let caps = placed.component.capabilities();
    match caps.placement {
        Placement::Children => Ok(()),
        Placement::Floating => anchor_floating(ctx, placed, writer),
        Placement::Region if caps.tabular && placed.component.table.is_some() => {
            write_table(ctx, placed, writer)
        }
        Placement::Region if caps.multi_column && placed.component.column_count() > 1 => {
            write_panel_columns(ctx, placed, writer)
        }
        Placement::Region => {
            write_region(ctx, placed, placed.rect, CellContent::Component, writer)
        }
    }
}

/// Plan and write the region covering `rect`.
fn write_region<W: CellWriter + ?Sized>(
    ctx: &mut ExportContext<'_>,
    placed: &Placed<'_>,
    rect: Rect,
    content: CellContent<'_>,
    writer: &mut W,
) -> Result<()> {
    let component = placed.component;
    if rect.is_empty() {
        ctx.diagnostics_mut()
            .record(&component.id, AdjustmentKind::Skipped, 0, "zero-size region");
        return Ok(());
    }
    let (from, to) = ctx.mapper().map_rect(rect, MapMode::Exact);
    let row_span = to.row.saturating_sub(from.row).max(1);
    let col_span = to.col.saturating_sub(from.col).max(1);
    if let Some(region) = ctx.plan_span(component, from.row, from.col, row_span, col_span) {
        writer.write_cell(CellPlacement {
            component,
            region,
            content,
        })?;
    }
    Ok(())
}

fn write_panel_columns<W: CellWriter + ?Sized>(
    ctx: &mut ExportContext<'_>,
    placed: &Placed<'_>,
    writer: &mut W,
) -> Result<()> {
    let rect = placed.rect;
    let columns = placed.component.column_count();
    let mut edges = vec![rect.x];
    edges.extend(interior_column_cuts(rect.x, rect.width, columns));
    edges.push(rect.right());

    for (i, pair) in (0u32..).zip(edges.windows(2)) {
        let [left, right] = pair else {
            continue;
        };
        let column = Rect::new(*left, rect.y, right - left, rect.height);
        write_region(ctx, placed, column, CellContent::Column(i), writer)?;
    }
    Ok(())
}

fn write_table<W: CellWriter + ?Sized>(
    ctx: &mut ExportContext<'_>,
    placed: &Placed<'_>,
    writer: &mut W,
) -> Result<()> {
    let component = placed.component;
    let Some(table) = component.table.as_ref() else {
        return Ok(());
    };
    let plan = ctx.resolve_column_widths(component);
    let offsets = plan.offsets();
    let row_height = i64::from(table_row_height(component, ctx.config()));
    let declared_columns = table.column_count();
    let rect = placed.rect;

    let mut cells: Vec<&TableCell> = table.cells.iter().collect();
    cells.sort_by_key(|c| (c.row, c.col));

    for cell in cells {
        let col = usize::try_from(cell.col).unwrap_or(usize::MAX);
        if col >= plan.len() {
            let detail = if cell.col < declared_columns {
                format!("column {} dropped by width truncation", cell.col)
            } else {
                format!("cell ({}, {}) outside the table", cell.row, cell.col)
            };
            ctx.diagnostics_mut()
                .record(&component.id, AdjustmentKind::Skipped, 1, detail);
            continue;
        }

        let wanted = usize::try_from(cell.col_span()).unwrap_or(usize::MAX);
        let available = plan.len() - col;
        if wanted > available {
            ctx.diagnostics_mut().record(
                &component.id,
                AdjustmentKind::Clipped,
                i64::try_from(wanted - available).unwrap_or(i64::MAX),
                format!("column span at ({}, {}) past the last column", cell.row, cell.col),
            );
        }
        let span = wanted.min(available);
        let (Some(&x0), Some(&x1)) = (offsets.get(col), offsets.get(col + span)) else {
            continue;
        };
        if x1 <= x0 {
            ctx.diagnostics_mut().record(
                &component.id,
                AdjustmentKind::Skipped,
                1,
                format!("cell ({}, {}) has zero width", cell.row, cell.col),
            );
            continue;
        }

        let top = i64::from(rect.y) + i64::from(cell.row) * row_height;
        let bottom = top + i64::from(cell.row_span()) * row_height;
        let (Ok(top), Ok(bottom)) = (i32::try_from(top), i32::try_from(bottom)) else {
            continue;
        };
        let bounds = Rect::new(rect.x + x0, top, x1 - x0, bottom - top);
        let content = CellContent::Value {
            row: cell.row,
            col: cell.col,
            value: &cell.value,
        };
        write_region(ctx, placed, bounds, content, writer)?;
    }
    Ok(())
}

fn anchor_floating<W: CellWriter + ?Sized>(
    ctx: &ExportContext<'_>,
    placed: &Placed<'_>,
    writer: &mut W,
) -> Result<()> {
    let (from, to) = ctx.mapper().map_rect(placed.rect, MapMode::Nearest);
    writer.place_floating(FloatingAnchor {
        component: placed.component,
        rect: placed.rect,
        from,
        to,
    })
}
