//! Export-scoped state shared by every stage of one page.

use std::collections::HashMap;

use serde::Serialize;

use crate::config::ExportConfig;
use crate::layout::{
    resolve_column_widths, ColumnWidthPlan, GridAxis, PixelGridMapper, SpanPlanner, WrittenMask,
};
use crate::types::{
    AdjustmentKind, CellCoordinate, CellRegion, Component, Diagnostic, Diagnostics, MapMode,
    MappedCell,
};

/// A region planned for a component during one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedRegion {
    pub component_id: String,
    /// A1-style range of the region
    #[serde(rename = "ref")]
    pub range: String,
    #[serde(flatten)]
    pub region: CellRegion,
}

/// Final layout of one exported page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLayout {
    pub page: usize,
    pub canvas_id: String,
    /// Row cut points in pixels
    pub rows: GridAxis,
    /// Column cut points in pixels
    pub cols: GridAxis,
    pub regions: Vec<PlannedRegion>,
    pub diagnostics: Vec<Diagnostic>,
}

impl PageLayout {
    /// Pixel width of every grid column.
    pub fn column_widths(&self) -> Vec<i32> {
        self.cols.sizes()
    }

    /// Pixel height of every grid row.
    pub fn row_heights(&self) -> Vec<i32> {
        self.rows.sizes()
    }
}

/// State owned by one export pass: axes, the written mask, the per-table
/// width plans and the collected diagnostics. Created at pipeline start and
/// dropped when the page completes.
#[derive(Debug)]
pub struct ExportContext<'c> {
    config: &'c ExportConfig,
    page: usize,
    rows: GridAxis,
    cols: GridAxis,
    planner: SpanPlanner,
    mask: WrittenMask,
    width_plans: HashMap<(String, i32), ColumnWidthPlan>,
    regions: Vec<PlannedRegion>,
    diagnostics: Diagnostics,
}

impl<'c> ExportContext<'c> {
    pub fn new(config: &'c ExportConfig, page: usize, diagnostics: Diagnostics) -> Self {
        Self {
            config,
            page,
            rows: GridAxis::default(),
            cols: GridAxis::default(),
            planner: SpanPlanner::new(config.max_rows, config.max_cols),
            mask: WrittenMask::new(),
            width_plans: HashMap::new(),
            regions: Vec::new(),
            diagnostics,
        }
    }

    pub fn config(&self) -> &ExportConfig {
        self.config
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_axes(&mut self, rows: GridAxis, cols: GridAxis) {
        self.rows = rows;
        self.cols = cols;
    }

    pub fn rows(&self) -> &GridAxis {
        &self.rows
    }

    pub fn cols(&self) -> &GridAxis {
        &self.cols
    }

    pub fn mapper(&self) -> PixelGridMapper<'_> {
        PixelGridMapper::new(&self.rows, &self.cols)
    }

    pub fn map_pixel_to_cell(&self, x: i32, y: i32, mode: MapMode) -> MappedCell {
        self.mapper().map_pixel_to_cell(x, y, mode)
    }

    /// Column width plan of a tabular component against its own width.
    ///
    /// Plans are cached for the lifetime of the pass, so axis building and
    /// cell placement see the same widths and diagnostics are recorded once.
    pub fn resolve_column_widths(&mut self, component: &Component) -> ColumnWidthPlan {
        let key = (component.id.clone(), component.width);
        if let Some(plan) = self.width_plans.get(&key) {
            return plan.clone();
        }

        let (hints, show_all) = component
            .table
            .as_ref()
            .map(|t| (t.width_hints(), t.show_all_columns))
            .unwrap_or_default();
        let plan = resolve_column_widths(
            &hints,
            self.config.default_col_width,
            component.width,
            show_all,
        );

        if plan.truncated {
            let natural: i64 = hints
                .iter()
                .map(|w| i64::from(w.unwrap_or(self.config.default_col_width).max(0)))
                .sum();
            self.diagnostics.record(
                &component.id,
                AdjustmentKind::Truncated,
                natural - i64::from(component.width),
                format!(
                    "{} of {} columns dropped to fit {}px",
                    plan.dropped_columns(),
                    plan.declared_columns,
                    component.width
                ),
            );
        } else if plan.scaled {
            log::debug!(
                "{}: {} columns scaled to fit {}px",
                component.id,
                plan.len(),
                component.width
            );
        }

        self.width_plans.insert(key, plan.clone());
        plan
    }

    /// Plan a merged region for `component` at grid cell `(row, col)`.
    pub fn plan_span(
        &mut self,
        component: &Component,
        row: u32,
        col: u32,
        row_span: u32,
        col_span: u32,
    ) -> Option<CellRegion> {
        let region = self.planner.plan(
            &component.id,
            CellCoordinate::new(row, col),
            row_span,
            col_span,
            &mut self.mask,
            &mut self.diagnostics,
        )?;
        self.regions.push(PlannedRegion {
            component_id: component.id.clone(),
            range: region.a1_ref(),
            region,
        });
        Some(region)
    }

    pub fn mask(&self) -> &WrittenMask {
        &self.mask
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    /// Finish the pass.
    pub fn into_layout(self, canvas_id: &str) -> PageLayout {
        PageLayout {
            page: self.page,
            canvas_id: canvas_id.to_string(),
            rows: self.rows,
            cols: self.cols,
            regions: self.regions,
            diagnostics: self.diagnostics.into_vec(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::types::{ComponentKind, Rect, TableData};

    fn table(widths: Vec<Option<i32>>, width: i32) -> Component {
        let mut c = Component::new("t", ComponentKind::Table, Rect::new(0, 0, width, 100));
        c.table = Some(TableData {
            column_widths: widths,
            ..TableData::default()
        });
        c
    }

    #[test]
    fn test_width_plan_cached_and_diagnosed_once() {
        let config = ExportConfig::default();
        let mut ctx = ExportContext::new(&config, 0, Diagnostics::new());
        let t = table(vec![Some(300), Some(300)], 400);

        let first = ctx.resolve_column_widths(&t);
        let second = ctx.resolve_column_widths(&t);
        assert_eq!(first, second);
        assert_eq!(first.widths, vec![300, 100]);

        let truncated: Vec<_> = ctx.diagnostics().of_kind(AdjustmentKind::Truncated).collect();
        assert_eq!(truncated.len(), 1);
        assert_eq!(truncated[0].magnitude, 200);
    }

    #[test]
    fn test_component_without_table_has_empty_plan() {
        let config = ExportConfig::default();
        let mut ctx = ExportContext::new(&config, 0, Diagnostics::new());
        let c = Component::new("x", ComponentKind::Table, Rect::new(0, 0, 100, 100));
        assert!(ctx.resolve_column_widths(&c).is_empty());
    }

    #[test]
    fn test_plan_span_records_region() {
        let config = ExportConfig::default();
        let mut ctx = ExportContext::new(&config, 2, Diagnostics::new());
        let c = Component::new("x", ComponentKind::SelectionTree, Rect::new(0, 0, 100, 100));
        ctx.plan_span(&c, 0, 0, 2, 2).unwrap();
        assert!(ctx.plan_span(&c, 1, 1, 1, 1).is_none());

        let layout = ctx.into_layout("page");
        assert_eq!(layout.page, 2);
        assert_eq!(layout.regions.len(), 1);
        assert_eq!(layout.regions[0].range, "A1:B2");
        assert_eq!(layout.diagnostics.len(), 1);
    }

    #[test]
    fn test_mapping_uses_installed_axes() {
        let config = ExportConfig::default();
        let mut ctx = ExportContext::new(&config, 0, Diagnostics::new());
        ctx.set_axes(
            GridAxis::from_unsorted([0, 20, 40]),
            GridAxis::from_unsorted([0, 100, 200]),
        );
        let cell = ctx.map_pixel_to_cell(130, 25, MapMode::Exact);
        assert_eq!((cell.row, cell.col, cell.dx, cell.dy), (1, 1, 30, 5));

        let c = Component::new("x", ComponentKind::SelectionTree, Rect::new(0, 0, 100, 100));
        ctx.plan_span(&c, cell.row, cell.col, 1, 1).unwrap();
        assert!(ctx.mask().contains(1, 1));
        assert_eq!(ctx.page(), 0);
    }
}
