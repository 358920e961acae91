//! Boundary to the content/style writer.
//!
//! The layout engine never writes cells itself. It hands every planned
//! region and floating anchor to a [`CellWriter`].

use serde::Serialize;

use crate::error::Result;
use crate::layout::GridAxis;
use crate::types::{CellRegion, Component, ComponentKind, MappedCell, Rect};

/// Final axes of the page about to be written.
#[derive(Debug, Clone, Copy)]
pub struct PageGrid<'a> {
    pub page: usize,
    pub rows: &'a GridAxis,
    pub cols: &'a GridAxis,
}

/// What goes into a planned region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellContent<'a> {
    /// One declared cell of a tabular component (table-local coordinates)
    Value { row: u32, col: u32, value: &'a str },
    /// One visual column of a multi-column panel
    Column(u32),
    /// The whole component
    Component,
}

/// A planned region ready for content.
#[derive(Debug, Clone, Copy)]
pub struct CellPlacement<'a> {
    pub component: &'a Component,
    pub region: CellRegion,
    pub content: CellContent<'a>,
}

/// A free-floating component anchored over the grid.
#[derive(Debug, Clone, Copy)]
pub struct FloatingAnchor<'a> {
    pub component: &'a Component,
    /// Absolute pixel bounds
    pub rect: Rect,
    /// Nearest grid line to the top-left corner, with pixel remainders
    pub from: MappedCell,
    /// Nearest grid line to the bottom-right corner, with pixel remainders
    pub to: MappedCell,
}

/// Receives layout results for one or more pages.
pub trait CellWriter {
    /// Called once per page, after the axes are final.
    fn begin_page(&mut self, _grid: PageGrid<'_>) -> Result<()> {
        Ok(())
    }

    /// Called once per planned region, in document order.
    fn write_cell(&mut self, cell: CellPlacement<'_>) -> Result<()>;

    /// Called once per free-floating component, in document order.
    fn place_floating(&mut self, _anchor: FloatingAnchor<'_>) -> Result<()> {
        Ok(())
    }

    fn end_page(&mut self) -> Result<()> {
        Ok(())
    }
}

/// A written cell, owned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedCell {
    pub component_id: String,
    pub kind: ComponentKind,
    #[serde(rename = "ref")]
    pub range: String,
    #[serde(flatten)]
    pub region: CellRegion,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panel_column: Option<u32>,
}

/// A floating anchor, owned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedAnchor {
    pub component_id: String,
    pub kind: ComponentKind,
    pub from: MappedCell,
    pub to: MappedCell,
}

/// Everything written for one page.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedPage {
    pub page: usize,
    pub column_widths: Vec<i32>,
    pub row_heights: Vec<i32>,
    pub cells: Vec<RecordedCell>,
    pub anchors: Vec<RecordedAnchor>,
}

impl RecordedPage {
    /// The cell written for a component's table-local value, if any.
    pub fn cell_with_value(&self, value: &str) -> Option<&RecordedCell> {
        self.cells
            .iter()
            .find(|c| c.value.as_deref() == Some(value))
    }
}

/// A [`CellWriter`] that keeps every placement in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingWriter {
    pages: Vec<RecordedPage>,
    open: Option<RecordedPage>,
}

impl RecordingWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pages finished so far.
    pub fn pages(&self) -> &[RecordedPage] {
        &self.pages
    }

    /// All recorded pages, including one left open.
    pub fn into_pages(mut self) -> Vec<RecordedPage> {
        if let Some(page) = self.open.take() {
            self.pages.push(page);
        }
        self.pages
    }

    fn current(&mut self) -> &mut RecordedPage {
        self.open.get_or_insert_with(RecordedPage::default)
    }
}

impl CellWriter for RecordingWriter {
    fn begin_page(&mut self, grid: PageGrid<'_>) -> Result<()> {
        if let Some(page) = self.open.take() {
            self.pages.push(page);
        }
        self.open = Some(RecordedPage {
            page: grid.page,
            column_widths: grid.cols.sizes(),
            row_heights: grid.rows.sizes(),
            ..RecordedPage::default()
        });
        Ok(())
    }

    fn write_cell(&mut self, cell: CellPlacement<'_>) -> Result<()> {
        let (value, panel_column) = match cell.content {
            CellContent::Value { value, .. } => (Some(value.to_string()), None),
            CellContent::Column(i) => (None, Some(i)),
            CellContent::Component => (cell.component.content.clone(), None),
        };
        self.current().cells.push(RecordedCell {
            component_id: cell.component.id.clone(),
            kind: cell.component.kind,
            range: cell.region.a1_ref(),
            region: cell.region,
            value,
            panel_column,
        });
        Ok(())
    }

    fn place_floating(&mut self, anchor: FloatingAnchor<'_>) -> Result<()> {
        self.current().anchors.push(RecordedAnchor {
            component_id: anchor.component.id.clone(),
            kind: anchor.component.kind,
            from: anchor.from,
            to: anchor.to,
        });
        Ok(())
    }

    fn end_page(&mut self) -> Result<()> {
        if let Some(page) = self.open.take() {
            self.pages.push(page);
        }
        Ok(())
    }
}
