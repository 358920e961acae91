use serde::{Deserialize, Serialize};

use super::Rect;

/// Root layout container of one export page.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Canvas {
    /// Identifier used when diagnostics refer to the page itself
    #[serde(default)]
    pub id: String,
    /// Declared canvas width in pixels
    pub width: i32,
    /// Declared canvas height in pixels
    pub height: i32,
    /// True when this canvas is nested inside another page (no column extension)
    #[serde(default)]
    pub embedded: bool,
    /// Top-level components in document order
    #[serde(default)]
    pub components: Vec<Component>,
}

/// A single report/dashboard widget.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub id: String,
    pub kind: ComponentKind,
    /// Left edge relative to the parent origin
    #[serde(default)]
    pub x: i32,
    /// Top edge relative to the parent origin
    #[serde(default)]
    pub y: i32,
    #[serde(default)]
    pub width: i32,
    #[serde(default)]
    pub height: i32,
    /// Nested components, positioned relative to this component's origin
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Component>,
    /// Declared column count (multi-column selection panels)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_count: Option<i32>,
    /// Column hints and cell spans (tabular kinds only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<TableData>,
    /// Opaque content handed through to the cell writer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Component {
    /// Create a bare component with no children or table data.
    pub fn new(id: impl Into<String>, kind: ComponentKind, rect: Rect) -> Self {
        Self {
            id: id.into(),
            kind,
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            children: Vec::new(),
            column_count: None,
            table: None,
            content: None,
        }
    }

    /// Declared bounds relative to the parent origin
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Copy of this component with its bounds replaced. Children are kept as-is.
    #[must_use]
    pub fn with_rect(&self, rect: Rect) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            ..self.clone()
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        self.kind.capabilities()
    }

    /// Number of visual columns for multi-column panels, 1 for everything else.
    pub fn column_count(&self) -> u32 {
        if !self.kind.capabilities().multi_column {
            return 1;
        }
        self.column_count
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(1)
            .max(1)
    }
}

/// Closed set of widget kinds understood by the layout engine.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ComponentKind {
    /// Flat data table
    Table,
    /// Pivot/crosstab table
    Crosstab,
    /// Filter panel whose children render top-to-bottom
    FilterPanel,
    /// Selection list, optionally laid out in several columns
    SelectionList,
    SelectionTree,
    DropdownCalendar,
    /// Inline (always expanded) calendar
    Calendar,
    /// Free-text input field
    TextInput,
    Text,
    Image,
    Shape,
    /// Nested sub-canvas; children are positioned relative to it
    EmbeddedCanvas,
}

/// How a component lands on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Occupies a planned cell region
    Region,
    /// Anchored over the grid without consuming cells
    Floating,
    /// Contributes nothing itself; only its children are placed
    Children,
}

/// Capability table for a [`ComponentKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Edges become mandatory grid cuts
    pub grid_bound: bool,
    /// Has its own column/row structure with declared spans
    pub tabular: bool,
    /// Must not visually collide with other collision-sensitive components
    pub collision_sensitive: bool,
    /// Honors a declared column count
    pub multi_column: bool,
    /// Children are stacked top-to-bottom instead of positioned
    pub stacked_children: bool,
    pub placement: Placement,
}

impl ComponentKind {
    pub const fn capabilities(self) -> Capabilities {
        const NONE: Capabilities = Capabilities {
            grid_bound: false,
            tabular: false,
            collision_sensitive: false,
            multi_column: false,
            stacked_children: false,
            placement: Placement::Floating,
        };
        match self {
            Self::Table | Self::Crosstab => Capabilities {
                grid_bound: true,
                tabular: true,
                collision_sensitive: true,
                placement: Placement::Region,
                ..NONE
            },
            Self::FilterPanel => Capabilities {
                grid_bound: true,
                stacked_children: true,
                placement: Placement::Children,
                ..NONE
            },
            Self::SelectionList => Capabilities {
                grid_bound: true,
                multi_column: true,
                placement: Placement::Region,
                ..NONE
            },
            Self::SelectionTree | Self::DropdownCalendar => Capabilities {
                grid_bound: true,
                placement: Placement::Region,
                ..NONE
            },
            Self::TextInput => Capabilities {
                collision_sensitive: true,
                ..NONE
            },
            Self::Calendar | Self::Text | Self::Image | Self::Shape => NONE,
            Self::EmbeddedCanvas => Capabilities {
                placement: Placement::Children,
                ..NONE
            },
        }
    }
}

/// Column hints and cell declarations of a tabular component.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct TableData {
    /// Per-column width hints; `None` falls back to the default unit width
    #[serde(default)]
    pub column_widths: Vec<Option<i32>>,
    /// Scale columns to fit instead of dropping the ones that overflow
    #[serde(default)]
    pub show_all_columns: bool,
    /// Data row height in pixels (defaults to the unit cell height)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_height: Option<i32>,
    #[serde(default)]
    pub cells: Vec<TableCell>,
}

impl TableData {
    /// Number of data rows, counting rows reached only through spans.
    pub fn row_count(&self) -> u32 {
        self.cells
            .iter()
            .map(|c| c.row.saturating_add(c.row_span()))
            .max()
            .unwrap_or(0)
    }

    /// Number of table columns.
    ///
    /// Declared width hints win; without hints the extent of the cells decides.
    pub fn column_count(&self) -> u32 {
        if !self.column_widths.is_empty() {
            return u32::try_from(self.column_widths.len()).unwrap_or(u32::MAX);
        }
        self.cells
            .iter()
            .map(|c| c.col.saturating_add(c.col_span()))
            .max()
            .unwrap_or(0)
    }

    /// Width hints padded with `None` up to [`Self::column_count`].
    pub fn width_hints(&self) -> Vec<Option<i32>> {
        let mut hints = self.column_widths.clone();
        let count = usize::try_from(self.column_count()).unwrap_or(usize::MAX);
        if hints.len() < count {
            hints.resize(count, None);
        }
        hints
    }
}

/// One declared cell of a tabular component, in table-local coordinates.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    pub row: u32,
    pub col: u32,
    #[serde(default = "one")]
    pub row_span: i32,
    #[serde(default = "one")]
    pub col_span: i32,
    #[serde(default)]
    pub value: String,
}

fn one() -> i32 {
    1
}

impl TableCell {
    pub fn new(row: u32, col: u32, value: impl Into<String>) -> Self {
        Self {
            row,
            col,
            row_span: 1,
            col_span: 1,
            value: value.into(),
        }
    }

    #[must_use]
    pub fn spanning(mut self, row_span: i32, col_span: i32) -> Self {
        self.row_span = row_span;
        self.col_span = col_span;
        self
    }

    /// Row span, never below 1
    pub fn row_span(&self) -> u32 {
        u32::try_from(self.row_span).unwrap_or(0).max(1)
    }

    /// Column span, never below 1
    pub fn col_span(&self) -> u32 {
        u32::try_from(self.col_span).unwrap_or(0).max(1)
    }
}
