//! Absolute placement of the component tree.
//!
//! Child coordinates are relative to their parent, so the walk carries the
//! accumulated offset down the call stack. Children of stacked containers
//! ignore their declared `y` and render top-to-bottom instead.

use crate::config::ExportConfig;
use crate::types::{Component, Rect};

/// A component together with its absolute pixel bounds.
#[derive(Debug, Clone, Copy)]
pub struct Placed<'a> {
    pub component: &'a Component,
    /// Absolute bounds using the rendered height
    pub rect: Rect,
    /// Absolute bottom of the declared (pre-render) height
    pub declared_bottom: i32,
}

/// Height a component occupies once its data is laid out.
///
/// Tabular kinds grow to fit all their data rows; everything else keeps its
/// declared height.
pub fn rendered_height(component: &Component, config: &ExportConfig) -> i32 {
    let declared = component.height.max(0);
    if !component.capabilities().tabular {
        return declared;
    }
    match component.table.as_ref() {
        Some(table) => {
            let rows = i64::from(table.row_count());
            let row_height = i64::from(table_row_height(component, config));
            let data = i32::try_from(rows.saturating_mul(row_height)).unwrap_or(i32::MAX);
            declared.max(data)
        }
        None => declared,
    }
}

/// Data row height of a tabular component.
pub fn table_row_height(component: &Component, config: &ExportConfig) -> i32 {
    component
        .table
        .as_ref()
        .and_then(|t| t.row_height)
        .filter(|h| *h > 0)
        .unwrap_or(config.default_row_height)
}

/// Running vertical cursor for a stacked container.
#[derive(Debug, Clone, Copy)]
pub struct StackCursor {
    left: i32,
    next_top: i32,
}

impl StackCursor {
    /// Start stacking at the top-left corner of `container` (absolute).
    pub fn new(container: Rect) -> Self {
        Self {
            left: container.x,
            next_top: container.y,
        }
    }

    /// Place the next child and advance by its rendered height.
    pub fn place(&mut self, child: &Component, config: &ExportConfig) -> Rect {
        let height = rendered_height(child, config);
        let rect = Rect::new(
            self.left.saturating_add(child.x),
            self.next_top,
            child.width,
            height,
        );
        self.next_top = self.next_top.saturating_add(height);
        rect
    }

    /// Top of the next child to be placed.
    pub fn offset(&self) -> i32 {
        self.next_top
    }
}

/// Every component in document order with absolute bounds.
pub fn placements<'a>(components: &'a [Component], config: &ExportConfig) -> Vec<Placed<'a>> {
    let mut out = Vec::new();
    for component in components {
        let rect = component.rect();
        place_at(component, rect, config, &mut out);
    }
    out
}

fn place_at<'a>(
    component: &'a Component,
    declared: Rect,
    config: &ExportConfig,
    out: &mut Vec<Placed<'a>>,
) {
    let rect = declared.with_height(rendered_height(component, config));
    out.push(Placed {
        component,
        rect,
        declared_bottom: declared.bottom(),
    });

    if component.children.is_empty() {
        return;
    }

    if component.capabilities().stacked_children {
        let mut cursor = StackCursor::new(rect);
        for child in &component.children {
            let placed = cursor.place(child, config);
            // The stacked rect already carries the rendered height.
            let child_declared = placed.with_height(child.height.max(0));
            place_at(child, child_declared, config, out);
        }
    } else {
        for child in &component.children {
            let child_declared = child.rect().translate(rect.x, rect.y);
            place_at(child, child_declared, config, out);
        }
    }
}
