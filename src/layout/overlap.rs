//! Overlap resolution between collision-sensitive components.
//!
//! Runs before boundary collection. Each sibling list is scanned once in
//! document order; an intersecting pair is split along its shallower overlap
//! so the two rectangles end up edge-touching. Splitting only ever shrinks
//! rectangles, so a pair separated early in the scan stays separated and a
//! single pass is enough. Children of stacked containers are laid out
//! top-to-bottom and never take part.

use super::placement::{rendered_height, table_row_height};
use crate::config::ExportConfig;
use crate::types::{AdjustmentKind, Canvas, Component, Diagnostics, Rect};

/// Which axis an overlap was split along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bisection {
    /// Split on a horizontal line: the upper rectangle's bottom and the lower
    /// rectangle's top meet at `split`.
    Vertical { split: i32, overlap: i32 },
    /// Split on a vertical line: the left rectangle's right and the right
    /// rectangle's left meet at `split`.
    Horizontal { split: i32, overlap: i32 },
}

impl Bisection {
    pub fn overlap(&self) -> i32 {
        match self {
            Self::Vertical { overlap, .. } | Self::Horizontal { overlap, .. } => *overlap,
        }
    }
}

/// Split two overlapping rectangles.
///
/// Returns the adjusted pair in the same order as the inputs, or `None` when
/// they do not overlap. With `v <= h` the upper rectangle loses `ceil(v / 2)`
/// from its bottom and the lower one gives up the rest from its top; the
/// horizontal case is symmetric.
pub fn bisect(a: Rect, b: Rect) -> Option<(Rect, Rect, Bisection)> {
    let overlap = a.overlap(&b)?;

    if overlap.vertical <= overlap.horizontal {
        let v = overlap.vertical;
        let a_is_upper = (a.y, a.bottom()) <= (b.y, b.bottom());
        let (upper, lower) = if a_is_upper { (a, b) } else { (b, a) };
        let overlap_end = upper.bottom().min(lower.bottom());
        let split = overlap_end - half_up(v);
        let upper = upper.with_bottom(split);
        let lower = lower.with_top(split);
        let bisection = Bisection::Vertical { split, overlap: v };
        Some(if a_is_upper {
            (upper, lower, bisection)
        } else {
            (lower, upper, bisection)
        })
    } else {
        let h = overlap.horizontal;
        let a_is_left = (a.x, a.right()) <= (b.x, b.right());
        let (left, right) = if a_is_left { (a, b) } else { (b, a) };
        let overlap_end = left.right().min(right.right());
        let split = overlap_end - half_up(h);
        let left = left.with_right(split);
        let right = right.with_left(split);
        let bisection = Bisection::Horizontal { split, overlap: h };
        Some(if a_is_left {
            (left, right, bisection)
        } else {
            (right, left, bisection)
        })
    }
}

fn half_up(n: i32) -> i32 {
    n / 2 + n % 2
}

/// Return a copy of `canvas` with overlaps between collision-sensitive
/// siblings resolved. Every sibling list (including those of embedded
/// sub-canvases) is handled independently.
///
/// Rectangles are compared at their rendered size, so a table taller than
/// declared because of its data collides with what its rows actually cover.
/// A bisected table keeps only the data rows that fit its new height; the
/// rows cut off are recorded as `Truncated`.
pub fn resolve_overlaps(
    canvas: &Canvas,
    config: &ExportConfig,
    diagnostics: &mut Diagnostics,
) -> Canvas {
    Canvas {
        components: resolve_siblings(&canvas.components, config, diagnostics),
        ..canvas.clone()
    }
}

fn resolve_siblings(
    components: &[Component],
    config: &ExportConfig,
    diagnostics: &mut Diagnostics,
) -> Vec<Component> {
    let rendered: Vec<Rect> = components
        .iter()
        .map(|c| c.rect().with_height(rendered_height(c, config)))
        .collect();
    let mut rects = rendered.clone();

    for i in 0..components.len() {
        let Some(first) = components.get(i) else {
            continue;
        };
        if !first.capabilities().collision_sensitive {
            continue;
        }
        for j in (i + 1)..components.len() {
            let Some(second) = components.get(j) else {
                continue;
            };
            if !second.capabilities().collision_sensitive {
                continue;
            }
            let (Some(&a), Some(&b)) = (rects.get(i), rects.get(j)) else {
                continue;
            };
            let Some((ra, rb, bisection)) = bisect(a, b) else {
                continue;
            };
            if let Some(slot) = rects.get_mut(i) {
                *slot = ra;
            }
            if let Some(slot) = rects.get_mut(j) {
                *slot = rb;
            }
            let overlap = i64::from(bisection.overlap());
            diagnostics.record(&first.id, AdjustmentKind::Bisected, overlap, format!("against {}", second.id));
            diagnostics.record(&second.id, AdjustmentKind::Bisected, overlap, format!("against {}", first.id));
        }
    }

    components
        .iter()
        .zip(rendered.iter().zip(rects))
        .map(|(component, (original, rect))| {
            let mut resolved = if *original == rect {
                component.clone()
            } else {
                let mut moved = component.with_rect(rect);
                fit_table_rows(&mut moved, config, diagnostics);
                moved
            };
            if !component.children.is_empty() {
                resolved.children = resolve_children(component, config, diagnostics);
            }
            resolved
        })
        .collect()
}

/// Resolve the children of `component`. Stacked children never share
/// vertical space, so only their own descendants are resolved.
fn resolve_children(
    component: &Component,
    config: &ExportConfig,
    diagnostics: &mut Diagnostics,
) -> Vec<Component> {
    if !component.capabilities().stacked_children {
        return resolve_siblings(&component.children, config, diagnostics);
    }
    component
        .children
        .iter()
        .map(|child| {
            let mut kept = child.clone();
            if !child.children.is_empty() {
                kept.children = resolve_children(child, config, diagnostics);
            }
            kept
        })
        .collect()
}

/// Drop the data rows of a bisected table that no longer fit its height.
fn fit_table_rows(component: &mut Component, config: &ExportConfig, diagnostics: &mut Diagnostics) {
    if !component.capabilities().tabular {
        return;
    }
    let row_height = table_row_height(component, config).max(1);
    let fits = u32::try_from(component.height.max(0) / row_height).unwrap_or(0);
    let Some(table) = component.table.as_mut() else {
        return;
    };
    let rows = table.row_count();
    if rows <= fits {
        return;
    }
    table.cells.retain(|c| c.row < fits);
    for cell in &mut table.cells {
        let room = fits - cell.row;
        if cell.row_span() > room {
            cell.row_span = i32::try_from(room).unwrap_or(i32::MAX);
        }
    }
    diagnostics.record(
        &component.id,
        AdjustmentKind::Truncated,
        i64::from(rows - fits),
        format!("{} of {rows} rows cut off by overlap", rows - fits),
    );
}
