//! Column width reconciliation for tabular components.

use serde::Serialize;

/// Resolved pixel widths for a table's columns.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnWidthPlan {
    /// One non-negative width per kept column
    pub widths: Vec<i32>,
    /// Columns were clipped and dropped to fit the target width
    pub truncated: bool,
    /// Widths were scaled down proportionally (show-all-columns mode)
    pub scaled: bool,
    /// Column count before truncation
    pub declared_columns: usize,
}

impl ColumnWidthPlan {
    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    pub fn total(&self) -> i64 {
        self.widths.iter().map(|w| i64::from(*w)).sum()
    }

    /// Left offset of every column plus the trailing edge (`len + 1` entries).
    pub fn offsets(&self) -> Vec<i32> {
        let mut out = Vec::with_capacity(self.widths.len() + 1);
        let mut x: i32 = 0;
        out.push(x);
        for w in &self.widths {
            x = x.saturating_add(*w);
            out.push(x);
        }
        out
    }

    /// Number of columns removed by truncation.
    pub fn dropped_columns(&self) -> usize {
        self.declared_columns.saturating_sub(self.widths.len())
    }
}

/// Reconcile per-column widths against a component's target width.
///
/// - Each column takes its explicit width, or `default_width` when unhinted.
/// - Narrower than the target (and not `show_all_columns`): the remainder goes
///   to the last column, unless that column is explicitly hinted to 0.
/// - Wider than the target (and not `show_all_columns`): the first column that
///   crosses the target is clipped to the remaining budget and everything after
///   it is dropped. A column clipped to nothing is dropped as well.
/// - `show_all_columns`: wider plans are scaled down by `target / natural`,
///   never dropping a column.
pub fn resolve_column_widths(
    explicit: &[Option<i32>],
    default_width: i32,
    target_width: i32,
    show_all_columns: bool,
) -> ColumnWidthPlan {
    let target = i64::from(target_width.max(0));
    let default_width = default_width.max(0);
    let widths: Vec<i32> = explicit
        .iter()
        .map(|w| w.unwrap_or(default_width).max(0))
        .collect();
    let natural: i64 = widths.iter().map(|w| i64::from(*w)).sum();
    let declared_columns = widths.len();

    if widths.is_empty() || natural == target {
        return ColumnWidthPlan {
            widths,
            declared_columns,
            ..ColumnWidthPlan::default()
        };
    }

    if show_all_columns {
        if natural < target {
            return ColumnWidthPlan {
                widths,
                declared_columns,
                ..ColumnWidthPlan::default()
            };
        }
        let scaled = widths
            .iter()
            .map(|w| i32::try_from(i64::from(*w) * target / natural).unwrap_or(0))
            .collect();
        return ColumnWidthPlan {
            widths: scaled,
            scaled: true,
            declared_columns,
            ..ColumnWidthPlan::default()
        };
    }

    if natural < target {
        let mut widths = widths;
        let last_is_zero_override = matches!(explicit.last(), Some(Some(0)));
        if !last_is_zero_override {
            if let Some(last) = widths.last_mut() {
                let grown = i64::from(*last) + (target - natural);
                *last = i32::try_from(grown).unwrap_or(i32::MAX);
            }
        }
        return ColumnWidthPlan {
            widths,
            declared_columns,
            ..ColumnWidthPlan::default()
        };
    }

    let mut kept = Vec::with_capacity(widths.len());
    let mut used: i64 = 0;
    for w in widths {
        let remaining = target - used;
        if i64::from(w) > remaining {
            if remaining > 0 {
                kept.push(i32::try_from(remaining).unwrap_or(0));
            }
            break;
        }
        used += i64::from(w);
        kept.push(w);
    }
    ColumnWidthPlan {
        widths: kept,
        truncated: true,
        scaled: false,
        declared_columns,
    }
}
