use std::fmt;

use serde::{Deserialize, Serialize};

/// What kind of adjustment the layout engine made to honor the grid.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum AdjustmentKind {
    /// Columns or grid lines dropped to fit a width or capacity limit
    Truncated,
    /// A span or column shortened to fit
    Clipped,
    /// Two overlapping components split along their overlap
    Bisected,
    /// Invalid input value clamped into range
    Clamped,
    /// A cell or component left unwritten
    Skipped,
}

impl fmt::Display for AdjustmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Truncated => "truncated",
            Self::Clipped => "clipped",
            Self::Bisected => "bisected",
            Self::Clamped => "clamped",
            Self::Skipped => "skipped",
        };
        f.write_str(s)
    }
}

/// One recorded layout adjustment.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub component_id: String,
    pub kind: AdjustmentKind,
    /// Pixels, cells or grid lines affected, depending on the adjustment
    pub magnitude: i64,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub detail: String,
}

/// Diagnostics collected during one export pass.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an adjustment and log it.
    pub fn record(
        &mut self,
        component_id: &str,
        kind: AdjustmentKind,
        magnitude: i64,
        detail: impl Into<String>,
    ) {
        let detail = detail.into();
        match kind {
            AdjustmentKind::Bisected => {
                log::debug!("{component_id}: {kind} by {magnitude}px {detail}");
            }
            _ => log::warn!("{component_id}: {kind} ({magnitude}) {detail}"),
        }
        self.entries.push(Diagnostic {
            component_id: component_id.to_string(),
            kind,
            magnitude,
            detail,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Entries of one kind, in recording order.
    pub fn of_kind(&self, kind: AdjustmentKind) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(move |d| d.kind == kind)
    }

    /// Entries about one component, in recording order.
    pub fn for_component<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Diagnostic> {
        self.entries.iter().filter(move |d| d.component_id == id)
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}
