//! Structured error types for xlgrid.
//!
//! Only conditions that invalidate a whole page are errors. Recoverable
//! layout adjustments are reported as [`crate::types::Diagnostic`]s instead.

use crate::types::Axis;

/// All errors that can abort an export.
#[derive(Debug, thiserror::Error)]
pub enum XlgridError {
    /// The grid needs more rows or columns than the target format allows.
    #[error("Capacity exceeded: {axis} axis needs {required} cells, format allows {limit}")]
    CapacityExceeded {
        axis: Axis,
        required: usize,
        limit: u32,
    },

    /// A paginated export failed on one of its pages.
    #[error("Page {page}: {source}")]
    Page {
        page: usize,
        #[source]
        source: Box<XlgridError>,
    },

    /// The external cell writer rejected a placement.
    #[error("Cell writer: {0}")]
    Writer(String),

    /// Canvas or config JSON could not be (de)serialized.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl XlgridError {
    /// True when the failure came from the format's row/column capacity,
    /// which callers may retry with a smaller row window.
    pub fn is_capacity_exceeded(&self) -> bool {
        match self {
            Self::CapacityExceeded { .. } => true,
            Self::Page { source, .. } => source.is_capacity_exceeded(),
            _ => false,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, XlgridError>;

#[cfg(target_arch = "wasm32")]
impl From<XlgridError> for wasm_bindgen::JsValue {
    fn from(e: XlgridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
