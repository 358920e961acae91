//! xlgrid - pixel canvas to spreadsheet grid layout engine
//!
//! Converts a report/dashboard canvas of absolutely positioned widgets into a
//! row/column grid suitable for a spreadsheet export:
//! - Overlap resolution between tables and input fields
//! - Row/column axes built from component edges, capped to the target format
//! - O(log n) pixel to cell mapping (exact or nearest)
//! - Column width reconciliation for tables
//! - Merged-region planning that never writes a cell twice
//!
//! Cell content, styles and file serialization belong to the caller's
//! [`export::CellWriter`].
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { export_canvas_json } from 'xlgrid';
//! await init();
//! const report = JSON.parse(export_canvas_json(JSON.stringify(canvas), null));
//! ```

pub mod cell_ref;
pub mod config;
pub mod error;
pub mod export;
pub mod layout;
pub mod sanitize;
pub mod types;

use wasm_bindgen::prelude::*;

pub use config::{ExportConfig, SpreadsheetFormat};
pub use error::XlgridError;
pub use export::{export_page, export_report, export_workbook, CellWriter, PageLayout};
pub use types::*;

/// Export a canvas given as JSON and return the report as a JSON string
///
/// # Arguments
/// * `canvas_json` - The canvas model as JSON
/// * `config_json` - Optional export config as JSON (defaults to XLSX limits)
///
/// # Errors
/// Returns an error if either JSON document is invalid or a page exceeds
/// the format's capacity.
#[wasm_bindgen]
pub fn export_canvas_json(
    canvas_json: &str,
    config_json: Option<String>,
) -> Result<String, JsValue> {
    console_error_panic_hook::set_once();
    let config = match config_json.as_deref() {
        Some(json) => serde_json::from_str(json)
            .map_err(|e| JsValue::from_str(&format!("Config error: {e}")))?,
        None => ExportConfig::default(),
    };
    export::export_json(canvas_json, &config).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Export a canvas given as a JS object and return the report as a `JsValue`
///
/// This avoids the JSON round trip when the caller already holds objects.
///
/// # Errors
/// Returns an error if the inputs do not match the model or a page exceeds
/// the format's capacity.
#[wasm_bindgen]
pub fn export_canvas(canvas: JsValue, config: JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    let canvas: Canvas = serde_wasm_bindgen::from_value(canvas)
        .map_err(|e| JsValue::from_str(&format!("Canvas error: {e}")))?;
    let config: ExportConfig = if config.is_undefined() || config.is_null() {
        ExportConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Config error: {e}")))?
    };
    let report = export_report(&canvas, &config).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&report)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
