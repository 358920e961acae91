//! Sizing constants and format limits for one export request.

use serde::{Deserialize, Serialize};

/// Default column width in pixels (Excel default ~64px at 100% zoom)
pub const DEFAULT_COL_WIDTH: i32 = 64;

/// Default row height in pixels (Excel default ~20px at 100% zoom)
pub const DEFAULT_ROW_HEIGHT: i32 = 20;

/// Target spreadsheet format, which fixes the grid capacity.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SpreadsheetFormat {
    /// Office Open XML workbook (1,048,576 x 16,384)
    #[default]
    Xlsx,
    /// Legacy BIFF8 workbook (65,536 x 256)
    Xls,
}

impl SpreadsheetFormat {
    pub const fn max_rows(self) -> u32 {
        match self {
            Self::Xlsx => 1_048_576,
            Self::Xls => 65_536,
        }
    }

    pub const fn max_cols(self) -> u32 {
        match self {
            Self::Xlsx => 16_384,
            Self::Xls => 256,
        }
    }
}

/// Export configuration. Every field has a default, so a partial JSON object
/// (or `{}`) is a valid config.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportConfig {
    /// Unit cell width used for unhinted columns and axis extension
    pub default_col_width: i32,
    /// Unit cell height used for table data rows
    pub default_row_height: i32,
    /// Hard cap on grid rows
    pub max_rows: u32,
    /// Hard cap on grid columns
    pub max_cols: u32,
    /// Split tabular data into pages of this many rows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows_per_page: Option<u32>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self::for_format(SpreadsheetFormat::Xlsx)
    }
}

impl ExportConfig {
    /// Defaults with the capacity of `format`.
    pub fn for_format(format: SpreadsheetFormat) -> Self {
        Self {
            default_col_width: DEFAULT_COL_WIDTH,
            default_row_height: DEFAULT_ROW_HEIGHT,
            max_rows: format.max_rows(),
            max_cols: format.max_cols(),
            rows_per_page: None,
        }
    }

    #[must_use]
    pub fn with_rows_per_page(mut self, rows: u32) -> Self {
        self.rows_per_page = Some(rows);
        self
    }

    #[must_use]
    pub fn with_capacity(mut self, max_rows: u32, max_cols: u32) -> Self {
        self.max_rows = max_rows;
        self.max_cols = max_cols;
        self
    }

    #[must_use]
    pub fn with_unit_cell(mut self, width: i32, height: i32) -> Self {
        self.default_col_width = width;
        self.default_row_height = height;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_xlsx() {
        let config = ExportConfig::default();
        assert_eq!(config.max_rows, 1_048_576);
        assert_eq!(config.max_cols, 16_384);
        assert_eq!(config.default_col_width, DEFAULT_COL_WIDTH);
        assert_eq!(config.rows_per_page, None);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ExportConfig =
            serde_json::from_str(r#"{"maxCols": 256, "rowsPerPage": 500}"#).unwrap();
        assert_eq!(config.max_cols, 256);
        assert_eq!(config.max_rows, 1_048_576);
        assert_eq!(config.rows_per_page, Some(500));
        assert_eq!(config.default_row_height, DEFAULT_ROW_HEIGHT);
    }

    #[test]
    fn test_xls_limits() {
        let config = ExportConfig::for_format(SpreadsheetFormat::Xls);
        assert_eq!((config.max_rows, config.max_cols), (65_536, 256));
    }
}
