//! Pixel-to-grid layout engine.
//!
//! This module handles:
//! - Resolving overlaps between collision-sensitive components
//! - Placing the component tree in absolute pixel coordinates
//! - Collecting cut points and building the final row/column axes
//! - Binary search for pixel to cell lookup
//! - Column width reconciliation for tables
//! - Merged-region planning without double writes

mod axis;
mod boundary;
mod mapper;
mod overlap;
mod placement;
mod span;
mod widths;

pub use axis::{AxisBuilder, AxisPair, CapacityOverflow, GridAxis};
pub use boundary::{collect_boundaries, interior_column_cuts, BoundarySet};
pub use mapper::PixelGridMapper;
pub use overlap::{bisect, resolve_overlaps, Bisection};
pub use placement::{placements, rendered_height, table_row_height, Placed, StackCursor};
pub use span::{SpanPlanner, WrittenMask};
pub use widths::{resolve_column_widths, ColumnWidthPlan};
