//! Data types for the canvas model and the output grid.

mod canvas;
mod diagnostic;
mod geometry;
mod grid;

pub use canvas::*;
pub use diagnostic::*;
pub use geometry::*;
pub use grid::*;
