//! Layout hints for the external layout engine
//!
//! Nothing is positioned here. These helpers compute the nesting depth that
//! drives font scaling and the rank hints that keep sibling nodes in a grid.

pub mod depth;
pub mod grid;

pub use depth::{font_at, font_step, max_depth};
pub use grid::arrange_grid;
