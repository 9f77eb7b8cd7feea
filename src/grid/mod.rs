//! Grid engine: the board, the merge rule, directional moves, spawning and
//! terminal detection.
//!
//! All operations take the board by value or `&self` and hand back new
//! boards, so callers decide when a result replaces the live state.

mod board;
mod line;
mod slide;
mod spawn;

pub use board::{Cell, Grid, Line, PlacedTile, CELL_COUNT, GRID_SIZE};
pub use line::{compact_and_merge_line, LineMerge};
pub use slide::Slide;
