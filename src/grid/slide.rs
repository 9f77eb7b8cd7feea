//! Directional moves.
//!
//! Only `move_left` slides anything; the other directions reorient the board
//! so their target edge is on the left, slide, and orient back:
//!
//! - right: reverse rows, left, reverse rows
//! - up: transpose, left, transpose
//! - down: transpose, reverse rows, left, reverse rows, transpose
//!
//! Merged tiles take ids in the order the reoriented rows are scanned.

use super::board::Grid;
use super::line::compact_and_merge_line;
use crate::core::{Direction, TileIdAllocator};

/// Result of sliding the whole board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slide {
    pub grid: Grid,
    /// True if any row changed.
    pub moved: bool,
    pub score_delta: i64,
}

impl Slide {
    fn map_grid(self, f: impl FnOnce(&Grid) -> Grid) -> Self {
        Self {
            grid: f(&self.grid),
            ..self
        }
    }
}

impl Grid {
    /// Slide the board in a direction.
    ///
    /// Leaves `self` untouched. Ids for merged tiles come from `ids` even
    /// when the caller ends up discarding the result.
    pub fn slide(&self, direction: Direction, ids: &mut TileIdAllocator) -> Slide {
        match direction {
            Direction::Left => self.move_left(ids),
            Direction::Right => self.move_right(ids),
            Direction::Up => self.move_up(ids),
            Direction::Down => self.move_down(ids),
        }
    }

    /// Slide toward column 0.
    pub fn move_left(&self, ids: &mut TileIdAllocator) -> Slide {
        let mut grid = *self;
        let mut moved = false;
        let mut score_delta = 0;

        for row in &mut grid.cells {
            let merge = compact_and_merge_line(row, ids);
            *row = merge.line;
            moved |= merge.moved;
            score_delta += merge.score_delta;
        }

        Slide {
            grid,
            moved,
            score_delta,
        }
    }

    /// Slide toward the last column.
    pub fn move_right(&self, ids: &mut TileIdAllocator) -> Slide {
        self.reverse_rows().move_left(ids).map_grid(Grid::reverse_rows)
    }

    /// Slide toward row 0.
    pub fn move_up(&self, ids: &mut TileIdAllocator) -> Slide {
        self.transpose().move_left(ids).map_grid(Grid::transpose)
    }

    /// Slide toward the last row.
    pub fn move_down(&self, ids: &mut TileIdAllocator) -> Slide {
        self.transpose()
            .reverse_rows()
            .move_left(ids)
            .map_grid(|g| g.reverse_rows().transpose())
    }

    /// True if sliding in `direction` would change the board.
    ///
    /// Works on a scratch copy of the id counter, so nothing is allocated.
    #[must_use]
    pub fn can_move(&self, direction: Direction, ids: &TileIdAllocator) -> bool {
        let mut scratch = *ids;
        self.slide(direction, &mut scratch).moved
    }
}
