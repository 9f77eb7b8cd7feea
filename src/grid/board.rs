//! The board: an N×N row-major matrix of optional tiles.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Tile, TileIdAllocator};

/// Side length of the board.
pub const GRID_SIZE: usize = 4;

/// Number of cells on the board.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// One row (or, after transposing, one column) of the board.
pub type Line = [Option<Tile>; GRID_SIZE];

/// A `(row, col)` position.
pub type Cell = (usize, usize);

/// A tile together with the cell holding it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacedTile {
    pub row: usize,
    pub col: usize,
    pub tile: Tile,
}

/// The game board.
///
/// Plain value type: copying a `Grid` is a deep copy, so history entries
/// never alias the live board.
///
/// ## Invariants
///
/// - Every tile value is a power of two, at least 2
/// - No two tiles share an id
///
/// Both hold for grids built through this crate's operations. Grids read
/// from storage are checked by the persistence codec.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    pub(super) cells: [Line; GRID_SIZE],
}

impl Grid {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a board from rows.
    #[must_use]
    pub const fn from_rows(cells: [Line; GRID_SIZE]) -> Self {
        Self { cells }
    }

    /// Build a board from plain values, `0` meaning empty.
    ///
    /// Ids are allocated row-major from `ids`. Non-zero values must be
    /// valid tile values.
    ///
    /// ```
    /// use rust_2048::core::TileIdAllocator;
    /// use rust_2048::grid::Grid;
    ///
    /// let mut ids = TileIdAllocator::new();
    /// let grid = Grid::from_values(
    ///     [[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]],
    ///     &mut ids,
    /// );
    /// assert_eq!(grid.tile_count(), 2);
    /// assert_eq!(ids.peek(), 2);
    /// ```
    #[must_use]
    pub fn from_values(values: [[u32; GRID_SIZE]; GRID_SIZE], ids: &mut TileIdAllocator) -> Self {
        let mut grid = Self::new();
        for (row, line) in values.iter().enumerate() {
            for (col, &value) in line.iter().enumerate() {
                if value != 0 {
                    debug_assert!(Tile::is_valid_value(value), "invalid tile value {value}");
                    grid.cells[row][col] = Some(Tile::new(ids.next_id(), value));
                }
            }
        }
        grid
    }

    /// The board as plain values, `0` meaning empty.
    #[must_use]
    pub fn values(&self) -> [[u32; GRID_SIZE]; GRID_SIZE] {
        let mut out = [[0; GRID_SIZE]; GRID_SIZE];
        for (row, line) in self.cells.iter().enumerate() {
            for (col, cell) in line.iter().enumerate() {
                out[row][col] = cell.map_or(0, |t| t.value);
            }
        }
        out
    }

    /// All rows.
    #[must_use]
    pub fn rows(&self) -> &[Line; GRID_SIZE] {
        &self.cells
    }

    /// Tile at a cell. Out-of-range positions are empty.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<Tile> {
        self.cells.get(row)?.get(col).copied().flatten()
    }

    /// Place (or clear) a cell. Returns false if the position is out of range.
    pub fn set(&mut self, row: usize, col: usize, tile: Option<Tile>) -> bool {
        match self.cells.get_mut(row).and_then(|line| line.get_mut(col)) {
            Some(cell) => {
                *cell = tile;
                true
            }
            None => false,
        }
    }

    /// Remove and return the tile at a cell.
    pub fn take(&mut self, row: usize, col: usize) -> Option<Tile> {
        self.cells.get_mut(row)?.get_mut(col)?.take()
    }

    /// Iterate over present tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = PlacedTile> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, line)| {
            line.iter()
                .enumerate()
                .filter_map(move |(col, cell)| cell.map(|tile| PlacedTile { row, col, tile }))
        })
    }

    /// Number of tiles on the board.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// All cells holding no tile, row-major.
    #[must_use]
    pub fn empty_cells(&self) -> SmallVec<[Cell; CELL_COUNT]> {
        let mut out = SmallVec::new();
        for (row, line) in self.cells.iter().enumerate() {
            for (col, cell) in line.iter().enumerate() {
                if cell.is_none() {
                    out.push((row, col));
                }
            }
        }
        out
    }

    /// True when no cell is empty.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }

    /// Largest tile value on the board, 0 if empty.
    #[must_use]
    pub fn max_value(&self) -> u32 {
        self.tiles().map(|p| p.tile.value).max().unwrap_or(0)
    }

    /// Swap rows and columns.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut out = Self::new();
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                out.cells[row][col] = self.cells[col][row];
            }
        }
        out
    }

    /// Mirror every row left-to-right.
    #[must_use]
    pub fn reverse_rows(&self) -> Self {
        let mut out = *self;
        for line in &mut out.cells {
            line.reverse();
        }
        out
    }

    /// No empty cell and no orthogonally adjacent pair that could merge.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        if !self.is_full() {
            return false;
        }

        let merges = |a: Option<Tile>, b: Option<Tile>| match (a, b) {
            (Some(a), Some(b)) => a.merged_value(b).is_some(),
            _ => false,
        };

        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let tile = self.cells[row][col];
                if col + 1 < GRID_SIZE && merges(tile, self.cells[row][col + 1]) {
                    return false;
                }
                if row + 1 < GRID_SIZE && merges(tile, self.cells[row + 1][col]) {
                    return false;
                }
            }
        }

        true
    }
}
