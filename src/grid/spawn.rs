//! Spawning new tiles into empty cells.

use super::board::{Grid, PlacedTile};
use crate::core::{GameRng, SpawnMode, Tile, TileIdAllocator};

impl Grid {
    /// Place one new tile in a uniformly random empty cell.
    ///
    /// The cell is drawn first, then the value per `mode`. Returns `None`
    /// without touching `ids` or `rng` when the board is full.
    pub fn spawn_tile(
        &mut self,
        mode: SpawnMode,
        ids: &mut TileIdAllocator,
        rng: &mut GameRng,
    ) -> Option<PlacedTile> {
        let empty = self.empty_cells();
        let &(row, col) = rng.choose(&empty)?;
        let value = mode.tile_value(rng);
        let tile = Tile::new(ids.next_id(), value);
        self.cells[row][col] = Some(tile);
        Some(PlacedTile { row, col, tile })
    }
}
