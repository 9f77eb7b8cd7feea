//! Line compaction and merging, the one rule every direction reduces to.

use smallvec::SmallVec;

use super::board::{Line, GRID_SIZE};
use crate::core::{Tile, TileIdAllocator};

/// Result of sliding a single line toward index 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineMerge {
    pub line: Line,
    /// True iff the sequence of ids differs from the input.
    pub moved: bool,
    /// Sum of the values of all merged tiles.
    pub score_delta: i64,
}

/// Slide a line toward index 0, merging equal neighbours.
///
/// Gaps are removed first, preserving order. A single left-to-right pass
/// then merges each adjacent equal pair into a new tile with a fresh id and
/// twice the value; the scan index moves past the result, so no tile merges
/// twice in a pass. `[2, 2, 2, _]` becomes `[4, 2, _, _]` and
/// `[2, 2, 2, 2]` becomes `[4, 4, _, _]`. A pair at `MAX_TILE_VALUE`
/// stays as it is.
pub fn compact_and_merge_line(line: &Line, ids: &mut TileIdAllocator) -> LineMerge {
    let mut tiles: SmallVec<[Tile; GRID_SIZE]> = line.iter().flatten().copied().collect();
    let mut score_delta = 0;

    let mut i = 0;
    while i + 1 < tiles.len() {
        if let Some(value) = tiles[i].merged_value(tiles[i + 1]) {
            let merged = Tile::new(ids.next_id(), value);
            score_delta += merged.score();
            tiles[i] = merged;
            tiles.remove(i + 1);
        }
        i += 1;
    }

    let mut out: Line = [None; GRID_SIZE];
    for (slot, tile) in out.iter_mut().zip(tiles) {
        *slot = Some(tile);
    }

    let moved = !out
        .iter()
        .map(|c| c.map(|t| t.id))
        .eq(line.iter().map(|c| c.map(|t| t.id)));

    LineMerge {
        line: out,
        moved,
        score_delta,
    }
}
