//! Tile identity and values.
//!
//! Every tile placed on the board gets a `TileId` from a `TileIdAllocator`.
//! Ids are never reused while a tile exists, so a presentation layer can
//! follow one tile's visual across moves. A merge retires both input ids
//! and allocates a fresh id for the result.
//!
//! ## Usage
//!
//! ```
//! use rust_2048::core::{Tile, TileIdAllocator};
//!
//! let mut ids = TileIdAllocator::new();
//! let a = Tile::new(ids.next_id(), 2);
//! let b = Tile::new(ids.next_id(), 2);
//!
//! assert_ne!(a.id, b.id);
//! assert_eq!(ids.peek(), 2);
//! ```

use serde::{Deserialize, Serialize};

/// Largest tile value. Two tiles at this value never merge.
pub const MAX_TILE_VALUE: u32 = 1 << 31;

/// Unique identifier for a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(pub u64);

impl TileId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// A numbered tile.
///
/// `value` is always a power of two, at least 2. It only changes through
/// a merge, which produces a new tile rather than mutating this one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub value: u32,
}

impl Tile {
    /// Create a tile.
    #[must_use]
    pub const fn new(id: TileId, value: u32) -> Self {
        Self { id, value }
    }

    /// Check that a value is a legal tile value.
    #[must_use]
    pub const fn is_valid_value(value: u32) -> bool {
        value >= 2 && value.is_power_of_two()
    }

    /// Value of the tile two neighbours would merge into, if they merge.
    ///
    /// Equal values merge unless doubling would pass `MAX_TILE_VALUE`.
    #[must_use]
    pub const fn merged_value(self, other: Self) -> Option<u32> {
        if self.value == other.value {
            self.value.checked_mul(2)
        } else {
            None
        }
    }

    /// The value as a score contribution.
    #[must_use]
    pub fn score(self) -> i64 {
        i64::from(self.value)
    }
}

/// Monotonic tile id source.
///
/// Holds the next id to hand out. The counter is part of every session
/// snapshot so undo and reload resume allocation where they left off.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileIdAllocator {
    next: u64,
}

impl TileIdAllocator {
    /// Create an allocator starting at id 0.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Create an allocator that resumes at `next`.
    #[must_use]
    pub const fn starting_at(next: u64) -> Self {
        Self { next }
    }

    /// Return the current counter value as an id, then advance.
    ///
    /// The 64-bit id space cannot be exhausted within a session; overflow
    /// panics in debug builds.
    pub fn next_id(&mut self) -> TileId {
        let id = TileId(self.next);
        self.next += 1;
        id
    }

    /// The id the next call to `next_id` will return.
    #[must_use]
    pub const fn peek(&self) -> u64 {
        self.next
    }
}
