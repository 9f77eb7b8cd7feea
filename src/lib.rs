//! # rust-2048
//!
//! Rule engine for a sliding-tile merge puzzle (2048-style).
//!
//! ## Design Principles
//!
//! 1. **Owned state, pure rules**: The grid is a plain value. Grid operations
//!    return new boards; the session decides when they replace live state.
//!
//! 2. **Stable tile identity**: Every tile carries an id that survives slides.
//!    Merges retire both inputs and mint a new id, so renderers can animate
//!    by matching ids between frames.
//!
//! 3. **Injected collaborators**: Randomness (`GameRng`) and storage
//!    (`SnapshotStore`) come from outside, which keeps play deterministic
//!    under test and keeps file access out of the engine.
//!
//! ## Modules
//!
//! - `core`: Tiles and ids, directions, spawn modes, RNG, configuration
//! - `grid`: Board, merge rule, directional moves, spawning, terminal detection
//! - `history`: Bounded undo stack
//! - `persistence`: Snapshot type, JSON codec, storage trait
//! - `session`: `GameSession`, input events and frames

pub mod core;
pub mod grid;
pub mod history;
pub mod persistence;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Direction, GameRng, SessionConfig, SpawnMode, Tile, TileId, TileIdAllocator,
};

pub use crate::grid::{compact_and_merge_line, Grid, LineMerge, PlacedTile, Slide, GRID_SIZE};

pub use crate::history::HistoryStack;

pub use crate::persistence::{
    decode, encode, DecodeError, EncodeError, MemoryStore, SessionSnapshot, SnapshotStore,
    StoreError,
};

pub use crate::session::{Frame, GameSession, InputEvent, MoveOutcome};
