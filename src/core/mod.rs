//! Core types: tiles and their ids, directions, spawn modes, RNG, configuration.
//!
//! Everything here is independent of board layout. The `grid` module builds
//! on these to implement the rules.

pub mod tile;
pub mod direction;
pub mod spawn;
pub mod rng;
pub mod config;

pub use tile::{Tile, TileId, TileIdAllocator, MAX_TILE_VALUE};
pub use direction::Direction;
pub use spawn::{SpawnMode, NORMAL_TWO_PROBABILITY};
pub use rng::GameRng;
pub use config::{SessionConfig, DEFAULT_HISTORY_CAPACITY, DEFAULT_INITIAL_TILES};
