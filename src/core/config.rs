//! Session configuration.

use serde::{Deserialize, Serialize};

use super::spawn::SpawnMode;

/// Default undo depth.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Tiles placed on a fresh board.
pub const DEFAULT_INITIAL_TILES: usize = 2;

/// Session configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,

    /// Maximum number of undo snapshots kept (oldest evicted first).
    pub history_capacity: usize,

    /// Spawn mode of a fresh session. A loaded save carries its own mode.
    pub spawn_mode: SpawnMode,

    /// Tiles spawned on a fresh board and on restart.
    pub initial_tiles: usize,

    /// Whether undo rolls best score back to the snapshot's value.
    /// When false, undo keeps the higher of the current and restored best.
    pub restore_best_on_undo: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            spawn_mode: SpawnMode::Normal,
            initial_tiles: DEFAULT_INITIAL_TILES,
            restore_best_on_undo: true,
        }
    }
}

impl SessionConfig {
    /// Use a fixed seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the undo depth.
    #[must_use]
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Set the starting spawn mode.
    #[must_use]
    pub fn with_spawn_mode(mut self, mode: SpawnMode) -> Self {
        self.spawn_mode = mode;
        self
    }

    /// Set how many tiles a fresh board starts with.
    #[must_use]
    pub fn with_initial_tiles(mut self, count: usize) -> Self {
        self.initial_tiles = count;
        self
    }

    /// Keep best score elevated across undo.
    #[must_use]
    pub fn keep_best_on_undo(mut self) -> Self {
        self.restore_best_on_undo = false;
        self
    }
}
