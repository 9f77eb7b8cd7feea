//! Input events and the results handed back to the presentation layer.

use serde::{Deserialize, Serialize};

use crate::core::{Direction, SpawnMode};
use crate::grid::{Grid, PlacedTile};

/// A discrete input delivered to a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputEvent {
    /// Swipe in a direction.
    Move(Direction),
    /// Roll back to the previous state.
    Undo,
    /// Start a new game.
    Restart,
    /// Delete a tile, paying its value from the score.
    RemoveTile { row: usize, col: usize },
    /// Advance to the next spawn mode.
    CycleMode,
}

/// Result of `GameSession::apply_move`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    pub moved: bool,
    pub score_delta: i64,
    /// The board is terminal after this move. Always false when nothing moved.
    pub became_terminal: bool,
}

/// Everything a renderer needs after an event.
///
/// The grid carries tile ids, so a renderer can match tiles between frames
/// to animate slides and retire the views of merged-away tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub grid: Grid,
    pub score: i64,
    pub best_score: i64,
    pub spawn_mode: SpawnMode,
    /// Whether the event changed the board or score.
    pub moved: bool,
    /// Signed score change caused by the event.
    pub score_delta: i64,
    /// No move is possible; only restart and undo make progress.
    pub terminal: bool,
}

impl Frame {
    /// Tiles with their positions, row-major.
    pub fn tiles(&self) -> impl Iterator<Item = PlacedTile> + '_ {
        self.grid.tiles()
    }
}
