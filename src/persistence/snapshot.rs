//! The capturable part of a session.

use serde::{Deserialize, Serialize};

use crate::core::SpawnMode;
use crate::grid::Grid;

/// Session state as stored on disk and on the undo stack.
///
/// History itself is never part of a snapshot.
///
/// Serialized as a JSON object with keys `grid`, `score`, `bestScore`,
/// `tileIdCounter` and `mode`. Unknown keys are ignored on read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub grid: Grid,
    /// May be negative after tile removals.
    pub score: i64,
    pub best_score: i64,
    /// Next tile id to allocate.
    pub tile_id_counter: u64,
    #[serde(rename = "mode")]
    pub spawn_mode: SpawnMode,
}
