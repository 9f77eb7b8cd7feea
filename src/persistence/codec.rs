//! JSON codec for session snapshots.
//!
//! ```
//! use rust_2048::persistence::{decode, encode, SessionSnapshot};
//!
//! let snapshot = SessionSnapshot { score: 12, best_score: 40, ..SessionSnapshot::default() };
//! let bytes = encode(&snapshot).unwrap();
//! assert_eq!(decode(&bytes).unwrap(), snapshot);
//! ```

use rustc_hash::FxHashSet;

use super::error::{DecodeError, EncodeError};
use super::snapshot::SessionSnapshot;
use crate::core::Tile;

/// Largest `tileIdCounter` accepted from storage: the top of the integer
/// range a JSON number holds exactly.
pub const MAX_TILE_ID_COUNTER: u64 = 1 << 53;

/// Serialize a snapshot.
pub fn encode(snapshot: &SessionSnapshot) -> Result<Vec<u8>, EncodeError> {
    serde_json::to_vec(snapshot).map_err(|source| EncodeError { source })
}

/// Parse and validate a snapshot.
///
/// Beyond the schema, the grid must hold only valid tile values and
/// distinct ids that are all below `tileIdCounter`, and the counter must
/// not exceed `MAX_TILE_ID_COUNTER`.
pub fn decode(bytes: &[u8]) -> Result<SessionSnapshot, DecodeError> {
    let snapshot: SessionSnapshot =
        serde_json::from_slice(bytes).map_err(|source| DecodeError::Schema { source })?;
    validate(&snapshot)?;
    Ok(snapshot)
}

fn validate(snapshot: &SessionSnapshot) -> Result<(), DecodeError> {
    if snapshot.tile_id_counter > MAX_TILE_ID_COUNTER {
        return Err(DecodeError::IdCounterOutOfRange {
            counter: snapshot.tile_id_counter,
        });
    }

    let mut seen = FxHashSet::default();

    for placed in snapshot.grid.tiles() {
        let tile = placed.tile;
        if !Tile::is_valid_value(tile.value) {
            return Err(DecodeError::InvalidTileValue {
                row: placed.row,
                col: placed.col,
                value: tile.value,
            });
        }
        if !seen.insert(tile.id) {
            return Err(DecodeError::DuplicateTileId { id: tile.id });
        }
        if tile.id.raw() >= snapshot.tile_id_counter {
            return Err(DecodeError::IdAboveCounter {
                id: tile.id,
                counter: snapshot.tile_id_counter,
            });
        }
    }

    Ok(())
}
