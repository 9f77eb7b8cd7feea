//! Persistence error types.

use derive_more::{Display, Error};

use crate::core::TileId;

/// Stored bytes could not be turned into a valid snapshot.
///
/// Session bootstrap treats any of these as "no prior save".
#[derive(Debug, Display, Error)]
pub enum DecodeError {
    /// Not JSON, or JSON that does not fit the snapshot schema.
    #[display("snapshot does not match schema: {source}")]
    Schema { source: serde_json::Error },

    /// A tile value that is not a power of two of at least 2.
    #[display("tile at ({row}, {col}) has invalid value {value}")]
    InvalidTileValue { row: usize, col: usize, value: u32 },

    /// Two tiles share an id.
    #[display("{id} appears more than once")]
    DuplicateTileId { id: TileId },

    /// A tile id the counter has not reached yet, which a later
    /// allocation would collide with.
    #[display("{id} is not below the id counter {counter}")]
    IdAboveCounter { id: TileId, counter: u64 },

    /// An id counter past the range saves are written in.
    #[display("id counter {counter} is out of range")]
    IdCounterOutOfRange { counter: u64 },
}

/// A snapshot could not be serialized.
#[derive(Debug, Display, Error)]
#[display("failed to encode snapshot: {source}")]
pub struct EncodeError {
    pub source: serde_json::Error,
}

/// A snapshot store failed to write.
#[derive(Debug, Clone, Display, Error)]
#[display("snapshot store error: {message}")]
pub struct StoreError {
    pub message: String,
}

impl StoreError {
    /// Creates a new store error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
