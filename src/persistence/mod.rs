//! Persistence: snapshot type, byte codec and the storage boundary.

mod codec;
mod error;
mod snapshot;
mod store;

pub use codec::{decode, encode, MAX_TILE_ID_COUNTER};
pub use error::{DecodeError, EncodeError, StoreError};
pub use snapshot::SessionSnapshot;
pub use store::{MemoryStore, SnapshotStore};
