//! Storage boundary for encoded snapshots.
//!
//! The engine never touches files itself. Hosts implement `SnapshotStore`
//! over whatever storage their platform offers; the session hands it
//! encoded bytes after every state-changing operation.

use super::error::StoreError;

/// Where encoded snapshots are read from and written to.
///
/// Writes are best effort: the session logs a failed write and carries on.
pub trait SnapshotStore {
    /// The last saved bytes, or `None` if nothing was ever saved.
    fn read(&self) -> Option<Vec<u8>>;

    /// Replace the saved bytes.
    fn write(&mut self, bytes: &[u8]) -> Result<(), StoreError>;
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for Box<S> {
    fn read(&self) -> Option<Vec<u8>> {
        (**self).read()
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), StoreError> {
        (**self).write(bytes)
    }
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for &mut S {
    fn read(&self) -> Option<Vec<u8>> {
        (**self).read()
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), StoreError> {
        (**self).write(bytes)
    }
}

/// In-memory store. Counts writes, which makes save triggers observable.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    bytes: Option<Vec<u8>>,
    writes: usize,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a save.
    #[must_use]
    pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: Some(bytes.into()),
            writes: 0,
        }
    }

    /// Currently stored bytes.
    #[must_use]
    pub fn bytes(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }

    /// Number of successful writes so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl SnapshotStore for MemoryStore {
    fn read(&self) -> Option<Vec<u8>> {
        self.bytes.clone()
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), StoreError> {
        self.bytes = Some(bytes.to_vec());
        self.writes += 1;
        Ok(())
    }
}
