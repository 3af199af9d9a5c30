use core::time::Duration;

use fastread_core::storage::{KeyValueStore, MemoryStore, MemoryStoreError};
use fastread_host::storage::{FileStore, FileStoreError};

/// Persistence chosen at startup: the history file, or memory for `--ephemeral`.
pub(super) enum HistoryBackend {
    File(FileStore),
    Memory(MemoryStore),
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(super) enum HistoryBackendError {
    File(FileStoreError),
    Memory(MemoryStoreError),
}

impl KeyValueStore for HistoryBackend {
    type Error = HistoryBackendError;

    fn read(&mut self, key: &str) -> Result<Option<String>, Self::Error> {
        match self {
            Self::File(store) => store.read(key).map_err(HistoryBackendError::File),
            Self::Memory(store) => store.read(key).map_err(HistoryBackendError::Memory),
        }
    }

    fn write(&mut self, key: &str, value: &str, retention: Duration) -> Result<(), Self::Error> {
        match self {
            Self::File(store) => store
                .write(key, value, retention)
                .map_err(HistoryBackendError::File),
            Self::Memory(store) => store
                .write(key, value, retention)
                .map_err(HistoryBackendError::Memory),
        }
    }

    fn capacity_bytes(&self) -> Option<usize> {
        match self {
            Self::File(store) => store.capacity_bytes(),
            Self::Memory(store) => store.capacity_bytes(),
        }
    }
}
