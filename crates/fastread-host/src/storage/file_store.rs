//! JSON-file key-value store with per-key expiry.
//!
//! The whole file is re-read on every call so edits from another process
//! are visible to the next operation. Values past their expiry read as
//! absent and are dropped on the next write.

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use fastread_core::{clock::Clock, storage::KeyValueStore};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::clock::SystemClock;

/// Per-value budget: room for a full history of maximum-length sessions
/// after base64 expansion.
pub const FILE_STORE_CAPACITY_BYTES: usize = 80 * 1024;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FileStoreError {
    Io(io::ErrorKind),
    Encode,
    CapacityExceeded { len: usize, capacity: usize },
}

impl From<io::Error> for FileStoreError {
    fn from(err: io::Error) -> Self {
        Self::Io(err.kind())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredValue {
    value: String,
    expires_at_ms: u64,
}

type StoredValues = BTreeMap<String, StoredValue>;

#[derive(Debug)]
pub struct FileStore<C: Clock = SystemClock> {
    path: PathBuf,
    capacity: usize,
    clock: C,
}

impl FileStore<SystemClock> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_clock(path, SystemClock)
    }
}

impl<C: Clock> FileStore<C> {
    pub fn with_clock(path: impl Into<PathBuf>, clock: C) -> Self {
        Self {
            path: path.into(),
            capacity: FILE_STORE_CAPACITY_BYTES,
            clock,
        }
    }

    pub fn with_capacity_bytes(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    fn load(&self) -> Result<StoredValues, FileStoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(StoredValues::new()),
            Err(err) => return Err(err.into()),
        };

        match serde_json::from_str(&contents) {
            Ok(values) => Ok(values),
            Err(err) => {
                warn!(
                    "store: ignoring unreadable {}: {}",
                    self.path.display(),
                    err
                );
                Ok(StoredValues::new())
            }
        }
    }

    fn save(&self, values: &StoredValues) -> Result<(), FileStoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(values).map_err(|_| FileStoreError::Encode)?;
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, contents)?;
        fs::rename(&staging, &self.path)?;
        Ok(())
    }
}

impl<C: Clock> KeyValueStore for FileStore<C> {
    type Error = FileStoreError;

    fn read(&mut self, key: &str) -> Result<Option<String>, Self::Error> {
        let now_ms = self.clock.unix_ms();
        let values = self.load()?;
        Ok(values
            .get(key)
            .filter(|stored| stored.expires_at_ms > now_ms)
            .map(|stored| stored.value.clone()))
    }

    fn write(&mut self, key: &str, value: &str, retention: Duration) -> Result<(), Self::Error> {
        if value.len() > self.capacity {
            return Err(FileStoreError::CapacityExceeded {
                len: value.len(),
                capacity: self.capacity,
            });
        }

        let now_ms = self.clock.unix_ms();
        let mut values = self.load()?;
        let before = values.len();
        values.retain(|_, stored| stored.expires_at_ms > now_ms);
        if values.len() != before {
            debug!("store: pruned {} expired values", before - values.len());
        }

        let retention_ms = u64::try_from(retention.as_millis()).unwrap_or(u64::MAX);
        values.insert(
            key.to_string(),
            StoredValue {
                value: value.to_string(),
                expires_at_ms: now_ms.saturating_add(retention_ms),
            },
        );
        self.save(&values)
    }

    fn capacity_bytes(&self) -> Option<usize> {
        Some(self.capacity)
    }
}
