//! Key-value persistence abstraction backing the reading history.

use core::time::Duration;
use std::collections::BTreeMap;

/// Small-value durable storage (cookie-like): one string per key, written
/// with a retention window after which the backend may forget it.
pub trait KeyValueStore {
    type Error: core::fmt::Debug;

    fn read(&mut self, key: &str) -> Result<Option<String>, Self::Error>;
    fn write(&mut self, key: &str, value: &str, retention: Duration) -> Result<(), Self::Error>;

    /// Largest value the backend accepts, if bounded.
    fn capacity_bytes(&self) -> Option<usize> {
        None
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    type Error = S::Error;

    fn read(&mut self, key: &str) -> Result<Option<String>, Self::Error> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str, retention: Duration) -> Result<(), Self::Error> {
        (**self).write(key, value, retention)
    }

    fn capacity_bytes(&self) -> Option<usize> {
        (**self).capacity_bytes()
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MemoryStoreError {
    CapacityExceeded { len: usize, capacity: usize },
    Unavailable,
}

/// In-process store. Retention is recorded but never enforced.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
    capacity: Option<usize>,
    writes: u32,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity_bytes(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    /// Write a raw value directly, bypassing capacity checks.
    pub fn insert_raw(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> u32 {
        self.writes
    }

    /// Make every subsequent operation fail, as an unreachable medium would.
    pub fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }
}

impl KeyValueStore for MemoryStore {
    type Error = MemoryStoreError;

    fn read(&mut self, key: &str) -> Result<Option<String>, Self::Error> {
        if self.unavailable {
            return Err(MemoryStoreError::Unavailable);
        }
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str, _retention: Duration) -> Result<(), Self::Error> {
        if self.unavailable {
            return Err(MemoryStoreError::Unavailable);
        }
        if let Some(capacity) = self.capacity
            && value.len() > capacity
        {
            return Err(MemoryStoreError::CapacityExceeded {
                len: value.len(),
                capacity,
            });
        }

        self.values.insert(key.to_string(), value.to_string());
        self.writes = self.writes.saturating_add(1);
        Ok(())
    }

    fn capacity_bytes(&self) -> Option<usize> {
        self.capacity
    }
}
