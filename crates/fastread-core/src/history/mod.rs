//! Bounded, newest-first reading history persisted through a [`KeyValueStore`].
//!
//! Every operation is a full read-modify-write of the single history slot:
//! nothing is cached between calls, so edits made to the slot from outside
//! are picked up by the next call. Two writers interleaving between one
//! call's read and write can still lose an update; the store is meant for a
//! single user in a single session.

mod codec;

pub use codec::{DecodeError, decode, encode};

use core::time::Duration;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::storage::KeyValueStore;

pub const HISTORY_KEY: &str = "readingHistory";
pub const HISTORY_CAPACITY: usize = 10;
pub const HISTORY_RETENTION: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// One saved reading session.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub title: String,
    #[serde(rename = "url", default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Unix milliseconds.
    #[serde(rename = "timestamp")]
    pub created_at_ms: u64,
}

/// Read snapshot of the history, newest first.
pub type HistoryList = heapless::Vec<HistoryEntry, HISTORY_CAPACITY>;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HistoryConfig {
    pub key: &'static str,
    pub retention: Duration,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            key: HISTORY_KEY,
            retention: HISTORY_RETENTION,
        }
    }
}

#[derive(Debug)]
pub enum HistoryError<E> {
    /// The persistence medium failed; callers treat history as unavailable.
    Storage(E),
    Encode(serde_json::Error),
    /// The new entry alone exceeds the store's value budget.
    EntryTooLarge { encoded_bytes: usize, capacity: usize },
}

pub struct HistoryStore<S: KeyValueStore> {
    store: S,
    config: HistoryConfig,
}

impl<S: KeyValueStore> HistoryStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, HistoryConfig::default())
    }

    pub fn with_config(store: S, config: HistoryConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Current entries. Corrupt data and storage failures both read as an
    /// empty history.
    pub fn list(&mut self) -> HistoryList {
        match self.try_list() {
            Ok(entries) => entries,
            Err(err) => {
                warn!("history: storage unavailable: {:?}", err);
                HistoryList::new()
            }
        }
    }

    /// Like [`list`](Self::list) but reports an unreachable medium.
    pub fn try_list(&mut self) -> Result<HistoryList, HistoryError<S::Error>> {
        self.load()
    }

    pub fn get(&mut self, id: &str) -> Option<HistoryEntry> {
        self.list().into_iter().find(|entry| entry.id == id)
    }

    /// Save a new session at the front, evicting the oldest beyond
    /// [`HISTORY_CAPACITY`] or beyond the store's size budget.
    pub fn add(
        &mut self,
        title: &str,
        source_url: Option<&str>,
        text: Option<&str>,
        created_at_ms: u64,
    ) -> Result<HistoryEntry, HistoryError<S::Error>> {
        let current = self.load()?;

        let entry = HistoryEntry {
            id: next_id(&current, created_at_ms),
            title: title.to_string(),
            source_url: source_url.map(str::to_string),
            text: text.map(str::to_string),
            created_at_ms,
        };

        let mut updated = HistoryList::new();
        let mut evicted = 0usize;
        for existing in core::iter::once(entry.clone()).chain(current) {
            if updated.push(existing).is_err() {
                evicted += 1;
            }
        }

        if let Some(capacity) = self.store.capacity_bytes() {
            loop {
                let encoded_bytes = codec::encoded_len(&updated).map_err(HistoryError::Encode)?;
                if encoded_bytes <= capacity {
                    break;
                }
                if updated.len() <= 1 {
                    warn!(
                        "history: entry of {} bytes exceeds store budget of {}",
                        encoded_bytes, capacity
                    );
                    return Err(HistoryError::EntryTooLarge {
                        encoded_bytes,
                        capacity,
                    });
                }
                updated.pop();
                evicted += 1;
            }
        }

        self.persist(&updated)?;
        info!(
            "history: saved id={} entries={} evicted={}",
            entry.id,
            updated.len(),
            evicted
        );
        Ok(entry)
    }

    /// Drop the entry with `id`. Unknown ids leave the slot untouched.
    pub fn remove(&mut self, id: &str) -> Result<(), HistoryError<S::Error>> {
        let mut entries = self.load()?;
        let before = entries.len();
        entries.retain(|entry| entry.id != id);

        if entries.len() == before {
            debug!("history: remove of unknown id={} ignored", id);
            return Ok(());
        }

        self.persist(&entries)?;
        info!("history: removed id={}", id);
        Ok(())
    }

    pub fn clear(&mut self) -> Result<(), HistoryError<S::Error>> {
        self.persist(&[])?;
        info!("history: cleared");
        Ok(())
    }

    fn load(&mut self) -> Result<HistoryList, HistoryError<S::Error>> {
        let Some(raw) = self
            .store
            .read(self.config.key)
            .map_err(HistoryError::Storage)?
        else {
            return Ok(HistoryList::new());
        };

        if raw.trim().is_empty() {
            return Ok(HistoryList::new());
        }

        match codec::decode(&raw) {
            Ok(decoded) => Ok(sanitize(decoded)),
            Err(err) => {
                warn!("history: discarding corrupt payload: {:?}", err);
                Ok(HistoryList::new())
            }
        }
    }

    fn persist(&mut self, entries: &[HistoryEntry]) -> Result<(), HistoryError<S::Error>> {
        let raw = codec::encode(entries).map_err(HistoryError::Encode)?;
        self.store
            .write(self.config.key, &raw, self.config.retention)
            .map_err(HistoryError::Storage)
    }
}

/// Keep stored order, drop repeated ids (first wins) and anything past capacity.
fn sanitize(decoded: Vec<HistoryEntry>) -> HistoryList {
    let mut entries = HistoryList::new();
    for entry in decoded {
        if entries.iter().any(|kept| kept.id == entry.id) {
            continue;
        }
        if entries.push(entry).is_err() {
            break;
        }
    }
    entries
}

/// Millisecond timestamp id, bumped past every numeric id already stored so
/// saves within the same clock tick stay unique.
fn next_id(current: &[HistoryEntry], created_at_ms: u64) -> String {
    let highest = current
        .iter()
        .filter_map(|entry| entry.id.parse::<u64>().ok())
        .max();

    let id = match highest {
        Some(highest) if highest >= created_at_ms => highest.saturating_add(1),
        _ => created_at_ms,
    };
    id.to_string()
}
