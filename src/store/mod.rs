//! Event Store - canonical event collection
//!
//! Maintains the authoritative in-memory list of events and keeps it
//! synchronized with the primary storage slot. Mutations take the write lock
//! for the whole read-modify-persist sequence, so a merge triggered by the
//! poller is atomic with respect to readers.

mod ingest;

use parking_lot::RwLock;

use crate::storage::{Storage, StorageError, EVENTS_KEY};
use crate::types::CameraEvent;

/// Result type for event store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in event store operations
#[derive(Debug)]
pub enum StoreError {
    Storage(StorageError),
    Json(serde_json::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Storage(e) => write!(f, "storage error: {}", e),
            StoreError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<StorageError> for StoreError {
    fn from(e: StorageError) -> Self {
        StoreError::Storage(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Json(e)
    }
}

/// Canonical event collection, backed by a primary slot and fed by a
/// transient incoming slot in a separate namespace
///
/// `id` is unique within the collection; see the ingest operations for how
/// duplicates are resolved on each path.
pub struct EventStore {
    pub(crate) primary: Box<dyn Storage>,
    pub(crate) incoming: Box<dyn Storage>,
    pub(crate) events: RwLock<Vec<CameraEvent>>,
}

impl EventStore {
    /// Create a store over the two namespaces and load the persisted list
    pub fn new(primary: Box<dyn Storage>, incoming: Box<dyn Storage>) -> Self {
        let events = Self::load_from(primary.as_ref());
        Self {
            primary,
            incoming,
            events: RwLock::new(events),
        }
    }

    /// Read the primary slot; missing or unparsable data downgrades to an
    /// empty collection ("no events yet"), never a failure
    fn load_from(storage: &dyn Storage) -> Vec<CameraEvent> {
        match storage.read(EVENTS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(events) => events,
                Err(e) => {
                    eprintln!("Warning: failed to parse stored events: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                eprintln!("Warning: failed to read stored events: {}", e);
                Vec::new()
            }
        }
    }

    /// Re-read the primary slot, replacing the in-memory collection.
    /// Returns the number of events loaded.
    pub fn load(&self) -> usize {
        let events = Self::load_from(self.primary.as_ref());
        let count = events.len();
        *self.events.write() = events;
        count
    }

    /// Persist the full collection to the primary slot (caller holds the
    /// write lock)
    pub(crate) fn persist(&self, events: &[CameraEvent]) -> StoreResult<()> {
        let payload = serde_json::to_string(events)?;
        self.primary.write(EVENTS_KEY, &payload)?;
        Ok(())
    }

    /// Snapshot of the current collection (thread-safe read)
    pub fn events(&self) -> Vec<CameraEvent> {
        self.events.read().clone()
    }

    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }
}

// Ingestion operations (from ingest.rs)
impl EventStore {
    /// Insert or update a single event by id; new data overwrites old
    pub fn add(&self, event: CameraEvent) -> StoreResult<()> {
        ingest::add(self, event)
    }

    /// Merge externally captured events; existing events win by id
    pub fn merge_incoming(&self, candidates: Vec<CameraEvent>) -> StoreResult<usize> {
        ingest::merge_incoming(self, candidates)
    }

    /// Drain the transient incoming slot, merging and then clearing it
    pub fn sync_incoming(&self) -> StoreResult<usize> {
        ingest::sync_incoming(self)
    }

    /// One-shot import of an event handed off under `dashboard_event_{id}`
    pub fn consume_handoff(&self, event_id: &str) -> StoreResult<Option<CameraEvent>> {
        ingest::consume_handoff(self, event_id)
    }
}
