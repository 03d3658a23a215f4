//! Pluggable key-value storage
//!
//! The dashboard persists through an injectable `Storage` seam so the event
//! store can be exercised against an in-memory map in tests and against the
//! filesystem in deployments. Values are strings holding JSON payloads.
//!
//! # Key layout
//!
//! - `dashboard_events` in the primary namespace: the canonical persisted
//!   event list (JSON array).
//! - `dashboard_events` in a separate incoming namespace: newly captured
//!   events awaiting merge, written by an external capture process and
//!   cleared once consumed.
//! - `dashboard_event_{id}` in the primary namespace: a single event handed
//!   off for one-shot import.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use std::io;

/// Key of the slot holding the event list, in both namespaces
pub const EVENTS_KEY: &str = "dashboard_events";

/// Key of the one-shot handoff slot for a single event
pub fn handoff_key(event_id: &str) -> String {
    format!("dashboard_event_{}", event_id)
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in a storage backend
#[derive(Debug)]
pub enum StorageError {
    Io(io::Error),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<io::Error> for StorageError {
    fn from(e: io::Error) -> Self {
        StorageError::Io(e)
    }
}

/// One key-value namespace with synchronous, per-call-atomic access
pub trait Storage: Send + Sync {
    /// Read the value at `key`, `None` when absent
    fn read(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write `value` at `key`, replacing any previous value
    fn write(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key`; removing an absent key is a no-op
    fn remove(&self, key: &str) -> StorageResult<()>;
}
