//! Camera Event Dashboard Core
//!
//! The business core of a camera-triggered event dashboard: an event store
//! synchronized with a durable key-value slot, and a filter engine deriving
//! the visible view from it. Presentation is out of scope; this crate exposes
//! the operations a thin rendering adapter calls.
//!
//! # Features
//!
//! - **Event Store**: canonical event list with upsert, merge and one-shot
//!   handoff import, persisted synchronously after every mutation
//! - **Pluggable Storage**: injectable key-value seam with in-memory and
//!   atomic file-backed implementations
//! - **Filter Engine**: pure camera/time-window/search filtering with
//!   injectable wall clock, descending sort and aggregate stats
//! - **Incoming Poller**: fixed-interval background merge of externally
//!   captured events
//!
//! # Modules
//!
//! - `types`: Core data structures (CameraEvent, FilterCriteria, views)
//! - `storage`: Key-value storage trait and backends
//! - `store`: The event store
//! - `filter`: Pure view derivation
//! - `poll`: Background polling of the incoming slot
//! - `utils`: Utility functions (timestamps, calendar windows)
//!
//! # Example
//!
//! ```
//! use camera_dashboard::{compute_view, CameraEvent, EventStore, FilterCriteria, MemoryStorage};
//!
//! let store = EventStore::new(
//!     Box::new(MemoryStorage::new()),
//!     Box::new(MemoryStorage::new()),
//! );
//! store
//!     .add(CameraEvent::new("evt-1", "Front Door", "2024-01-15T10:30:00"))
//!     .unwrap();
//!
//! let criteria = FilterCriteria::new().with_camera("Front Door");
//! let view = compute_view(&store.events(), &criteria, chrono::Local::now());
//! assert_eq!(view.stats.total_count, 1);
//! ```

pub mod filter;
pub mod poll;
pub mod storage;
pub mod store;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use filter::{compute_stats, compute_view};
pub use poll::{IncomingPoller, POLL_INTERVAL};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use store::{EventStore, StoreError};
pub use types::{CameraEvent, DashboardStats, DashboardView, FilterCriteria, TimeWindow};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
