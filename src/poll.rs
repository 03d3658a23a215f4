//! Incoming-event poller
//!
//! Checks the transient slot on a fixed interval for events written by an
//! external capture process. There is no cancellation and no backpressure:
//! the loop runs for the lifetime of the process, and a slot repopulated
//! faster than the interval is only seen as the latest snapshot before each
//! tick.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::interval;

use crate::store::EventStore;

/// Default interval between checks of the transient slot
pub const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Recurring background check of the incoming-event slot
pub struct IncomingPoller {
    store: Arc<EventStore>,
    poll_interval: Duration,
    notifier: Option<broadcast::Sender<usize>>,
}

impl IncomingPoller {
    /// Create a poller with the default 2-second interval
    pub fn new(store: Arc<EventStore>) -> Self {
        Self::with_interval(store, POLL_INTERVAL)
    }

    /// Create a poller with a custom interval
    pub fn with_interval(store: Arc<EventStore>, poll_interval: Duration) -> Self {
        Self {
            store,
            poll_interval,
            notifier: None,
        }
    }

    /// Announce the number of events merged on each non-empty tick, so a
    /// presentation adapter can re-render
    pub fn with_notifier(mut self, tx: broadcast::Sender<usize>) -> Self {
        self.notifier = Some(tx);
        self
    }

    /// Run the poll loop as an async task
    pub async fn run(self) {
        let mut timer = interval(self.poll_interval);

        loop {
            timer.tick().await;

            match self.store.sync_incoming() {
                Ok(0) => {}
                Ok(appended) => {
                    println!("Merged {} incoming event(s)", appended);
                    if let Some(tx) = &self.notifier {
                        // Ignore send errors - just means no receivers
                        let _ = tx.send(appended);
                    }
                }
                Err(e) => eprintln!("Warning: incoming sync failed: {}", e),
            }
        }
    }

    /// Spawn the poll loop as a background task
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, Storage, EVENTS_KEY};
    use crate::types::CameraEvent;

    fn shared_store() -> (Arc<EventStore>, MemoryStorage) {
        let incoming = MemoryStorage::new();
        let store = EventStore::new(
            Box::new(MemoryStorage::new()),
            Box::new(incoming.clone()),
        );
        (Arc::new(store), incoming)
    }

    #[tokio::test]
    async fn test_poller_merges_and_clears_slot() {
        let (store, incoming) = shared_store();

        let payload = serde_json::to_string(&vec![CameraEvent::new(
            "evt-1",
            "Cam1",
            "2024-01-15T10:00:00",
        )])
        .unwrap();
        incoming.write(EVENTS_KEY, &payload).unwrap();

        let handle = IncomingPoller::with_interval(store.clone(), Duration::from_millis(10)).spawn();
        tokio::time::sleep(Duration::from_millis(60)).await;
        handle.abort();

        assert_eq!(store.len(), 1);
        assert_eq!(incoming.read(EVENTS_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_poller_notifies_merged_count() {
        let (store, incoming) = shared_store();
        let (tx, mut rx) = broadcast::channel(16);

        let payload = serde_json::to_string(&vec![
            CameraEvent::new("evt-1", "Cam1", "2024-01-15T10:00:00"),
            CameraEvent::new("evt-2", "Cam2", "2024-01-15T10:01:00"),
        ])
        .unwrap();
        incoming.write(EVENTS_KEY, &payload).unwrap();

        let handle = IncomingPoller::with_interval(store.clone(), Duration::from_millis(10))
            .with_notifier(tx)
            .spawn();

        let appended = rx.recv().await.unwrap();
        handle.abort();

        assert_eq!(appended, 2);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_poller_idles_on_empty_slot() {
        let (store, _incoming) = shared_store();

        let handle = IncomingPoller::with_interval(store.clone(), Duration::from_millis(10)).spawn();
        tokio::time::sleep(Duration::from_millis(40)).await;
        handle.abort();

        assert!(store.is_empty());
    }
}
