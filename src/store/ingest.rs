//! Ingestion paths: direct upsert, transient-slot merge, one-shot handoff
//!
//! The two paths resolve duplicate ids differently: `add` lets incoming data
//! overwrite the stored event, `merge_incoming` keeps the stored event. Both
//! behaviors are pinned by tests and must not be unified.

use std::collections::HashSet;

use crate::storage::{handoff_key, EVENTS_KEY};
use crate::types::CameraEvent;

use super::{EventStore, StoreResult};

/// Insert or update a single event by id
///
/// A matching id is replaced in place, keeping its position relative to the
/// other events; otherwise the event is appended. The full collection is
/// persisted synchronously after the mutation.
pub fn add(store: &EventStore, event: CameraEvent) -> StoreResult<()> {
    let mut events = store.events.write();

    match events.iter().position(|e| e.id == event.id) {
        Some(idx) => events[idx] = event,
        None => events.push(event),
    }

    store.persist(&events)
}

/// Merge externally captured events into the collection
///
/// Equivalent to concatenating the current list with `candidates` and keeping
/// the first occurrence of each id: existing events win over incoming ones
/// with the same id (the opposite of `add`). Returns the number of events
/// actually appended.
pub fn merge_incoming(store: &EventStore, candidates: Vec<CameraEvent>) -> StoreResult<usize> {
    let mut events = store.events.write();
    let mut seen: HashSet<String> = events.iter().map(|e| e.id.clone()).collect();

    let mut appended = 0;
    for candidate in candidates {
        if seen.insert(candidate.id.clone()) {
            events.push(candidate);
            appended += 1;
        }
    }

    store.persist(&events)?;
    Ok(appended)
}

/// Drain the transient slot: merge its contents, then clear it so the same
/// snapshot is not reprocessed on the next tick
///
/// An absent slot is a no-op. An unparsable payload is logged and cleared,
/// otherwise the poller would retry it forever.
pub fn sync_incoming(store: &EventStore) -> StoreResult<usize> {
    let raw = match store.incoming.read(EVENTS_KEY)? {
        Some(raw) => raw,
        None => return Ok(0),
    };

    let candidates: Vec<CameraEvent> = match serde_json::from_str(&raw) {
        Ok(events) => events,
        Err(e) => {
            eprintln!("Warning: failed to parse incoming events, discarding: {}", e);
            store.incoming.remove(EVENTS_KEY)?;
            return Ok(0);
        }
    };

    let appended = merge_incoming(store, candidates)?;
    store.incoming.remove(EVENTS_KEY)?;
    Ok(appended)
}

/// One-shot import of a single event handed off under `dashboard_event_{id}`
///
/// Returns the imported event, or `None` when no handoff is pending or the
/// payload is unparsable. The rendered time is filled in before the event is
/// routed through `add`, so a handoff for an existing id updates it. The
/// handoff key itself is left in place; re-importing the same id is an
/// idempotent update.
pub fn consume_handoff(store: &EventStore, event_id: &str) -> StoreResult<Option<CameraEvent>> {
    let key = handoff_key(event_id);
    let raw = match store.primary.read(&key)? {
        Some(raw) => raw,
        None => return Ok(None),
    };

    let mut event: CameraEvent = match serde_json::from_str(&raw) {
        Ok(event) => event,
        Err(e) => {
            eprintln!("Warning: failed to parse handoff event {}: {}", event_id, e);
            return Ok(None);
        }
    };

    event.ensure_formatted_time();
    add(store, event.clone())?;
    Ok(Some(event))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, Storage};

    fn test_store() -> (EventStore, MemoryStorage, MemoryStorage) {
        let primary = MemoryStorage::new();
        let incoming = MemoryStorage::new();
        let store = EventStore::new(Box::new(primary.clone()), Box::new(incoming.clone()));
        (store, primary, incoming)
    }

    fn event(id: &str, camera: &str, timestamp: &str) -> CameraEvent {
        CameraEvent::new(id, camera, timestamp)
    }

    #[test]
    fn test_add_appends_then_updates_in_place() {
        let (store, _, _) = test_store();

        store.add(event("a", "Cam1", "2024-01-15T10:00:00")).unwrap();
        store.add(event("b", "Cam2", "2024-01-15T11:00:00")).unwrap();
        store.add(event("c", "Cam3", "2024-01-15T12:00:00")).unwrap();
        assert_eq!(store.len(), 3);

        // Same id: replaced at the same position, size unchanged
        store.add(event("b", "Cam2-renamed", "2024-01-15T11:30:00")).unwrap();

        let events = store.events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[1].id, "b");
        assert_eq!(events[1].camera_name, "Cam2-renamed");
        assert_eq!(events[1].timestamp, "2024-01-15T11:30:00");
    }

    #[test]
    fn test_merge_existing_wins_over_incoming() {
        let (store, _, _) = test_store();
        store.add(event("1", "X", "2024-01-10T00:00:00")).unwrap();
        store.add(event("2", "Y", "2024-01-10T00:00:00")).unwrap();

        let appended = store
            .merge_incoming(vec![
                event("2", "Y2", "2024-01-11T00:00:00"),
                event("3", "Z", "2024-01-11T00:00:00"),
            ])
            .unwrap();
        assert_eq!(appended, 1);

        let events = store.events();
        assert_eq!(events.len(), 3);
        // id=2 kept its stored camera, the incoming duplicate was dropped
        assert_eq!(events[1].camera_name, "Y");
        assert_eq!(events[2].id, "3");
    }

    #[test]
    fn test_merge_is_idempotent() {
        let (store, _, _) = test_store();
        let batch = vec![
            event("a", "Cam1", "2024-01-15T10:00:00"),
            event("b", "Cam2", "2024-01-15T11:00:00"),
        ];

        assert_eq!(store.merge_incoming(batch.clone()).unwrap(), 2);
        assert_eq!(store.merge_incoming(batch).unwrap(), 0);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_merge_dedupes_within_candidates() {
        let (store, _, _) = test_store();

        let appended = store
            .merge_incoming(vec![
                event("a", "first", "2024-01-15T10:00:00"),
                event("a", "second", "2024-01-15T11:00:00"),
            ])
            .unwrap();

        assert_eq!(appended, 1);
        assert_eq!(store.events()[0].camera_name, "first");
    }

    #[test]
    fn test_sync_incoming_merges_and_clears_slot() {
        let (store, _, incoming) = test_store();
        store.add(event("a", "Cam1", "2024-01-15T10:00:00")).unwrap();

        let payload = serde_json::to_string(&vec![
            event("a", "Cam1-dup", "2024-01-15T10:05:00"),
            event("b", "Cam2", "2024-01-15T10:10:00"),
        ])
        .unwrap();
        incoming.write(EVENTS_KEY, &payload).unwrap();

        assert_eq!(store.sync_incoming().unwrap(), 1);
        assert_eq!(store.len(), 2);
        assert_eq!(incoming.read(EVENTS_KEY).unwrap(), None);

        // Slot empty now: tick is a no-op
        assert_eq!(store.sync_incoming().unwrap(), 0);
    }

    #[test]
    fn test_sync_incoming_discards_garbage_payload() {
        let (store, _, incoming) = test_store();
        incoming.write(EVENTS_KEY, "{{{ nope").unwrap();

        assert_eq!(store.sync_incoming().unwrap(), 0);
        assert!(store.is_empty());
        // Garbage was cleared so the next tick does not retry it
        assert_eq!(incoming.read(EVENTS_KEY).unwrap(), None);
    }

    #[test]
    fn test_consume_handoff_imports_and_formats() {
        let (store, primary, _) = test_store();
        primary
            .write(
                &handoff_key("evt-9"),
                r#"{"id":"evt-9","cameraName":"Gate","timestamp":"2024-01-15T09:00:00"}"#,
            )
            .unwrap();

        let imported = store.consume_handoff("evt-9").unwrap().unwrap();
        assert_eq!(imported.id, "evt-9");
        assert_eq!(imported.formatted_time.as_deref(), Some("2024-01-15 09:00:00"));
        assert_eq!(store.len(), 1);

        // Re-consuming the same handoff is an idempotent update
        assert!(store.consume_handoff("evt-9").unwrap().is_some());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_consume_handoff_absent_is_none() {
        let (store, _, _) = test_store();
        assert!(store.consume_handoff("missing").unwrap().is_none());
        assert!(store.is_empty());
    }
}
