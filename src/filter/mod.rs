//! Filter Engine - derives the visible view from the full collection
//!
//! Pure functions: the wall clock is injected as `now`, so the window
//! predicates can be tested against a fixed date. Uses parallel iteration
//! for large collections and a sequential scan below the threshold.

use chrono::{DateTime, Local};
use rayon::prelude::*;

use crate::types::{CameraEvent, DashboardStats, DashboardView, FilterCriteria, TimeWindow};
use crate::utils::time::window_start;

/// Threshold for using parallel filtering (event count)
const PARALLEL_FILTER_THRESHOLD: usize = 1000;

/// Compute the visible, ordered subset of `events` plus aggregate stats
///
/// The camera, time-window and search predicates are AND-ed. Visible events
/// are sorted by timestamp descending; events whose timestamp fails to parse
/// sort last. The stats are computed over the full collection, independent
/// of the active criteria.
pub fn compute_view(
    events: &[CameraEvent],
    criteria: &FilterCriteria,
    now: DateTime<Local>,
) -> DashboardView {
    let search = criteria.search.to_lowercase();

    let mut visible: Vec<CameraEvent> = if events.len() > PARALLEL_FILTER_THRESHOLD {
        events
            .par_iter()
            .filter(|e| matches(e, criteria, &search, now))
            .cloned()
            .collect()
    } else {
        events
            .iter()
            .filter(|e| matches(e, criteria, &search, now))
            .cloned()
            .collect()
    };

    // Newest first; None (unparsable) compares lowest and lands at the end
    visible.sort_by(|a, b| b.parsed_timestamp().cmp(&a.parsed_timestamp()));

    DashboardView {
        visible,
        stats: compute_stats(events, now),
    }
}

/// Counts over the full collection, unaffected by any active filter
pub fn compute_stats(events: &[CameraEvent], now: DateTime<Local>) -> DashboardStats {
    let today = now.date_naive();
    let today_count = events
        .iter()
        .filter(|e| {
            e.parsed_timestamp()
                .map(|ts| ts.date_naive() == today)
                .unwrap_or(false)
        })
        .count();

    DashboardStats {
        total_count: events.len(),
        today_count,
    }
}

fn matches(
    event: &CameraEvent,
    criteria: &FilterCriteria,
    search_lower: &str,
    now: DateTime<Local>,
) -> bool {
    if let Some(camera) = &criteria.camera {
        if event.camera_name != *camera {
            return false;
        }
    }

    if !in_window(event, criteria.window, now) {
        return false;
    }

    if !search_lower.is_empty() {
        let haystack = format!("{} {}", event.camera_name, event.rendered_time()).to_lowercase();
        if !haystack.contains(search_lower) {
            return false;
        }
    }

    true
}

fn in_window(event: &CameraEvent, window: TimeWindow, now: DateTime<Local>) -> bool {
    if window == TimeWindow::All {
        return true;
    }

    let Some(ts) = event.parsed_timestamp() else {
        // Unparsable timestamps never match a bounded window
        return false;
    };

    match window {
        TimeWindow::All => true,
        TimeWindow::Today => ts.date_naive() == now.date_naive(),
        TimeWindow::Week | TimeWindow::Month => match window_start(window, now) {
            Some(start) => ts >= start,
            None => true,
        },
    }
}
