//! Time parsing and calendar-window helpers

use chrono::{DateTime, Days, Local, Months, NaiveDateTime, TimeZone};

use crate::types::TimeWindow;

/// Display format used when an event carries no precomputed rendering
const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse an ISO-like timestamp string into a local datetime
///
/// Accepts RFC 3339 (with offset or `Z`); strings without an offset are taken
/// as local time. Returns `None` for anything else.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Local));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .and_then(|naive| Local.from_local_datetime(&naive).single())
}

/// Render a timestamp for display
pub fn format_timestamp(ts: &DateTime<Local>) -> String {
    ts.format(DISPLAY_FORMAT).to_string()
}

/// Earliest timestamp admitted by a recency window, or `None` when the window
/// imposes no lower bound
///
/// `Week` and `Month` subtract calendar days/months from `now`, not fixed
/// durations. Month subtraction clamps to the last valid day of the target
/// month (Mar 31 minus one month is the end of February).
pub fn window_start(window: TimeWindow, now: DateTime<Local>) -> Option<DateTime<Local>> {
    match window {
        TimeWindow::All | TimeWindow::Today => None,
        TimeWindow::Week => now.checked_sub_days(Days::new(7)),
        TimeWindow::Month => now.checked_sub_months(Months::new(1)),
    }
}
