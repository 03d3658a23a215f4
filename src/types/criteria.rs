//! Filter criteria and view types

use serde::{Deserialize, Serialize};

use super::CameraEvent;

/// Named recency bucket used to filter by event age
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    /// No time constraint
    #[default]
    All,
    /// Local calendar date equals today's
    Today,
    /// Not earlier than now minus 7 calendar days
    Week,
    /// Not earlier than now minus 1 calendar month
    Month,
}

/// Filter inputs as raised by the dashboard controls
///
/// All three criteria are AND-ed: an event is visible iff it passes the
/// camera, time-window and search predicates.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    /// Case-insensitive substring match against camera name + rendered time;
    /// empty means no constraint
    pub search: String,
    /// Exact camera name, `None` for the "all cameras" sentinel
    pub camera: Option<String>,
    pub window: TimeWindow,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_camera(mut self, camera: impl Into<String>) -> Self {
        self.camera = Some(camera.into());
        self
    }

    pub fn with_window(mut self, window: TimeWindow) -> Self {
        self.window = window;
        self
    }
}

/// Aggregate counts over the full (unfiltered) collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    /// Size of the full collection, regardless of active filters
    #[serde(rename = "totalCount")]
    pub total_count: usize,
    /// Events whose local calendar date equals today's, regardless of filters
    #[serde(rename = "todayCount")]
    pub today_count: usize,
}

/// Output of the filter engine: the visible events in render order plus stats
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    /// Visible events, sorted by timestamp descending (newest first)
    pub visible: Vec<CameraEvent>,
    pub stats: DashboardStats,
}
