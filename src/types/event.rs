//! Event record type for the dashboard

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::utils::time::{format_timestamp, parse_timestamp};

/// One camera detection record
///
/// `id` is the deduplication key and is unique within the event store.
/// `timestamp` is the authoritative time value; `formatted_time` is a derived
/// rendering that is regenerated on demand when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraEvent {
    pub id: String,
    #[serde(rename = "cameraName")]
    pub camera_name: String,
    /// ISO-like timestamp string, used for sorting and time-window filtering
    pub timestamp: String,
    #[serde(
        rename = "formattedTime",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub formatted_time: Option<String>,
    /// Opaque image payload (blob-encoded); never interpreted by this crate
    #[serde(rename = "imageData", default, skip_serializing_if = "String::is_empty")]
    pub image_data: String,
}

impl CameraEvent {
    /// Create a new event without an image payload
    pub fn new(
        id: impl Into<String>,
        camera_name: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            camera_name: camera_name.into(),
            timestamp: timestamp.into(),
            formatted_time: None,
            image_data: String::new(),
        }
    }

    /// Create a new event with an image payload
    pub fn with_image(
        id: impl Into<String>,
        camera_name: impl Into<String>,
        timestamp: impl Into<String>,
        image_data: impl Into<String>,
    ) -> Self {
        Self {
            image_data: image_data.into(),
            ..Self::new(id, camera_name, timestamp)
        }
    }

    /// Parse the authoritative timestamp, `None` when it is not a valid time
    pub fn parsed_timestamp(&self) -> Option<DateTime<Local>> {
        parse_timestamp(&self.timestamp)
    }

    /// Human-readable time: the precomputed rendering when present, otherwise
    /// regenerated from `timestamp` (empty when that fails to parse)
    pub fn rendered_time(&self) -> String {
        match &self.formatted_time {
            Some(formatted) => formatted.clone(),
            None => self
                .parsed_timestamp()
                .map(|ts| format_timestamp(&ts))
                .unwrap_or_default(),
        }
    }

    /// Fill in `formatted_time` from `timestamp` if it is missing
    pub fn ensure_formatted_time(&mut self) {
        if self.formatted_time.is_none() {
            if let Some(ts) = self.parsed_timestamp() {
                self.formatted_time = Some(format_timestamp(&ts));
            }
        }
    }
}
