//! Data types for the camera event dashboard
//!
//! This module contains the core data structures used throughout the crate.

mod criteria;
mod event;

pub use criteria::{DashboardStats, DashboardView, FilterCriteria, TimeWindow};
pub use event::CameraEvent;
