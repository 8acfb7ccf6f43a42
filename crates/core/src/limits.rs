//! Numeric bounds shared by the normalizers and the history manager.
//!
//! All times are in seconds.

/// Shortest span a trimmed clip may cover.
pub const MIN_CLIP_DURATION: f64 = 0.35;

/// Shortest span an assembly item may occupy on the timeline.
pub const MIN_ASSEMBLY_ITEM_DURATION: f64 = 0.2;

/// Timeline ceiling (10 hours).
pub const MAX_TIMELINE_DURATION: f64 = 10.0 * 60.0 * 60.0;

pub const MIN_ZOOM: f64 = 0.03;
pub const MAX_ZOOM: f64 = 6.0;
pub const DEFAULT_ZOOM: f64 = 1.0;

pub const MAX_VOLUME: f64 = 2.0;
pub const MAX_OPACITY: f64 = 1.0;
pub const DEFAULT_VOLUME: f64 = 1.0;
pub const DEFAULT_OPACITY: f64 = 1.0;

pub const DEFAULT_MAX_HISTORY_ENTRIES: usize = 120;

/// Floor applied to any caller-supplied history cap.
pub const MIN_HISTORY_ENTRIES: usize = 10;

/// Tolerance used when comparing clip bounds for equality.
pub const TIME_EPSILON: f64 = 1e-4;

/// Slack for minimum-duration checks so that `start + MIN` round-off
/// does not trigger a second repair.
pub const DURATION_EPSILON: f64 = 1e-9;
