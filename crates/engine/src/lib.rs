//! Timeline edit-history engine.
//!
//! - [`clip`] and [`assembly`] repair individual clips and the multi-track
//!   assembly.
//! - [`snapshot`] composes them over a whole [`TimelineSnapshot`].
//! - [`equality`] decides whether a normalized candidate differs from the present.
//! - [`history`] owns the bounded undo/redo stacks.
//! - [`edits`] builds updaters for common UI edits.
//!
//! None of these operations fail: malformed input is repaired, never rejected.

pub mod assembly;
pub mod clip;
pub mod edits;
pub mod equality;
pub mod history;
pub mod options;
pub mod snapshot;

pub use assembly::{build_default_assembly, normalize_assembly};
pub use clip::{normalize_clip, normalize_clips};
pub use equality::snapshots_equal;
pub use history::{HistoryState, TimelineHistory};
pub use options::{HistoryConfig, UpdateOptions};
pub use snapshot::{normalize_candidate, normalize_snapshot};

pub use reelcut_core::TimelineSnapshot;
