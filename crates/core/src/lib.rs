pub mod assembly;
pub mod canonical;
pub mod clip;
pub mod error;
pub mod ids;
pub mod limits;
pub mod raw;
pub mod snapshot;

pub use assembly::{
    AssemblySourceType, ClipAssemblyItem, ClipAssemblyState, ClipAssemblyTrack, TrackType,
};
pub use clip::ClipSegment;
pub use error::CoreError;
pub use raw::RawTimelineSnapshot;
pub use snapshot::{
    ClipDrafts, ExportClipDraft, SnapshotCandidate, SnapshotSource, TimelineSnapshot,
};
