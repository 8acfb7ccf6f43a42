use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::assembly::ClipAssemblyState;
use crate::canonical::canonical_string;
use crate::clip::ClipSegment;
use crate::error::CoreError;

/// Per-clip export configuration. Opaque to the timeline engine.
pub type ExportClipDraft = serde_json::Value;

/// Drafts keyed by clip id. Entries are shared between snapshots until
/// they are replaced.
pub type ClipDrafts = BTreeMap<String, Arc<ExportClipDraft>>;

/// One immutable state of the timeline: the unit of undo history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineSnapshot {
    pub clips: Vec<ClipSegment>,
    pub active_clip_id: Option<String>,
    pub clip_drafts: ClipDrafts,
    pub assembly: Arc<ClipAssemblyState>,
}

impl TimelineSnapshot {
    pub fn clip(&self, clip_id: &str) -> Option<&ClipSegment> {
        self.clips.iter().find(|clip| clip.id == clip_id)
    }

    pub fn clip_ids(&self) -> BTreeSet<&str> {
        self.clips.iter().map(|clip| clip.id.as_str()).collect()
    }

    pub fn active_clip(&self) -> Option<&ClipSegment> {
        self.active_clip_id.as_deref().and_then(|id| self.clip(id))
    }

    pub fn draft(&self, clip_id: &str) -> Option<&ExportClipDraft> {
        self.clip_drafts.get(clip_id).map(Arc::as_ref)
    }

    pub fn to_value(&self) -> Result<serde_json::Value, CoreError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Serializes to the persisted session shape.
    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Content hash over the canonical JSON form. Two snapshots with the same
    /// fingerprint persist to the same bytes, so autosave can skip the write.
    pub fn fingerprint(&self) -> Result<blake3::Hash, CoreError> {
        let canonical = canonical_string(&self.to_value()?);
        Ok(blake3::hash(canonical.as_bytes()))
    }
}

/// A not-yet-normalized snapshot. `assembly: None` means the input had no
/// track list at all and a default assembly should be derived from the clips.
#[derive(Debug, Clone, Default)]
pub struct SnapshotCandidate {
    pub clips: Vec<ClipSegment>,
    pub active_clip_id: Option<String>,
    pub clip_drafts: ClipDrafts,
    pub assembly: Option<Arc<ClipAssemblyState>>,
}

impl SnapshotCandidate {
    pub fn with_clips(clips: Vec<ClipSegment>) -> Self {
        Self {
            clips,
            ..Self::default()
        }
    }
}

/// Anything the history manager can normalize into a snapshot.
pub trait SnapshotSource {
    fn into_candidate(self) -> SnapshotCandidate;
}

impl SnapshotSource for SnapshotCandidate {
    fn into_candidate(self) -> SnapshotCandidate {
        self
    }
}

impl SnapshotSource for TimelineSnapshot {
    fn into_candidate(self) -> SnapshotCandidate {
        SnapshotCandidate {
            clips: self.clips,
            active_clip_id: self.active_clip_id,
            clip_drafts: self.clip_drafts,
            assembly: Some(self.assembly),
        }
    }
}

impl SnapshotSource for &TimelineSnapshot {
    fn into_candidate(self) -> SnapshotCandidate {
        self.clone().into_candidate()
    }
}
