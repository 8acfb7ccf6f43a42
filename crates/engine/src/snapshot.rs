use std::collections::BTreeSet;

use reelcut_core::{ClipDrafts, ClipSegment, SnapshotCandidate, SnapshotSource, TimelineSnapshot};

use crate::assembly::normalize_shared_assembly;
use crate::clip::normalize_clips;

/// Normalizes a whole snapshot: clips, active clip, drafts, and assembly.
pub fn normalize_snapshot(source: impl SnapshotSource) -> TimelineSnapshot {
    normalize_candidate(source.into_candidate())
}

pub fn normalize_candidate(candidate: SnapshotCandidate) -> TimelineSnapshot {
    let clips = normalize_clips(&candidate.clips);
    let active_clip_id = resolve_active_clip(candidate.active_clip_id, &clips);
    let clip_drafts = prune_drafts(candidate.clip_drafts, &clips);
    let assembly = normalize_shared_assembly(candidate.assembly.as_ref(), &clips);

    TimelineSnapshot {
        clips,
        active_clip_id,
        clip_drafts,
        assembly,
    }
}

fn resolve_active_clip(active: Option<String>, clips: &[ClipSegment]) -> Option<String> {
    match active {
        Some(id) if clips.iter().any(|clip| clip.id == id) => Some(id),
        _ => clips.first().map(|clip| clip.id.clone()),
    }
}

fn prune_drafts(drafts: ClipDrafts, clips: &[ClipSegment]) -> ClipDrafts {
    let clip_ids: BTreeSet<&str> = clips.iter().map(|clip| clip.id.as_str()).collect();
    drafts
        .into_iter()
        .filter(|(clip_id, _)| {
            let keep = clip_ids.contains(clip_id.as_str());
            if !keep {
                tracing::trace!(clip = %clip_id, "Pruned draft for missing clip");
            }
            keep
        })
        .collect()
}
