//! Equality between normalized snapshots.
//!
//! Checked cheapest first: active clip and clip bounds, then drafts by
//! pointer with a canonical-JSON fallback only for entries that were
//! replaced, then the assembly by pointer before a structural comparison.

use std::sync::Arc;

use reelcut_core::canonical::canonical_string;
use reelcut_core::limits::TIME_EPSILON;
use reelcut_core::{ClipAssemblyState, ClipDrafts, ClipSegment, TimelineSnapshot};

pub fn snapshots_equal(a: &TimelineSnapshot, b: &TimelineSnapshot) -> bool {
    a.active_clip_id == b.active_clip_id
        && clips_equal(&a.clips, &b.clips)
        && drafts_equal(&a.clip_drafts, &b.clip_drafts)
        && assemblies_equal(&a.assembly, &b.assembly)
}

fn times_match(a: f64, b: f64) -> bool {
    (a - b).abs() <= TIME_EPSILON
}

fn clips_equal(a: &[ClipSegment], b: &[ClipSegment]) -> bool {
    a.len() == b.len()
        && a.iter().zip(b).all(|(left, right)| {
            left.id == right.id
                && left.title == right.title
                && left.project_id == right.project_id
                && times_match(left.start, right.start)
                && times_match(left.end, right.end)
        })
}

fn drafts_equal(a: &ClipDrafts, b: &ClipDrafts) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut replaced = Vec::new();
    for (clip_id, left) in a {
        match b.get(clip_id) {
            None => return false,
            Some(right) if Arc::ptr_eq(left, right) => {}
            Some(right) => replaced.push((left, right)),
        }
    }
    replaced
        .into_iter()
        .all(|(left, right)| canonical_string(left) == canonical_string(right))
}

fn assemblies_equal(a: &Arc<ClipAssemblyState>, b: &Arc<ClipAssemblyState>) -> bool {
    Arc::ptr_eq(a, b) || a == b
}
