use reelcut_core::limits::{
    MAX_OPACITY, MAX_TIMELINE_DURATION, MAX_VOLUME, MAX_ZOOM, MIN_ASSEMBLY_ITEM_DURATION,
    MIN_CLIP_DURATION, MIN_ZOOM,
};
use reelcut_core::{TimelineSnapshot, TrackType};

/// Round-off allowance for duration checks.
const SLACK: f64 = 1e-9;

/// Lists every structural invariant `snap` violates. Empty means valid.
pub fn check_invariants(snap: &TimelineSnapshot) -> Vec<String> {
    let mut violations = Vec::new();

    for clip in &snap.clips {
        if clip.duration() < MIN_CLIP_DURATION - SLACK {
            violations.push(format!("clip {} shorter than minimum: {}", clip.id, clip.duration()));
        }
        if clip.start < 0.0 || clip.end > MAX_TIMELINE_DURATION {
            violations.push(format!("clip {} out of timeline bounds", clip.id));
        }
    }
    for pair in snap.clips.windows(2) {
        if pair[0].timeline_order(&pair[1]).is_gt() {
            violations.push(format!("clips {} and {} out of order", pair[0].id, pair[1].id));
        }
    }

    if let Some(active) = &snap.active_clip_id
        && snap.clip(active).is_none()
    {
        violations.push(format!("active clip {active} does not exist"));
    }
    for clip_id in snap.clip_drafts.keys() {
        if snap.clip(clip_id).is_none() {
            violations.push(format!("draft for missing clip {clip_id}"));
        }
    }

    let assembly = &snap.assembly;
    if assembly.tracks_of(TrackType::Video).next().is_none() {
        violations.push("no video track".to_string());
    }
    if assembly.tracks_of(TrackType::Audio).next().is_none() {
        violations.push("no audio track".to_string());
    }
    let first_audio = assembly
        .tracks
        .iter()
        .position(|track| track.track_type == TrackType::Audio)
        .unwrap_or(assembly.tracks.len());
    if assembly.tracks[first_audio..]
        .iter()
        .any(|track| track.track_type == TrackType::Video)
    {
        violations.push("video track after audio track".to_string());
    }
    for (i, track) in assembly.tracks.iter().enumerate() {
        if assembly.tracks[..i].iter().any(|other| other.id == track.id) {
            violations.push(format!("duplicate track id {}", track.id));
        }
    }
    if assembly.track(&assembly.active_track_id).is_none() {
        violations.push(format!("active track {} does not exist", assembly.active_track_id));
    }
    if let Some(item_id) = &assembly.active_item_id
        && assembly.find_item(item_id).is_none()
    {
        violations.push(format!("active item {item_id} does not exist"));
    }
    if !(MIN_ZOOM..=MAX_ZOOM).contains(&assembly.zoom) {
        violations.push(format!("zoom {} out of range", assembly.zoom));
    }

    for track in &assembly.tracks {
        for item in &track.items {
            if !track.track_type.accepts(item.source_type) {
                violations.push(format!(
                    "item {} incompatible with {} track",
                    item.id, track.track_type
                ));
            }
            if item.source_type.is_file() == item.source_clip_id.is_some() {
                violations.push(format!("item {} has a mismatched clip link", item.id));
            }
            if let Some(clip_id) = &item.source_clip_id
                && snap.clip(clip_id).is_none()
            {
                violations.push(format!("item {} references missing clip {clip_id}", item.id));
            }
            if item.duration() < MIN_ASSEMBLY_ITEM_DURATION - SLACK {
                violations.push(format!(
                    "item {} shorter than minimum: {}",
                    item.id,
                    item.duration()
                ));
            }
            if item.timeline_start < 0.0 || item.timeline_end > MAX_TIMELINE_DURATION {
                violations.push(format!("item {} out of timeline bounds", item.id));
            }
            if item.source_in < 0.0 || item.source_out < item.source_in {
                violations.push(format!("item {} has an inverted source window", item.id));
            }
            if !(0.0..=MAX_VOLUME).contains(&item.volume)
                || !(0.0..=MAX_OPACITY).contains(&item.opacity)
            {
                violations.push(format!("item {} has out-of-range mix levels", item.id));
            }
        }
        for pair in track.items.windows(2) {
            if pair[1].timeline_start < pair[0].timeline_end {
                violations.push(format!("items {} and {} overlap", pair[0].id, pair[1].id));
            }
        }
    }

    violations
}
