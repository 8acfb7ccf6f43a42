//! Assembly normalization.
//!
//! Repairs a multi-track assembly against the authoritative clip list:
//! incompatible or dangling items are dropped, numeric fields are clamped,
//! items within a track are sorted and pushed apart so they never overlap,
//! and the track list always ends up with at least one video and one audio
//! track.

use std::collections::BTreeSet;
use std::sync::Arc;

use reelcut_core::limits::{
    DEFAULT_OPACITY, DEFAULT_VOLUME, DEFAULT_ZOOM, DURATION_EPSILON, MAX_OPACITY,
    MAX_TIMELINE_DURATION, MAX_VOLUME, MAX_ZOOM, MIN_ASSEMBLY_ITEM_DURATION, MIN_ZOOM,
};
use reelcut_core::{
    AssemblySourceType, ClipAssemblyItem, ClipAssemblyState, ClipAssemblyTrack, ClipSegment,
    TrackType,
};

use crate::clip::{clamp_time, enforce_span, normalize_clips};

fn clamp_or(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(min, max) + 0.0
    } else {
        fallback
    }
}

/// Lays the clips back to back from 0 on a single video track, with one empty
/// audio track beside it.
pub fn build_default_assembly(clips: &[ClipSegment]) -> ClipAssemblyState {
    let video_id = TrackType::Video.default_id(1);
    let mut video =
        ClipAssemblyTrack::empty(TrackType::Video, &video_id, TrackType::Video.default_name(1));
    let audio = ClipAssemblyTrack::empty(
        TrackType::Audio,
        TrackType::Audio.default_id(1),
        TrackType::Audio.default_name(1),
    );

    let mut cursor = 0.0;
    for clip in normalize_clips(clips) {
        let item = ClipAssemblyItem::from_clip(
            format!("assembly-{}", clip.id),
            &clip.title,
            &clip.id,
            cursor,
            clip.start,
            clip.end,
        );
        cursor = item.timeline_end;
        video.items.push(item);
    }

    let active_item_id = video.items.first().map(|item| item.id.clone());
    tracing::trace!(items = video.items.len(), "Built default assembly");

    ClipAssemblyState {
        tracks: vec![video, audio],
        active_track_id: video_id,
        active_item_id,
        zoom: DEFAULT_ZOOM,
        subtitle_overlays_enabled: true,
    }
}

/// Normalizes `input` against `clips`. `None` means there is no track list
/// at all, in which case the default assembly is derived from the clips.
pub fn normalize_assembly(
    input: Option<&ClipAssemblyState>,
    clips: &[ClipSegment],
) -> ClipAssemblyState {
    let default_assembly;
    let input = match input {
        Some(input) => input,
        None => {
            default_assembly = build_default_assembly(clips);
            &default_assembly
        }
    };

    let clip_ids: BTreeSet<&str> = clips.iter().map(|clip| clip.id.as_str()).collect();

    let mut video_slots = Vec::new();
    let mut audio_slots = Vec::new();
    for track in &input.tracks {
        let bucket = match track.track_type {
            TrackType::Video => &mut video_slots,
            TrackType::Audio => &mut audio_slots,
        };
        let position = bucket.len() + 1;
        bucket.push(TrackSlot::Input(track, position));
    }
    for (bucket, track_type) in [
        (&mut video_slots, TrackType::Video),
        (&mut audio_slots, TrackType::Audio),
    ] {
        if bucket.is_empty() {
            tracing::trace!(%track_type, "Synthesized fallback track");
            bucket.push(TrackSlot::Fallback(track_type));
        }
    }

    let mut slots = video_slots;
    slots.extend(audio_slots);

    // Ids are final before items are visited: blank item ids embed them.
    let mut track_ids: Vec<String> = slots.iter().map(TrackSlot::initial_id).collect();
    dedupe_track_ids(&mut track_ids);

    let tracks: Vec<ClipAssemblyTrack> = slots
        .into_iter()
        .zip(track_ids)
        .map(|(slot, id)| match slot {
            TrackSlot::Input(track, position) => normalize_track(track, id, position, &clip_ids),
            TrackSlot::Fallback(track_type) => {
                ClipAssemblyTrack::empty(track_type, id, track_type.default_name(1))
            }
        })
        .collect();

    let (active_track_id, active_item_id) = resolve_active(
        &tracks,
        &input.active_track_id,
        input.active_item_id.as_deref(),
    );

    ClipAssemblyState {
        tracks,
        active_track_id,
        active_item_id,
        zoom: clamp_or(input.zoom, MIN_ZOOM, MAX_ZOOM, DEFAULT_ZOOM),
        subtitle_overlays_enabled: input.subtitle_overlays_enabled,
    }
}

/// Like [`normalize_assembly`], but hands back the input `Arc` when
/// normalization changed nothing.
pub fn normalize_shared_assembly(
    input: Option<&Arc<ClipAssemblyState>>,
    clips: &[ClipSegment],
) -> Arc<ClipAssemblyState> {
    let normalized = normalize_assembly(input.map(Arc::as_ref), clips);
    match input {
        Some(shared) if **shared == normalized => Arc::clone(shared),
        _ => Arc::new(normalized),
    }
}

/// A track in output order, before its items are normalized.
enum TrackSlot<'a> {
    Input(&'a ClipAssemblyTrack, usize),
    Fallback(TrackType),
}

impl TrackSlot<'_> {
    fn initial_id(&self) -> String {
        match self {
            Self::Input(track, position) if track.id.trim().is_empty() => {
                track.track_type.default_id(*position)
            }
            Self::Input(track, _) => track.id.clone(),
            Self::Fallback(track_type) => track_type.default_id(1),
        }
    }
}

fn normalize_track(
    track: &ClipAssemblyTrack,
    id: String,
    position: usize,
    clip_ids: &BTreeSet<&str>,
) -> ClipAssemblyTrack {
    let name = if track.name.trim().is_empty() {
        track.track_type.default_name(position)
    } else {
        track.name.clone()
    };

    let mut items: Vec<ClipAssemblyItem> = track
        .items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| normalize_item(item, track.track_type, &id, index, clip_ids))
        .collect();
    items.sort_by(ClipAssemblyItem::timeline_order);
    let items = resolve_overlaps(items);

    ClipAssemblyTrack {
        id,
        name,
        track_type: track.track_type,
        muted: track.muted,
        hidden: track.hidden,
        locked: track.locked,
        items,
    }
}

fn normalize_item(
    item: &ClipAssemblyItem,
    track_type: TrackType,
    track_id: &str,
    index: usize,
    clip_ids: &BTreeSet<&str>,
) -> Option<ClipAssemblyItem> {
    if !track_type.accepts(item.source_type) {
        tracing::trace!(
            item = %item.id,
            source = %item.source_type,
            %track_type,
            "Dropped incompatible item"
        );
        return None;
    }

    let (source_clip_id, source_path) = match item.source_type {
        AssemblySourceType::Clip => match item.source_clip_id.as_deref() {
            Some(clip_id) if clip_ids.contains(clip_id) => (Some(clip_id.to_string()), None),
            _ => {
                tracing::trace!(item = %item.id, "Dropped item referencing missing clip");
                return None;
            }
        },
        AssemblySourceType::VideoFile | AssemblySourceType::AudioFile => {
            (None, item.source_path.clone())
        }
    };

    let start = clamp_time(item.timeline_start);
    let end = if item.timeline_end.is_finite() {
        clamp_time(item.timeline_end)
    } else {
        (start + MIN_ASSEMBLY_ITEM_DURATION).min(MAX_TIMELINE_DURATION)
    };
    let (timeline_start, timeline_end) = enforce_span(start, end, MIN_ASSEMBLY_ITEM_DURATION);

    let source_in = clamp_time(item.source_in);
    let source_out = if item.source_out.is_finite() {
        item.source_out.clamp(source_in, MAX_TIMELINE_DURATION)
    } else {
        (source_in + (timeline_end - timeline_start)).min(MAX_TIMELINE_DURATION)
    };

    let id = if item.id.trim().is_empty() {
        format!("{track_id}-item-{}", index + 1)
    } else {
        item.id.clone()
    };

    Some(ClipAssemblyItem {
        id,
        label: item.label.clone(),
        source_type: item.source_type,
        source_clip_id,
        source_path,
        timeline_start,
        timeline_end,
        source_in,
        source_out,
        volume: clamp_or(item.volume, 0.0, MAX_VOLUME, DEFAULT_VOLUME),
        opacity: clamp_or(item.opacity, 0.0, MAX_OPACITY, DEFAULT_OPACITY),
        muted: item.muted,
    })
}

/// Walks sorted items left to right, pushing each one to start no earlier
/// than the previous end while keeping its duration. Items squeezed below the
/// minimum duration by the ceiling are dropped.
fn resolve_overlaps(items: Vec<ClipAssemblyItem>) -> Vec<ClipAssemblyItem> {
    let mut resolved: Vec<ClipAssemblyItem> = Vec::with_capacity(items.len());
    let mut previous_end = 0.0;
    for mut item in items {
        if item.timeline_start < previous_end {
            let duration = item.duration();
            item.timeline_start = previous_end;
            item.timeline_end = previous_end + duration;
        }
        item.timeline_start = item.timeline_start.min(MAX_TIMELINE_DURATION);
        item.timeline_end = item.timeline_end.min(MAX_TIMELINE_DURATION);

        if item.duration() < MIN_ASSEMBLY_ITEM_DURATION - DURATION_EPSILON {
            tracing::trace!(item = %item.id, "Dropped item pushed past the timeline ceiling");
            continue;
        }
        previous_end = item.timeline_end;
        resolved.push(item);
    }
    resolved
}

fn dedupe_track_ids(track_ids: &mut [String]) {
    let mut seen: BTreeSet<String> = BTreeSet::new();
    for track_id in track_ids.iter_mut() {
        if seen.contains(track_id.as_str()) {
            let mut suffix = 2;
            while seen.contains(&format!("{track_id}-{suffix}")) {
                suffix += 1;
            }
            let renamed = format!("{track_id}-{suffix}");
            tracing::trace!(from = %track_id, to = %renamed, "Renamed duplicate track id");
            *track_id = renamed;
        }
        seen.insert(track_id.clone());
    }
}

/// Keeps the active track and item when they still exist. A dangling track
/// falls back to the active item's owner, then to the first video track; a
/// dangling item falls back to the first item of the active track.
fn resolve_active(
    tracks: &[ClipAssemblyTrack],
    active_track_id: &str,
    active_item_id: Option<&str>,
) -> (String, Option<String>) {
    let item_owner = active_item_id.and_then(|item_id| {
        tracks
            .iter()
            .find(|track| track.item(item_id).is_some())
            .map(|track| track.id.as_str())
    });

    let track_id = if tracks.iter().any(|track| track.id == active_track_id) {
        active_track_id
    } else {
        item_owner
            .or_else(|| {
                tracks
                    .iter()
                    .find(|track| track.track_type == TrackType::Video)
                    .map(|track| track.id.as_str())
            })
            .unwrap_or_default()
    };

    let item_id = match (item_owner, active_item_id) {
        (Some(_), Some(item_id)) => Some(item_id.to_string()),
        _ => tracks
            .iter()
            .find(|track| track.id == track_id)
            .and_then(|track| track.items.first())
            .map(|item| item.id.clone()),
    };

    (track_id.to_string(), item_id)
}
