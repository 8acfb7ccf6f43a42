//! Updater builders for common timeline edits.
//!
//! Each function returns a closure for [`TimelineHistory::update`](crate::TimelineHistory::update).
//! Edits that name an unknown clip, track, or item hand back an unchanged
//! snapshot, which the history turns into a no-op.

use std::sync::Arc;

use reelcut_core::ids::{new_clip_id, new_item_id, new_track_id};
use reelcut_core::limits::MIN_CLIP_DURATION;
use reelcut_core::{
    ClipAssemblyItem, ClipAssemblyState, ClipAssemblyTrack, ClipSegment, ExportClipDraft,
    TimelineSnapshot, TrackType,
};

/// Mute/hide/lock flags of a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrackFlags {
    pub muted: bool,
    pub hidden: bool,
    pub locked: bool,
}

fn edit_assembly(
    snap: &TimelineSnapshot,
    edit: impl FnOnce(&mut ClipAssemblyState),
) -> TimelineSnapshot {
    let mut next = snap.clone();
    edit(Arc::make_mut(&mut next.assembly));
    next
}

pub fn add_clip(clip: ClipSegment) -> impl FnOnce(&TimelineSnapshot) -> TimelineSnapshot {
    move |snap: &TimelineSnapshot| {
        let mut next = snap.clone();
        next.active_clip_id = Some(clip.id.clone());
        next.clips.push(clip);
        next
    }
}

/// Removes the clip. Its draft and any assembly items that play it are
/// dropped by normalization.
pub fn remove_clip(
    clip_id: impl Into<String>,
) -> impl FnOnce(&TimelineSnapshot) -> TimelineSnapshot {
    let clip_id = clip_id.into();
    move |snap: &TimelineSnapshot| {
        let mut next = snap.clone();
        next.clips.retain(|clip| clip.id != clip_id);
        next
    }
}

pub fn trim_clip(
    clip_id: impl Into<String>,
    start: f64,
    end: f64,
) -> impl FnOnce(&TimelineSnapshot) -> TimelineSnapshot {
    let clip_id = clip_id.into();
    move |snap: &TimelineSnapshot| {
        let mut next = snap.clone();
        if let Some(clip) = next.clips.iter_mut().find(|clip| clip.id == clip_id) {
            clip.start = start;
            clip.end = end;
        }
        next
    }
}

/// Splits a clip at the source time `at`. The right half gets a fresh id and
/// shares the left half's export draft. A split that would leave either half
/// shorter than the minimum clip duration does nothing.
pub fn split_clip(
    clip_id: impl Into<String>,
    at: f64,
) -> impl FnOnce(&TimelineSnapshot) -> TimelineSnapshot {
    let clip_id = clip_id.into();
    move |snap: &TimelineSnapshot| {
        let mut next = snap.clone();
        let Some(index) = next.clips.iter().position(|clip| clip.id == clip_id) else {
            return next;
        };
        let left = &mut next.clips[index];
        // Negated so a NaN split point is refused too.
        if !(at - left.start >= MIN_CLIP_DURATION && left.end - at >= MIN_CLIP_DURATION) {
            return next;
        }

        let right = ClipSegment {
            id: new_clip_id(),
            start: at,
            ..left.clone()
        };
        left.end = at;

        if let Some(draft) = next.clip_drafts.get(&clip_id).cloned() {
            next.clip_drafts.insert(right.id.clone(), draft);
        }
        next.clips.push(right);
        next
    }
}

pub fn set_active_clip(
    clip_id: impl Into<String>,
) -> impl FnOnce(&TimelineSnapshot) -> TimelineSnapshot {
    let clip_id = clip_id.into();
    move |snap: &TimelineSnapshot| {
        let mut next = snap.clone();
        if next.clip(&clip_id).is_some() {
            next.active_clip_id = Some(clip_id);
        }
        next
    }
}

pub fn set_draft(
    clip_id: impl Into<String>,
    draft: ExportClipDraft,
) -> impl FnOnce(&TimelineSnapshot) -> TimelineSnapshot {
    let clip_id = clip_id.into();
    move |snap: &TimelineSnapshot| {
        let mut next = snap.clone();
        next.clip_drafts.insert(clip_id, Arc::new(draft));
        next
    }
}

pub fn add_track(track_type: TrackType) -> impl FnOnce(&TimelineSnapshot) -> TimelineSnapshot {
    move |snap: &TimelineSnapshot| {
        edit_assembly(snap, |assembly| {
            let position = assembly.tracks_of(track_type).count() + 1;
            let track = ClipAssemblyTrack::empty(
                track_type,
                new_track_id(),
                track_type.default_name(position),
            );
            assembly.active_track_id = track.id.clone();
            assembly.active_item_id = None;
            assembly.tracks.push(track);
        })
    }
}

/// Places a clip's full trim window on a video track. If the spot is taken
/// the item is pushed to the end of the item before it.
pub fn place_clip(
    track_id: impl Into<String>,
    clip_id: impl Into<String>,
    timeline_start: f64,
) -> impl FnOnce(&TimelineSnapshot) -> TimelineSnapshot {
    let track_id = track_id.into();
    let clip_id = clip_id.into();
    move |snap: &TimelineSnapshot| {
        let Some(clip) = snap.clip(&clip_id).cloned() else {
            return snap.clone();
        };
        edit_assembly(snap, |assembly| {
            let Some(track) = assembly
                .tracks
                .iter_mut()
                .find(|track| track.id == track_id && !track.locked)
            else {
                return;
            };
            let item = ClipAssemblyItem::from_clip(
                new_item_id(),
                &clip.title,
                &clip.id,
                timeline_start,
                clip.start,
                clip.end,
            );
            assembly.active_item_id = Some(item.id.clone());
            track.items.push(item);
        })
    }
}

/// Moves an item to a new start, keeping its duration. Items on locked
/// tracks stay put.
pub fn move_item(
    item_id: impl Into<String>,
    timeline_start: f64,
) -> impl FnOnce(&TimelineSnapshot) -> TimelineSnapshot {
    let item_id = item_id.into();
    move |snap: &TimelineSnapshot| {
        edit_assembly(snap, |assembly| {
            let item = assembly
                .tracks
                .iter_mut()
                .filter(|track| !track.locked)
                .flat_map(|track| track.items.iter_mut())
                .find(|item| item.id == item_id);
            if let Some(item) = item {
                let duration = item.duration();
                item.timeline_start = timeline_start;
                item.timeline_end = timeline_start + duration;
            }
        })
    }
}

pub fn set_zoom(zoom: f64) -> impl FnOnce(&TimelineSnapshot) -> TimelineSnapshot {
    move |snap: &TimelineSnapshot| edit_assembly(snap, |assembly| assembly.zoom = zoom)
}

pub fn set_subtitle_overlays(enabled: bool) -> impl FnOnce(&TimelineSnapshot) -> TimelineSnapshot {
    move |snap: &TimelineSnapshot| {
        edit_assembly(snap, |assembly| assembly.subtitle_overlays_enabled = enabled)
    }
}

pub fn set_track_flags(
    track_id: impl Into<String>,
    flags: TrackFlags,
) -> impl FnOnce(&TimelineSnapshot) -> TimelineSnapshot {
    let track_id = track_id.into();
    move |snap: &TimelineSnapshot| {
        edit_assembly(snap, |assembly| {
            if let Some(track) = assembly.tracks.iter_mut().find(|track| track.id == track_id) {
                track.muted = flags.muted;
                track.hidden = flags.hidden;
                track.locked = flags.locked;
            }
        })
    }
}
