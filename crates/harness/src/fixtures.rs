use reelcut_core::{
    AssemblySourceType, ClipAssemblyItem, ClipAssemblyState, ClipAssemblyTrack, ClipSegment,
    TrackType,
};

pub fn clip(id: &str, start: f64, end: f64) -> ClipSegment {
    ClipSegment::new(id, format!("Clip {id}"), start, end, "project-1")
}

/// A clip item spanning `[start, end]` on the timeline with a matching
/// source window from 0.
pub fn clip_item(id: &str, clip_id: &str, start: f64, end: f64) -> ClipAssemblyItem {
    let mut item = ClipAssemblyItem::from_clip(id, id, clip_id, start, 0.0, end - start);
    item.timeline_end = end;
    item
}

pub fn video_file(id: &str, start: f64, end: f64) -> ClipAssemblyItem {
    let path = format!("/media/{id}.mp4");
    ClipAssemblyItem::from_file(id, id, AssemblySourceType::VideoFile, path, start, end)
}

pub fn audio_file(id: &str, start: f64, end: f64) -> ClipAssemblyItem {
    let path = format!("/media/{id}.wav");
    ClipAssemblyItem::from_file(id, id, AssemblySourceType::AudioFile, path, start, end)
}

pub fn track(track_type: TrackType, id: &str, items: Vec<ClipAssemblyItem>) -> ClipAssemblyTrack {
    ClipAssemblyTrack {
        items,
        ..ClipAssemblyTrack::empty(track_type, id, "")
    }
}

pub fn assembly(tracks: Vec<ClipAssemblyTrack>) -> ClipAssemblyState {
    ClipAssemblyState {
        tracks,
        ..ClipAssemblyState::bare()
    }
}
