use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::limits::{DEFAULT_OPACITY, DEFAULT_VOLUME, DEFAULT_ZOOM};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackType {
    Video,
    Audio,
}

impl TrackType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Audio => "audio",
        }
    }

    /// Persisted track types are video unless they say exactly "audio".
    pub fn coerce(raw: Option<&str>) -> Self {
        match raw {
            Some("audio") => Self::Audio,
            _ => Self::Video,
        }
    }

    pub fn accepts(&self, source: AssemblySourceType) -> bool {
        match (self, source) {
            (Self::Video, AssemblySourceType::Clip | AssemblySourceType::VideoFile) => true,
            (Self::Video, AssemblySourceType::AudioFile) => false,
            (Self::Audio, AssemblySourceType::AudioFile) => true,
            (Self::Audio, AssemblySourceType::Clip | AssemblySourceType::VideoFile) => false,
        }
    }

    /// Display name used for tracks synthesized or left unnamed, e.g. "Audio 2".
    pub fn default_name(&self, position: usize) -> String {
        match self {
            Self::Video => format!("Video {position}"),
            Self::Audio => format!("Audio {position}"),
        }
    }

    pub fn default_id(&self, position: usize) -> String {
        format!("{}-track-{position}", self.as_str())
    }
}

impl fmt::Display for TrackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssemblySourceType {
    Clip,
    VideoFile,
    AudioFile,
}

impl AssemblySourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clip => "clip",
            Self::VideoFile => "video-file",
            Self::AudioFile => "audio-file",
        }
    }

    pub fn is_file(&self) -> bool {
        !matches!(self, Self::Clip)
    }
}

impl FromStr for AssemblySourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clip" => Ok(Self::Clip),
            "video-file" => Ok(Self::VideoFile),
            "audio-file" => Ok(Self::AudioFile),
            other => Err(format!("unknown source type: {other}")),
        }
    }
}

impl fmt::Display for AssemblySourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A placed region on an assembly track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipAssemblyItem {
    pub id: String,
    pub label: String,
    pub source_type: AssemblySourceType,
    pub source_clip_id: Option<String>,
    pub source_path: Option<String>,
    pub timeline_start: f64,
    pub timeline_end: f64,
    pub source_in: f64,
    pub source_out: f64,
    pub volume: f64,
    pub opacity: f64,
    pub muted: bool,
}

impl ClipAssemblyItem {
    /// An item that plays `clip_id`'s trim window `[source_in, source_out]`
    /// starting at `timeline_start`.
    pub fn from_clip(
        id: impl Into<String>,
        label: impl Into<String>,
        clip_id: impl Into<String>,
        timeline_start: f64,
        source_in: f64,
        source_out: f64,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            source_type: AssemblySourceType::Clip,
            source_clip_id: Some(clip_id.into()),
            source_path: None,
            timeline_start,
            timeline_end: timeline_start + (source_out - source_in),
            source_in,
            source_out,
            volume: DEFAULT_VOLUME,
            opacity: DEFAULT_OPACITY,
            muted: false,
        }
    }

    pub fn from_file(
        id: impl Into<String>,
        label: impl Into<String>,
        source_type: AssemblySourceType,
        path: impl Into<String>,
        timeline_start: f64,
        timeline_end: f64,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            source_type,
            source_clip_id: None,
            source_path: Some(path.into()),
            timeline_start,
            timeline_end,
            source_in: 0.0,
            source_out: timeline_end - timeline_start,
            volume: DEFAULT_VOLUME,
            opacity: DEFAULT_OPACITY,
            muted: false,
        }
    }

    pub fn duration(&self) -> f64 {
        self.timeline_end - self.timeline_start
    }

    /// Canonical in-track ordering: `(timeline_start, timeline_end, id)`.
    pub fn timeline_order(&self, other: &Self) -> Ordering {
        self.timeline_start
            .total_cmp(&other.timeline_start)
            .then_with(|| self.timeline_end.total_cmp(&other.timeline_end))
            .then_with(|| self.id.cmp(&other.id))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipAssemblyTrack {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub track_type: TrackType,
    pub muted: bool,
    pub hidden: bool,
    pub locked: bool,
    pub items: Vec<ClipAssemblyItem>,
}

impl ClipAssemblyTrack {
    pub fn empty(track_type: TrackType, id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            track_type,
            muted: false,
            hidden: false,
            locked: false,
            items: Vec::new(),
        }
    }

    pub fn item(&self, item_id: &str) -> Option<&ClipAssemblyItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    /// End of the last item, or 0 for an empty track.
    pub fn end_time(&self) -> f64 {
        self.items
            .iter()
            .map(|item| item.timeline_end)
            .fold(0.0, f64::max)
    }
}

/// Multi-track arrangement of clip and file items used for rendered output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipAssemblyState {
    pub tracks: Vec<ClipAssemblyTrack>,
    pub active_track_id: String,
    pub active_item_id: Option<String>,
    pub zoom: f64,
    pub subtitle_overlays_enabled: bool,
}

impl ClipAssemblyState {
    /// An assembly with no tracks. Not valid on its own; the normalizer adds
    /// the fallback video and audio tracks.
    pub fn bare() -> Self {
        Self {
            tracks: Vec::new(),
            active_track_id: String::new(),
            active_item_id: None,
            zoom: DEFAULT_ZOOM,
            subtitle_overlays_enabled: true,
        }
    }

    pub fn track(&self, track_id: &str) -> Option<&ClipAssemblyTrack> {
        self.tracks.iter().find(|track| track.id == track_id)
    }

    pub fn tracks_of(&self, track_type: TrackType) -> impl Iterator<Item = &ClipAssemblyTrack> {
        self.tracks
            .iter()
            .filter(move |track| track.track_type == track_type)
    }

    /// Finds an item on any track, returning it with its owning track.
    pub fn find_item(&self, item_id: &str) -> Option<(&ClipAssemblyTrack, &ClipAssemblyItem)> {
        self.tracks
            .iter()
            .find_map(|track| track.item(item_id).map(|item| (track, item)))
    }

    pub fn item_count(&self) -> usize {
        self.tracks.iter().map(|track| track.items.len()).sum()
    }

    /// End of the latest item across all tracks.
    pub fn duration(&self) -> f64 {
        self.tracks
            .iter()
            .map(ClipAssemblyTrack::end_time)
            .fold(0.0, f64::max)
    }
}
