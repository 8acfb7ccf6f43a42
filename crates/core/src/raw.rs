//! Lenient mirror of the persisted session shape.
//!
//! Session files may come from an older schema or a partial write. Every
//! field here is optional and each one is parsed independently: a value of
//! the wrong JSON type is treated as missing instead of failing the whole
//! document. Lifting into a [`SnapshotCandidate`] fills the gaps with the
//! defaults the normalizer expects.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::assembly::{
    AssemblySourceType, ClipAssemblyItem, ClipAssemblyState, ClipAssemblyTrack, TrackType,
};
use crate::clip::ClipSegment;
use crate::error::CoreError;
use crate::limits::{DEFAULT_OPACITY, DEFAULT_VOLUME, DEFAULT_ZOOM};
use crate::snapshot::{ClipDrafts, SnapshotCandidate, SnapshotSource};

mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        })
    }

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    pub fn boolean<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Bool(b) => Some(b),
            _ => None,
        })
    }

    /// A list whose unparseable elements are skipped.
    pub fn list<'de, D, T>(d: D) -> Result<Option<Vec<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match Value::deserialize(d)? {
            Value::Array(items) => Some(
                items
                    .into_iter()
                    .filter(Value::is_object)
                    .filter_map(|item| serde_json::from_value(item).ok())
                    .collect(),
            ),
            _ => None,
        })
    }

    pub fn object<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match Value::deserialize(d)? {
            value @ Value::Object(_) => serde_json::from_value(value).ok(),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTimelineSnapshot {
    #[serde(deserialize_with = "lenient::list")]
    pub clips: Option<Vec<RawClipSegment>>,
    #[serde(deserialize_with = "lenient::text")]
    pub active_clip_id: Option<String>,
    #[serde(deserialize_with = "lenient::object")]
    pub clip_drafts: Option<BTreeMap<String, Value>>,
    #[serde(deserialize_with = "lenient::object")]
    pub assembly: Option<RawClipAssemblyState>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawClipSegment {
    #[serde(deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub start: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub end: Option<f64>,
    #[serde(deserialize_with = "lenient::text")]
    pub project_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawClipAssemblyState {
    #[serde(deserialize_with = "lenient::list")]
    pub tracks: Option<Vec<RawClipAssemblyTrack>>,
    #[serde(deserialize_with = "lenient::text")]
    pub active_track_id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub active_item_id: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub zoom: Option<f64>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub subtitle_overlays_enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawClipAssemblyTrack {
    #[serde(deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(rename = "type", deserialize_with = "lenient::text")]
    pub track_type: Option<String>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub muted: Option<bool>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub hidden: Option<bool>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub locked: Option<bool>,
    #[serde(deserialize_with = "lenient::list")]
    pub items: Option<Vec<RawClipAssemblyItem>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawClipAssemblyItem {
    #[serde(deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub label: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub source_type: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub source_clip_id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub source_path: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub timeline_start: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub timeline_end: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub source_in: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub source_out: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub volume: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub opacity: Option<f64>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub muted: Option<bool>,
}

impl RawTimelineSnapshot {
    /// Parses a persisted session document. Only text that is not JSON at all
    /// is an error; any other shape degrades to whatever fields are usable.
    pub fn from_json(text: &str) -> Result<Self, CoreError> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_value(value))
    }

    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            _ => Self::default(),
        }
    }
}

impl RawClipSegment {
    /// Clips without an id cannot be referenced and are discarded.
    fn into_clip(self) -> Option<ClipSegment> {
        let id = self.id.filter(|id| !id.is_empty())?;
        Some(ClipSegment {
            id,
            title: self.title.unwrap_or_default(),
            start: self.start.unwrap_or(f64::NAN),
            end: self.end.unwrap_or(f64::NAN),
            project_id: self.project_id.unwrap_or_default(),
        })
    }
}

impl RawClipAssemblyItem {
    fn into_item(self, track_type: TrackType) -> ClipAssemblyItem {
        let source_type = self
            .source_type
            .as_deref()
            .and_then(|raw| raw.parse::<AssemblySourceType>().ok())
            .unwrap_or(match track_type {
                TrackType::Audio => AssemblySourceType::AudioFile,
                TrackType::Video if self.source_clip_id.is_some() => AssemblySourceType::Clip,
                TrackType::Video => AssemblySourceType::VideoFile,
            });
        ClipAssemblyItem {
            id: self.id.unwrap_or_default(),
            label: self.label.unwrap_or_default(),
            source_type,
            source_clip_id: self.source_clip_id,
            source_path: self.source_path,
            timeline_start: self.timeline_start.unwrap_or(f64::NAN),
            timeline_end: self.timeline_end.unwrap_or(f64::NAN),
            source_in: self.source_in.unwrap_or(0.0),
            source_out: self.source_out.unwrap_or(f64::NAN),
            volume: self.volume.unwrap_or(DEFAULT_VOLUME),
            opacity: self.opacity.unwrap_or(DEFAULT_OPACITY),
            muted: self.muted.unwrap_or(false),
        }
    }
}

impl RawClipAssemblyTrack {
    fn into_track(self) -> ClipAssemblyTrack {
        let track_type = TrackType::coerce(self.track_type.as_deref());
        ClipAssemblyTrack {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            track_type,
            muted: self.muted.unwrap_or(false),
            hidden: self.hidden.unwrap_or(false),
            locked: self.locked.unwrap_or(false),
            items: self
                .items
                .unwrap_or_default()
                .into_iter()
                .map(|item| item.into_item(track_type))
                .collect(),
        }
    }
}

impl RawClipAssemblyState {
    /// `None` when there is no track list to repair.
    fn into_assembly(self) -> Option<ClipAssemblyState> {
        let tracks = self.tracks?;
        Some(ClipAssemblyState {
            tracks: tracks
                .into_iter()
                .map(RawClipAssemblyTrack::into_track)
                .collect(),
            active_track_id: self.active_track_id.unwrap_or_default(),
            active_item_id: self.active_item_id,
            zoom: self.zoom.unwrap_or(DEFAULT_ZOOM),
            subtitle_overlays_enabled: self.subtitle_overlays_enabled.unwrap_or(true),
        })
    }
}

impl SnapshotSource for RawTimelineSnapshot {
    fn into_candidate(self) -> SnapshotCandidate {
        let clip_drafts: ClipDrafts = self
            .clip_drafts
            .unwrap_or_default()
            .into_iter()
            .map(|(clip_id, draft)| (clip_id, Arc::new(draft)))
            .collect();
        SnapshotCandidate {
            clips: self
                .clips
                .unwrap_or_default()
                .into_iter()
                .filter_map(RawClipSegment::into_clip)
                .collect(),
            active_clip_id: self.active_clip_id,
            clip_drafts,
            assembly: self
                .assembly
                .and_then(RawClipAssemblyState::into_assembly)
                .map(Arc::new),
        }
    }
}
