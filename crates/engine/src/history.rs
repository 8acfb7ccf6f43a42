//! Snapshot-based undo/redo history.
//!
//! `TimelineHistory` is an immutable value. Every operation takes the latest
//! `Arc<TimelineHistory>` and returns either a new one or the same `Arc`
//! when nothing changed, so callers can detect a no-op with `Arc::ptr_eq`.
//!
//! ```ignore
//! let history = TimelineHistory::create(SnapshotCandidate::with_clips(clips));
//!
//! // While dragging, replace the present without recording.
//! let history = history.update(edits::set_zoom(2.0), UpdateOptions::transient());
//! // On release, record a single undo step.
//! let history = history.update(edits::set_zoom(2.5), UpdateOptions::recorded());
//!
//! let history = history.undo();
//! ```

use std::collections::VecDeque;
use std::sync::Arc;

use reelcut_core::{SnapshotCandidate, SnapshotSource, TimelineSnapshot};

use crate::equality::snapshots_equal;
use crate::options::UpdateOptions;
use crate::snapshot::normalize_snapshot;

/// Which directions of travel are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryState {
    Clean,
    Undoable,
    Redoable,
    Both,
}

#[derive(Debug, Clone)]
pub struct TimelineHistory {
    past: VecDeque<Arc<TimelineSnapshot>>,
    present: Arc<TimelineSnapshot>,
    future: VecDeque<Arc<TimelineSnapshot>>,
    revision: u64,
}

impl TimelineHistory {
    /// Starts a session from an optional partial snapshot.
    pub fn create(seed: impl SnapshotSource) -> Arc<Self> {
        let present = normalize_snapshot(seed);
        tracing::debug!(
            clips = present.clips.len(),
            tracks = present.assembly.tracks.len(),
            "History created"
        );
        Arc::new(Self {
            past: VecDeque::new(),
            present: Arc::new(present),
            future: VecDeque::new(),
            revision: 0,
        })
    }

    /// A session with no clips and the default two-track assembly.
    pub fn empty() -> Arc<Self> {
        Self::create(SnapshotCandidate::default())
    }

    pub fn present(&self) -> &TimelineSnapshot {
        &self.present
    }

    pub fn present_arc(&self) -> &Arc<TimelineSnapshot> {
        &self.present
    }

    /// Oldest first.
    pub fn past(&self) -> impl ExactSizeIterator<Item = &TimelineSnapshot> {
        self.past.iter().map(Arc::as_ref)
    }

    /// Next redo first.
    pub fn future(&self) -> impl ExactSizeIterator<Item = &TimelineSnapshot> {
        self.future.iter().map(Arc::as_ref)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }

    pub fn state(&self) -> HistoryState {
        match (self.can_undo(), self.can_redo()) {
            (false, false) => HistoryState::Clean,
            (true, false) => HistoryState::Undoable,
            (false, true) => HistoryState::Redoable,
            (true, true) => HistoryState::Both,
        }
    }

    /// Installs `seed` as the present without creating an undo step. Used when
    /// hydrating a persisted session. Clears redo history.
    pub fn replace(self: &Arc<Self>, seed: impl SnapshotSource) -> Arc<Self> {
        let candidate = normalize_snapshot(seed);
        if snapshots_equal(&candidate, &self.present) {
            tracing::debug!(revision = self.revision, "Replace suppressed: no change");
            return Arc::clone(self);
        }

        let next = Self {
            past: self.past.clone(),
            present: Arc::new(candidate),
            future: VecDeque::new(),
            revision: self.revision + 1,
        };
        tracing::debug!(
            revision = next.revision,
            undo_depth = next.past.len(),
            "History replaced"
        );
        Arc::new(next)
    }

    /// Applies `updater` to the present and normalizes the result. An update
    /// that normalizes to the current present is a no-op.
    pub fn update<F, S>(self: &Arc<Self>, updater: F, options: UpdateOptions) -> Arc<Self>
    where
        F: FnOnce(&TimelineSnapshot) -> S,
        S: SnapshotSource,
    {
        let candidate = normalize_snapshot(updater(&self.present));
        if snapshots_equal(&candidate, &self.present) {
            tracing::debug!(revision = self.revision, "Update suppressed: no change");
            return Arc::clone(self);
        }

        let mut past = self.past.clone();
        if options.record_history {
            past.push_back(Arc::clone(&self.present));
            let limit = options.history_limit();
            while past.len() > limit {
                past.pop_front();
            }
        }

        let next = Self {
            past,
            present: Arc::new(candidate),
            future: VecDeque::new(),
            revision: self.revision + 1,
        };
        tracing::debug!(
            revision = next.revision,
            recorded = options.record_history,
            undo_depth = next.past.len(),
            "History updated"
        );
        Arc::new(next)
    }

    pub fn undo(self: &Arc<Self>) -> Arc<Self> {
        let mut past = self.past.clone();
        let Some(previous) = past.pop_back() else {
            return Arc::clone(self);
        };
        let mut future = self.future.clone();
        future.push_front(Arc::clone(&self.present));

        let next = Self {
            past,
            present: previous,
            future,
            revision: self.revision + 1,
        };
        tracing::debug!(
            revision = next.revision,
            undo_remaining = next.past.len(),
            redo_depth = next.future.len(),
            "Undo"
        );
        Arc::new(next)
    }

    pub fn redo(self: &Arc<Self>) -> Arc<Self> {
        let mut future = self.future.clone();
        let Some(following) = future.pop_front() else {
            return Arc::clone(self);
        };
        let mut past = self.past.clone();
        past.push_back(Arc::clone(&self.present));

        let next = Self {
            past,
            present: following,
            future,
            revision: self.revision + 1,
        };
        tracing::debug!(
            revision = next.revision,
            undo_depth = next.past.len(),
            redo_remaining = next.future.len(),
            "Redo"
        );
        Arc::new(next)
    }
}
