use std::sync::Arc;

use reelcut_core::{ClipSegment, SnapshotCandidate, SnapshotSource, TimelineSnapshot};
use reelcut_engine::{HistoryConfig, TimelineHistory};

/// Drives a history the way the editor's event loop does: always from the
/// latest value, counting the calls that turned out to be no-ops.
pub struct TestSession {
    history: Arc<TimelineHistory>,
    config: HistoryConfig,
    pub no_ops: usize,
}

impl Default for TestSession {
    fn default() -> Self {
        Self::new()
    }
}

impl TestSession {
    pub fn new() -> Self {
        Self::from_seed(SnapshotCandidate::default())
    }

    pub fn with_clips(clips: Vec<ClipSegment>) -> Self {
        Self::from_seed(SnapshotCandidate::with_clips(clips))
    }

    pub fn from_seed(seed: impl SnapshotSource) -> Self {
        Self {
            history: TimelineHistory::create(seed),
            config: HistoryConfig::default(),
            no_ops: 0,
        }
    }

    pub fn with_config(mut self, config: HistoryConfig) -> Self {
        self.config = config;
        self
    }

    pub fn history(&self) -> &Arc<TimelineHistory> {
        &self.history
    }

    pub fn present(&self) -> &TimelineSnapshot {
        self.history.present()
    }

    /// Recorded edit. Returns whether anything changed.
    pub fn apply<F, S>(&mut self, updater: F) -> bool
    where
        F: FnOnce(&TimelineSnapshot) -> S,
        S: SnapshotSource,
    {
        let next = self.history.update(updater, self.config.update_options(true));
        self.install(next)
    }

    /// Transient edit, as sent while a pointer drag is in progress.
    pub fn drag<F, S>(&mut self, updater: F) -> bool
    where
        F: FnOnce(&TimelineSnapshot) -> S,
        S: SnapshotSource,
    {
        let next = self.history.update(updater, self.config.update_options(false));
        self.install(next)
    }

    pub fn hydrate(&mut self, seed: impl SnapshotSource) -> bool {
        let next = self.history.replace(seed);
        self.install(next)
    }

    pub fn undo(&mut self) -> bool {
        let next = self.history.undo();
        self.install(next)
    }

    pub fn redo(&mut self) -> bool {
        let next = self.history.redo();
        self.install(next)
    }

    fn install(&mut self, next: Arc<TimelineHistory>) -> bool {
        let changed = !Arc::ptr_eq(&self.history, &next);
        if !changed {
            self.no_ops += 1;
        }
        self.history = next;
        changed
    }
}
