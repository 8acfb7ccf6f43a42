use serde::{Deserialize, Serialize};

use reelcut_core::limits::{DEFAULT_MAX_HISTORY_ENTRIES, MIN_HISTORY_ENTRIES};

/// Per-call options for [`TimelineHistory::update`](crate::TimelineHistory::update).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOptions {
    /// `false` replaces the present without creating an undo step, so a
    /// continuous drag collapses into the step recorded on release.
    pub record_history: bool,
    /// Cap on `past` for this call only. Floored at `MIN_HISTORY_ENTRIES`.
    pub max_history_entries: Option<usize>,
}

impl Default for UpdateOptions {
    fn default() -> Self {
        Self {
            record_history: true,
            max_history_entries: None,
        }
    }
}

impl UpdateOptions {
    pub fn recorded() -> Self {
        Self::default()
    }

    pub fn transient() -> Self {
        Self {
            record_history: false,
            ..Self::default()
        }
    }

    pub fn with_max_history_entries(mut self, max: usize) -> Self {
        self.max_history_entries = Some(max);
        self
    }

    pub fn history_limit(&self) -> usize {
        self.max_history_entries
            .unwrap_or(DEFAULT_MAX_HISTORY_ENTRIES)
            .max(MIN_HISTORY_ENTRIES)
    }
}

/// Session-level history settings, as read from the editor preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HistoryConfig {
    pub max_history_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_history_entries: DEFAULT_MAX_HISTORY_ENTRIES,
        }
    }
}

impl HistoryConfig {
    pub fn update_options(&self, record_history: bool) -> UpdateOptions {
        UpdateOptions {
            record_history,
            max_history_entries: Some(self.max_history_entries),
        }
    }
}
