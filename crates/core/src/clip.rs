use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A trimmed region of a project's source media.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipSegment {
    pub id: String,
    pub title: String,
    pub start: f64,
    pub end: f64,
    pub project_id: String,
}

impl ClipSegment {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: f64,
        end: f64,
        project_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start,
            end,
            project_id: project_id.into(),
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Canonical clip ordering: `(start, end, id)`.
    pub fn timeline_order(&self, other: &Self) -> Ordering {
        self.start
            .total_cmp(&other.start)
            .then_with(|| self.end.total_cmp(&other.end))
            .then_with(|| self.id.cmp(&other.id))
    }
}
