//! Projection of a filtered view onto page indicators

use serde::Serialize;
use std::collections::HashSet;

use super::engine::FilteredView;
use super::record::Record;

/// Filter badge next to the filter toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "count", rename_all = "snake_case")]
pub enum BadgeState {
    Hidden,
    Shown(usize),
}

impl BadgeState {
    pub fn from_count(active_filters: usize) -> Self {
        if active_filters == 0 {
            BadgeState::Hidden
        } else {
            BadgeState::Shown(active_filters)
        }
    }
}

/// Everything the rendering layer needs to reflect a filtered view
///
/// Records keep their presentation element; the plan says which ones to show
/// (in display order) and which to hide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderPlan {
    /// Visible record ids in display order
    pub shown_ids: Vec<i64>,
    /// Hidden record ids in input order
    pub hidden_ids: Vec<i64>,
    /// Text of the visible-count element
    pub count_text: String,
    /// Empty-state indicator, shown exactly when nothing is visible
    pub empty_state_visible: bool,
    pub badge: BadgeState,
}

impl RenderPlan {
    pub fn project(records: &[Record], view: &FilteredView, active_filters: usize) -> Self {
        let shown_ids = view.visible_ids();
        let shown: HashSet<i64> = shown_ids.iter().copied().collect();
        let hidden_ids = records
            .iter()
            .map(|r| r.id)
            .filter(|id| !shown.contains(id))
            .collect();

        Self {
            shown_ids,
            hidden_ids,
            count_text: count_text(view.visible_count),
            empty_state_visible: view.visible_count == 0,
            badge: BadgeState::from_count(active_filters),
        }
    }
}

/// "1 entry" / "N entries"
pub fn count_text(visible: usize) -> String {
    if visible == 1 {
        "1 entry".to_string()
    } else {
        format!("{} entries", visible)
    }
}
