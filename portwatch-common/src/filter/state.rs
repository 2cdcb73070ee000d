//! Filter state owned by one view

use serde::{Deserialize, Serialize};

use super::selection::Selection;

/// Timestamp ordering of the visible records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Newest first
    #[default]
    Newest,
    /// Oldest first
    Oldest,
}

/// Active predicates and sort order of a view
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    pub urgencies: Selection,
    pub categories: Selection,
    pub sort_order: SortOrder,
    /// Lower-cased search substring ("" = no search)
    pub search_term: String,
}

impl FilterState {
    /// Count of non-default filters, shown on the filter badge
    pub fn active_filter_count(&self) -> usize {
        self.urgencies.len()
            + self.categories.len()
            + usize::from(self.sort_order != SortOrder::Newest)
            + usize::from(!self.search_term.is_empty())
    }

    pub fn is_default(&self) -> bool {
        *self == FilterState::default()
    }
}
