//! Filter engine: state mutation, apply, clear, category discovery

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

use super::record::Record;
use super::selection::Selection;
use super::state::{FilterState, SortOrder};

/// Ordered visible subset produced by [`ViewFilterEngine::apply`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilteredView {
    /// Visible records in display order
    pub visible: Vec<Record>,
    pub visible_count: usize,
    /// True exactly when `visible_count == 0`
    pub is_empty: bool,
}

impl FilteredView {
    fn from_visible(visible: Vec<Record>) -> Self {
        let visible_count = visible.len();
        Self {
            visible,
            visible_count,
            is_empty: visible_count == 0,
        }
    }

    /// Identifiers of the visible records in display order
    pub fn visible_ids(&self) -> Vec<i64> {
        self.visible.iter().map(|r| r.id).collect()
    }
}

/// Filter/sort/search engine for one rendered listing
#[derive(Debug, Clone, Default)]
pub struct ViewFilterEngine {
    state: FilterState,
}

impl ViewFilterEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing state (e.g. restored from a client)
    pub fn with_state(state: FilterState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut FilterState {
        &mut self.state
    }

    /// Replace selected urgencies (empty set = all)
    pub fn set_urgency_filter(&mut self, labels: BTreeSet<String>) {
        self.state.urgencies = Selection::from_labels(labels);
    }

    /// Replace selected categories (empty set = all)
    pub fn set_category_filter(&mut self, labels: BTreeSet<String>) {
        self.state.categories = Selection::from_labels(labels);
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.state.sort_order = order;
    }

    /// Store the search term lower-cased; no trimming or other normalization
    pub fn set_search_term(&mut self, term: &str) {
        self.state.search_term = term.to_lowercase();
    }

    /// Compute the visible records in display order
    ///
    /// Pure function of `records` and the current state. Sorting is stable:
    /// records with equal timestamps keep their input order for both sort
    /// orders.
    pub fn apply(&self, records: &[Record]) -> FilteredView {
        let mut visible: Vec<Record> = records
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect();

        match self.state.sort_order {
            SortOrder::Newest => visible.sort_by_key(|r| Reverse(r.timestamp)),
            SortOrder::Oldest => visible.sort_by_key(|r| r.timestamp),
        }

        debug!(
            total = records.len(),
            visible = visible.len(),
            active_filters = self.active_filter_count(),
            "Applied view filters"
        );

        FilteredView::from_visible(visible)
    }

    /// Reset to the default state and return it
    pub fn clear(&mut self) -> FilterState {
        self.state = FilterState::default();
        self.state.clone()
    }

    pub fn active_filter_count(&self) -> usize {
        self.state.active_filter_count()
    }

    fn matches(&self, record: &Record) -> bool {
        self.state.urgencies.admits(&record.urgency)
            && self.state.categories.admits(&record.category)
            && (self.state.search_term.is_empty()
                || record.search_text.contains(&self.state.search_term))
    }
}

/// Distinct category labels in first-seen order, excluding the "none" sentinel
///
/// Recompute whenever the record collection changes; the result is not part
/// of any filter state.
pub fn discover_categories(records: &[Record]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| !r.is_uncategorized())
        .map(|r| r.category.as_str())
        .filter(|c| seen.insert(*c))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, urgency: &str, category: &str, ts: i64) -> Record {
        Record::new(id, urgency, Some(category), ts, &format!("entry {id}"))
    }

    fn labels(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_end_to_end_urgency_filter() {
        let records = vec![
            record(1, "Low", "none", 100),
            record(2, "Critical", "network", 200),
        ];
        let mut engine = ViewFilterEngine::new();
        engine.set_urgency_filter(labels(&["Critical"]));

        let view = engine.apply(&records);
        assert_eq!(view.visible_ids(), vec![2]);
        assert_eq!(view.visible_count, 1);
        assert!(!view.is_empty);
    }

    #[test]
    fn test_default_state_returns_everything_newest_first() {
        let records = vec![
            record(1, "Low", "a", 100),
            record(2, "High", "b", 300),
            record(3, "Medium", "c", 200),
        ];
        let view = ViewFilterEngine::new().apply(&records);
        assert_eq!(view.visible_ids(), vec![2, 3, 1]);
        assert_eq!(view.visible_count, records.len());
    }

    #[test]
    fn test_oldest_first() {
        let records = vec![
            record(1, "Low", "a", 100),
            record(2, "High", "b", 300),
            record(3, "Medium", "c", 200),
        ];
        let mut engine = ViewFilterEngine::new();
        engine.set_sort_order(SortOrder::Oldest);
        assert_eq!(engine.apply(&records).visible_ids(), vec![1, 3, 2]);
    }

    #[test]
    fn test_equal_timestamps_keep_input_order() {
        let records = vec![
            record(5, "Low", "a", 100),
            record(4, "Low", "a", 100),
            record(9, "Low", "a", 50),
            record(3, "Low", "a", 100),
        ];
        let mut engine = ViewFilterEngine::new();
        assert_eq!(engine.apply(&records).visible_ids(), vec![5, 4, 3, 9]);

        engine.set_sort_order(SortOrder::Oldest);
        assert_eq!(engine.apply(&records).visible_ids(), vec![9, 5, 4, 3]);
    }

    #[test]
    fn test_missing_timestamp_sorts_as_oldest() {
        let records = vec![record(1, "Low", "a", 0), record(2, "Low", "a", 10)];
        let view = ViewFilterEngine::new().apply(&records);
        assert_eq!(view.visible_ids(), vec![2, 1]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let records = vec![Record::new(1, "High", None, 1, "disk failure on node 7")];
        let mut engine = ViewFilterEngine::new();

        engine.set_search_term("DISK");
        assert_eq!(engine.state().search_term, "disk");
        assert_eq!(engine.apply(&records).visible_count, 1);

        engine.set_search_term("node 9");
        assert_eq!(engine.apply(&records).visible_count, 0);
    }

    #[test]
    fn test_search_term_is_not_trimmed() {
        let records = vec![Record::new(1, "High", None, 1, "node7")];
        let mut engine = ViewFilterEngine::new();
        engine.set_search_term(" node");
        assert_eq!(engine.state().search_term, " node");
        assert!(engine.apply(&records).is_empty);
    }

    #[test]
    fn test_category_filter_matches_sentinel_literally() {
        let records = vec![record(1, "Low", "none", 1), record(2, "Low", "outage", 2)];
        let mut engine = ViewFilterEngine::new();
        engine.set_category_filter(labels(&["outage"]));
        assert_eq!(engine.apply(&records).visible_ids(), vec![2]);
    }

    #[test]
    fn test_all_predicates_must_hold() {
        let records = vec![
            Record::new(1, "Critical", Some("network"), 1, "switch down"),
            Record::new(2, "Critical", Some("storage"), 2, "switch down"),
            Record::new(3, "Low", Some("network"), 3, "switch down"),
            Record::new(4, "Critical", Some("network"), 4, "disk full"),
        ];
        let mut engine = ViewFilterEngine::new();
        engine.set_urgency_filter(labels(&["Critical"]));
        engine.set_category_filter(labels(&["network"]));
        engine.set_search_term("switch");
        assert_eq!(engine.apply(&records).visible_ids(), vec![1]);
    }

    #[test]
    fn test_empty_input_yields_empty_view() {
        let view = ViewFilterEngine::new().apply(&[]);
        assert!(view.visible.is_empty());
        assert_eq!(view.visible_count, 0);
        assert!(view.is_empty);
    }

    #[test]
    fn test_badge_count_after_urgency_and_sort() {
        let mut engine = ViewFilterEngine::new();
        engine.set_urgency_filter(labels(&["Critical"]));
        engine.set_sort_order(SortOrder::Oldest);
        assert_eq!(engine.active_filter_count(), 2);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut engine = ViewFilterEngine::new();
        engine.set_urgency_filter(labels(&["High"]));
        engine.set_search_term("gate");

        let first = engine.clear();
        let second = engine.clear();
        assert_eq!(first, second);
        assert_eq!(first, FilterState::default());
        assert_eq!(engine.active_filter_count(), 0);
    }

    #[test]
    fn test_discover_categories_excludes_sentinel_in_first_seen_order() {
        let records = vec![
            record(1, "Low", "outage", 1),
            record(2, "Low", "none", 2),
            record(3, "Low", "network", 3),
            record(4, "Low", "outage", 4),
        ];
        assert_eq!(discover_categories(&records), vec!["outage", "network"]);
    }

    #[test]
    fn test_discover_categories_none_and_outage() {
        let records = vec![record(1, "Low", "none", 1), record(2, "Low", "outage", 2)];
        assert_eq!(discover_categories(&records), vec!["outage"]);
    }
}
