//! Typed user actions fed into a [`ViewFilterEngine`]

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::engine::{FilteredView, ViewFilterEngine};
use super::record::Record;
use super::selection::CheckboxChoice;
use super::state::{FilterState, SortOrder};

/// One operator interaction with a filtered view
///
/// Wire format: JSON object tagged by `"command"`, e.g.
/// `{"command":"set_urgency_filter","labels":["Critical"]}` or
/// `{"command":"apply"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum FilterCommand {
    SetUrgencyFilter {
        #[serde(default)]
        labels: BTreeSet<String>,
    },
    SetCategoryFilter {
        #[serde(default)]
        labels: BTreeSet<String>,
    },
    /// Urgency checkbox change event
    ToggleUrgency { choice: CheckboxChoice, checked: bool },
    /// Category checkbox change event
    ToggleCategory { choice: CheckboxChoice, checked: bool },
    SetSortOrder { order: SortOrder },
    SetSearchTerm {
        #[serde(default)]
        term: String,
    },
    /// "Apply" button
    Apply,
    /// "Clear" button
    Clear,
}

impl FilterCommand {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            FilterCommand::SetUrgencyFilter { .. } => "set_urgency_filter",
            FilterCommand::SetCategoryFilter { .. } => "set_category_filter",
            FilterCommand::ToggleUrgency { .. } => "toggle_urgency",
            FilterCommand::ToggleCategory { .. } => "toggle_category",
            FilterCommand::SetSortOrder { .. } => "set_sort_order",
            FilterCommand::SetSearchTerm { .. } => "set_search_term",
            FilterCommand::Apply => "apply",
            FilterCommand::Clear => "clear",
        }
    }

    /// Whether dispatching this command recomputes the view
    pub fn produces_view(&self) -> bool {
        matches!(self, FilterCommand::Apply | FilterCommand::Clear)
    }
}

/// Result of dispatching one command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOutcome {
    /// State after the command
    pub state: FilterState,
    pub active_filter_count: usize,
    /// Recomputed view, present for `Apply` and `Clear` only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<FilteredView>,
}

impl ViewFilterEngine {
    /// Feed one command into the engine
    ///
    /// Setters only mutate state; `Apply` and `Clear` recompute the view in
    /// full from `records`.
    pub fn dispatch(&mut self, command: FilterCommand, records: &[Record]) -> CommandOutcome {
        let view = match command {
            FilterCommand::SetUrgencyFilter { labels } => {
                self.set_urgency_filter(labels);
                None
            }
            FilterCommand::SetCategoryFilter { labels } => {
                self.set_category_filter(labels);
                None
            }
            FilterCommand::ToggleUrgency { choice, checked } => {
                self.state_mut().urgencies.toggle(choice, checked);
                None
            }
            FilterCommand::ToggleCategory { choice, checked } => {
                self.state_mut().categories.toggle(choice, checked);
                None
            }
            FilterCommand::SetSortOrder { order } => {
                self.set_sort_order(order);
                None
            }
            FilterCommand::SetSearchTerm { term } => {
                self.set_search_term(&term);
                None
            }
            FilterCommand::Apply => Some(self.apply(records)),
            FilterCommand::Clear => {
                self.clear();
                Some(self.apply(records))
            }
        };

        CommandOutcome {
            state: self.state().clone(),
            active_filter_count: self.active_filter_count(),
            view,
        }
    }
}
