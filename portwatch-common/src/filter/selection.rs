//! Label selection with an explicit "All" choice

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Selected labels for one filter dimension
///
/// `Subset` is never empty: building a selection from an empty label set
/// yields `All`. This keeps the "All" checkbox and individual label
/// checkboxes from being active at the same time.
///
/// Serialized as a plain list of labels, where `[]` means `All`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub enum Selection {
    /// No restriction
    #[default]
    All,
    /// Only records whose label is in the set
    Subset(Labels),
}

/// Non-empty label set of a [`Selection::Subset`]
///
/// Only [`Selection::from_labels`] and [`Selection::toggle`] build one, so an
/// empty subset (which would hide every record while counting as no filter)
/// cannot exist.
///
/// ```compile_fail
/// use portwatch_common::filter::{Labels, Selection};
/// use std::collections::BTreeSet;
///
/// let _ = Selection::Subset(Labels(BTreeSet::new()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels(BTreeSet<String>);

impl Labels {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.contains(label)
    }
}

/// Checkbox that an operator toggled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckboxChoice {
    /// The "All" checkbox
    All,
    /// An individual label checkbox
    Label(String),
}

impl Selection {
    /// Build a selection from labels (empty → `All`)
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = labels.into_iter().map(Into::into).collect();
        if set.is_empty() {
            Selection::All
        } else {
            Selection::Subset(Labels(set))
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    /// Whether `label` passes this selection
    pub fn admits(&self, label: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Subset(set) => set.contains(label),
        }
    }

    /// Number of individually selected labels (0 for `All`)
    pub fn len(&self) -> usize {
        match self {
            Selection::All => 0,
            Selection::Subset(set) => set.0.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Selected labels in sorted order (empty for `All`)
    pub fn labels(&self) -> Vec<String> {
        match self {
            Selection::All => Vec::new(),
            Selection::Subset(set) => set.0.iter().cloned().collect(),
        }
    }

    /// Apply one checkbox interaction; the most recent interaction wins
    ///
    /// - checking "All" clears every label
    /// - unchecking "All" changes nothing (no labels already means all)
    /// - checking a label clears "All"
    /// - unchecking the last label falls back to "All"
    pub fn toggle(&mut self, choice: CheckboxChoice, checked: bool) {
        match (choice, checked) {
            (CheckboxChoice::All, true) => *self = Selection::All,
            (CheckboxChoice::All, false) => {}
            (CheckboxChoice::Label(label), true) => match self {
                Selection::All => *self = Selection::from_labels([label]),
                Selection::Subset(set) => {
                    set.0.insert(label);
                }
            },
            (CheckboxChoice::Label(label), false) => {
                if let Selection::Subset(set) = self {
                    set.0.remove(&label);
                    if set.0.is_empty() {
                        *self = Selection::All;
                    }
                }
            }
        }
    }
}

impl From<Vec<String>> for Selection {
    fn from(labels: Vec<String>) -> Self {
        Selection::from_labels(labels)
    }
}

impl From<Selection> for Vec<String> {
    fn from(selection: Selection) -> Self {
        selection.labels()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_labels_mean_all() {
        assert_eq!(Selection::from_labels(Vec::<String>::new()), Selection::All);
        assert!(Selection::All.admits("anything"));
        assert_eq!(Selection::All.len(), 0);
    }

    #[test]
    fn test_empty_label_list_never_becomes_subset() {
        let parsed: Selection = serde_json::from_str("[]").unwrap();
        assert!(parsed.is_all());
        assert!(parsed.admits("Low"));

        let mut sel = Selection::from_labels(["High", "Low"]);
        sel.toggle(CheckboxChoice::Label("High".into()), false);
        sel.toggle(CheckboxChoice::Label("Low".into()), false);
        assert_eq!(sel, Selection::All);
        assert!(sel.admits("Medium"));
    }

    #[test]
    fn test_subset_admits_only_members() {
        let sel = Selection::from_labels(["Critical", "High"]);
        assert!(sel.admits("Critical"));
        assert!(!sel.admits("critical"));
        assert!(!sel.admits("Low"));
        assert_eq!(sel.len(), 2);
    }

    #[test]
    fn test_checking_label_clears_all() {
        let mut sel = Selection::All;
        sel.toggle(CheckboxChoice::Label("High".into()), true);
        assert_eq!(sel, Selection::from_labels(["High"]));
    }

    #[test]
    fn test_checking_all_clears_labels() {
        let mut sel = Selection::from_labels(["High", "Low"]);
        sel.toggle(CheckboxChoice::All, true);
        assert!(sel.is_all());
    }

    #[test]
    fn test_unchecking_all_is_noop() {
        let mut sel = Selection::All;
        sel.toggle(CheckboxChoice::All, false);
        assert!(sel.is_all());

        let mut sel = Selection::from_labels(["High"]);
        sel.toggle(CheckboxChoice::All, false);
        assert_eq!(sel, Selection::from_labels(["High"]));
    }

    #[test]
    fn test_unchecking_last_label_falls_back_to_all() {
        let mut sel = Selection::from_labels(["High"]);
        sel.toggle(CheckboxChoice::Label("High".into()), false);
        assert!(sel.is_all());
    }

    #[test]
    fn test_unchecking_label_on_all_is_noop() {
        let mut sel = Selection::All;
        sel.toggle(CheckboxChoice::Label("High".into()), false);
        assert!(sel.is_all());
    }

    #[test]
    fn test_serializes_as_label_list() {
        let json = serde_json::to_string(&Selection::from_labels(["Low", "Critical"])).unwrap();
        assert_eq!(json, r#"["Critical","Low"]"#);
        assert_eq!(serde_json::to_string(&Selection::All).unwrap(), "[]");

        let parsed: Selection = serde_json::from_str("[]").unwrap();
        assert!(parsed.is_all());
    }

    #[test]
    fn test_checkbox_choice_wire_format() {
        let all: CheckboxChoice = serde_json::from_str(r#""all""#).unwrap();
        assert_eq!(all, CheckboxChoice::All);
        let label: CheckboxChoice = serde_json::from_str(r#"{"label":"High"}"#).unwrap();
        assert_eq!(label, CheckboxChoice::Label("High".into()));
    }
}
