//! Filterable record model

use serde::{Deserialize, Serialize};

/// Category sentinel meaning "no category assigned"
///
/// Never offered as a selectable filter choice.
pub const NO_CATEGORY: &str = "none";

/// One incident/training-data entry as seen by the filter engine
///
/// The engine never creates, mutates or destroys records; it only decides
/// which of them are shown and in what order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Stable identifier of the backing row
    pub id: i64,
    /// Urgency label (case-sensitive, open-ended: Critical/High/Medium/Low, ...)
    pub urgency: String,
    /// Category label, or [`NO_CATEGORY`]
    pub category: String,
    /// Sort key in Unix milliseconds (0 when unknown)
    pub timestamp: i64,
    /// Lower-cased concatenation of the free-text fields
    pub search_text: String,
}

impl Record {
    /// Build a record, normalizing the category and lower-casing the search text
    pub fn new(
        id: i64,
        urgency: impl Into<String>,
        category: Option<&str>,
        timestamp: i64,
        search_text: &str,
    ) -> Self {
        Self {
            id,
            urgency: urgency.into(),
            category: normalize_category(category),
            timestamp,
            search_text: search_text.to_lowercase(),
        }
    }

    /// True when no category is assigned
    pub fn is_uncategorized(&self) -> bool {
        self.category == NO_CATEGORY
    }
}

/// Map an absent or blank category to [`NO_CATEGORY`]
pub fn normalize_category(category: Option<&str>) -> String {
    match category.map(str::trim) {
        Some(c) if !c.is_empty() => c.to_string(),
        _ => NO_CATEGORY.to_string(),
    }
}

/// Join free-text fields into the lower-cased search text of a record
///
/// Blank fields are skipped so they do not introduce runs of separators.
pub fn build_search_text<'a>(fields: impl IntoIterator<Item = &'a str>) -> String {
    fields
        .into_iter()
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_category_becomes_sentinel() {
        assert_eq!(normalize_category(None), NO_CATEGORY);
        assert_eq!(normalize_category(Some("")), NO_CATEGORY);
        assert_eq!(normalize_category(Some("  ")), NO_CATEGORY);
        assert_eq!(normalize_category(Some("Vessel Operations")), "Vessel Operations");
    }

    #[test]
    fn test_record_new_lowercases_search_text() {
        let record = Record::new(7, "High", Some("EDI"), 10, "REF-IFT-0007 Stuck");
        assert_eq!(record.search_text, "ref-ift-0007 stuck");
        assert_eq!(record.urgency, "High");
        assert!(!record.is_uncategorized());
    }

    #[test]
    fn test_build_search_text_skips_blank_fields() {
        let text = build_search_text(["Gate ACCESS_DENIED", "", "  ", "Terminal Ops"]);
        assert_eq!(text, "gate access_denied terminal ops");
    }
}
