//! Database models
//!
//! Stored entries and their projection onto filterable [`Record`]s.

use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, Row};

use crate::filter::{build_search_text, Record};
use crate::time::parse_timestamp_millis;
use crate::{Error, Result};

/// Labelled incident used to evaluate and tune the analyser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingDataEntry {
    pub id: i64,
    pub incident_description: String,
    pub expected_incident_type: String,
    pub expected_pattern_match: String,
    pub expected_root_cause: String,
    pub expected_impact: String,
    pub expected_urgency: String,
    pub expected_affected_systems: Vec<String>,
    pub category: String,
    pub tags: String,
    pub notes: String,
    pub created_by: String,
    pub is_validated: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Request body for creating a training entry
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewTrainingData {
    pub incident_description: String,
    pub expected_incident_type: String,
    pub expected_pattern_match: String,
    pub expected_root_cause: String,
    pub expected_impact: String,
    pub expected_urgency: String,
    pub expected_affected_systems: Vec<String>,
    pub category: String,
    pub tags: String,
    pub notes: String,
    pub created_by: String,
    pub is_validated: bool,
}

impl NewTrainingData {
    pub fn validate(&self) -> Result<()> {
        if self.incident_description.trim().is_empty() {
            return Err(Error::InvalidInput(
                "incident_description must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl TrainingDataEntry {
    pub(crate) fn from_row(row: &SqliteRow) -> Result<Self> {
        let systems_json: String = row.try_get("expected_affected_systems_json")?;
        Ok(Self {
            id: row.try_get("id")?,
            incident_description: row.try_get("incident_description")?,
            expected_incident_type: row.try_get("expected_incident_type")?,
            expected_pattern_match: row.try_get("expected_pattern_match")?,
            expected_root_cause: row.try_get("expected_root_cause")?,
            expected_impact: row.try_get("expected_impact")?,
            expected_urgency: row.try_get("expected_urgency")?,
            expected_affected_systems: decode_affected_systems(&systems_json),
            category: row.try_get("category")?,
            tags: row.try_get("tags")?,
            notes: row.try_get("notes")?,
            created_by: row.try_get("created_by")?,
            is_validated: row.try_get::<i64, _>("is_validated")? != 0,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    /// Filterable view of this entry
    pub fn to_record(&self) -> Record {
        let search_text = build_search_text([
            self.incident_description.as_str(),
            self.expected_incident_type.as_str(),
            self.expected_pattern_match.as_str(),
            self.expected_root_cause.as_str(),
            self.expected_impact.as_str(),
            self.tags.as_str(),
            self.notes.as_str(),
            self.category.as_str(),
        ]);
        Record::new(
            self.id,
            self.expected_urgency.clone(),
            Some(self.category.as_str()),
            parse_timestamp_millis(self.created_at.as_deref()),
            &search_text,
        )
    }
}

/// Affected systems are stored as a JSON array; unreadable values read as empty
fn decode_affected_systems(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    serde_json::from_str(raw).unwrap_or_default()
}

/// Procedure/FAQ/solution article consulted during analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub category: String,
    /// Procedure, FAQ, Solution, Reference
    #[serde(rename = "type")]
    pub entry_type: String,
    pub tags: String,
    pub keywords: String,
    /// 1=Low, 2=Medium, 3=High, 4=Critical
    pub priority: i64,
    pub source: String,
    /// Active, Inactive, Draft
    pub status: String,
    pub created_by: String,
    pub version_notes: String,
    pub view_count: i64,
    pub last_used: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Request body for creating a knowledge entry
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NewKnowledgeEntry {
    pub title: String,
    pub content: String,
    pub category: String,
    #[serde(rename = "type")]
    pub entry_type: String,
    pub tags: String,
    pub keywords: String,
    pub priority: i64,
    pub source: String,
    pub status: String,
    pub created_by: String,
    pub version_notes: String,
}

impl Default for NewKnowledgeEntry {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            category: String::new(),
            entry_type: String::new(),
            tags: String::new(),
            keywords: String::new(),
            priority: 1,
            source: String::new(),
            status: "Active".to_string(),
            created_by: String::new(),
            version_notes: String::new(),
        }
    }
}

impl NewKnowledgeEntry {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::InvalidInput("title must not be empty".to_string()));
        }
        if self.content.trim().is_empty() {
            return Err(Error::InvalidInput("content must not be empty".to_string()));
        }
        Ok(())
    }
}

impl KnowledgeEntry {
    pub(crate) fn from_row(row: &SqliteRow) -> Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            content: row.try_get("content")?,
            category: row.try_get("category")?,
            entry_type: row.try_get("type")?,
            tags: row.try_get("tags")?,
            keywords: row.try_get("keywords")?,
            priority: row.try_get("priority")?,
            source: row.try_get("source")?,
            status: row.try_get("status")?,
            created_by: row.try_get("created_by")?,
            version_notes: row.try_get("version_notes")?,
            view_count: row.try_get("view_count")?,
            last_used: row.try_get("last_used")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    /// Filterable view of this entry; urgency comes from the priority level
    pub fn to_record(&self) -> Record {
        let search_text = build_search_text([
            self.title.as_str(),
            self.content.as_str(),
            self.keywords.as_str(),
            self.tags.as_str(),
            self.category.as_str(),
        ]);
        Record::new(
            self.id,
            priority_label(self.priority),
            Some(self.category.as_str()),
            parse_timestamp_millis(self.created_at.as_deref()),
            &search_text,
        )
    }
}

/// Urgency label for a knowledge priority; out-of-range values clamp
pub fn priority_label(priority: i64) -> &'static str {
    match priority {
        i64::MIN..=1 => "Low",
        2 => "Medium",
        3 => "High",
        _ => "Critical",
    }
}
