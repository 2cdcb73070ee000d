//! Training-data and knowledge-base queries

use sqlx::SqlitePool;
use tracing::{debug, info};

use super::models::{KnowledgeEntry, NewKnowledgeEntry, NewTrainingData, TrainingDataEntry};
use crate::filter::Record;
use crate::time::now_rfc3339;
use crate::{Error, Result};

// ========================================
// Training data
// ========================================

/// All training entries in insertion order
pub async fn list_training_data(pool: &SqlitePool) -> Result<Vec<TrainingDataEntry>> {
    let rows = sqlx::query("SELECT * FROM training_data ORDER BY id ASC")
        .fetch_all(pool)
        .await?;
    rows.iter().map(TrainingDataEntry::from_row).collect()
}

/// One page of training entries in insertion order
pub async fn list_training_data_page(
    pool: &SqlitePool,
    offset: i64,
    limit: i64,
) -> Result<Vec<TrainingDataEntry>> {
    let rows = sqlx::query("SELECT * FROM training_data ORDER BY id ASC LIMIT ? OFFSET ?")
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
    rows.iter().map(TrainingDataEntry::from_row).collect()
}

pub async fn get_training_data(pool: &SqlitePool, id: i64) -> Result<Option<TrainingDataEntry>> {
    let row = sqlx::query("SELECT * FROM training_data WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.as_ref().map(TrainingDataEntry::from_row).transpose()
}

/// Insert a training entry and return it as stored
pub async fn insert_training_data(
    pool: &SqlitePool,
    entry: &NewTrainingData,
) -> Result<TrainingDataEntry> {
    entry.validate()?;
    let now = now_rfc3339();
    let systems_json = serde_json::to_string(&entry.expected_affected_systems)?;

    let id = sqlx::query(
        r#"
        INSERT INTO training_data (
            incident_description, expected_incident_type, expected_pattern_match,
            expected_root_cause, expected_impact, expected_urgency,
            expected_affected_systems_json, category, tags, notes, created_by,
            is_validated, created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&entry.incident_description)
    .bind(&entry.expected_incident_type)
    .bind(&entry.expected_pattern_match)
    .bind(&entry.expected_root_cause)
    .bind(&entry.expected_impact)
    .bind(&entry.expected_urgency)
    .bind(&systems_json)
    .bind(&entry.category)
    .bind(&entry.tags)
    .bind(&entry.notes)
    .bind(&entry.created_by)
    .bind(i64::from(entry.is_validated))
    .bind(&now)
    .bind(&now)
    .execute(pool)
    .await?
    .last_insert_rowid();

    info!("Created training entry {}", id);

    get_training_data(pool, id)
        .await?
        .ok_or_else(|| Error::Internal(format!("training entry {} vanished after insert", id)))
}

/// Delete a training entry; `Ok(false)` when no such entry exists
pub async fn delete_training_data(pool: &SqlitePool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM training_data WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    let deleted = result.rows_affected() > 0;
    debug!("Delete training entry {}: deleted={}", id, deleted);
    Ok(deleted)
}

/// Training entries as filterable records
pub async fn load_training_records(pool: &SqlitePool) -> Result<Vec<Record>> {
    Ok(list_training_data(pool)
        .await?
        .iter()
        .map(TrainingDataEntry::to_record)
        .collect())
}

// ========================================
// Knowledge base
// ========================================

/// All knowledge entries in insertion order
pub async fn list_knowledge(pool: &SqlitePool) -> Result<Vec<KnowledgeEntry>> {
    let rows = sqlx::query("SELECT * FROM knowledge_base ORDER BY id ASC")
        .fetch_all(pool)
        .await?;
    rows.iter().map(KnowledgeEntry::from_row).collect()
}

/// One page of knowledge entries in insertion order
pub async fn list_knowledge_page(
    pool: &SqlitePool,
    offset: i64,
    limit: i64,
) -> Result<Vec<KnowledgeEntry>> {
    let rows = sqlx::query("SELECT * FROM knowledge_base ORDER BY id ASC LIMIT ? OFFSET ?")
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
    rows.iter().map(KnowledgeEntry::from_row).collect()
}

pub async fn get_knowledge(pool: &SqlitePool, id: i64) -> Result<Option<KnowledgeEntry>> {
    let row = sqlx::query("SELECT * FROM knowledge_base WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.as_ref().map(KnowledgeEntry::from_row).transpose()
}

/// Insert a knowledge entry and return it as stored
pub async fn insert_knowledge(
    pool: &SqlitePool,
    entry: &NewKnowledgeEntry,
) -> Result<KnowledgeEntry> {
    entry.validate()?;
    let now = now_rfc3339();

    let id = sqlx::query(
        r#"
        INSERT INTO knowledge_base (
            title, content, category, type, tags, keywords, priority, source,
            status, created_by, version_notes, created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&entry.title)
    .bind(&entry.content)
    .bind(&entry.category)
    .bind(&entry.entry_type)
    .bind(&entry.tags)
    .bind(&entry.keywords)
    .bind(entry.priority)
    .bind(&entry.source)
    .bind(&entry.status)
    .bind(&entry.created_by)
    .bind(&entry.version_notes)
    .bind(&now)
    .bind(&now)
    .execute(pool)
    .await?
    .last_insert_rowid();

    info!("Created knowledge entry {}: {}", id, entry.title);

    get_knowledge(pool, id)
        .await?
        .ok_or_else(|| Error::Internal(format!("knowledge entry {} vanished after insert", id)))
}

/// Delete a knowledge entry; `Ok(false)` when no such entry exists
pub async fn delete_knowledge(pool: &SqlitePool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM knowledge_base WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    let deleted = result.rows_affected() > 0;
    debug!("Delete knowledge entry {}: deleted={}", id, deleted);
    Ok(deleted)
}

/// Knowledge entries as filterable records
pub async fn load_knowledge_records(pool: &SqlitePool) -> Result<Vec<Record>> {
    Ok(list_knowledge(pool)
        .await?
        .iter()
        .map(KnowledgeEntry::to_record)
        .collect())
}
