//! Database initialization
//!
//! Creates the database file and its tables on first run. Table creation is
//! idempotent, so opening an existing database is the same code path.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Open (creating if needed) the database at `db_path`
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // WAL lets page reads proceed while an entry is being written
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;

    create_tables(&pool).await?;

    Ok(pool)
}

/// Create every table used by the services (idempotent)
pub async fn create_tables(pool: &SqlitePool) -> Result<()> {
    create_training_data_table(pool).await?;
    create_knowledge_base_table(pool).await?;
    Ok(())
}

async fn create_training_data_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS training_data (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            incident_description TEXT NOT NULL,
            expected_incident_type TEXT NOT NULL DEFAULT '',
            expected_pattern_match TEXT NOT NULL DEFAULT '',
            expected_root_cause TEXT NOT NULL DEFAULT '',
            expected_impact TEXT NOT NULL DEFAULT '',
            expected_urgency TEXT NOT NULL DEFAULT '',
            expected_affected_systems_json TEXT NOT NULL DEFAULT '[]',
            category TEXT NOT NULL DEFAULT '',
            tags TEXT NOT NULL DEFAULT '',
            notes TEXT NOT NULL DEFAULT '',
            created_by TEXT NOT NULL DEFAULT '',
            is_validated INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_training_data_created_at ON training_data(created_at)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_knowledge_base_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS knowledge_base (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            category TEXT NOT NULL DEFAULT '',
            type TEXT NOT NULL DEFAULT '',
            tags TEXT NOT NULL DEFAULT '',
            keywords TEXT NOT NULL DEFAULT '',
            priority INTEGER NOT NULL DEFAULT 1,
            source TEXT NOT NULL DEFAULT '',
            status TEXT NOT NULL DEFAULT 'Active',
            created_by TEXT NOT NULL DEFAULT '',
            version_notes TEXT NOT NULL DEFAULT '',
            view_count INTEGER NOT NULL DEFAULT 0,
            last_used TEXT,
            created_at TEXT,
            updated_at TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_knowledge_base_created_at ON knowledge_base(created_at)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
