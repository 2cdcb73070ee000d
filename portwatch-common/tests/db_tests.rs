//! Database initialization and query tests
//!
//! Covers:
//! - Automatic database creation on first run, reopening an existing file
//! - Training-data and knowledge-base insert/list/delete
//! - Conversion of stored rows into filterable records

use portwatch_common::db::{
    delete_knowledge, delete_training_data, get_training_data, init_database, insert_knowledge,
    insert_training_data, list_knowledge, list_knowledge_page, list_training_data,
    list_training_data_page, load_knowledge_records, load_training_records, NewKnowledgeEntry,
    NewTrainingData,
};
use portwatch_common::filter::{discover_categories, ViewFilterEngine, NO_CATEGORY};
use portwatch_common::Error;
use sqlx::SqlitePool;
use tempfile::TempDir;

async fn setup_db() -> (TempDir, SqlitePool) {
    let dir = tempfile::tempdir().expect("temp dir");
    let pool = init_database(&dir.path().join("portwatch.db"))
        .await
        .expect("database init");
    (dir, pool)
}

fn training(description: &str, urgency: &str, category: &str) -> NewTrainingData {
    NewTrainingData {
        incident_description: description.to_string(),
        expected_urgency: urgency.to_string(),
        category: category.to_string(),
        expected_affected_systems: vec!["TOS".to_string()],
        ..Default::default()
    }
}

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("sub").join("portwatch.db");

    let result = init_database(&db_path).await;
    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_opens_existing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("portwatch.db");

    let pool1 = init_database(&db_path).await.unwrap();
    insert_training_data(&pool1, &training("Gate ACCESS_DENIED", "High", "Terminal"))
        .await
        .unwrap();
    pool1.close().await;

    let pool2 = init_database(&db_path).await.unwrap();
    assert_eq!(list_training_data(&pool2).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_insert_and_list_training_data() {
    let (_dir, pool) = setup_db().await;

    let created = insert_training_data(
        &pool,
        &training("EDI message REF-IFT-0007 stuck in ERROR", "High", "Data Integration"),
    )
    .await
    .unwrap();

    assert!(created.id > 0);
    assert_eq!(created.expected_affected_systems, vec!["TOS"]);
    assert!(created.created_at.is_some());
    assert!(!created.is_validated);

    let all = list_training_data(&pool).await.unwrap();
    assert_eq!(all, vec![created]);
}

#[tokio::test]
async fn test_insert_training_data_rejects_blank_description() {
    let (_dir, pool) = setup_db().await;

    let result = insert_training_data(&pool, &training("   ", "High", "")).await;
    assert!(matches!(result, Err(Error::InvalidInput(_))));
    assert!(list_training_data(&pool).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_training_data() {
    let (_dir, pool) = setup_db().await;
    let created = insert_training_data(&pool, &training("Crane fault", "Low", ""))
        .await
        .unwrap();

    assert!(delete_training_data(&pool, created.id).await.unwrap());
    assert!(get_training_data(&pool, created.id).await.unwrap().is_none());

    // Second delete finds nothing
    assert!(!delete_training_data(&pool, created.id).await.unwrap());
}

#[tokio::test]
async fn test_training_records_feed_the_engine() {
    let (_dir, pool) = setup_db().await;
    insert_training_data(&pool, &training("Container duplication CMAU0000020", "Medium", ""))
        .await
        .unwrap();
    insert_training_data(&pool, &training("BAPLIE inconsistency PACIFIC DAWN", "Critical", "Cargo"))
        .await
        .unwrap();

    let records = load_training_records(&pool).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].category, NO_CATEGORY);
    assert_eq!(discover_categories(&records), vec!["Cargo"]);

    let mut engine = ViewFilterEngine::new();
    engine.set_search_term("BAPLIE");
    let view = engine.apply(&records);
    assert_eq!(view.visible_count, 1);
    assert_eq!(view.visible[0].urgency, "Critical");
}

#[tokio::test]
async fn test_knowledge_insert_list_delete() {
    let (_dir, pool) = setup_db().await;

    let created = insert_knowledge(
        &pool,
        &NewKnowledgeEntry {
            title: "Clearing stuck EDI acknowledgements".to_string(),
            content: "Reset ack_at and resend the IFTMIN".to_string(),
            category: "Data Integration".to_string(),
            entry_type: "Procedure".to_string(),
            priority: 4,
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(created.status, "Active");
    assert_eq!(created.view_count, 0);
    assert!(created.last_used.is_none());

    let records = load_knowledge_records(&pool).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].urgency, "Critical");
    assert!(records[0].search_text.contains("iftmin"));

    assert!(delete_knowledge(&pool, created.id).await.unwrap());
    assert!(list_knowledge(&pool).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_paged_listing_skips_and_limits() {
    let (_dir, pool) = setup_db().await;
    for n in 1..=3 {
        insert_training_data(&pool, &training(&format!("Incident {}", n), "Low", ""))
            .await
            .unwrap();
        insert_knowledge(
            &pool,
            &NewKnowledgeEntry {
                title: format!("Article {}", n),
                content: "content".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    }

    let page = list_training_data_page(&pool, 1, 1).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].incident_description, "Incident 2");

    let page = list_knowledge_page(&pool, 1, 100).await.unwrap();
    let titles: Vec<&str> = page.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Article 2", "Article 3"]);

    assert!(list_training_data_page(&pool, 5, 100).await.unwrap().is_empty());
    assert!(list_knowledge_page(&pool, 0, 0).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_knowledge_insert_requires_title_and_content() {
    let (_dir, pool) = setup_db().await;

    let result = insert_knowledge(
        &pool,
        &NewKnowledgeEntry {
            title: "Only a title".to_string(),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(result, Err(Error::InvalidInput(_))));
}
