//! Training-data and knowledge-base entry endpoints
//!
//! Creation and deletion publish an operator notification on the bus and
//! return it in the response body. Deleting never touches filter state; the
//! page reloads its listing after [`RELOAD_DELAY_MS`].

use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Form, Json,
};
use portwatch_common::db::{
    self, KnowledgeEntry, NewKnowledgeEntry, NewTrainingData, TrainingDataEntry,
};
use portwatch_common::Notification;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::ApiError;
use crate::pagination::ListParams;
use crate::AppState;

/// Delay before the page reloads after a successful delete
pub const RELOAD_DELAY_MS: u64 = 1_000;

/// Reply to a successful create
#[derive(Debug, Serialize)]
pub struct CreatedResponse<T> {
    pub entry: T,
    pub notification: Notification,
}

/// Form fields of a Word document import; `content` is the extracted text
#[derive(Debug, Deserialize)]
pub struct WordImport {
    pub content: String,
    pub title: String,
    #[serde(default)]
    pub category: String,
}

/// Reply to a Word document import
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub message: String,
    pub id: i64,
    pub notification: Notification,
}

/// Source recorded on knowledge entries imported from Word documents
pub const WORD_IMPORT_SOURCE: &str = "Word Doc";

/// Reply to a delete, successful or not
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub id: i64,
    pub notification: Notification,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reload_after_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ========================================
// Training data
// ========================================

/// GET /api/training-data?skip=0&limit=100
pub async fn list_training_data(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<TrainingDataEntry>>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let page = params.page();
    Ok(Json(
        db::list_training_data_page(&state.db, page.offset, page.limit).await?,
    ))
}

/// POST /api/training-data
pub async fn create_training_data(
    State(state): State<AppState>,
    payload: Result<Json<NewTrainingData>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse<TrainingDataEntry>>), ApiError> {
    let Json(new_entry) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let entry = db::insert_training_data(&state.db, &new_entry).await?;

    let notification = Notification::success(format!("Training entry #{} created", entry.id));
    state.notifications.notify(notification.clone());

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            entry,
            notification,
        }),
    ))
}

/// DELETE /api/training-data/:id
pub async fn delete_training_data(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<(StatusCode, Json<DeleteResponse>), ApiError> {
    let Path(id) = id.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let result = db::delete_training_data(&state.db, id).await;
    Ok(delete_outcome(&state, "Training entry", id, result))
}

// ========================================
// Knowledge base
// ========================================

/// GET /api/knowledge?skip=0&limit=100
pub async fn list_knowledge(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<KnowledgeEntry>>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let page = params.page();
    Ok(Json(
        db::list_knowledge_page(&state.db, page.offset, page.limit).await?,
    ))
}

/// POST /api/knowledge
pub async fn create_knowledge(
    State(state): State<AppState>,
    payload: Result<Json<NewKnowledgeEntry>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse<KnowledgeEntry>>), ApiError> {
    let Json(new_entry) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let entry = db::insert_knowledge(&state.db, &new_entry).await?;

    let notification = Notification::success(format!("Knowledge entry \"{}\" created", entry.title));
    state.notifications.notify(notification.clone());

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            entry,
            notification,
        }),
    ))
}

/// DELETE /api/knowledge/:id
pub async fn delete_knowledge(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<(StatusCode, Json<DeleteResponse>), ApiError> {
    let Path(id) = id.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let result = db::delete_knowledge(&state.db, id).await;
    Ok(delete_outcome(&state, "Knowledge entry", id, result))
}

/// POST /api/knowledge/import-word
///
/// Form-encoded `content`, `title` and optional `category`. Text extraction
/// from the document happens on the page; this stores the result.
pub async fn import_word_document(
    State(state): State<AppState>,
    form: Result<Form<WordImport>, FormRejection>,
) -> Result<Json<ImportResponse>, ApiError> {
    let Form(import) = form.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let new_entry = NewKnowledgeEntry {
        title: import.title,
        content: import.content,
        category: import.category,
        source: WORD_IMPORT_SOURCE.to_string(),
        ..Default::default()
    };
    let entry = db::insert_knowledge(&state.db, &new_entry).await?;
    info!("Imported Word document as knowledge entry {}", entry.id);

    let notification = Notification::success(format!("Document \"{}\" imported", entry.title));
    state.notifications.notify(notification.clone());

    Ok(Json(ImportResponse {
        message: "Document imported successfully".to_string(),
        id: entry.id,
        notification,
    }))
}

/// Turn a delete result into a response and publish its notification
fn delete_outcome(
    state: &AppState,
    label: &str,
    id: i64,
    result: portwatch_common::Result<bool>,
) -> (StatusCode, Json<DeleteResponse>) {
    let (status, response) = match result {
        Ok(true) => {
            info!("{} #{} deleted", label, id);
            (
                StatusCode::OK,
                DeleteResponse {
                    success: true,
                    id,
                    notification: Notification::success(format!("{} #{} deleted", label, id)),
                    reload_after_ms: Some(RELOAD_DELAY_MS),
                    error: None,
                },
            )
        }
        Ok(false) => {
            let message = format!("{} #{} not found", label, id);
            warn!("Delete failed: {}", message);
            (
                StatusCode::NOT_FOUND,
                DeleteResponse {
                    success: false,
                    id,
                    notification: Notification::danger(format!("Error deleting: {}", message)),
                    reload_after_ms: None,
                    error: Some(message),
                },
            )
        }
        Err(e) => {
            let error = ApiError::from(e);
            warn!("Delete of {} #{} failed: {}", label, id, error);
            (
                error.status(),
                DeleteResponse {
                    success: false,
                    id,
                    notification: Notification::danger(format!("Error deleting: {}", error)),
                    reload_after_ms: None,
                    error: Some(error.to_string()),
                },
            )
        }
    };

    state.notifications.notify(response.notification.clone());
    (status, Json(response))
}
