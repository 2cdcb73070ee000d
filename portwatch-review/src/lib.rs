//! portwatch-review library - incident review service
//!
//! Serves the training-data grid and the knowledge-base table. Each listing
//! owns a server-side view filter engine; the page sends filter commands and
//! renders the returned snapshot.

use axum::extract::DefaultBodyLimit;
use axum::Router;
use portwatch_common::NotificationBus;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod pagination;
pub mod views;

pub use views::{ViewKind, ViewRegistry, ViewSnapshot};

/// Module name reported by `/health` and used in startup logs
pub const MODULE_NAME: &str = "portwatch-review";

/// Largest accepted request body (entry creation, imports, commands)
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Buffered notifications per SSE subscriber
const NOTIFICATION_CAPACITY: usize = 64;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// One filter engine per listing
    pub views: Arc<ViewRegistry>,
    /// Operator notifications, streamed over SSE
    pub notifications: NotificationBus,
}

impl AppState {
    /// Create new application state with default filters on every view
    pub fn new(db: SqlitePool) -> Self {
        Self {
            db,
            views: Arc::new(ViewRegistry::new()),
            notifications: NotificationBus::new(NOTIFICATION_CAPACITY),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{delete, get, post};

    let views = Router::new()
        .route("/api/views/:view", get(api::get_view))
        .route("/api/views/:view/commands", post(api::post_command))
        .route("/api/views/:view/export", get(api::export_view));

    let records = Router::new()
        .route(
            "/api/training-data",
            get(api::list_training_data).post(api::create_training_data),
        )
        .route("/api/training-data/:id", delete(api::delete_training_data))
        .route(
            "/api/knowledge",
            get(api::list_knowledge).post(api::create_knowledge),
        )
        .route("/api/knowledge/import-word", post(api::import_word_document))
        .route("/api/knowledge/:id", delete(api::delete_knowledge));

    Router::new()
        .merge(views)
        .merge(records)
        .route("/api/events", get(api::event_stream))
        .merge(api::health_routes())
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        // Local access from the review page
        .layer(CorsLayer::permissive())
}
