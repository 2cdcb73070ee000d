//! Filtered view endpoints
//!
//! Each listing keeps its filter state server-side. The page sends one
//! command per interaction and re-renders from the snapshot returned by
//! `Apply`/`Clear` or by a plain `GET`.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use portwatch_common::filter::BadgeState;
use portwatch_common::{FilterCommand, FilterState};
use serde::Serialize;
use tracing::{debug, info};

use super::ApiError;
use crate::views::{export_visible, load_records, ViewKind, ViewSnapshot};
use crate::AppState;

/// Reply to a dispatched command
#[derive(Debug, Serialize)]
pub struct CommandResponse {
    pub view: ViewKind,
    pub command: &'static str,
    pub state: FilterState,
    pub active_filter_count: usize,
    pub badge: BadgeState,
    /// Recomputed listing, present for `apply` and `clear`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<ViewSnapshot>,
}

/// GET /api/views/:view
///
/// Applies the view's current filters to freshly loaded records.
pub async fn get_view(
    State(state): State<AppState>,
    Path(view): Path<String>,
) -> Result<Json<ViewSnapshot>, ApiError> {
    let kind: ViewKind = view.parse()?;
    let records = load_records(&state.db, kind).await?;

    let engine = state.views.engine(kind).lock().await;
    Ok(Json(ViewSnapshot::build(kind, &records, &engine)))
}

/// POST /api/views/:view/commands
pub async fn post_command(
    State(state): State<AppState>,
    Path(view): Path<String>,
    payload: Result<Json<FilterCommand>, JsonRejection>,
) -> Result<Json<CommandResponse>, ApiError> {
    let kind: ViewKind = view.parse()?;
    let Json(command) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let name = command.name();

    // Setters never look at records
    let records = if command.produces_view() {
        load_records(&state.db, kind).await?
    } else {
        Vec::new()
    };

    let mut engine = state.views.engine(kind).lock().await;
    let outcome = engine.dispatch(command, &records);
    debug!(
        view = %kind,
        command = name,
        active_filters = outcome.active_filter_count,
        "Dispatched filter command"
    );

    let snapshot = outcome
        .view
        .map(|view| ViewSnapshot::from_view(kind, &records, view, &engine));

    Ok(Json(CommandResponse {
        view: kind,
        command: name,
        badge: BadgeState::from_count(outcome.active_filter_count),
        state: outcome.state,
        active_filter_count: outcome.active_filter_count,
        snapshot,
    }))
}

/// GET /api/views/:view/export
///
/// Downloads the currently visible entries, in display order, as JSON.
pub async fn export_view(
    State(state): State<AppState>,
    Path(view): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let kind: ViewKind = view.parse()?;
    let document = export_visible(&state.db, kind, &state.views).await?;
    info!("Exported {} {} entries", document.count, kind);

    let filename = format!(
        "{}-export-{}.json",
        kind,
        portwatch_common::time::now().format("%Y%m%d-%H%M%S")
    );
    let disposition = format!("attachment; filename=\"{}\"", filename);

    Ok(([(header::CONTENT_DISPOSITION, disposition)], Json(document)))
}
