//! Per-listing filter engines and the snapshots built from them

use portwatch_common::db::{
    list_knowledge, list_training_data, load_knowledge_records, load_training_records,
};
use portwatch_common::filter::{discover_categories, FilteredView, RenderPlan};
use portwatch_common::time::now_rfc3339;
use portwatch_common::{Error, FilterState, Record, Result, ViewFilterEngine};
use serde::Serialize;
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tokio::sync::Mutex;
use tracing::debug;

/// Listing served by this module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    /// Training-data grid
    Training,
    /// Knowledge-base table
    Knowledge,
}

impl ViewKind {
    pub const ALL: [ViewKind; 2] = [ViewKind::Training, ViewKind::Knowledge];

    pub fn as_str(self) -> &'static str {
        match self {
            ViewKind::Training => "training",
            ViewKind::Knowledge => "knowledge",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "training" => Ok(ViewKind::Training),
            "knowledge" => Ok(ViewKind::Knowledge),
            other => Err(Error::InvalidInput(format!("Unknown view: {}", other))),
        }
    }
}

/// One filter engine per listing
///
/// Engines are independent: a command sent to one view never touches the
/// other's state.
#[derive(Debug, Default)]
pub struct ViewRegistry {
    training: Mutex<ViewFilterEngine>,
    knowledge: Mutex<ViewFilterEngine>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn engine(&self, kind: ViewKind) -> &Mutex<ViewFilterEngine> {
        match kind {
            ViewKind::Training => &self.training,
            ViewKind::Knowledge => &self.knowledge,
        }
    }
}

/// Load the current records of a listing
pub async fn load_records(pool: &SqlitePool, kind: ViewKind) -> Result<Vec<Record>> {
    let records = match kind {
        ViewKind::Training => load_training_records(pool).await?,
        ViewKind::Knowledge => load_knowledge_records(pool).await?,
    };
    debug!("Loaded {} records for {} view", records.len(), kind);
    Ok(records)
}

/// Filtered listing as sent to the page
#[derive(Debug, Clone, Serialize)]
pub struct ViewSnapshot {
    pub view: ViewKind,
    /// Records in the listing before filtering
    pub total_count: usize,
    pub visible_count: usize,
    pub is_empty: bool,
    /// Visible records in display order
    pub records: Vec<Record>,
    /// Category options, rediscovered from the current records
    pub categories: Vec<String>,
    pub state: FilterState,
    pub active_filter_count: usize,
    pub render: RenderPlan,
}

impl ViewSnapshot {
    /// Apply the engine's current state to `records`
    pub fn build(kind: ViewKind, records: &[Record], engine: &ViewFilterEngine) -> Self {
        Self::from_view(kind, records, engine.apply(records), engine)
    }

    /// Snapshot of an already computed view
    pub fn from_view(
        kind: ViewKind,
        records: &[Record],
        view: FilteredView,
        engine: &ViewFilterEngine,
    ) -> Self {
        let active_filter_count = engine.active_filter_count();
        let render = RenderPlan::project(records, &view, active_filter_count);
        Self {
            view: kind,
            total_count: records.len(),
            visible_count: view.visible_count,
            is_empty: view.is_empty,
            records: view.visible,
            categories: discover_categories(records),
            state: engine.state().clone(),
            active_filter_count,
            render,
        }
    }
}

/// JSON download of the visible entries of a listing
#[derive(Debug, Clone, Serialize)]
pub struct ExportDocument {
    pub view: ViewKind,
    pub exported_at: String,
    /// Filters in effect when the export was taken
    pub state: FilterState,
    pub count: usize,
    /// Full stored entries in display order
    pub entries: Vec<serde_json::Value>,
}

/// Stored entries of a listing, each paired with its filterable record
async fn load_entries(
    pool: &SqlitePool,
    kind: ViewKind,
) -> Result<Vec<(Record, serde_json::Value)>> {
    match kind {
        ViewKind::Training => list_training_data(pool)
            .await?
            .into_iter()
            .map(|e| -> Result<_> { Ok((e.to_record(), serde_json::to_value(e)?)) })
            .collect(),
        ViewKind::Knowledge => list_knowledge(pool)
            .await?
            .into_iter()
            .map(|e| -> Result<_> { Ok((e.to_record(), serde_json::to_value(e)?)) })
            .collect(),
    }
}

/// Build the export of everything currently visible in `kind`
pub async fn export_visible(
    pool: &SqlitePool,
    kind: ViewKind,
    registry: &ViewRegistry,
) -> Result<ExportDocument> {
    let entries = load_entries(pool, kind).await?;
    let records: Vec<Record> = entries.iter().map(|(record, _)| record.clone()).collect();
    let mut by_id: HashMap<i64, serde_json::Value> = entries
        .into_iter()
        .map(|(record, value)| (record.id, value))
        .collect();

    let engine = registry.engine(kind).lock().await;
    let view = engine.apply(&records);
    let exported: Vec<serde_json::Value> = view
        .visible_ids()
        .into_iter()
        .filter_map(|id| by_id.remove(&id))
        .collect();

    Ok(ExportDocument {
        view: kind,
        exported_at: now_rfc3339(),
        state: engine.state().clone(),
        count: exported.len(),
        entries: exported,
    })
}
