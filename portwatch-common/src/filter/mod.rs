//! View filter engine
//!
//! Maintains filter/sort/search state for one rendered listing of records
//! (the training-data grid or the knowledge-base table) and recomputes the
//! visible subset, its order, and the indicators derived from it.
//!
//! Each listing owns its own [`ViewFilterEngine`]; nothing here is shared
//! between views. User interactions arrive as [`FilterCommand`] values and the
//! rendering side consumes a [`RenderPlan`] projected from the result.

mod command;
mod engine;
mod record;
mod render;
mod selection;
mod state;

pub use command::{CommandOutcome, FilterCommand};
pub use engine::{discover_categories, FilteredView, ViewFilterEngine};
pub use record::{build_search_text, normalize_category, Record, NO_CATEGORY};
pub use render::{count_text, BadgeState, RenderPlan};
pub use selection::{CheckboxChoice, Labels, Selection};
pub use state::{FilterState, SortOrder};
