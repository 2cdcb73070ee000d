//! # PortWatch Common Library
//!
//! Shared code for the PortWatch incident-management services including:
//! - View filter engine (filter/sort/search state for record listings)
//! - Record model and conversion from stored rows
//! - Database initialization and queries
//! - Configuration loading
//! - Operator notifications and the SSE stream that carries them

pub mod config;
#[cfg(feature = "sqlx")]
pub mod db;
pub mod error;
pub mod filter;
pub mod notify;
pub mod sse;
pub mod time;

pub use error::{Error, Result};
pub use filter::{FilterCommand, FilterState, Record, Selection, SortOrder, ViewFilterEngine};
pub use notify::{Notification, NotificationBus, Severity};
