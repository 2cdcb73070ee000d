//! HTTP API handlers for portwatch-review

pub mod error;
pub mod events;
pub mod health;
pub mod records;
pub mod views;

pub use error::ApiError;
pub use events::event_stream;
pub use health::health_routes;
pub use records::{
    create_knowledge, create_training_data, delete_knowledge, delete_training_data,
    import_word_document, list_knowledge, list_training_data,
};
pub use views::{export_view, get_view, post_command};
