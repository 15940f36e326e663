//! Configuration error types.
//!
//! Only schema and option construction can fail. Interaction paths
//! (sorting, visibility, expansion) never return errors; they report
//! [`EventResult::Ignored`](crate::dispatch::EventResult::Ignored) instead.

use std::any::Any;

use thiserror::Error;

/// Error raised while building a table configuration.
#[derive(Debug, Error)]
pub enum TableError {
    /// Two columns in the schema share the same id.
    #[error("duplicate column id '{id}'")]
    DuplicateColumn {
        /// The repeated column id.
        id: String,
    },
    /// A column was declared with an empty id.
    #[error("column at index {index} has an empty id")]
    EmptyColumnId {
        /// Position of the offending column in the schema.
        index: usize,
    },
    /// Table options could not be parsed.
    #[error("invalid table options: {0}")]
    InvalidOptions(#[from] serde_json::Error),
}

/// Extract a human-readable message from a caught panic payload.
///
/// Panics carry either `&str` or `String` payloads; anything else
/// falls back to a generic message.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
