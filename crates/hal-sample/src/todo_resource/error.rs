//! Error types for the Todo resource.

use thiserror::Error;

/// Errors that can occur while producing a todo document.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TodoError {
    /// The requested todo was not found.
    #[error("Todo not found: {0}")]
    NotFound(String),
}
