//! Common error types for page rendering

use thiserror::Error;

use crate::record::ProjectId;

/// Common result type for zpage operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while resolving a record or rendering a page
#[derive(Error, Debug)]
pub enum Error {
    /// Catalog (or static record) has no entry for the configured identifier
    #[error("Record not found: no project with id {0}")]
    RecordNotFound(ProjectId),

    /// A field the active template requires has no value in the record
    #[error("Missing field: template requires '{0}' but the record has no value for it")]
    MissingField(String),

    /// Malformed template text
    #[error("Template syntax error at byte {offset}: {message}")]
    TemplateSyntax { offset: usize, message: String },

    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True for the two render failures (as opposed to environment failures)
    pub fn is_render_failure(&self) -> bool {
        matches!(self, Error::RecordNotFound(_) | Error::MissingField(_))
    }
}
