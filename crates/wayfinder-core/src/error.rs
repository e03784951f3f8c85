//! Error types for Wayfinder Core

use thiserror::Error;

/// Result type alias using Wayfinder's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error raised by a query collaborator
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Wayfinder error types
///
/// An unreachable goal is not an error: searches report it as an empty path.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Query failed: {0}")]
    Query(#[source] BoxError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Wrap a failure raised by the query while computing adjacency or estimates
    pub fn query<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Query(Box::new(err))
    }

    /// Whether this error came from the query collaborator
    pub fn is_query(&self) -> bool {
        matches!(self, Self::Query(_))
    }
}
