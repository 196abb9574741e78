//! Catalog error types.

use thiserror::Error;

/// Errors that can occur while parsing the catalog or building discovery
/// experiences on top of it.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog document is not valid JSON or has the wrong shape.
    #[error("Catalog parse error: {0}")]
    Parse(String),

    /// A product record carries no usable identifier.
    #[error("Product record has no id (source position {0})")]
    MissingId(usize),

    /// Not enough products to build a quiz.
    #[error("Not enough products available: requested {requested}, found {available}")]
    NotEnoughProducts { requested: usize, available: usize },

    /// Quiz not found in the session.
    #[error("Quiz not found: {0}")]
    QuizNotFound(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Parse(e.to_string())
    }
}
