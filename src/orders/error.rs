//! Order store error types

use thiserror::Error;

/// Order store errors
///
/// Not-found is not an error here: lookups return `Option`.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Corrupt order row: column '{column}' holds '{value}'")]
    CorruptRow { column: &'static str, value: String },
}
