use crate::categories::Category;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatementError {
    #[error("Invalid pattern '{pattern}' for category '{category}': {source}")]
    InvalidPattern {
        category: Category,
        pattern: String,
        source: regex::Error,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StatementError>;
