use thiserror::Error;

use crate::domain::ValidationErrors;

#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),

    #[error("Maximum {limit} translation records are allowed. Got {given} records instead.")]
    TooManyRecords { limit: usize, given: usize },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ApiResult<T> = Result<T, TranslationError>;
