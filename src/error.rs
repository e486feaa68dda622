use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or unusable settings. Displays the bare message so it can be
    /// handed to API callers verbatim.
    #[error("{0}")]
    Configuration(String),
    #[error("completion provider error: {0}")]
    Provider(String),
    #[error("completion is not valid JSON ({reason}): {raw}")]
    Parse { raw: String, reason: String },
    #[error("invalid classification field `{field}`: {reason}")]
    Validation { field: String, reason: String },
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl AppError {
    pub fn validation(field: &str, reason: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
