//! Error types for Tally

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A form field is missing or invalid; raised before the store is touched
    #[error("Validation error: {0}")]
    Validation(String),

    /// The store rejected a row (CHECK, NOT NULL or UNIQUE violation)
    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Database error: {0}")]
    Database(#[source] rusqlite::Error),

    #[error("Database pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Initialization error: {0}")]
    Init(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        match err.sqlite_error_code() {
            Some(rusqlite::ErrorCode::ConstraintViolation) => Self::Constraint(err.to_string()),
            _ => Self::Database(err),
        }
    }
}

impl Error {
    /// True for errors the user can fix by correcting input
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Constraint(_) | Self::Import(_) | Self::NotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
