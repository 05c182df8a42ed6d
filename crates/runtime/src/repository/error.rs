use thiserror::Error;

/// Failure reading or writing save data.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("save file access failed: {0}")]
    Io(#[from] std::io::Error),

    /// Stored value does not parse as the requested type.
    #[error("save data is not valid JSON: {0}")]
    Json(String),

    #[error("invalid key '{key}': {reason}")]
    InvalidKey { key: String, reason: &'static str },

    #[error("save data is corrupted: {0}")]
    CorruptedData(String),
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
