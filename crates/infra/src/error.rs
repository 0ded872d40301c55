use thiserror::Error;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("storage I/O failed: {0:#}")]
    Io(anyhow::Error),

    /// A stored value could not be encoded or decoded.
    #[error("value under '{key}' is not valid: {message}")]
    Serialization { key: String, message: String },
}

impl StorageError {
    pub fn serialization(key: &str, err: serde_json::Error) -> Self {
        Self::Serialization {
            key: key.to_string(),
            message: err.to_string(),
        }
    }
}
