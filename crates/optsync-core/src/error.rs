//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Storage error: {0}")]
    Storage(#[from] optsync_storage::StorageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Stored record {storage_name} is a {found}, expected an object")]
    InvalidRecord {
        storage_name: String,
        found: &'static str,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<std::io::Error> for SyncError {
    fn from(e: std::io::Error) -> Self {
        SyncError::Config(e.to_string())
    }
}
