//! Error types for metadata storage operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors during metadata document operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read metadata document {path}")]
    ReadDocument {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write metadata document {path}")]
    WriteDocument {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse metadata document {path}")]
    ParseDocument {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize metadata document")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to create library directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid video id '{id}'")]
    InvalidVideoId { id: String },
}
