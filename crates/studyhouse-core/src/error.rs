//! Core error types for studyhouse-core.
//!
//! This module defines the error hierarchy using thiserror. Domain-specific
//! failures (storage, configuration, extraction) have their own enums and
//! fold into `CoreError` via `#[from]`.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studyhouse-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Document-extraction / crawl errors
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// No task with the given id exists in the store
    #[error("No task with id '{0}'")]
    TaskNotFound(String),

    /// Task titles must be non-empty after trimming
    #[error("Task title must not be empty")]
    EmptyTitle,

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Data directory could not be created or resolved
    #[error("Failed to prepare data directory: {0}")]
    DataDir(#[from] std::io::Error),

    /// Query execution failed
    #[error("Query failed: {0}")]
    Query(#[from] rusqlite::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    Load { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    Save { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors from the document-extraction and crawl collaborators.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// No API key stored for the extraction service
    #[error("Extraction API key not configured")]
    NotConfigured,

    /// The async runtime backing the HTTP call could not be created
    #[error("Failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),

    /// HTTP transport failure
    #[error("Extraction request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service returned an error object
    #[error("Extraction API error: {0}")]
    Api(String),

    /// The service response did not match the expected shape
    #[error("Malformed extraction response: {0}")]
    Malformed(String),

    /// Crawl input validation
    #[error("Folder link must not be empty")]
    EmptyFolderLink,
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
