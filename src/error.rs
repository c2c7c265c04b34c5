use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when talking to the podcast catalog API
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to fetch {url}: {source}")]
    FetchFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Failed to decode response from {url}: {source}")]
    DecodeFailed {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors that can occur when reading or writing the local key-value stores
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to create storage directory {path}: {source}")]
    CreateDirectoryFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read storage file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write storage file {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize stored value: {0}")]
    SerializeFailed(#[from] serde_json::Error),

    #[error("Storage lock was poisoned")]
    Poisoned,
}

/// Errors that can occur when driving the media element
#[derive(Error, Debug)]
pub enum PlaybackError {
    #[error("Failed to launch player '{player}': {source}")]
    SpawnFailed {
        player: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to stop player: {0}")]
    StopFailed(#[source] std::io::Error),
}

/// A textual option (sort order, genre filter, theme) that is not recognised
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind} '{value}' (expected one of: {expected})")]
pub struct UnknownValue {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Errors that can occur when resolving where things live
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine a home directory for application data")]
    DirectoryNotFound,

    #[error("Invalid API base URL '{url}': {source}")]
    InvalidApiBase {
        url: String,
        #[source]
        source: url::ParseError,
    },
}
