use std::path::PathBuf;
use thiserror::Error;

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that can occur during search operations
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to write output file {path}: {source}")]
    OutputError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Match channel disconnected before scan completed")]
    ChannelClosed,
    #[error("Worker thread panicked: {0}")]
    ThreadPanic(String),
}

impl SearchError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound(path.into())
    }

    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        Self::PermissionDenied(path.into())
    }

    pub fn output_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OutputError {
            path: path.into(),
            source,
        }
    }

    pub fn thread_panic(msg: impl Into<String>) -> Self {
        Self::ThreadPanic(msg.into())
    }
}

/// Maps an open/read error on `path` to the most specific variant available.
pub(crate) fn classify_io_error(path: &std::path::Path, e: std::io::Error) -> SearchError {
    match e.kind() {
        std::io::ErrorKind::NotFound => SearchError::file_not_found(path),
        std::io::ErrorKind::PermissionDenied => SearchError::permission_denied(path),
        _ => SearchError::IoError(e),
    }
}
