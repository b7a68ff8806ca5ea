//! Error types for configuration loading.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading configuration sources.
///
/// None of these reach the caller of a lookup: a source that fails to load
/// contributes no values and resolution falls through to the next layer.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The properties file exists but could not be read.
    #[error("failed to read properties file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The properties file does not exist.
    #[error("properties file not found: {0}")]
    NotFound(PathBuf),
}
