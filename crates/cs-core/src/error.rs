//! Error types for the CLI driver.
//!
//! The reporter itself never fails; these cover reading the events source
//! and writing the snapshot export.

use std::path::PathBuf;
use thiserror::Error;

use crate::exit_codes::ExitCode;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Error, Debug)]
pub enum CoreError {
    /// A path given on the command line does not exist.
    #[error("{what} not found: {path}")]
    MissingPath { what: &'static str, path: PathBuf },

    #[error("failed to open events source {path}: {source}")]
    EventsOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read events at line {line}: {source}")]
    EventsRead {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode snapshot: {0}")]
    SnapshotEncode(#[from] serde_json::Error),

    #[error("failed to write snapshot to {path}: {source}")]
    SnapshotWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CoreError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CoreError::MissingPath { .. } => ExitCode::ArgsError,
            CoreError::EventsOpen { .. }
            | CoreError::EventsRead { .. }
            | CoreError::SnapshotWrite { .. } => ExitCode::IoError,
            CoreError::SnapshotEncode(_) => ExitCode::InternalError,
        }
    }
}
