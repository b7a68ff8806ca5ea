//! Error types for report generation.

use std::path::PathBuf;
use thiserror::Error;

use crate::template::FragmentKind;

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur during report generation.
#[derive(Error, Debug)]
pub enum ReportError {
    /// A required skeleton, style or script asset is absent.
    #[error("template asset '{name}' missing")]
    AssetMissing { name: String },

    /// An asset exists but could not be read.
    #[error("failed to read asset '{name}': {source}")]
    AssetRead {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// The skeleton's fragment markers are malformed.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// The sink rejected the finished document.
    #[error("failed to write report to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration value could not be used.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Errors found while extracting fragments from a skeleton.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// No complete region of this kind exists.
    #[error("{} fragment not found", .0.name())]
    MissingFragment(FragmentKind),

    /// An end marker appeared with no region open.
    #[error("unexpected '{marker}' at byte {offset}")]
    UnexpectedEnd { marker: &'static str, offset: usize },

    /// An end marker closed a region other than the innermost open one.
    #[error("expected '{expected}' but found '{found}' at byte {offset}")]
    Mismatched {
        expected: &'static str,
        found: &'static str,
        offset: usize,
    },

    /// A region was opened and never closed.
    #[error("'{marker}' opened at byte {offset} is never closed")]
    Unclosed { marker: &'static str, offset: usize },

    /// A region sits where the report layout cannot use it.
    #[error("{} fragment misplaced: {reason}", .kind.name())]
    Misplaced {
        kind: FragmentKind,
        reason: &'static str,
    },
}
