//! Error types and failure taxonomy.
//!
//! Nothing in the summary pipeline is allowed to fault the host test run.
//! Every failure degrades to "default value substituted" or "no report",
//! and the diagnostic that records it carries a [`FailureKind`] so log
//! consumers can group them:
//!
//! ```text
//! WARN report generation aborted kind=template_asset_missing asset=styles.css
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for common operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure classes the pipeline can hit. None of them is fatal to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// A configuration layer is absent or a key was not found anywhere.
    ConfigurationMissing,
    /// An argument-string entry had no `=`; the entry was dropped.
    MalformedArgumentEntry,
    /// A skeleton, style or script asset could not be loaded.
    TemplateAssetMissing,
    /// The output sink rejected the finished document.
    ResultWriteFailure,
    /// No feature was observed by the end of the run.
    ZeroResults,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::ConfigurationMissing => write!(f, "configuration_missing"),
            FailureKind::MalformedArgumentEntry => write!(f, "malformed_argument_entry"),
            FailureKind::TemplateAssetMissing => write!(f, "template_asset_missing"),
            FailureKind::ResultWriteFailure => write!(f, "result_write_failure"),
            FailureKind::ZeroResults => write!(f, "zero_results"),
        }
    }
}

/// Errors raised while decoding shared types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A status name that is not one of the known scenario outcomes.
    #[error("unknown scenario status: {0}")]
    UnknownStatus(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_kind_display_matches_serde() {
        for kind in [
            FailureKind::ConfigurationMissing,
            FailureKind::MalformedArgumentEntry,
            FailureKind::TemplateAssetMissing,
            FailureKind::ResultWriteFailure,
            FailureKind::ZeroResults,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind));
        }
    }
}
