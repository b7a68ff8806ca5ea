//! Host test-framework signals.
//!
//! On the wire each signal is one JSON object tagged by `"type"`:
//!
//! ```json
//! {"type":"source_parsed","uri":"features/Login.feature","names":["Login"]}
//! {"type":"case_finished","uri":"features/Login.feature","name":"Sign in","keyword":"Scenario","line":4,"status":"PASSED"}
//! {"type":"run_finished"}
//! ```

use chrono::{DateTime, Utc};
use cs_common::Status;
use serde::{Deserialize, Serialize};

/// One event emitted by the host during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Signal {
    /// Run began. Bounds the run duration.
    RunStarted {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timestamp: Option<DateTime<Utc>>,
    },

    /// A feature source was parsed.
    SourceParsed {
        uri: String,
        /// Raw path segments; derived from the URI when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        path_segments: Option<Vec<String>>,
        /// Names found on the parsed document nodes, in document order.
        #[serde(default)]
        names: Vec<String>,
    },

    /// A test case began. Diagnostic only.
    CaseStarted { uri: String, name: String },

    /// A test case reached a terminal status.
    CaseFinished {
        uri: String,
        name: String,
        #[serde(default)]
        keyword: String,
        #[serde(default)]
        line: u32,
        status: Status,
    },

    /// Run ended. Triggers report generation.
    RunFinished {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timestamp: Option<DateTime<Utc>>,
    },
}

impl Signal {
    /// Decode one JSONL line.
    pub fn from_json_line(line: &str) -> serde_json::Result<Self> {
        serde_json::from_str(line.trim())
    }

    /// Wire name of this signal.
    pub fn kind(&self) -> &'static str {
        match self {
            Signal::RunStarted { .. } => "run_started",
            Signal::SourceParsed { .. } => "source_parsed",
            Signal::CaseStarted { .. } => "case_started",
            Signal::CaseFinished { .. } => "case_finished",
            Signal::RunFinished { .. } => "run_finished",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_case_finished() {
        let signal = Signal::from_json_line(
            r#"{"type":"case_finished","uri":"a.feature","name":"Add","keyword":"Scenario Outline","line":12,"status":"failed"}"#,
        )
        .unwrap();
        assert_eq!(
            signal,
            Signal::CaseFinished {
                uri: "a.feature".to_string(),
                name: "Add".to_string(),
                keyword: "Scenario Outline".to_string(),
                line: 12,
                status: Status::Failed,
            }
        );
        assert_eq!(signal.kind(), "case_finished");
    }

    #[test]
    fn test_decode_optional_fields() {
        let signal =
            Signal::from_json_line(r#"{"type":"source_parsed","uri":"x/y.feature"}"#).unwrap();
        assert!(matches!(
            signal,
            Signal::SourceParsed { path_segments: None, ref names, .. } if names.is_empty()
        ));

        let signal = Signal::from_json_line(
            r#"{"type":"run_finished","timestamp":"2024-05-01T10:00:00Z"}"#,
        )
        .unwrap();
        assert!(matches!(signal, Signal::RunFinished { timestamp: Some(_) }));
    }

    #[test]
    fn test_reject_unknown_type_and_status() {
        assert!(Signal::from_json_line(r#"{"type":"teardown"}"#).is_err());
        assert!(Signal::from_json_line(
            r#"{"type":"case_finished","uri":"a","name":"b","status":"MAYBE"}"#
        )
        .is_err());
        assert!(Signal::from_json_line("not json").is_err());
    }

    #[test]
    fn test_serialize_tag() {
        let json = serde_json::to_string(&Signal::RunFinished { timestamp: None }).unwrap();
        assert_eq!(json, r#"{"type":"run_finished"}"#);
    }
}
