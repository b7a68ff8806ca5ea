//! Scenario execution status.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Terminal outcome of one scenario.
///
/// Only [`Status::Passed`] counts toward a pass tally. Every other value is
/// tallied as a failure; `Skipped` is additionally broken out for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    #[serde(alias = "passed")]
    Passed,
    #[serde(alias = "failed")]
    Failed,
    #[serde(alias = "skipped")]
    Skipped,
    #[serde(alias = "pending")]
    Pending,
    #[serde(alias = "undefined")]
    Undefined,
    #[serde(alias = "ambiguous")]
    Ambiguous,
    #[serde(alias = "unused")]
    Unused,
}

impl Status {
    /// Whether this status counts toward the pass tally.
    pub fn is_passed(&self) -> bool {
        matches!(self, Status::Passed)
    }

    /// Colour token used for a scenario row's status dot.
    pub fn color_token(&self) -> &'static str {
        match self {
            Status::Passed => "green",
            Status::Skipped => "cyan",
            _ => "red",
        }
    }

    /// Canonical upper-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Passed => "PASSED",
            Status::Failed => "FAILED",
            Status::Skipped => "SKIPPED",
            Status::Pending => "PENDING",
            Status::Undefined => "UNDEFINED",
            Status::Ambiguous => "AMBIGUOUS",
            Status::Unused => "UNUSED",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "passed" => Ok(Status::Passed),
            "failed" => Ok(Status::Failed),
            "skipped" => Ok(Status::Skipped),
            "pending" => Ok(Status::Pending),
            "undefined" => Ok(Status::Undefined),
            "ambiguous" => Ok(Status::Ambiguous),
            "unused" => Ok(Status::Unused),
            _ => Err(Error::UnknownStatus(s.to_string())),
        }
    }
}
