//! Cucumber summary common types.
//!
//! This crate provides the data model shared by the resolver, the
//! aggregator and the report builder:
//! - Scenario status and its tally/colour policy
//! - Feature metadata derived from a feature URI
//! - Scenario keys with outline disambiguation
//! - Insertion-ordered maps used for result snapshots
//! - The failure taxonomy attached to diagnostics

pub mod error;
pub mod feature;
pub mod ordered;
pub mod status;

pub use error::{Error, FailureKind, Result};
pub use feature::{CredentialPair, FeatureRecord, ScenarioKey, FEATURE_NAME_MISSING};
pub use ordered::{OrderedMap, ResultMap, ScenarioTable};
pub use status::Status;
