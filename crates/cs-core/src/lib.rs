//! Cucumber summary run listener.
//!
//! This crate provides:
//! - The host signal types and their JSONL encoding
//! - A concurrency-safe result aggregator
//! - `SummaryReporter`, which feeds signals to the aggregator and generates
//!   the HTML report once the run finishes
//! - Logging setup, exit codes and the `cucumber-summary` CLI
//!
//! # Example
//!
//! ```no_run
//! use cs_common::Status;
//! use cs_config::ConfigResolver;
//! use cs_core::{Signal, SummaryReporter};
//! use cs_report::{EmbeddedAssets, FileSink, ReportBuilder};
//!
//! let reporter = SummaryReporter::new(
//!     ConfigResolver::resolve("report.title=Nightly"),
//!     ReportBuilder::new(Box::new(EmbeddedAssets), Box::new(FileSink)),
//! );
//! reporter.on_signal(Signal::CaseFinished {
//!     uri: "features/Login.feature".into(),
//!     name: "Sign in".into(),
//!     keyword: "Scenario".into(),
//!     line: 3,
//!     status: Status::Passed,
//! });
//! reporter.on_signal(Signal::RunFinished { timestamp: None });
//! ```

pub mod aggregator;
pub mod cli;
pub mod error;
pub mod exit_codes;
pub mod logging;
pub mod reporter;
pub mod signals;

pub use aggregator::ResultAggregator;
pub use error::{CoreError, Result};
pub use exit_codes::ExitCode;
pub use reporter::SummaryReporter;
pub use signals::Signal;
