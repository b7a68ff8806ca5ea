//! HTML summary report generation for Cucumber runs.
//!
//! This crate provides:
//! - A nested-fragment template engine (extract / instantiate)
//! - Skeleton composition from the HTML, CSS and JS assets
//! - Per-feature and run-wide tallies
//! - A report builder that turns a run snapshot into a written document
//!
//! # Example
//!
//! ```no_run
//! use cs_config::ConfigResolver;
//! use cs_report::{EmbeddedAssets, FileSink, ReportBuilder, RunSnapshot};
//!
//! let builder = ReportBuilder::new(Box::new(EmbeddedAssets), Box::new(FileSink));
//! let config = ConfigResolver::resolve("report.title=Nightly");
//! let outcome = builder.generate(&config, &RunSnapshot::default());
//! println!("{outcome:?}");
//! ```

pub mod assets;
pub mod builder;
pub mod duration;
pub mod error;
pub mod sink;
pub mod skeleton;
pub mod summary;
pub mod template;
pub mod timestamp;

pub use assets::{AssetBundle, AssetSource, DirAssets, EmbeddedAssets};
pub use builder::{NamingRules, ReportBuilder, ReportOutcome, RunSnapshot};
pub use duration::{format_duration, RunTiming};
pub use error::{ReportError, Result, TemplateError};
pub use sink::{FileSink, MemorySink, ReportSink};
pub use summary::Tally;
pub use template::{extract, instantiate, FragmentKind, TemplateFragments};
