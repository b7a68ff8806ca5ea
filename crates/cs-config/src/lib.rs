//! Cucumber summary configuration resolution.
//!
//! This crate provides:
//! - The argument-string and properties-file grammars
//! - A process-wide property store that is re-read on every lookup
//! - Snapshot providers for arguments, environment and properties file
//! - A resolver composing the providers in fixed precedence
//!
//! Precedence, highest first: argument string → live property store →
//! `CUCUMBER_SUMMARY_*` environment → `cucumber-summary.properties` →
//! caller default.

pub mod error;
pub mod keys;
pub mod parse;
pub mod properties;
pub mod provider;
pub mod resolve;

pub use error::{ConfigError, Result};
pub use properties::PropertyStore;
pub use provider::{
    ArgsProvider, ConfigProvider, ConfigSource, EnvProvider, FileProvider, LivePropertyProvider,
};
pub use resolve::{ConfigMap, ConfigResolver, ConfigResolverBuilder};

/// Prefix of environment variables read by the resolver.
pub const ENV_PREFIX: &str = "CUCUMBER_SUMMARY_";

/// Prefix of property-store keys read by the resolver.
pub const PROPERTY_PREFIX: &str = "cucumber.summary.";

/// Name of the flat key=value resource file.
pub const PROPERTIES_FILENAME: &str = "cucumber-summary.properties";

/// Application name for XDG directories.
pub const APP_NAME: &str = "cucumber-summary";
