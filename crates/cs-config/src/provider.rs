//! Configuration providers.
//!
//! Each provider answers lookups for one source. Snapshot providers read
//! their source once at construction; [`LivePropertyProvider`] re-queries
//! its [`PropertyStore`] on every call.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use cs_common::FailureKind;
use tracing::{debug, info};

use crate::error::{ConfigError, Result};
use crate::parse::{env_key, parse_args, parse_properties};
use crate::properties::PropertyStore;
use crate::{APP_NAME, ENV_PREFIX, PROPERTIES_FILENAME, PROPERTY_PREFIX};

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Reporter argument string.
    Arguments,
    /// Live process-wide property store.
    Property,
    /// Prefixed environment variable.
    Environment,
    /// Properties resource file.
    PropertiesFile,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Arguments => write!(f, "argument string"),
            ConfigSource::Property => write!(f, "property"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::PropertiesFile => write!(f, "properties file"),
        }
    }
}

/// One configuration layer.
pub trait ConfigProvider: Send + Sync + std::fmt::Debug {
    /// Which source this provider reads.
    fn source(&self) -> ConfigSource;

    /// Value for `key`, if this layer has one.
    fn get(&self, key: &str) -> Option<String>;

    /// Keys this layer currently knows about.
    fn keys(&self) -> Vec<String>;
}

/// Snapshot of the reporter argument string.
#[derive(Debug, Clone, Default)]
pub struct ArgsProvider {
    values: HashMap<String, String>,
}

impl ArgsProvider {
    pub fn parse(args: &str) -> Self {
        Self {
            values: parse_args(args).into_iter().collect(),
        }
    }
}

impl ConfigProvider for ArgsProvider {
    fn source(&self) -> ConfigSource {
        ConfigSource::Arguments
    }

    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }
}

/// Reads `<prefix><key>` from a property store at every lookup.
#[derive(Debug, Clone)]
pub struct LivePropertyProvider {
    store: PropertyStore,
    prefix: String,
}

impl LivePropertyProvider {
    pub fn new(store: PropertyStore) -> Self {
        Self::with_prefix(store, PROPERTY_PREFIX)
    }

    pub fn with_prefix(store: PropertyStore, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }
}

impl ConfigProvider for LivePropertyProvider {
    fn source(&self) -> ConfigSource {
        ConfigSource::Property
    }

    fn get(&self, key: &str) -> Option<String> {
        self.store.get(&format!("{}{}", self.prefix, key))
    }

    fn keys(&self) -> Vec<String> {
        self.store.keys_with_prefix(&self.prefix)
    }
}

/// Snapshot of prefixed environment variables.
#[derive(Debug, Clone, Default)]
pub struct EnvProvider {
    values: HashMap<String, String>,
}

impl EnvProvider {
    /// Snapshot the current process environment.
    pub fn from_process() -> Self {
        Self::from_vars(ENV_PREFIX, std::env::vars())
    }

    /// Build from an explicit variable list.
    pub fn from_vars<I, K, V>(prefix: &str, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let values = vars
            .into_iter()
            .filter_map(|(name, value)| env_key(name.as_ref(), prefix).map(|k| (k, value.into())))
            .collect();
        Self { values }
    }
}

impl ConfigProvider for EnvProvider {
    fn source(&self) -> ConfigSource {
        ConfigSource::Environment
    }

    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }
}

/// Snapshot of the flat properties resource file.
#[derive(Debug, Clone, Default)]
pub struct FileProvider {
    path: Option<PathBuf>,
    values: HashMap<String, String>,
}

impl FileProvider {
    /// Provider with no values (file absent).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse file contents directly.
    pub fn from_contents(contents: &str) -> Self {
        Self {
            path: None,
            values: parse_properties(contents).into_iter().collect(),
        }
    }

    /// Load a specific file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let mut provider = Self::from_contents(&contents);
        provider.path = Some(path.to_path_buf());
        debug!(path = %path.display(), keys = provider.values.len(), "Loaded properties file");
        Ok(provider)
    }

    /// Locate and load the properties file.
    ///
    /// Search order: explicit path → working directory → XDG config dir.
    /// Absence is not an error: the provider is empty and resolution falls
    /// through to caller defaults.
    pub fn discover(explicit: Option<&Path>) -> Self {
        for candidate in candidate_paths(explicit) {
            match Self::load(&candidate) {
                Ok(provider) => return provider,
                Err(ConfigError::NotFound(_)) => continue,
                Err(err) => {
                    info!(
                        kind = %FailureKind::ConfigurationMissing,
                        error = %err,
                        "Properties file unreadable; continuing without it"
                    );
                    return Self::empty();
                }
            }
        }

        info!(
            kind = %FailureKind::ConfigurationMissing,
            file = PROPERTIES_FILENAME,
            "No properties file found; continuing without it"
        );
        Self::empty()
    }

    /// Path the values were loaded from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

fn candidate_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(path) = explicit {
        paths.push(path.to_path_buf());
    }
    paths.push(PathBuf::from(PROPERTIES_FILENAME));
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join(APP_NAME).join(PROPERTIES_FILENAME));
    }
    paths
}

impl ConfigProvider for FileProvider {
    fn source(&self) -> ConfigSource {
        ConfigSource::PropertiesFile
    }

    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }
}
