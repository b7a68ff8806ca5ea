//! Configuration resolution.
//!
//! Resolution order, highest first:
//! 1. Argument string (`key=value;key2=value2`)
//! 2. Live property store (`cucumber.summary.<key>`), re-read per lookup
//! 3. Environment (`CUCUMBER_SUMMARY_<KEY>`)
//! 4. Properties file (`cucumber-summary.properties`)
//! 5. Caller-supplied default
//!
//! Layers are composed at each lookup rather than merged up front, so a
//! property set after construction still takes effect.

use std::collections::BTreeMap;
use std::path::Path;

use cs_common::FailureKind;
use tracing::trace;

use crate::properties::PropertyStore;
use crate::provider::{
    ArgsProvider, ConfigProvider, ConfigSource, EnvProvider, FileProvider, LivePropertyProvider,
};

/// Flat, case-sensitive key → value view of the merged configuration.
pub type ConfigMap = BTreeMap<String, String>;

/// Layered configuration lookup.
#[derive(Debug)]
pub struct ConfigResolver {
    /// Providers in precedence order, highest first.
    providers: Vec<Box<dyn ConfigProvider>>,
}

impl ConfigResolver {
    /// Resolve against the process: global property store, process
    /// environment and the discovered properties file.
    pub fn resolve(args: &str) -> Self {
        Self::resolve_with_file(args, None)
    }

    /// Like [`ConfigResolver::resolve`] with an explicit properties file.
    pub fn resolve_with_file(args: &str, properties_file: Option<&Path>) -> Self {
        Self::builder()
            .args(args)
            .properties(PropertyStore::global().clone())
            .env(EnvProvider::from_process())
            .file(FileProvider::discover(properties_file))
            .build()
    }

    pub fn builder() -> ConfigResolverBuilder {
        ConfigResolverBuilder::default()
    }

    /// Value for `key` from the highest layer that has one.
    pub fn get(&self, key: &str) -> Option<String> {
        self.lookup(key).map(|(value, _)| value)
    }

    /// Value for `key`, or `fallback` when no layer has it.
    pub fn get_or(&self, key: &str, fallback: &str) -> String {
        match self.lookup(key) {
            Some((value, _)) => value,
            None => {
                trace!(
                    key = key,
                    kind = %FailureKind::ConfigurationMissing,
                    "Using default"
                );
                fallback.to_string()
            }
        }
    }

    /// Boolean value: `true` (any case) is true, anything else false.
    pub fn get_bool(&self, key: &str, fallback: bool) -> bool {
        match self.get(key) {
            Some(value) => value.trim().eq_ignore_ascii_case("true"),
            None => fallback,
        }
    }

    /// Which layer currently answers for `key`.
    pub fn source_of(&self, key: &str) -> Option<ConfigSource> {
        self.lookup(key).map(|(_, source)| source)
    }

    /// Merged view of every key known right now, live layer included.
    pub fn to_map(&self) -> ConfigMap {
        let mut map = ConfigMap::new();
        // Lowest precedence first so higher layers overwrite.
        for provider in self.providers.iter().rev() {
            for key in provider.keys() {
                if let Some(value) = provider.get(&key) {
                    map.insert(key, value);
                }
            }
        }
        map
    }

    fn lookup(&self, key: &str) -> Option<(String, ConfigSource)> {
        self.providers
            .iter()
            .find_map(|p| p.get(key).map(|v| (v, p.source())))
    }
}

/// Assembles a [`ConfigResolver`]. Layer order is fixed regardless of the
/// order the builder methods are called in; omitted layers are empty.
#[derive(Debug, Default)]
pub struct ConfigResolverBuilder {
    args: Option<ArgsProvider>,
    properties: Option<LivePropertyProvider>,
    env: Option<EnvProvider>,
    file: Option<FileProvider>,
}

impl ConfigResolverBuilder {
    pub fn args(mut self, args: &str) -> Self {
        self.args = Some(ArgsProvider::parse(args));
        self
    }

    pub fn properties(mut self, store: PropertyStore) -> Self {
        self.properties = Some(LivePropertyProvider::new(store));
        self
    }

    pub fn env(mut self, env: EnvProvider) -> Self {
        self.env = Some(env);
        self
    }

    pub fn file(mut self, file: FileProvider) -> Self {
        self.file = Some(file);
        self
    }

    pub fn build(self) -> ConfigResolver {
        let mut providers: Vec<Box<dyn ConfigProvider>> = Vec::with_capacity(4);
        if let Some(p) = self.args {
            providers.push(Box::new(p));
        }
        if let Some(p) = self.properties {
            providers.push(Box::new(p));
        }
        if let Some(p) = self.env {
            providers.push(Box::new(p));
        }
        if let Some(p) = self.file {
            providers.push(Box::new(p));
        }
        ConfigResolver { providers }
    }
}
