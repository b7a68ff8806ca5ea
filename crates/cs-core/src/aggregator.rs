//! Run-lifetime store of scenario outcomes and feature metadata.
//!
//! Results sit behind a single mutex: creating a feature's table on first
//! touch and inserting the outcome happen under one lock, and snapshots
//! clone under the same lock, so a snapshot is a point-in-time view.
//! Metadata and credentials are read-mostly and use `RwLock`s.
//!
//! Poisoned locks are recovered rather than propagated; a panicking
//! worker must not take reporting down with it.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError, RwLock};

use cs_common::{CredentialPair, FeatureRecord, ResultMap, ScenarioKey, ScenarioTable, Status};
use cs_report::{RunSnapshot, RunTiming};
use tracing::{debug, trace};

#[derive(Debug, Default)]
pub struct ResultAggregator {
    results: Mutex<ResultMap>,
    features: RwLock<HashMap<String, FeatureRecord>>,
    credentials: RwLock<HashMap<String, CredentialPair>>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record static metadata for a feature. A repeat call overwrites.
    pub fn record_feature_metadata<S, N>(&self, uri: &str, path_segments: &[S], declared_names: &[N])
    where
        S: AsRef<str>,
        N: AsRef<str>,
    {
        let record = FeatureRecord::derive(uri, path_segments, declared_names);
        debug!(
            uri = uri,
            grouping = %record.grouping_name,
            stem = %record.file_stem_name,
            "Feature metadata recorded"
        );
        self.features
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(uri.to_string(), record);
    }

    /// Insert or overwrite one scenario outcome, creating the feature's
    /// table on first touch.
    pub fn record_scenario_outcome(&self, uri: &str, key: ScenarioKey, status: Status) {
        let mut results = self.results.lock().unwrap_or_else(PoisonError::into_inner);
        let table = results.get_or_insert_with(uri.to_string(), ScenarioTable::new);
        if let Some(previous) = table.insert(key.clone(), status) {
            trace!(uri = uri, scenario = %key, %previous, %status, "Scenario outcome overwritten");
        }
    }

    /// Last-write-wins credential registration. Valid at any time.
    pub fn register_credential(
        &self,
        uri: &str,
        username: impl Into<String>,
        password: impl Into<String>,
    ) {
        self.credentials
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(uri.to_string(), CredentialPair::new(username, password));
    }

    /// Deep copy of every result recorded so far.
    pub fn snapshot(&self) -> ResultMap {
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn feature(&self, uri: &str) -> Option<FeatureRecord> {
        self.features
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(uri)
            .cloned()
    }

    pub fn credential(&self, uri: &str) -> Option<CredentialPair> {
        self.credentials
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(uri)
            .cloned()
    }

    /// Everything report generation reads, copied now.
    pub fn run_snapshot(&self, timing: RunTiming) -> RunSnapshot {
        RunSnapshot {
            results: self.snapshot(),
            features: self
                .features
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
            credentials: self
                .credentials
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
            timing,
        }
    }
}
