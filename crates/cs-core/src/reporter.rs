//! The run listener: feeds host signals into the aggregator and generates
//! the report once, on the first `RunFinished`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use cs_common::{ResultMap, ScenarioKey};
use cs_config::ConfigResolver;
use cs_report::{ReportBuilder, ReportOutcome, RunTiming};
use tracing::{debug, info, info_span};

use crate::aggregator::ResultAggregator;
use crate::logging::generate_run_id;
use crate::signals::Signal;

/// Consumes host signals for one run.
///
/// `Send + Sync`; share it across worker threads with an `Arc`.
#[derive(Debug)]
pub struct SummaryReporter {
    run_id: String,
    aggregator: Arc<ResultAggregator>,
    config: ConfigResolver,
    builder: ReportBuilder,
    timing: Mutex<RunTiming>,
    generated: AtomicBool,
}

impl SummaryReporter {
    pub fn new(config: ConfigResolver, builder: ReportBuilder) -> Self {
        Self::with_aggregator(config, builder, Arc::new(ResultAggregator::new()))
    }

    /// Use an aggregator the caller also holds.
    pub fn with_aggregator(
        config: ConfigResolver,
        builder: ReportBuilder,
        aggregator: Arc<ResultAggregator>,
    ) -> Self {
        let run_id = generate_run_id();
        debug!(run_id = %run_id, "Reporter created");
        Self {
            run_id,
            aggregator,
            config,
            builder,
            timing: Mutex::new(RunTiming {
                started: Some(Utc::now()),
                finished: None,
            }),
            generated: AtomicBool::new(false),
        }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn aggregator(&self) -> &Arc<ResultAggregator> {
        &self.aggregator
    }

    pub fn config(&self) -> &ConfigResolver {
        &self.config
    }

    /// Point-in-time copy of the recorded results.
    pub fn snapshot(&self) -> ResultMap {
        self.aggregator.snapshot()
    }

    pub fn register_credential(
        &self,
        uri: &str,
        username: impl Into<String>,
        password: impl Into<String>,
    ) {
        self.aggregator.register_credential(uri, username, password);
    }

    /// Handle one signal. Returns the outcome when this signal triggered
    /// report generation; never fails.
    pub fn on_signal(&self, signal: Signal) -> Option<ReportOutcome> {
        match signal {
            Signal::RunStarted { timestamp } => {
                self.timing_mut(|t| t.started = Some(timestamp.unwrap_or_else(Utc::now)));
                None
            }
            Signal::SourceParsed {
                uri,
                path_segments,
                names,
            } => {
                match path_segments {
                    Some(segments) => self.aggregator.record_feature_metadata(&uri, &segments, &names),
                    None => {
                        let segments = cs_common::feature::path_segments(&uri);
                        self.aggregator.record_feature_metadata(&uri, &segments, &names)
                    }
                }
                None
            }
            Signal::CaseStarted { uri, name } => {
                debug!(uri = %uri, scenario = %name, "Case started");
                None
            }
            Signal::CaseFinished {
                uri,
                name,
                keyword,
                line,
                status,
            } => {
                let key = ScenarioKey::for_case(&name, &keyword, line);
                self.aggregator.record_scenario_outcome(&uri, key, status);
                None
            }
            Signal::RunFinished { timestamp } => Some(self.finish(timestamp)),
        }
    }

    /// Close the run and generate the report. Only the first call generates;
    /// later calls return [`ReportOutcome::AlreadyGenerated`].
    pub fn finish(&self, at: Option<DateTime<Utc>>) -> ReportOutcome {
        if self.generated.swap(true, Ordering::SeqCst) {
            debug!(run_id = %self.run_id, "Report already generated for this run");
            return ReportOutcome::AlreadyGenerated;
        }

        let timing = self.timing_mut(|t| {
            t.finished = Some(at.unwrap_or_else(Utc::now));
            *t
        });

        let span = info_span!("run", run_id = %self.run_id);
        let _guard = span.enter();

        let snapshot = self.aggregator.run_snapshot(timing);
        info!(
            features = snapshot.results.len(),
            duration = %timing.formatted(),
            "Run finished"
        );
        self.builder.generate(&self.config, &snapshot)
    }

    fn timing_mut<R>(&self, f: impl FnOnce(&mut RunTiming) -> R) -> R {
        let mut timing = self.timing.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut timing)
    }
}
