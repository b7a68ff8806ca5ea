//! Report assembly: one generation pass from a run snapshot to a written file.

use std::collections::HashMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use cs_common::{CredentialPair, FailureKind, FeatureRecord, ResultMap, ScenarioTable};
use cs_config::keys::{self, defaults};
use cs_config::ConfigResolver;
use tracing::{debug, error, info, info_span};

use crate::assets::{AssetBundle, AssetSource};
use crate::duration::RunTiming;
use crate::error::Result;
use crate::sink::ReportSink;
use crate::skeleton::{compose, SkeletonSettings};
use crate::summary::Tally;
use crate::template::{extract, instantiate, tokens as slots, TemplateFragments};

/// Placeholder tokens filled per fragment.
pub mod tokens {
    pub const TC_KEY: &str = "$tcKey";
    pub const TC_NAME: &str = "$tcName";
    pub const TC_STATUS: &str = "$tcStatus";

    pub const FEATURE_NAME: &str = "$featureName";
    pub const FEATURE_NO: &str = "$featureNo";
    pub const USERNAME: &str = "$username";
    pub const PASSWORD: &str = "$password";
    pub const PASS_COUNT: &str = "$passCount";
    pub const FAIL_COUNT: &str = "$failCount";
    pub const SKIP_COUNT: &str = "$skipCount";
    pub const TOTAL_COUNT: &str = "$totalCount";
    pub const FEATURE_STATUS: &str = "$featureStatus";
    pub const FEATURE_PASS_PERCENT: &str = "$featurePassPercent";

    pub const OVERALL_PASS_COUNT: &str = "$overallPassCount";
    pub const OVERALL_FAIL_COUNT: &str = "$overallFailCount";
    pub const OVERALL_SKIP_COUNT: &str = "$overallSkipCount";
    pub const OVERALL_COUNT: &str = "$overallCount";
    pub const OVERALL_STATUS: &str = "$overallStatus";
    pub const OVERALL_PASS_PERCENT: &str = "$overallPassPercent";
}

/// Everything a generation pass reads from the aggregator.
#[derive(Debug, Clone, Default)]
pub struct RunSnapshot {
    pub results: ResultMap,
    pub features: HashMap<String, FeatureRecord>,
    pub credentials: HashMap<String, CredentialPair>,
    pub timing: RunTiming,
}

/// How a generation pass ended. Never an error: every failure degrades to
/// "no report" with a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// The document reached the sink.
    Written { path: PathBuf, bytes: usize },
    /// Nothing was recorded; no document produced.
    Skipped,
    /// This run's report was already generated; nothing was done.
    AlreadyGenerated,
    /// Generation stopped before any output.
    Aborted { kind: FailureKind, reason: String },
    /// The sink rejected the document.
    WriteFailed { path: PathBuf, reason: String },
}

impl ReportOutcome {
    /// Failure taxonomy entry for this outcome, if it is not a success.
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            ReportOutcome::Written { .. } | ReportOutcome::AlreadyGenerated => None,
            ReportOutcome::Skipped => Some(FailureKind::ZeroResults),
            ReportOutcome::Aborted { kind, .. } => Some(*kind),
            ReportOutcome::WriteFailed { .. } => Some(FailureKind::ResultWriteFailure),
        }
    }
}

/// Display name rules read from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamingRules {
    pub use_declared_name: bool,
    pub use_grouping_name: bool,
}

impl NamingRules {
    pub fn from_config(config: &ConfigResolver) -> Self {
        Self {
            use_declared_name: config.get_bool(keys::USE_DECLARED_NAME, defaults::USE_DECLARED_NAME),
            use_grouping_name: config.get_bool(keys::USE_GROUPING_NAME, defaults::USE_GROUPING_NAME),
        }
    }

    /// Declared name, else `grouping - stem` when grouping is on and
    /// non-empty, else the bare file stem.
    pub fn display_name(&self, record: &FeatureRecord) -> String {
        if self.use_declared_name {
            record.declared_name.clone()
        } else if self.use_grouping_name && !record.grouping_name.is_empty() {
            format!("{} - {}", record.grouping_name, record.file_stem_name)
        } else {
            record.file_stem_name.clone()
        }
    }
}

/// Drives a generation pass.
#[derive(Debug)]
pub struct ReportBuilder {
    assets: Box<dyn AssetSource>,
    sink: Box<dyn ReportSink>,
    generated_at: Option<DateTime<Utc>>,
}

impl ReportBuilder {
    pub fn new(assets: Box<dyn AssetSource>, sink: Box<dyn ReportSink>) -> Self {
        Self {
            assets,
            sink,
            generated_at: None,
        }
    }

    /// Pin the execution timestamp instead of reading the clock.
    pub fn with_generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = Some(at);
        self
    }

    /// Run one pass: render, then hand the document to the sink.
    ///
    /// Configuration is read here, so late property writes are honoured.
    pub fn generate(&self, config: &ConfigResolver, run: &RunSnapshot) -> ReportOutcome {
        let span = info_span!("generate_report", features = run.results.len());
        let _guard = span.enter();

        if run.results.is_empty() {
            info!(kind = %FailureKind::ZeroResults, "No results recorded; skipping report");
            return ReportOutcome::Skipped;
        }

        let document = match self.render(config, run) {
            Ok(document) => document,
            Err(err) => {
                error!(
                    kind = %FailureKind::TemplateAssetMissing,
                    error = %err,
                    "Report generation stopped"
                );
                return ReportOutcome::Aborted {
                    kind: FailureKind::TemplateAssetMissing,
                    reason: err.to_string(),
                };
            }
        };

        let path = PathBuf::from(config.get_or(keys::REPORT_FILE_PATH, defaults::REPORT_FILE_PATH));
        debug!(
            path = %path.display(),
            source = ?config.source_of(keys::REPORT_FILE_PATH),
            "Output path resolved"
        );
        match self.sink.write(&path, &document) {
            Ok(()) => {
                info!(path = %path.display(), bytes = document.len(), "Report generated");
                ReportOutcome::Written {
                    path,
                    bytes: document.len(),
                }
            }
            Err(err) => {
                error!(
                    kind = %FailureKind::ResultWriteFailure,
                    path = %path.display(),
                    error = %err,
                    "Failed to write report"
                );
                ReportOutcome::WriteFailed {
                    path,
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Produce the finished document without writing it.
    pub fn render(&self, config: &ConfigResolver, run: &RunSnapshot) -> Result<String> {
        let bundle = AssetBundle::load(self.assets.as_ref())?;
        let now = self.generated_at.unwrap_or_else(Utc::now);
        let settings = SkeletonSettings::from_config(config, now, run.timing.formatted());
        let skeleton = compose(&bundle, &settings);
        let fragments = extract(&skeleton)?;
        debug!(
            feature_bytes = fragments.feature.len(),
            testcase_bytes = fragments.testcase.len(),
            subtotal_bytes = fragments.subtotal.len(),
            "Fragments extracted"
        );

        let naming = NamingRules::from_config(config);
        let default_credentials = CredentialPair::new(
            config.get_or(keys::TEST_USER, defaults::USERNAME),
            config.get_or(keys::TEST_PASSWORD, defaults::PASSWORD),
        );

        let mut features = String::new();
        let mut run_tally = Tally::default();
        for (index, (uri, table)) in run.results.iter().enumerate() {
            let feature_no = index + 1;
            let record = run
                .features
                .get(uri)
                .cloned()
                .unwrap_or_else(|| FeatureRecord::from_uri(uri, &[] as &[&str]));
            let credentials = run.credentials.get(uri).unwrap_or(&default_credentials);
            let tally = Tally::from_table(table);
            run_tally += tally;

            debug!(
                uri = %uri,
                feature_no,
                pass = tally.pass,
                fail = tally.fail,
                "Feature assembled"
            );
            features.push_str(&feature_block(
                &fragments,
                table,
                feature_no,
                &naming.display_name(&record),
                credentials,
                &tally,
            ));
        }

        let overall = overall_bindings(&run_tally);
        let subtotal = instantiate(&fragments.subtotal, &overall);
        let mut bindings: Vec<(&str, &str)> = overall
            .iter()
            .map(|(token, value)| (*token, value.as_str()))
            .collect();
        bindings.push((slots::INSERT_FEATURES, features.as_str()));
        bindings.push((slots::INSERT_SUBTOTAL, subtotal.as_str()));
        let document = instantiate(&fragments.outer, &bindings);

        if config.get_bool(keys::REPORT_MINIFY, defaults::REPORT_MINIFY) {
            return Ok(minify(document));
        }
        Ok(document)
    }
}

fn feature_block(
    fragments: &TemplateFragments,
    table: &ScenarioTable,
    feature_no: usize,
    name: &str,
    credentials: &CredentialPair,
    tally: &Tally,
) -> String {
    let mut rows = String::new();
    for (ordinal, (key, status)) in table.iter().enumerate() {
        let tc_key = format!("SC-{:03}", ordinal + 1);
        rows.push_str(&instantiate(
            &fragments.testcase,
            &[
                (tokens::TC_KEY, tc_key.as_str()),
                (tokens::TC_NAME, key.as_str()),
                (tokens::TC_STATUS, status.color_token()),
            ],
        ));
    }

    let feature_no = feature_no.to_string();
    let pass = tally.pass.to_string();
    let fail = tally.fail.to_string();
    let skipped = tally.skipped.to_string();
    let total = tally.total().to_string();
    let percent = tally.pass_percent();
    instantiate(
        &fragments.feature,
        &[
            (slots::INSERT_TESTCASES, rows.as_str()),
            (tokens::FEATURE_NAME, name),
            (tokens::FEATURE_NO, feature_no.as_str()),
            (tokens::USERNAME, credentials.username.as_str()),
            (tokens::PASSWORD, credentials.password.as_str()),
            (tokens::PASS_COUNT, pass.as_str()),
            (tokens::FAIL_COUNT, fail.as_str()),
            (tokens::SKIP_COUNT, skipped.as_str()),
            (tokens::TOTAL_COUNT, total.as_str()),
            (tokens::FEATURE_STATUS, tally.status_color()),
            (tokens::FEATURE_PASS_PERCENT, percent.as_str()),
        ],
    )
}

fn overall_bindings(tally: &Tally) -> Vec<(&'static str, String)> {
    vec![
        (tokens::OVERALL_PASS_COUNT, tally.pass.to_string()),
        (tokens::OVERALL_FAIL_COUNT, tally.fail.to_string()),
        (tokens::OVERALL_SKIP_COUNT, tally.skipped.to_string()),
        (tokens::OVERALL_COUNT, tally.total().to_string()),
        (tokens::OVERALL_STATUS, tally.status_color().to_string()),
        (tokens::OVERALL_PASS_PERCENT, tally.pass_percent()),
    ]
}

fn minify(html: String) -> String {
    let cfg = minify_html::Cfg {
        minify_js: true,
        minify_css: true,
        ..Default::default()
    };
    String::from_utf8(minify_html::minify(html.as_bytes(), &cfg)).unwrap_or(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{EmbeddedAssets, SCRIPTS, SKELETON, STYLES};
    use crate::error::ReportError;
    use crate::sink::MemorySink;
    use cs_common::{ScenarioKey, Status};
    use cs_config::PropertyStore;

    const TINY_SKELETON: &str = "<h1>$reportTitle</h1>\
FeatureDetailsStart[$featureNo:$featureName:$username/$password:$passCount/$failCount/$totalCount:$featurePassPercent:$featureStatus\
TcDetailsStart($tcKey $tcName $tcStatus)TcDetailsEnd]FeatureDetailsEnd\
SubTotalDetailsStart{$overallPassCount/$overallFailCount/$overallCount:$overallPassPercent:$overallStatus}SubTotalDetailsEnd\
<chart>$overallPassCount,$overallFailCount,$overallSkipCount</chart>";

    #[derive(Debug)]
    struct FixedAssets(&'static str);

    impl AssetSource for FixedAssets {
        fn load(&self, name: &str) -> Result<String> {
            match name {
                SKELETON => Ok(self.0.to_string()),
                STYLES | SCRIPTS => Ok(String::new()),
                _ => Err(ReportError::AssetMissing {
                    name: name.to_string(),
                }),
            }
        }
    }

    #[derive(Debug)]
    struct NoStyles;

    impl AssetSource for NoStyles {
        fn load(&self, name: &str) -> Result<String> {
            match name {
                STYLES => Err(ReportError::AssetMissing {
                    name: name.to_string(),
                }),
                _ => EmbeddedAssets.load(name),
            }
        }
    }

    fn config(args: &str) -> ConfigResolver {
        ConfigResolver::builder()
            .args(args)
            .properties(PropertyStore::new())
            .build()
    }

    fn run() -> RunSnapshot {
        let mut snapshot = RunSnapshot::default();
        let a = "classpath:features/checkout/Cart.feature";
        let b = "file:/tmp/Features/Login.feature";
        snapshot.features.insert(
            a.to_string(),
            FeatureRecord::from_uri(a, &["Shopping cart"]),
        );
        snapshot
            .features
            .insert(b.to_string(), FeatureRecord::from_uri(b, &["Login"]));

        let table = snapshot.results.get_or_insert_with(a.to_string(), ScenarioTable::new);
        table.insert(ScenarioKey::new("Add item"), Status::Passed);
        table.insert(ScenarioKey::new("Remove item"), Status::Passed);
        table.insert(ScenarioKey::new("Pay"), Status::Failed);
        let table = snapshot.results.get_or_insert_with(b.to_string(), ScenarioTable::new);
        table.insert(ScenarioKey::new("Sign in"), Status::Passed);

        snapshot
            .credentials
            .insert(b.to_string(), CredentialPair::new("alice", "s3cret"));
        snapshot
    }

    fn builder(sink: MemorySink) -> ReportBuilder {
        ReportBuilder::new(Box::new(FixedAssets(TINY_SKELETON)), Box::new(sink))
    }

    #[test]
    fn test_render_tiny_skeleton() {
        let doc = builder(MemorySink::new())
            .render(&config("report.title=Nightly"), &run())
            .unwrap();
        assert_eq!(
            doc,
            "<h1>Nightly</h1>\
[1:checkout - Cart:---/---:2/1/3:66.67%:fail-color\
(SC-001 Add item green)(SC-002 Remove item green)(SC-003 Pay red)]\
[2:Login:alice/s3cret:1/0/1:100.00%:pass-color(SC-001 Sign in green)]\
{3/1/4:75.00%:fail-color}\
<chart>3,1,0</chart>"
        );
    }

    #[test]
    fn test_display_name_rules() {
        let record = FeatureRecord::from_uri("src/test/checkout/Cart.feature", &["Shopping cart"]);
        let rules = |declared, grouping| NamingRules {
            use_declared_name: declared,
            use_grouping_name: grouping,
        };
        assert_eq!(rules(true, true).display_name(&record), "Shopping cart");
        assert_eq!(rules(false, true).display_name(&record), "checkout - Cart");
        assert_eq!(rules(false, false).display_name(&record), "Cart");
    }

    #[test]
    fn test_global_credentials_used_without_registration() {
        let doc = builder(MemorySink::new())
            .render(&config("test.user=bob;test.password=pw"), &run())
            .unwrap();
        assert!(doc.contains(":bob/pw:"));
        assert!(doc.contains(":alice/s3cret:"));
    }

    #[test]
    fn test_generate_writes_to_configured_path() {
        let sink = MemorySink::new();
        let outcome = builder(sink.clone()).generate(&config("report.file.path=out/r.html"), &run());
        assert_eq!(
            outcome,
            ReportOutcome::Written {
                path: PathBuf::from("out/r.html"),
                bytes: sink.last().map(|d| d.len()).unwrap_or_default(),
            }
        );
        assert_eq!(sink.written()[0].0, PathBuf::from("out/r.html"));
    }

    #[test]
    fn test_empty_run_is_skipped() {
        let sink = MemorySink::new();
        let outcome = builder(sink.clone()).generate(&config(""), &RunSnapshot::default());
        assert_eq!(outcome, ReportOutcome::Skipped);
        assert_eq!(outcome.kind(), Some(FailureKind::ZeroResults));
        assert!(sink.written().is_empty());
    }

    #[test]
    fn test_missing_asset_aborts_without_output() {
        let sink = MemorySink::new();
        let builder = ReportBuilder::new(Box::new(NoStyles), Box::new(sink.clone()));
        let outcome = builder.generate(&config(""), &run());
        assert_eq!(outcome.kind(), Some(FailureKind::TemplateAssetMissing));
        assert!(sink.written().is_empty());
    }

    #[test]
    fn test_malformed_skeleton_aborts() {
        let sink = MemorySink::new();
        let builder = ReportBuilder::new(
            Box::new(FixedAssets("FeatureDetailsStart only")),
            Box::new(sink.clone()),
        );
        let outcome = builder.generate(&config(""), &run());
        assert!(matches!(outcome, ReportOutcome::Aborted { .. }));
        assert!(sink.written().is_empty());
    }

    #[test]
    fn test_embedded_skeleton_renders_every_token() {
        let builder = ReportBuilder::new(Box::new(EmbeddedAssets), Box::new(MemorySink::new()));
        let doc = builder.render(&config(""), &run()).unwrap();
        for marker in ["FeatureDetailsStart", "TcDetailsEnd", "SubTotalDetailsStart"] {
            assert!(!doc.contains(marker), "{marker} left in document");
        }
        for token in ["$insertFeat", "$insertTc", "$insertSub", "$featureName", "$tcName"] {
            assert!(!doc.contains(token), "{token} left in document");
        }
    }

    #[test]
    fn test_minify_shrinks_output() {
        let builder = ReportBuilder::new(Box::new(EmbeddedAssets), Box::new(MemorySink::new()));
        let plain = builder.render(&config(""), &run()).unwrap();
        let small = builder.render(&config("report.minify=true"), &run()).unwrap();
        assert!(small.len() < plain.len());
    }
}
