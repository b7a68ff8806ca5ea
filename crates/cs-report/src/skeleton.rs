//! Skeleton composition: embedding assets and filling document-wide tokens
//! before fragment extraction.

use chrono::{DateTime, Utc};
use cs_config::keys::{self, defaults};
use cs_config::ConfigResolver;
use tracing::warn;

use crate::assets::AssetBundle;
use crate::template::{
    instantiate, ConditionalRow, ENVIRONMENT_ROW, EXECUTED_BY_ROW, OS_BROWSER_ROW, TIMESTAMP_ROW,
};
use crate::timestamp::{self, Zone};

/// Document-wide tokens.
pub mod tokens {
    pub const STYLE: &str = "$styleGoesHere";
    pub const SCRIPT: &str = "$scriptGoesHere";
    pub const TITLE: &str = "$reportTitle";
    pub const HEADING_BG_COLOR: &str = "$defaultHeadingBgColor";
    pub const HEADING_COLOR: &str = "$defaultHeadingColor";
    pub const SUBTOTAL_BG_COLOR: &str = "$defaultSubTotalBgColor";
    pub const SUBTOTAL_COLOR: &str = "$defaultSubTotalColor";
    pub const SCENARIO_HEADING_BG_COLOR: &str = "$defaultScenarioTableHeadingBgColor";
    pub const SCENARIO_HEADING_COLOR: &str = "$defaultScenarioTableHeadingColor";
    pub const MAX_WIDTH: &str = "$defaultMaxWidth";
    pub const TEST_DURATION: &str = "$testDuration";
}

/// Resolved values for the document-wide tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkeletonSettings {
    pub title: String,
    pub heading_bg_color: String,
    pub heading_color: String,
    pub subtotal_bg_color: String,
    pub subtotal_color: String,
    pub scenario_heading_bg_color: String,
    pub scenario_heading_color: String,
    pub max_width: String,
    pub env_url: Option<String>,
    pub os_browser: Option<String>,
    pub executed_by: Option<String>,
    pub timestamp: Option<String>,
    pub duration: String,
}

impl SkeletonSettings {
    /// Read every setting now, so late property writes are honoured.
    pub fn from_config(config: &ConfigResolver, now: DateTime<Utc>, duration: String) -> Self {
        let shown = |flag: &str, fallback: bool, value_key: &str| {
            if config.get_bool(flag, fallback) {
                config.get(value_key)
            } else {
                None
            }
        };

        let timestamp = config
            .get_bool(keys::SHOW_EXECUTION_TIMESTAMP, defaults::SHOW_EXECUTION_TIMESTAMP)
            .then(|| execution_timestamp(config, now));

        Self {
            title: config.get_or(keys::REPORT_TITLE, defaults::REPORT_TITLE),
            heading_bg_color: config.get_or(keys::HEADING_BG_COLOR, defaults::HEADING_BG_COLOR),
            heading_color: config.get_or(keys::HEADING_COLOR, defaults::HEADING_COLOR),
            subtotal_bg_color: config.get_or(keys::SUBTOTAL_BG_COLOR, defaults::SUBTOTAL_BG_COLOR),
            subtotal_color: config.get_or(keys::SUBTOTAL_COLOR, defaults::SUBTOTAL_COLOR),
            scenario_heading_bg_color: config.get_or(
                keys::SCENARIO_HEADING_BG_COLOR,
                defaults::SCENARIO_HEADING_BG_COLOR,
            ),
            scenario_heading_color: config
                .get_or(keys::SCENARIO_HEADING_COLOR, defaults::SCENARIO_HEADING_COLOR),
            max_width: config.get_or(keys::DESKTOP_MAX_WIDTH, defaults::DESKTOP_MAX_WIDTH),
            env_url: shown(keys::SHOW_ENV, defaults::SHOW_ENV, keys::ENV_URL),
            os_browser: shown(keys::SHOW_OS_BROWSER, defaults::SHOW_OS_BROWSER, keys::OS_BROWSER),
            executed_by: shown(
                keys::SHOW_EXECUTED_BY,
                defaults::SHOW_EXECUTED_BY,
                keys::EXECUTED_BY,
            ),
            timestamp,
            duration,
        }
    }
}

fn execution_timestamp(config: &ConfigResolver, now: DateTime<Utc>) -> String {
    let zone = Zone::parse_or_utc(&config.get_or(keys::TIME_ZONE, defaults::TIME_ZONE));
    let format = config.get_or(keys::TIME_STAMP_FORMAT, defaults::TIME_STAMP_FORMAT);
    match timestamp::render(now, &zone, &format) {
        Ok(text) => text,
        Err(err) => {
            warn!(format = %format, error = %err, "Using default time stamp format");
            timestamp::render(now, &zone, defaults::TIME_STAMP_FORMAT)
                .unwrap_or_else(|_| now.to_rfc3339())
        }
    }
}

/// Embed the assets, then fill the document-wide tokens and optional rows.
///
/// Two levels: the stylesheet and script go in first so their own colour
/// and width tokens are filled by the second pass.
pub fn compose(assets: &AssetBundle, settings: &SkeletonSettings) -> String {
    let embedded = instantiate(
        &assets.skeleton,
        &[
            (tokens::STYLE, assets.styles.as_str()),
            (tokens::SCRIPT, assets.scripts.as_str()),
        ],
    );

    let mut document = instantiate(
        &embedded,
        &[
            (tokens::TITLE, settings.title.as_str()),
            (tokens::HEADING_BG_COLOR, settings.heading_bg_color.as_str()),
            (tokens::HEADING_COLOR, settings.heading_color.as_str()),
            (tokens::SUBTOTAL_BG_COLOR, settings.subtotal_bg_color.as_str()),
            (tokens::SUBTOTAL_COLOR, settings.subtotal_color.as_str()),
            (tokens::SCENARIO_HEADING_BG_COLOR, settings.scenario_heading_bg_color.as_str()),
            (tokens::SCENARIO_HEADING_COLOR, settings.scenario_heading_color.as_str()),
            (tokens::MAX_WIDTH, settings.max_width.as_str()),
            (tokens::TEST_DURATION, settings.duration.as_str()),
        ],
    );

    let rows: [(ConditionalRow, Option<&str>); 4] = [
        (ENVIRONMENT_ROW, settings.env_url.as_deref()),
        (OS_BROWSER_ROW, settings.os_browser.as_deref()),
        (EXECUTED_BY_ROW, settings.executed_by.as_deref()),
        (TIMESTAMP_ROW, settings.timestamp.as_deref()),
    ];
    for (row, value) in rows {
        document = row.apply(&document, value);
    }
    document
}
