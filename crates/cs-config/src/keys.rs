//! Known configuration keys and their hard defaults.

/// Output path of the HTML document.
pub const REPORT_FILE_PATH: &str = "report.file.path";
/// Title shown in the document head and heading.
pub const REPORT_TITLE: &str = "report.title";
/// Minify the final document.
pub const REPORT_MINIFY: &str = "report.minify";

/// Global fallback username shown per feature.
pub const TEST_USER: &str = "test.user";
/// Global fallback password shown per feature.
pub const TEST_PASSWORD: &str = "test.password";

/// chrono format string for the execution timestamp row.
pub const TIME_STAMP_FORMAT: &str = "time.stamp.format";
/// Zone the execution timestamp is rendered in.
pub const TIME_ZONE: &str = "time.zone";

pub const DESKTOP_MAX_WIDTH: &str = "desktop.view.max.width";
pub const HEADING_BG_COLOR: &str = "heading.background.color";
pub const HEADING_COLOR: &str = "heading.color";
pub const SUBTOTAL_BG_COLOR: &str = "subtotal.background.color";
pub const SUBTOTAL_COLOR: &str = "subtotal.color";
pub const SCENARIO_HEADING_BG_COLOR: &str = "scenario.table.heading.background.color";
pub const SCENARIO_HEADING_COLOR: &str = "scenario.table.heading.color";

pub const SHOW_ENV: &str = "show.env";
pub const ENV_URL: &str = "env.url";
pub const SHOW_OS_BROWSER: &str = "show.os.browser";
pub const OS_BROWSER: &str = "os.browser";
pub const SHOW_EXECUTED_BY: &str = "show.executed.by";
pub const EXECUTED_BY: &str = "executed.by";
pub const SHOW_EXECUTION_TIMESTAMP: &str = "show.execution.timestamp";

/// Display features by the name declared inside the feature file.
pub const USE_DECLARED_NAME: &str = "use.feature.name.from.feature.file";
/// Prefix display names with the grouping (folder) name.
pub const USE_GROUPING_NAME: &str = "use.package.name";

/// Hard defaults used when a key is absent from every layer.
pub mod defaults {
    pub const REPORT_FILE_PATH: &str = "testReports/CucumberTestSummary.html";
    pub const REPORT_TITLE: &str = "Cucumber Test Summary";
    pub const REPORT_MINIFY: bool = false;
    pub const USERNAME: &str = "---";
    pub const PASSWORD: &str = "---";
    pub const TIME_STAMP_FORMAT: &str = "%A, %d-%b-%Y %H:%M:%S %Z";
    pub const TIME_ZONE: &str = "IST";
    pub const DESKTOP_MAX_WIDTH: &str = "1280";
    pub const HEADING_BG_COLOR: &str = "#23436a";
    pub const HEADING_COLOR: &str = "#ffffff";
    pub const SUBTOTAL_BG_COLOR: &str = "#cbcbcb";
    pub const SUBTOTAL_COLOR: &str = "#090909";
    pub const SCENARIO_HEADING_BG_COLOR: &str = "#efefef";
    pub const SCENARIO_HEADING_COLOR: &str = "#090909";
    pub const SHOW_ENV: bool = false;
    pub const SHOW_OS_BROWSER: bool = false;
    pub const SHOW_EXECUTED_BY: bool = false;
    pub const SHOW_EXECUTION_TIMESTAMP: bool = true;
    pub const USE_DECLARED_NAME: bool = false;
    pub const USE_GROUPING_NAME: bool = true;
}
