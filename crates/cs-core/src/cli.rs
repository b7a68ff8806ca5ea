//! The `cucumber-summary` command: replay a JSONL stream of run signals
//! into a [`SummaryReporter`].

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use clap::Parser;
use cs_config::{keys, ConfigResolver, PropertyStore, PROPERTY_PREFIX};
use cs_report::{AssetSource, DirAssets, EmbeddedAssets, FileSink, ReportBuilder, ReportOutcome};
use tracing::{debug, info, warn};

use crate::error::{CoreError, Result};
use crate::exit_codes::ExitCode;
use crate::logging::{LogFormat, LogLevel};
use crate::reporter::SummaryReporter;
use crate::signals::Signal;

/// Events path meaning standard input.
pub const STDIN: &str = "-";

/// Cucumber Summary: turn a run's signals into a one-page HTML summary.
#[derive(Parser, Debug)]
#[command(name = "cucumber-summary", version)]
pub struct Cli {
    /// JSONL file of run signals ("-" reads stdin)
    #[arg(long, short = 'e', default_value = STDIN)]
    pub events: PathBuf,

    /// Reporter argument string: key=value entries joined by ';' or '&'
    #[arg(long, default_value = "")]
    pub args: String,

    /// Properties file to use instead of searching for one
    #[arg(long)]
    pub config_file: Option<PathBuf>,

    /// Directory holding ReportTemplate.html, styles.css and scripts.js
    #[arg(long)]
    pub template_dir: Option<PathBuf>,

    /// Report output path (sets the report.file.path property)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Also write the result snapshot as JSON
    #[arg(long)]
    pub snapshot_json: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Log format: human or jsonl
    #[arg(long)]
    pub log_format: Option<LogFormat>,
}

impl Cli {
    /// Level implied by -v/-q, if any was given.
    pub fn log_level(&self) -> Option<LogLevel> {
        if self.quiet {
            return Some(LogLevel::Error);
        }
        match self.verbose {
            0 => None,
            1 => Some(LogLevel::Debug),
            _ => Some(LogLevel::Trace),
        }
    }
}

/// Run the command; report problems are logged, only replay problems
/// change the exit code.
pub fn run(cli: &Cli) -> ExitCode {
    match replay(cli) {
        Ok(outcome) => {
            if let ReportOutcome::Written { path, .. } = &outcome {
                println!("{}", path.display());
            }
            ExitCode::Clean
        }
        Err(err) => {
            let code = err.exit_code();
            tracing::error!(error = %err, code = %code, "cucumber-summary failed");
            eprintln!("error: {err}");
            code
        }
    }
}

fn replay(cli: &Cli) -> Result<ReportOutcome> {
    check_exists("config file", cli.config_file.as_deref())?;
    check_exists("template directory", cli.template_dir.as_deref())?;

    if let Some(output) = &cli.output {
        PropertyStore::global().set(
            format!("{PROPERTY_PREFIX}{}", keys::REPORT_FILE_PATH),
            output.display().to_string(),
        );
    }

    let config = ConfigResolver::resolve_with_file(&cli.args, cli.config_file.as_deref());
    let assets: Box<dyn AssetSource> = match &cli.template_dir {
        Some(dir) => Box::new(DirAssets::new(dir)),
        None => Box::new(EmbeddedAssets),
    };
    let reporter = SummaryReporter::new(config, ReportBuilder::new(assets, Box::new(FileSink)));
    info!(run_id = %reporter.run_id(), events = %cli.events.display(), "Replaying run signals");

    let reader = open_events(&cli.events)?;
    let mut outcome = None;
    for (index, line) in reader.lines().enumerate() {
        let number = index + 1;
        let line = line.map_err(|source| CoreError::EventsRead {
            line: number,
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        match Signal::from_json_line(&line) {
            Ok(signal) => {
                debug!(line = number, signal = signal.kind(), "Signal");
                if let Some(result) = reporter.on_signal(signal) {
                    outcome.get_or_insert(result);
                }
            }
            Err(err) => warn!(line = number, error = %err, "Skipping malformed signal line"),
        }
    }

    let outcome = match outcome {
        Some(outcome) => outcome,
        None => {
            info!("Events ended without run_finished; closing the run");
            reporter.finish(None)
        }
    };

    if let Some(path) = &cli.snapshot_json {
        write_snapshot(path, &reporter)?;
    }
    Ok(outcome)
}

fn check_exists(what: &'static str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) if !path.exists() => Err(CoreError::MissingPath {
            what,
            path: path.to_path_buf(),
        }),
        _ => Ok(()),
    }
}

fn open_events(path: &Path) -> Result<Box<dyn BufRead>> {
    if path.as_os_str() == STDIN {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(path).map_err(|source| CoreError::EventsOpen {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Box::new(BufReader::new(file)))
}

fn write_snapshot(path: &Path, reporter: &SummaryReporter) -> Result<()> {
    let json = serde_json::to_string_pretty(&reporter.snapshot())?;
    std::fs::write(path, json).map_err(|source| CoreError::SnapshotWrite {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "Snapshot written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_log_level_from_flags() {
        let cli = Cli::parse_from(["cucumber-summary", "-vv"]);
        assert_eq!(cli.log_level(), Some(LogLevel::Trace));
        let cli = Cli::parse_from(["cucumber-summary", "-q", "-v"]);
        assert_eq!(cli.log_level(), Some(LogLevel::Error));
        let cli = Cli::parse_from(["cucumber-summary"]);
        assert_eq!(cli.log_level(), None);
        assert_eq!(cli.events, PathBuf::from(STDIN));
    }

    #[test]
    fn test_log_format_flag() {
        let cli = Cli::parse_from(["cucumber-summary", "--log-format", "jsonl"]);
        assert_eq!(cli.log_format, Some(LogFormat::Jsonl));
        assert!(Cli::try_parse_from(["cucumber-summary", "--log-format", "xml"]).is_err());
    }

    #[test]
    fn test_missing_config_file_is_args_error() {
        let cli = Cli::parse_from([
            "cucumber-summary",
            "--config-file",
            "/definitely/not/here.properties",
        ]);
        assert_eq!(run(&cli), ExitCode::ArgsError);
    }
}
