//! cucumber-summary CLI entry point.

use clap::Parser;
use cs_core::cli::{run, Cli};
use cs_core::exit_codes::ExitCode;
use cs_core::logging::{init_logging, LogConfig};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version also arrive here, on stdout.
            let code = if err.use_stderr() {
                ExitCode::ArgsError
            } else {
                ExitCode::Clean
            };
            let _ = err.print();
            std::process::exit(code.as_i32());
        }
    };

    let log_config = LogConfig::from_env(cli.log_level(), cli.log_format);
    init_logging(&log_config);

    std::process::exit(run(&cli).as_i32());
}
