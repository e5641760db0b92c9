//! docscout command line
//!
//! Scans a project folder against its number log and prints the catalog.

use clap::Parser;
use docscout_logging::{init_logging, LogConfig};
use std::path::PathBuf;
use std::process::ExitCode;

mod cli;

#[derive(Parser, Debug)]
#[command(name = "docscout", about = "Match project files against the number log")]
struct Cli {
    /// Config file; its directory is the default project folder
    #[arg(default_value = "config.toml")]
    config: PathBuf,

    /// Part of the catalog to print
    #[arg(long, value_enum, default_value = "overview")]
    view: cli::View,

    /// Print the full report as JSON
    #[arg(long)]
    json: bool,

    /// List every warning instead of a count
    #[arg(long)]
    warnings: bool,

    /// Enable verbose logging (info/debug to stderr)
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Also write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Cli::parse();

    let _log_guard = match init_logging(LogConfig {
        app_name: "docscout",
        verbose: args.verbose,
        log_file: args.log_file.as_deref(),
    }) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("Warning: failed to initialize logging: {:#}", err);
            None
        }
    };

    let result = cli::run(cli::RunArgs {
        config: args.config,
        view: args.view,
        json: args.json,
        show_warnings: args.warnings,
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
