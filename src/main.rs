// Logtail - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Logging initialisation (debug mode support)
// 3. Run configuration and colour detection
// 4. Exit status: 0 on success or closed output pipe, 1 on any error

use clap::{ArgAction, Parser};
use logtail::app::{config, session};
use logtail::util;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::AtomicBool;

#[derive(Parser, Debug)]
#[command(name = "logtail", version, about = "View and follow log files with colour")]
struct Cli {
    /// Log files to view (reads standard input if omitted).
    files: Vec<PathBuf>,

    /// Only show lines matching this regular expression.
    #[arg(short = 'f', long = "filter", value_name = "REGEX")]
    filter: Option<String>,

    /// Colour output by log level.
    #[arg(
        short = 'c',
        long = "color",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    color: bool,

    /// Keep watching the files for new lines.
    #[arg(short = 'F', long = "follow")]
    follow: bool,

    /// Prefix each line with its line number.
    #[arg(short = 'n', long = "line-numbers")]
    line_numbers: bool,

    /// Enable debug logging on stderr (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    util::logging::init(cli.debug);

    tracing::info!(
        version = util::constants::APP_VERSION,
        files = cli.files.len(),
        follow = cli.follow,
        "Logtail starting"
    );

    let colour = cli.color && config::colour_supported();
    let view = match config::ViewConfig::new(
        cli.files,
        cli.filter.as_deref(),
        colour,
        cli.follow,
        cli.line_numbers,
    ) {
        Ok(view) => view,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Nothing sets the flag in the binary; follow mode runs until the
    // process is interrupted.
    let cancel = AtomicBool::new(false);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match session::run(&view, &mut out, &cancel) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_broken_pipe() => {
            tracing::debug!("Output closed, stopping");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Run failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
