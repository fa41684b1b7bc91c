//! Logging initialization for `docgraph`.
//!
//! Every pipeline stage emits `tracing` events; this module decides which of
//! them reach stderr and in what shape (plain lines or newline-delimited
//! JSON). Stdout is left to reports.

use std::io::IsTerminal;

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

use crate::cli::args::ColorChoice;

/// Environment variable that overrides the verbosity flags.
pub const LOG_LEVEL_ENV: &str = "DOCGRAPH_LOG_LEVEL";

/// Log output format.
///
/// Controls how log messages are rendered to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with optional ANSI colors.
    #[default]
    Human,
    /// Newline-delimited JSON for machine consumption.
    Json,
}

/// Default filter directive for a `-v` count.
///
/// A run with no flags only logs warnings, such as configuration issues that
/// did not stop the load. `-v` adds the per-stage summaries (documents
/// scanned, graph size, finding counts), `-vv` the per-document parse events
/// and `-vvv` every skipped path and ignored link. Counts above three saturate.
#[must_use]
pub const fn verbosity_to_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Whether log lines on stderr should carry ANSI colors.
///
/// `auto` colors only an interactive stderr, and `NO_COLOR` (any value)
/// turns it off. Explicit `always`/`never` ignore both.
#[must_use]
pub fn use_ansi(color: ColorChoice) -> bool {
    match color {
        ColorChoice::Auto => {
            std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none()
        }
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    }
}

/// Event filter for a run.
///
/// `--quiet` wins over everything. Otherwise a parseable `DOCGRAPH_LOG_LEVEL`
/// replaces the verbosity default.
#[must_use]
pub fn build_filter(verbosity: u8, quiet: bool) -> EnvFilter {
    if quiet {
        return EnvFilter::new("off");
    }
    EnvFilter::try_from_env(LOG_LEVEL_ENV)
        .unwrap_or_else(|_| EnvFilter::new(verbosity_to_directive(verbosity)))
}

/// Installs the global subscriber writing to stderr.
///
/// Module targets are shown from `-vv` on. A second call is a no-op.
pub fn init_logging(format: LogFormat, verbosity: u8, quiet: bool, color: ColorChoice) {
    let filter = build_filter(verbosity, quiet);
    let show_target = verbosity >= 2;

    match format {
        LogFormat::Human => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(use_ansi(color))
                .with_target(show_target)
                .with_writer(std::io::stderr)
                .try_init();
        }
        LogFormat::Json => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .json()
                .with_ansi(false)
                .with_target(show_target)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
}
