//! `docgraph` - Link-integrity checker for Markdown documentation corpora

use clap::Parser;

use docgraph::cli::args::Cli;
use docgraph::cli::commands;
use docgraph::error::{ConfigError, DocGraphError, ExitCode};
use docgraph::observability::init_logging;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout and are not failures.
            let code = if e.use_stderr() {
                ExitCode::USAGE_ERROR
            } else {
                ExitCode::SUCCESS
            };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    init_logging(cli.log_format, cli.verbose, cli.quiet, cli.color);

    match commands::dispatch(cli) {
        Ok(()) => std::process::exit(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            if let DocGraphError::Config(ConfigError::ValidationError { errors, .. }) = &e {
                for issue in errors {
                    eprintln!("  {issue}");
                }
            }
            std::process::exit(e.exit_code());
        }
    }
}
