//! `check` command.

use crate::cli::args::{CheckArgs, OutputFormat};
use crate::cli::commands::{corpus_overrides, prepare};
use crate::config::Overrides;
use crate::error::DocGraphError;
use crate::graph::{CheckOptions, check};
use crate::report::{render_human, render_json};

/// Execute `check`.
///
/// Prints the report to stdout. Error findings fail the run; warnings fail it
/// only in strict mode.
///
/// # Errors
///
/// Returns `DocGraphError::Findings` when the report fails the run, or any
/// configuration or scan error.
pub fn run(args: &CheckArgs) -> Result<(), DocGraphError> {
    let overrides = Overrides {
        strict: args.strict,
        no_anchors: args.no_anchors,
        ..corpus_overrides(&args.corpus)
    };
    let prepared = prepare(&args.corpus, &overrides)?;

    let options = CheckOptions {
        root: &args.corpus.root,
        index: &prepared.config.index,
        check_anchors: prepared.config.check_anchors,
        check_external: prepared.config.check_external,
        patterns: &prepared.patterns,
    };
    let report = check(&prepared.graph, &options)?;

    match args.format {
        OutputFormat::Human => print!("{}", render_human(&report)),
        OutputFormat::Json => println!("{}", render_json(&report)?),
    }

    if report.fails(prepared.config.strict) {
        return Err(DocGraphError::Findings {
            errors: report.summary.errors,
            warnings: report.summary.warnings,
        });
    }
    Ok(())
}
