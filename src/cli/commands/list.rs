//! `list` command.

use std::fmt::Write;

use crate::cli::args::{ListArgs, OutputFormat};
use crate::cli::commands::{corpus_overrides, prepare};
use crate::error::DocGraphError;
use crate::export::{NodeSummary, summarize};

/// Execute `list`: one entry per document with title, link counts and
/// reachability.
///
/// # Errors
///
/// Returns an error if the corpus cannot be loaded or the index is missing.
pub fn run(args: &ListArgs) -> Result<(), DocGraphError> {
    let prepared = prepare(&args.corpus, &corpus_overrides(&args.corpus))?;
    let index = prepared.index_node(&args.corpus.root)?;

    let nodes: Vec<NodeSummary> = summarize(&prepared.graph, Some(index))
        .into_iter()
        .filter(|n| !args.unreachable || !n.reachable)
        .collect();

    match args.format {
        OutputFormat::Human => print!("{}", format_table(&nodes)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&nodes)?),
    }
    Ok(())
}

fn format_table(nodes: &[NodeSummary]) -> String {
    let id_width = nodes.iter().map(|n| n.id.len()).max().unwrap_or(0);
    let mut out = String::new();
    for node in nodes {
        let _ = write!(
            out,
            "{:<id_width$}  in:{:<3} out:{:<3} {}",
            node.id, node.inbound, node.outbound, node.title
        );
        if !node.reachable {
            out.push_str("  (unreachable)");
        }
        out.push('\n');
    }
    let _ = writeln!(out, "{} document(s)", nodes.len());
    out
}
