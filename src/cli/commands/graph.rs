//! `graph` command.

use crate::cli::args::{GraphArgs, GraphFormat};
use crate::cli::commands::{corpus_overrides, prepare};
use crate::error::DocGraphError;
use crate::export::{GraphRenderer, JsonRenderer, MermaidRenderer};

/// Execute `graph`: print the document graph as Mermaid or JSON.
///
/// # Errors
///
/// Returns an error if the corpus cannot be loaded or the index is missing.
pub fn run(args: &GraphArgs) -> Result<(), DocGraphError> {
    let prepared = prepare(&args.corpus, &corpus_overrides(&args.corpus))?;
    let index = prepared.index_node(&args.corpus.root)?;

    let renderer: &dyn GraphRenderer = match args.format {
        GraphFormat::Mermaid => &MermaidRenderer,
        GraphFormat::Json => &JsonRenderer,
    };
    println!("{}", renderer.render(&prepared.graph, index)?);
    Ok(())
}
