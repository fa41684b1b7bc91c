//! Document graph export.
//!
//! Renders the resolved graph for humans (Mermaid `flowchart LR`) or tools
//! (JSON). Both views share [`NodeSummary`], which the `list` command uses too.

pub mod escape;
pub mod json;
pub mod mermaid;

use serde::Serialize;

use crate::error::DocGraphError;
use crate::graph::DocumentGraph;

pub use json::JsonRenderer;
pub use mermaid::MermaidRenderer;

/// Per-document facts derived from the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeSummary {
    /// Document id.
    pub id: String,

    /// Document title.
    pub title: String,

    /// Topic folder (`""` at the root).
    pub topic: String,

    /// Distinct documents linking here (self-links excluded).
    pub inbound: usize,

    /// Distinct documents linked from here (self-links excluded).
    pub outbound: usize,

    /// Whether the document is reachable from the index.
    pub reachable: bool,
}

/// Summarize every node of `graph`, in id order.
///
/// Reachability is computed from `index`; with no index every node counts as
/// unreachable.
#[must_use]
pub fn summarize(graph: &DocumentGraph, index: Option<usize>) -> Vec<NodeSummary> {
    let reached = index.map(|i| graph.reachable_from(i)).unwrap_or_default();
    let inbound = graph.inbound_counts();

    graph
        .documents()
        .enumerate()
        .map(|(node, doc)| NodeSummary {
            id: doc.id.clone(),
            title: doc.title.clone(),
            topic: doc.topic().to_string(),
            inbound: inbound.get(node).copied().unwrap_or(0),
            outbound: graph
                .successors(node)
                .iter()
                .filter(|&&next| next != node)
                .count(),
            reachable: reached.contains(&node),
        })
        .collect()
}

/// Renders a document graph.
pub trait GraphRenderer {
    /// Render `graph`, marking nodes unreachable from `index`.
    ///
    /// # Errors
    ///
    /// Returns `DocGraphError` if the output cannot be produced.
    fn render(&self, graph: &DocumentGraph, index: usize) -> Result<String, DocGraphError>;
}
