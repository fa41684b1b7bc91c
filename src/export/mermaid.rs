//! Mermaid flowchart renderer.
//!
//! One node per document, labelled by title. Resolved document links become
//! solid edges; dangling links are drawn dashed to a node per missing target.
//! Orphans and missing targets get their own classes.

use indexmap::IndexMap;

use crate::error::DocGraphError;
use crate::export::escape::label;
use crate::export::{GraphRenderer, summarize};
use crate::graph::{DocumentGraph, Target};

/// Renders the document graph as a Mermaid `flowchart LR`.
pub struct MermaidRenderer;

impl GraphRenderer for MermaidRenderer {
    fn render(&self, graph: &DocumentGraph, index: usize) -> Result<String, DocGraphError> {
        let nodes = summarize(graph, Some(index));

        let mut lines = Vec::new();
        lines.push("flowchart LR".to_string());

        for (i, node) in nodes.iter().enumerate() {
            lines.push(format!("    n{i}[{}]", label(&node.title)));
        }

        for (source, _) in nodes.iter().enumerate() {
            for &target in graph.successors(source) {
                if target != source {
                    lines.push(format!("    n{source} --> n{target}"));
                }
            }
        }

        // Missing targets keyed by what the reader would look for, in first-seen order.
        let mut missing: IndexMap<String, usize> = IndexMap::new();
        let mut dangling = Vec::new();
        for edge in graph.edges() {
            let Some(doc) = graph.document(edge.source) else {
                continue;
            };
            let key = match &edge.target {
                Target::Missing(path) => path.clone(),
                Target::OutsideRoot => doc
                    .links
                    .get(edge.link)
                    .map_or_else(String::new, |l| l.raw.clone()),
                _ => continue,
            };
            let next = missing.len();
            let id = *missing.entry(key).or_insert(next);
            if !dangling.contains(&(edge.source, id)) {
                dangling.push((edge.source, id));
            }
        }

        for (path, id) in &missing {
            lines.push(format!("    m{id}[{}]:::missing", label(path)));
        }
        for (source, id) in &dangling {
            lines.push(format!("    n{source} -.-> m{id}"));
        }

        let orphans: Vec<String> = nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| !n.reachable)
            .map(|(i, _)| format!("n{i}"))
            .collect();

        lines.push("    classDef missing stroke:#c00,stroke-dasharray:5 5".to_string());
        lines.push("    classDef orphan fill:#fff3cd,stroke:#b58900".to_string());
        lines.push("    classDef index stroke-width:3px".to_string());
        lines.push(format!("    class n{index} index"));
        if !orphans.is_empty() {
            lines.push(format!("    class {} orphan", orphans.join(",")));
        }

        Ok(lines.join("\n"))
    }
}
