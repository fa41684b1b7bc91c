//! JSON graph renderer.

use serde::Serialize;

use crate::error::DocGraphError;
use crate::export::{GraphRenderer, NodeSummary, summarize};
use crate::graph::{DocumentGraph, Target};

/// Renders the document graph as `{ "index", "nodes", "edges" }`.
pub struct JsonRenderer;

#[derive(Debug, Serialize)]
struct GraphDocument<'a> {
    index: &'a str,
    nodes: Vec<NodeSummary>,
    edges: Vec<EdgeRecord<'a>>,
}

#[derive(Debug, Serialize)]
struct EdgeRecord<'a> {
    source: &'a str,
    target: String,
    line: usize,
    resolution: &'static str,
}

impl GraphRenderer for JsonRenderer {
    fn render(&self, graph: &DocumentGraph, index: usize) -> Result<String, DocGraphError> {
        let edges = graph
            .edges()
            .iter()
            .filter_map(|edge| {
                let doc = graph.document(edge.source)?;
                let link = doc.links.get(edge.link)?;
                let (target, resolution) = match &edge.target {
                    Target::Document { node, .. } => {
                        (graph.document(*node)?.id.clone(), "document")
                    }
                    Target::Missing(path) => (path.clone(), "missing"),
                    Target::OutsideRoot => (link.raw.clone(), "outside-root"),
                    Target::Asset(path) => (path.clone(), "asset"),
                    Target::Directory(path) => (path.clone(), "directory"),
                    Target::Skipped(path) => (path.clone(), "skipped"),
                    Target::SelfAnchor { .. } | Target::External { .. } => return None,
                };
                Some(EdgeRecord {
                    source: &doc.id,
                    target,
                    line: link.line,
                    resolution,
                })
            })
            .collect();

        let document = GraphDocument {
            index: graph.document(index).map_or("", |d| d.id.as_str()),
            nodes: summarize(graph, Some(index)),
            edges,
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::Corpus;

    #[test]
    fn test_json_nodes_and_edges() {
        let corpus = Corpus::from_sources(
            [
                ("README.md", "# Guide\n\n[a](a.md)\n[gone](gone.md)\n[web](https://example.com)"),
                ("a.md", "# A\n[top](#top)"),
            ],
            &["md".to_string()],
        );
        let graph = DocumentGraph::build(corpus);
        let index = graph.node_index("README.md").unwrap();
        let out = JsonRenderer.render(&graph, index).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(json["index"], "README.md");
        assert_eq!(json["nodes"].as_array().unwrap().len(), 2);
        assert_eq!(json["nodes"][1]["id"], "a.md");
        assert_eq!(json["nodes"][1]["reachable"], true);

        let edges = json["edges"].as_array().unwrap();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0]["target"], "a.md");
        assert_eq!(edges[0]["resolution"], "document");
        assert_eq!(edges[0]["line"], 3);
        assert_eq!(edges[1]["target"], "gone.md");
        assert_eq!(edges[1]["resolution"], "missing");
    }
}
