//! The document graph.
//!
//! Nodes are documents; every outbound link becomes an [`Edge`] whose target
//! has been resolved against the scanned corpus. Only edges that land on a
//! document take part in reachability.

pub mod check;
pub mod resolve;

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use indexmap::IndexMap;

use crate::document::{Document, LinkKind};
use crate::scan::Corpus;
use resolve::{PathResolution, percent_decode, resolve_path};

pub use check::{CheckOptions, check};

/// Folder landing pages, tried in order for links that name a folder.
const FOLDER_INDEX_STEMS: [&str; 2] = ["README", "index"];

/// A resolved link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    /// Node index of the linking document.
    pub source: usize,

    /// Index into the source document's `links`.
    pub link: usize,

    /// Where the link lands.
    pub target: Target,
}

/// Where a link lands after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Another (or the same) document.
    Document {
        /// Node index of the target document.
        node: usize,
        /// Decoded fragment, if any.
        fragment: Option<String>,
    },

    /// A fragment in the linking document itself.
    SelfAnchor {
        /// Decoded fragment.
        fragment: String,
    },

    /// An existing non-document file.
    Asset(String),

    /// An existing folder without a landing page.
    Directory(String),

    /// An existing file or folder under a hidden or excluded path.
    Skipped(String),

    /// An absolute URL; never fetched.
    External {
        /// URL scheme, lowercased.
        scheme: String,
    },

    /// Nothing exists at the normalized path.
    Missing(String),

    /// The path climbs above the corpus root.
    OutsideRoot,
}

/// Documents plus resolved links.
#[derive(Debug, Clone, Default)]
pub struct DocumentGraph {
    nodes: IndexMap<String, Document>,
    edges: Vec<Edge>,
    adjacency: Vec<Vec<usize>>,
}

impl DocumentGraph {
    /// Resolve every link in `corpus` and build the graph.
    #[must_use]
    pub fn build(mut corpus: Corpus) -> Self {
        let nodes: IndexMap<String, Document> = std::mem::take(&mut corpus.documents)
            .into_iter()
            .map(|doc| (doc.id.clone(), doc))
            .collect();

        let landing_pages = landing_pages(&nodes);
        let resolver = Resolver {
            nodes: &nodes,
            landing_pages: &landing_pages,
            corpus: &corpus,
        };

        let mut edges = Vec::new();
        let mut adjacency = vec![Vec::new(); nodes.len()];

        for (source, doc) in nodes.values().enumerate() {
            let mut linked = HashSet::new();
            for (link_index, link) in doc.links.iter().enumerate() {
                let target = resolver.resolve(&doc.id, &link.kind);
                if let Target::Document { node, .. } = target {
                    if linked.insert(node) {
                        adjacency[source].push(node);
                    }
                }
                edges.push(Edge {
                    source,
                    link: link_index,
                    target,
                });
            }
        }

        tracing::debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            "document graph built"
        );

        Self {
            nodes,
            edges,
            adjacency,
        }
    }

    /// Number of documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the graph has no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node index of the document with `id`.
    #[must_use]
    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.nodes.get_index_of(id)
    }

    /// Document at node index `node`.
    #[must_use]
    pub fn document(&self, node: usize) -> Option<&Document> {
        self.nodes.get_index(node).map(|(_, doc)| doc)
    }

    /// All documents, sorted by id.
    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.nodes.values()
    }

    /// All document ids, sorted.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// All resolved links, grouped by source in document order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Distinct documents linked from `node`, in first-link order.
    #[must_use]
    pub fn successors(&self, node: usize) -> &[usize] {
        self.adjacency.get(node).map_or(&[], Vec::as_slice)
    }

    /// Number of distinct documents linking to each node (self-links excluded).
    #[must_use]
    pub fn inbound_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.nodes.len()];
        for (source, targets) in self.adjacency.iter().enumerate() {
            for &target in targets {
                if target != source {
                    counts[target] += 1;
                }
            }
        }
        counts
    }

    /// Breadth-first reachability from `start`. `start` itself is reachable.
    #[must_use]
    pub fn reachable_from(&self, start: usize) -> BTreeSet<usize> {
        let mut seen = vec![false; self.nodes.len()];
        let mut reached = BTreeSet::new();
        if start >= self.nodes.len() {
            return reached;
        }

        let mut queue = VecDeque::from([start]);
        seen[start] = true;
        while let Some(node) = queue.pop_front() {
            reached.insert(node);
            for &next in self.successors(node) {
                if !seen[next] {
                    seen[next] = true;
                    queue.push_back(next);
                }
            }
        }
        reached
    }
}

/// Folder (`""` for the root) to the node of its landing page.
///
/// `README` wins over `index`; among equal stems the first id in sort order
/// wins.
fn landing_pages(nodes: &IndexMap<String, Document>) -> HashMap<String, usize> {
    let mut pages = HashMap::new();
    for stem in FOLDER_INDEX_STEMS {
        for (node, id) in nodes.keys().enumerate() {
            let (folder, file_name) = id.rsplit_once('/').unwrap_or(("", id.as_str()));
            let is_landing = file_name
                .split_once('.')
                .is_some_and(|(name_stem, _)| name_stem.eq_ignore_ascii_case(stem));
            if is_landing {
                pages.entry(folder.to_string()).or_insert(node);
            }
        }
    }
    pages
}

/// Borrowed lookup tables used while resolving links.
struct Resolver<'a> {
    nodes: &'a IndexMap<String, Document>,
    landing_pages: &'a HashMap<String, usize>,
    corpus: &'a Corpus,
}

impl Resolver<'_> {
    fn resolve(&self, source_id: &str, kind: &LinkKind) -> Target {
        match kind {
            LinkKind::External { scheme } => Target::External {
                scheme: scheme.clone(),
            },
            LinkKind::Anchor { fragment } => Target::SelfAnchor {
                fragment: percent_decode(fragment),
            },
            LinkKind::Document { path, fragment } => {
                let fragment = fragment.as_deref().map(percent_decode);
                match resolve_path(source_id, path) {
                    PathResolution::OutsideRoot => Target::OutsideRoot,
                    PathResolution::Inside(rel) => self.lookup(rel, fragment),
                }
            }
            LinkKind::Asset { path } => match resolve_path(source_id, path) {
                PathResolution::OutsideRoot => Target::OutsideRoot,
                PathResolution::Inside(rel) => self.lookup(rel, None),
            },
        }
    }

    fn lookup(&self, rel: String, fragment: Option<String>) -> Target {
        if let Some(node) = self.nodes.get_index_of(&rel) {
            return Target::Document { node, fragment };
        }
        if self.corpus.assets.contains(&rel) {
            return Target::Asset(rel);
        }
        if rel.is_empty() || self.corpus.directories.contains(&rel) {
            return match self.landing_pages.get(&rel) {
                Some(&node) => Target::Document { node, fragment },
                None => Target::Directory(rel),
            };
        }
        if self.corpus.exists_beneath_skipped(&rel) {
            return Target::Skipped(rel);
        }
        Target::Missing(rel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(sources: &[(&str, &str)]) -> DocumentGraph {
        let corpus = Corpus::from_sources(sources.iter().copied(), &["md".to_string()]);
        DocumentGraph::build(corpus)
    }

    fn target_of(graph: &DocumentGraph, source: &str, link: usize) -> Target {
        let node = graph.node_index(source).unwrap();
        graph
            .edges()
            .iter()
            .find(|e| e.source == node && e.link == link)
            .unwrap()
            .target
            .clone()
    }

    #[test]
    fn test_nodes_sorted_by_id() {
        let g = graph(&[("b.md", ""), ("README.md", ""), ("a.md", "")]);
        let ids: Vec<_> = g.ids().collect();
        assert_eq!(ids, vec!["README.md", "a.md", "b.md"]);
    }

    #[test]
    fn test_resolves_relative_document() {
        let g = graph(&[
            ("README.md", "[s](type-design/struct.md)"),
            ("type-design/struct.md", "# Struct"),
        ]);
        let expected = g.node_index("type-design/struct.md").unwrap();
        assert_eq!(
            target_of(&g, "README.md", 0),
            Target::Document {
                node: expected,
                fragment: None
            }
        );
    }

    #[test]
    fn test_missing_and_outside() {
        let g = graph(&[("README.md", "[d](d.md) and [up](../up.md)")]);
        assert_eq!(target_of(&g, "README.md", 0), Target::Missing("d.md".to_string()));
        assert_eq!(target_of(&g, "README.md", 1), Target::OutsideRoot);
    }

    #[test]
    fn test_folder_link_lands_on_readme() {
        let g = graph(&[
            ("README.md", "[patterns](patterns/)"),
            ("patterns/README.md", "# Patterns"),
            ("patterns/observer.md", "# Observer"),
        ]);
        let landing = g.node_index("patterns/README.md").unwrap();
        assert!(matches!(
            target_of(&g, "README.md", 0),
            Target::Document { node, .. } if node == landing
        ));
    }

    #[test]
    fn test_folder_without_landing_page() {
        let g = graph(&[("README.md", "[t](testing/)"), ("testing/mocks.md", "")]);
        assert_eq!(
            target_of(&g, "README.md", 0),
            Target::Directory("testing".to_string())
        );
    }

    #[test]
    fn test_root_folder_prefers_readme_over_index() {
        let g = graph(&[
            ("docs/a.md", "[root](../)"),
            ("index.md", "# Index"),
            ("README.md", "# Readme"),
        ]);
        let readme = g.node_index("README.md").unwrap();
        assert!(matches!(
            target_of(&g, "docs/a.md", 0),
            Target::Document { node, .. } if node == readme
        ));
    }

    #[test]
    fn test_nested_readme_is_not_a_landing_page_for_parent() {
        let g = graph(&[
            ("README.md", "[t](testing/)"),
            ("testing/unit/README.md", "# Unit"),
        ]);
        assert_eq!(
            target_of(&g, "README.md", 0),
            Target::Directory("testing".to_string())
        );
    }

    #[test]
    fn test_self_anchor_decoded() {
        let g = graph(&[("README.md", "[x](#caf%C3%A9)")]);
        assert_eq!(
            target_of(&g, "README.md", 0),
            Target::SelfAnchor {
                fragment: "café".to_string()
            }
        );
    }

    #[test]
    fn test_reachability_bfs() {
        let g = graph(&[
            ("README.md", "[a](a.md)"),
            ("a.md", "[b](b.md)"),
            ("b.md", "[a](a.md)"),
            ("c.md", "[a](a.md)"),
        ]);
        let index = g.node_index("README.md").unwrap();
        let reached = g.reachable_from(index);
        let ids: Vec<_> = reached
            .iter()
            .map(|&n| g.document(n).unwrap().id.as_str())
            .collect();
        assert_eq!(ids, vec!["README.md", "a.md", "b.md"]);
    }

    #[test]
    fn test_inbound_counts_distinct_sources() {
        let g = graph(&[
            ("README.md", "[a](a.md) [again](a.md#x)"),
            ("a.md", "[self](a.md)"),
            ("b.md", "[a](a.md)"),
        ]);
        let counts = g.inbound_counts();
        let a = g.node_index("a.md").unwrap();
        assert_eq!(counts[a], 2);
    }

    #[test]
    fn test_reachable_from_out_of_range() {
        let g = graph(&[("README.md", "")]);
        assert!(g.reachable_from(5).is_empty());
    }
}
