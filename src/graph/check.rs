//! Link-integrity check.
//!
//! Walks every resolved edge once and runs one breadth-first traversal from
//! the index, so a check is O(documents + links). Problems become
//! [`Finding`]s; only a missing index halts the check.

use std::collections::HashMap;
use std::path::Path;

use url::Url;

use crate::config::Patterns;
use crate::document::Document;
use crate::error::ConfigError;
use crate::graph::{DocumentGraph, Target};
use crate::report::{Finding, FindingKind, Report};

/// Fragments every renderer accepts without a matching heading.
const BUILTIN_FRAGMENTS: [&str; 2] = ["", "top"];

/// Maximum edit distance for "did you mean" suggestions.
const SUGGESTION_DISTANCE: usize = 3;

/// Inputs to [`check`] beyond the graph itself.
#[derive(Debug, Clone, Copy)]
pub struct CheckOptions<'a> {
    /// Corpus root, for error messages.
    pub root: &'a Path,

    /// Index document id.
    pub index: &'a str,

    /// Verify fragments against heading anchors.
    pub check_anchors: bool,

    /// Verify external URL syntax.
    pub check_external: bool,

    /// Compiled ignore and allow-orphan patterns.
    pub patterns: &'a Patterns,
}

/// Run the integrity check over `graph`.
///
/// # Errors
///
/// Returns `ConfigError::MissingIndex` when the index document is not part of
/// the graph. Every other problem is reported as a finding.
pub fn check(graph: &DocumentGraph, options: &CheckOptions<'_>) -> Result<Report, ConfigError> {
    let index = graph
        .node_index(options.index)
        .ok_or_else(|| ConfigError::MissingIndex {
            index: options.index.to_string(),
            root: options.root.to_path_buf(),
        })?;

    let mut findings = Vec::new();
    let mut links_checked = 0;

    for edge in graph.edges() {
        let Some(source) = graph.document(edge.source) else {
            continue;
        };
        let Some(link) = source.links.get(edge.link) else {
            continue;
        };
        if options.patterns.is_link_ignored(&link.raw) {
            tracing::trace!(source = %source.id, link = %link.raw, "link ignored");
            continue;
        }
        links_checked += 1;

        match &edge.target {
            Target::Missing(path) => findings.push(
                Finding::new(
                    FindingKind::BrokenLink,
                    &source.id,
                    format!("'{}' does not exist", link.raw),
                )
                .at_line(link.line)
                .with_target(&link.raw)
                .with_suggestion(suggest(path, graph.ids())),
            ),
            Target::OutsideRoot => findings.push(
                Finding::new(
                    FindingKind::BrokenLink,
                    &source.id,
                    format!("'{}' points outside the documentation root", link.raw),
                )
                .at_line(link.line)
                .with_target(&link.raw),
            ),
            Target::Document {
                node,
                fragment: Some(fragment),
            } if options.check_anchors => {
                if let Some(target) = graph.document(*node) {
                    if !anchor_exists(target, fragment) {
                        findings.push(
                            Finding::new(
                                FindingKind::BrokenAnchor,
                                &source.id,
                                format!("'{}' has no heading '#{fragment}'", target.id),
                            )
                            .at_line(link.line)
                            .with_target(&link.raw)
                            .with_suggestion(suggest_anchor(target, fragment)),
                        );
                    }
                }
            }
            Target::SelfAnchor { fragment } if options.check_anchors => {
                if !anchor_exists(source, fragment) {
                    findings.push(
                        Finding::new(
                            FindingKind::BrokenAnchor,
                            &source.id,
                            format!("no heading '#{fragment}' in this document"),
                        )
                        .at_line(link.line)
                        .with_target(&link.raw)
                        .with_suggestion(suggest_anchor(source, fragment)),
                    );
                }
            }
            Target::External { scheme } if options.check_external => {
                if let Err(reason) = validate_external(&link.raw, scheme) {
                    findings.push(
                        Finding::new(
                            FindingKind::MalformedUrl,
                            &source.id,
                            format!("'{}' is not a valid URL: {reason}", link.raw),
                        )
                        .at_line(link.line)
                        .with_target(&link.raw),
                    );
                }
            }
            _ => {}
        }
    }

    let orphans = find_orphans(graph, index, options.patterns);
    findings.extend(orphans.iter().map(|id| {
        Finding::new(
            FindingKind::Orphan,
            id,
            format!("not reachable from '{}'", options.index),
        )
    }));

    findings.extend(duplicate_titles(graph));

    let report = Report::new(
        options.index.to_string(),
        graph.len(),
        links_checked,
        findings,
        orphans,
    );

    tracing::info!(
        documents = report.summary.documents,
        links = report.summary.links,
        errors = report.summary.errors,
        warnings = report.summary.warnings,
        "integrity check complete"
    );

    Ok(report)
}

/// Documents not reachable from `index`, minus allowed orphans.
fn find_orphans(graph: &DocumentGraph, index: usize, patterns: &Patterns) -> Vec<String> {
    let reached = graph.reachable_from(index);
    graph
        .documents()
        .enumerate()
        .filter(|(node, _)| !reached.contains(node))
        .map(|(_, doc)| doc.id.clone())
        .filter(|id| !patterns.is_orphan_allowed(id))
        .collect()
}

/// One finding per document whose title repeats an earlier one in its folder.
fn duplicate_titles(graph: &DocumentGraph) -> Vec<Finding> {
    let mut first_seen: HashMap<(&str, String), &str> = HashMap::new();
    let mut findings = Vec::new();

    for doc in graph.documents() {
        let key = (doc.topic(), doc.title.to_lowercase());
        if let Some(first) = first_seen.get(&key) {
            findings.push(
                Finding::new(
                    FindingKind::DuplicateTitle,
                    &doc.id,
                    format!("title '{}' is already used by '{first}'", doc.title),
                )
                .with_target(*first),
            );
        } else {
            first_seen.insert(key, &doc.id);
        }
    }

    findings
}

fn anchor_exists(doc: &Document, fragment: &str) -> bool {
    BUILTIN_FRAGMENTS.contains(&fragment)
        || doc.has_anchor(fragment)
        || doc.has_anchor(&fragment.to_lowercase())
}

/// Checks URL syntax only; nothing is fetched.
fn validate_external(raw: &str, scheme: &str) -> Result<(), String> {
    let url = if raw.starts_with("//") {
        Url::parse(&format!("{scheme}:{raw}"))
    } else {
        Url::parse(raw)
    }
    .map_err(|e| e.to_string())?;
    match scheme {
        "http" | "https" | "ftp" => {
            if url.host_str().is_none_or(str::is_empty) {
                return Err("missing host".to_string());
            }
        }
        "mailto" => {
            if !url.path().contains('@') {
                return Err("missing address".to_string());
            }
        }
        _ => {}
    }
    Ok(())
}

/// Closest document id within [`SUGGESTION_DISTANCE`] edits.
fn suggest<'a>(missing: &str, candidates: impl Iterator<Item = &'a str>) -> Option<String> {
    candidates
        .map(|id| (id, strsim::damerau_levenshtein(missing, id)))
        .filter(|(_, dist)| *dist <= SUGGESTION_DISTANCE)
        .min_by_key(|(_, dist)| *dist)
        .map(|(id, _)| id.to_string())
}

fn suggest_anchor(doc: &Document, fragment: &str) -> Option<String> {
    suggest(fragment, doc.sections.iter().map(|s| s.anchor.as_str())).map(|a| format!("#{a}"))
}
