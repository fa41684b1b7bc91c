//! Check results.
//!
//! A [`Report`] is the complete, deterministic outcome of one integrity check.
//! Findings never abort a run; whether they fail it is decided by the caller
//! from [`Report::has_errors`] and the strict flag.

pub mod render;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::Severity;

pub use render::{render_human, render_json};

/// Kind of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FindingKind {
    /// Link to a document or file that does not exist.
    BrokenLink,
    /// Link to a heading anchor that does not exist.
    BrokenAnchor,
    /// Document unreachable from the index.
    Orphan,
    /// Two documents in one topic folder share a title.
    DuplicateTitle,
    /// External link that is not a well-formed URL.
    MalformedUrl,
}

impl FindingKind {
    /// Stable kebab-case name used in output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BrokenLink => "broken-link",
            Self::BrokenAnchor => "broken-anchor",
            Self::Orphan => "orphan",
            Self::DuplicateTitle => "duplicate-title",
            Self::MalformedUrl => "malformed-url",
        }
    }

    /// Severity assigned to this kind.
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::BrokenLink | Self::MalformedUrl => Severity::Error,
            Self::BrokenAnchor | Self::Orphan | Self::DuplicateTitle => Severity::Warning,
        }
    }
}

impl std::fmt::Display for FindingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reported problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// What kind of problem this is.
    pub kind: FindingKind,

    /// Error or warning.
    pub severity: Severity,

    /// Id of the document the finding is about.
    pub source: String,

    /// 1-based line in `source`, for link findings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,

    /// Link destination as written, or the related document id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// Human-readable explanation.
    pub message: String,

    /// Closest existing alternative, when one is near enough.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Finding {
    /// Create a finding; severity follows from `kind`.
    #[must_use]
    pub fn new(kind: FindingKind, source: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            source: source.to_string(),
            line: None,
            target: None,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Attach a source line.
    #[must_use]
    pub const fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Attach the target.
    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Attach a suggestion.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: Option<String>) -> Self {
        self.suggestion = suggestion;
        self
    }

    fn sort_key(&self) -> (&str, usize, FindingKind, &str) {
        (
            self.source.as_str(),
            self.line.unwrap_or(0),
            self.kind,
            self.target.as_deref().unwrap_or(""),
        )
    }
}

/// Aggregate counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Documents checked.
    pub documents: usize,
    /// Links examined (ignored links excluded).
    pub links: usize,
    /// Error-severity findings.
    pub errors: usize,
    /// Warning-severity findings.
    pub warnings: usize,
    /// Findings per kind.
    pub by_kind: BTreeMap<FindingKind, usize>,
}

/// Outcome of an integrity check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Index document id.
    pub index: String,

    /// Aggregate counts.
    pub summary: Summary,

    /// Findings in deterministic order.
    pub findings: Vec<Finding>,

    /// Ids of documents unreachable from the index, sorted.
    pub orphans: Vec<String>,
}

impl Report {
    /// Assemble a report, sorting findings and computing the summary.
    #[must_use]
    pub fn new(
        index: String,
        documents: usize,
        links: usize,
        mut findings: Vec<Finding>,
        mut orphans: Vec<String>,
    ) -> Self {
        findings.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        orphans.sort();

        let mut summary = Summary {
            documents,
            links,
            ..Summary::default()
        };
        for finding in &findings {
            match finding.severity {
                Severity::Error => summary.errors += 1,
                Severity::Warning => summary.warnings += 1,
            }
            *summary.by_kind.entry(finding.kind).or_insert(0) += 1;
        }

        Self {
            index,
            summary,
            findings,
            orphans,
        }
    }

    /// Returns `true` if there are no findings at all.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// Returns `true` if any finding has error severity.
    #[must_use]
    pub const fn has_errors(&self) -> bool {
        self.summary.errors > 0
    }

    /// `(source, destination)` pairs for every broken link.
    #[must_use]
    pub fn broken_links(&self) -> Vec<(&str, &str)> {
        self.findings
            .iter()
            .filter(|f| f.kind == FindingKind::BrokenLink)
            .map(|f| (f.source.as_str(), f.target.as_deref().unwrap_or("")))
            .collect()
    }

    /// Findings of one kind.
    pub fn of_kind(&self, kind: FindingKind) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.kind == kind)
    }

    /// Whether this report fails the run.
    ///
    /// Errors always fail; warnings fail only in strict mode.
    #[must_use]
    pub const fn fails(&self, strict: bool) -> bool {
        self.summary.errors > 0 || (strict && self.summary.warnings > 0)
    }
}
