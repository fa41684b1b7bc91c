//! Report renderers.
//!
//! Human output is one line per finding followed by a summary line; JSON output
//! is the serialized [`Report`].

use std::fmt::Write;

use super::{Finding, Report};

/// Render a report for terminals.
///
/// ```text
/// error[broken-link] A.md:3 → D.md
///   'D.md' does not exist
///   help: did you mean 'B.md'?
/// ```
#[must_use]
pub fn render_human(report: &Report) -> String {
    let mut out = String::new();
    for finding in &report.findings {
        write_finding(&mut out, finding);
    }

    if !report.findings.is_empty() {
        out.push('\n');
    }
    let _ = writeln!(
        out,
        "checked {} document(s), {} link(s): {} error(s), {} warning(s)",
        report.summary.documents,
        report.summary.links,
        report.summary.errors,
        report.summary.warnings,
    );
    out
}

fn write_finding(out: &mut String, finding: &Finding) {
    let _ = write!(out, "{}[{}] {}", finding.severity, finding.kind, finding.source);
    if let Some(line) = finding.line {
        let _ = write!(out, ":{line}");
    }
    if let Some(target) = &finding.target {
        let _ = write!(out, " → {target}");
    }
    out.push('\n');

    let _ = writeln!(out, "  {}", finding.message);
    if let Some(suggestion) = &finding.suggestion {
        let _ = writeln!(out, "  help: did you mean '{suggestion}'?");
    }
}

/// Render a report as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
