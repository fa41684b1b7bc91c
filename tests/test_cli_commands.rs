mod common;

use common::{DocGraphProcess, TempCorpus, stderr, stdout};

// ============================================================================
// version / completions / help
// ============================================================================

#[test]
fn version_human() {
    let output = DocGraphProcess::spawn_command(&["version"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).starts_with("docgraph "));
}

#[test]
fn version_json() {
    let output = DocGraphProcess::spawn_command(&["version", "--format", "json"]);
    assert!(output.status.success());
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("version JSON should be valid");
    assert_eq!(parsed["name"], "docgraph");
    assert!(parsed.get("version").is_some());
}

#[test]
fn completions_bash() {
    let output = DocGraphProcess::spawn_command(&["completions", "bash"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("docgraph"));
}

#[test]
fn help_exits_zero() {
    let output = DocGraphProcess::spawn_command(&["--help"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("check"));
}

#[test]
fn unknown_flag_is_usage_error() {
    let output = DocGraphProcess::spawn_command(&["check", "--bogus"]);
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn missing_subcommand_is_usage_error() {
    let output = DocGraphProcess::spawn_command(&[]);
    assert_eq!(output.status.code(), Some(64));
}

// ============================================================================
// Halting errors
// ============================================================================

#[test]
fn missing_root_is_io_error() {
    let output = DocGraphProcess::spawn_command(&["check", "/nonexistent/docgraph/corpus"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("corpus root not found"));
}

#[test]
fn missing_index_is_config_error() {
    let corpus = TempCorpus::new(&[("guide.md", "# Guide\n")]);
    let output = DocGraphProcess::spawn_command(&["check", corpus.arg()]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("index document 'README.md' not found"));
}

#[test]
fn invalid_config_is_config_error() {
    let corpus = TempCorpus::new(&[
        ("README.md", "# Index\n"),
        ("docgraph.yaml", "indexx: README.md\n"),
    ]);
    let output = DocGraphProcess::spawn_command(&["check", corpus.arg()]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("parse error"));
}

#[test]
fn invalid_pattern_is_config_error() {
    let corpus = TempCorpus::new(&[("README.md", "# Index\n")]);
    let output = DocGraphProcess::spawn_command(&["check", corpus.arg(), "--exclude", "a/***"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn explicit_config_must_exist() {
    let corpus = TempCorpus::new(&[("README.md", "# Index\n")]);
    let output =
        DocGraphProcess::spawn_command(&["check", corpus.arg(), "--config", "/nonexistent.yaml"]);
    assert_eq!(output.status.code(), Some(2));
}

// ============================================================================
// graph / list
// ============================================================================

fn small_corpus() -> TempCorpus {
    TempCorpus::new(&[
        ("README.md", "# Guide\n\n[Naming](naming.md)\n[Gone](gone.md)\n"),
        ("naming.md", "# Naming\n"),
        ("orphan.md", "# Orphan\n"),
    ])
}

#[test]
fn graph_mermaid() {
    let corpus = small_corpus();
    let output = DocGraphProcess::spawn_command(&["graph", corpus.arg()]);
    assert!(output.status.success(), "{}", stderr(&output));

    let text = stdout(&output);
    assert!(text.starts_with("flowchart LR"));
    assert!(text.contains(r#"n0["Guide"]"#));
    assert!(text.contains("n0 --> n1"));
    assert!(text.contains(r#"m0["gone.md"]:::missing"#));
    assert!(text.contains("class n2 orphan"));
}

#[test]
fn graph_json() {
    let corpus = small_corpus();
    let output = DocGraphProcess::spawn_command(&["graph", corpus.arg(), "--format", "json"]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["nodes"].as_array().unwrap().len(), 3);
    assert_eq!(json["edges"][1]["resolution"], "missing");
}

#[test]
fn list_human_and_unreachable_filter() {
    let corpus = small_corpus();
    let output = DocGraphProcess::spawn_command(&["list", corpus.arg()]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("naming.md"));
    assert!(text.contains("3 document(s)"));

    let output = DocGraphProcess::spawn_command(&["list", corpus.arg(), "--unreachable", "-f", "json"]);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let ids: Vec<_> = json.as_array().unwrap().iter().map(|n| n["id"].clone()).collect();
    assert_eq!(ids, vec![serde_json::json!("orphan.md")]);
}

#[test]
fn json_logs_on_stderr() {
    let corpus = small_corpus();
    let output = DocGraphProcess::spawn_command(&[
        "list",
        corpus.arg(),
        "-v",
        "--log-format",
        "json",
    ]);
    assert!(output.status.success());
    let first = stderr(&output).lines().next().map(str::to_string).unwrap_or_default();
    let parsed: serde_json::Value = serde_json::from_str(&first).expect("JSON log line");
    assert_eq!(parsed["level"], "INFO");
}

#[test]
fn quiet_suppresses_logs() {
    let corpus = small_corpus();
    let output = DocGraphProcess::spawn_command(&["list", corpus.arg(), "-v", "--quiet"]);
    assert!(output.status.success());
    assert!(stderr(&output).is_empty());
}
