//! CLI argument definitions
//!
//! All Clap derive structs for `docgraph` command-line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::observability::LogFormat;

// ============================================================================
// Root CLI
// ============================================================================

/// Link-integrity checker for Markdown documentation corpora.
#[derive(Parser, Debug)]
#[command(name = "docgraph", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "DOCGRAPH_COLOR")]
    pub color: ColorChoice,

    /// Log output format.
    #[arg(long, default_value = "human", global = true)]
    pub log_format: LogFormat,
}

// ============================================================================
// Top-Level Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check links, anchors and reachability across the corpus.
    Check(CheckArgs),

    /// Export the document graph.
    Graph(GraphArgs),

    /// List every document with its link counts.
    List(ListArgs),

    /// Generate shell completion scripts.
    Completions(CompletionsArgs),

    /// Display version information.
    Version(VersionArgs),
}

// ============================================================================
// Corpus Selection
// ============================================================================

/// Arguments shared by every command that reads a corpus.
#[derive(Args, Debug, Clone)]
pub struct CorpusArgs {
    /// Corpus root directory.
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Path to a YAML configuration file (default: `<ROOT>/docgraph.yaml`).
    #[arg(short, long, env = "DOCGRAPH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Index document, relative to the root.
    #[arg(short, long, env = "DOCGRAPH_INDEX")]
    pub index: Option<String>,

    /// Additional glob of paths to skip (repeatable).
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,
}

// ============================================================================
// Command Arguments
// ============================================================================

/// Arguments for `check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Corpus selection.
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,

    /// Enable strict checking (warnings fail the run).
    #[arg(long)]
    pub strict: bool,

    /// Skip heading-anchor verification.
    #[arg(long)]
    pub no_anchors: bool,
}

/// Arguments for `graph`.
#[derive(Args, Debug)]
pub struct GraphArgs {
    /// Corpus selection.
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Output format.
    #[arg(short, long, default_value = "mermaid")]
    pub format: GraphFormat,
}

/// Arguments for `list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Corpus selection.
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,

    /// Only list documents unreachable from the index.
    #[arg(long)]
    pub unreachable: bool,
}

// ============================================================================
// Completions / Version
// ============================================================================

/// Arguments for shell completion generation.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script.
    pub shell: Shell,
}

/// Arguments for version display.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output format for reports and listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

/// Output format for `graph`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum GraphFormat {
    /// Mermaid flowchart.
    #[default]
    Mermaid,
    /// JSON nodes and edges.
    Json,
}

/// Shell type for completion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell.
    Bash,
    /// Zsh shell.
    Zsh,
    /// Fish shell.
    Fish,
    /// `PowerShell`.
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish shell.
    Elvish,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_check_defaults() {
        let cli = parse(&["docgraph", "check"]);
        let Commands::Check(args) = cli.command else {
            panic!("Expected CheckArgs");
        };
        assert_eq!(args.corpus.root, PathBuf::from("."));
        assert_eq!(args.format, OutputFormat::Human);
        assert!(!args.strict);
        assert!(!args.no_anchors);
        assert!(args.corpus.exclude.is_empty());
    }

    #[test]
    fn test_check_all_flags() {
        let cli = parse(&[
            "docgraph",
            "check",
            "docs",
            "--index",
            "SUMMARY.md",
            "--format",
            "json",
            "--strict",
            "--no-anchors",
            "--exclude",
            "drafts/**",
            "--exclude",
            "vendor/**",
        ]);
        let Commands::Check(args) = cli.command else {
            panic!("Expected CheckArgs");
        };
        assert_eq!(args.corpus.root, PathBuf::from("docs"));
        assert_eq!(args.corpus.index.as_deref(), Some("SUMMARY.md"));
        assert_eq!(args.format, OutputFormat::Json);
        assert!(args.strict);
        assert!(args.no_anchors);
        assert_eq!(args.corpus.exclude, vec!["drafts/**", "vendor/**"]);
    }

    #[test]
    fn test_graph_default_format() {
        let cli = parse(&["docgraph", "graph"]);
        let Commands::Graph(args) = cli.command else {
            panic!("Expected GraphArgs");
        };
        assert_eq!(args.format, GraphFormat::Mermaid);
    }

    #[test]
    fn test_list_unreachable() {
        let cli = parse(&["docgraph", "list", "--unreachable", "-f", "json"]);
        let Commands::List(args) = cli.command else {
            panic!("Expected ListArgs");
        };
        assert!(args.unreachable);
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["docgraph", "check", "-vv", "--color", "never", "--log-format", "json"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.color, ColorChoice::Never);
        assert_eq!(cli.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_format_rejected() {
        let result = Cli::try_parse_from(["docgraph", "check", "--format", "xml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_help_output() {
        let err = Cli::try_parse_from(["docgraph", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_output() {
        let err = Cli::try_parse_from(["docgraph", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_completions_shell() {
        let cli = parse(&["docgraph", "completions", "powershell"]);
        let Commands::Completions(args) = cli.command else {
            panic!("Expected CompletionsArgs");
        };
        assert_eq!(args.shell, Shell::PowerShell);
    }

    #[test]
    fn test_cli_debug_assert() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
