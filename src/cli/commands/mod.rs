//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler. Commands
//! that read a corpus share one pipeline: load configuration, scan, build
//! the graph.

pub mod check;
pub mod completions;
pub mod graph;
pub mod list;
pub mod version;

use crate::cli::args::{Cli, Commands, CorpusArgs};
use crate::config::{Config, ConfigLoader, LoaderOptions, Overrides, Patterns};
use crate::error::{ConfigError, DocGraphError};
use crate::graph::DocumentGraph;
use crate::scan::scan;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub fn dispatch(cli: Cli) -> Result<(), DocGraphError> {
    match cli.command {
        Commands::Check(args) => check::run(&args),
        Commands::Graph(args) => graph::run(&args),
        Commands::List(args) => list::run(&args),
        Commands::Completions(args) => {
            completions::run(&args);
            Ok(())
        }
        Commands::Version(args) => version::run(&args),
    }
}

/// A loaded, scanned and resolved corpus.
#[derive(Debug)]
pub struct Prepared {
    /// Effective configuration.
    pub config: Config,

    /// Compiled patterns from `config`.
    pub patterns: Patterns,

    /// Resolved document graph.
    pub graph: DocumentGraph,
}

impl Prepared {
    /// Node index of the configured index document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingIndex` if the index is not in the graph.
    pub fn index_node(&self, root: &std::path::Path) -> Result<usize, ConfigError> {
        self.graph
            .node_index(&self.config.index)
            .ok_or_else(|| ConfigError::MissingIndex {
                index: self.config.index.clone(),
                root: root.to_path_buf(),
            })
    }
}

/// Load configuration, scan the corpus and build its graph.
///
/// # Errors
///
/// Returns an error if configuration loading or scanning fails.
pub fn prepare(corpus: &CorpusArgs, overrides: &Overrides) -> Result<Prepared, DocGraphError> {
    let loader = ConfigLoader::new(LoaderOptions {
        root: corpus.root.clone(),
        config_path: corpus.config.clone(),
        ..LoaderOptions::default()
    });
    let loaded = loader.load(overrides)?;

    for warning in &loaded.warnings {
        tracing::warn!(
            location = warning.location.as_deref().unwrap_or(""),
            "{}",
            warning.message
        );
    }

    let scanned = scan(&corpus.root, &loaded.config, &loaded.patterns, &loaded.limits)?;
    let graph = DocumentGraph::build(scanned);

    Ok(Prepared {
        config: loaded.config,
        patterns: loaded.patterns,
        graph,
    })
}

/// Overrides that only select the corpus.
fn corpus_overrides(corpus: &CorpusArgs) -> Overrides {
    Overrides {
        index: corpus.index.clone(),
        exclude: corpus.exclude.clone(),
        ..Overrides::default()
    }
}
