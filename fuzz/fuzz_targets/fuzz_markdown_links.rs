#![no_main]

use libfuzzer_sys::fuzz_target;

use docgraph::config::{Config, Patterns};
use docgraph::graph::{CheckOptions, DocumentGraph, check};
use docgraph::scan::Corpus;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Split the input into a small corpus so resolution crosses documents.
    let mut sources = vec![("README.md", text)];
    if let Some((first, second)) = text.split_once("\n---\n") {
        sources = vec![("README.md", first), ("sub/page.md", second)];
    }

    let config = Config::default();
    let Ok(patterns) = Patterns::compile(&config) else {
        return;
    };
    let corpus = Corpus::from_sources(sources, &config.extensions);
    let graph = DocumentGraph::build(corpus);
    let options = CheckOptions {
        root: std::path::Path::new("."),
        index: &config.index,
        check_anchors: true,
        check_external: true,
        patterns: &patterns,
    };
    let _ = check(&graph, &options);
});
