//! `docgraph` - Link-integrity checker for Markdown documentation corpora
//!
//! Scans a folder of Markdown documents, resolves every link into a document
//! graph, and reports broken links, broken anchors, orphans unreachable from
//! the index, duplicate titles and malformed external URLs.

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod graph;
pub mod observability;
pub mod report;
pub mod scan;
