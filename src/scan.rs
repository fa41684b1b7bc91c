//! Corpus scanning.
//!
//! Walks the corpus root once, parsing every Markdown document and recording
//! every other file and folder so asset and folder links can be checked
//! without touching the filesystem again.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::config::{Config, ConfigLimits, Patterns};
use crate::document::{Document, parse_document};
use crate::error::ScanError;

/// Everything the checker knows about a corpus on disk.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    /// Corpus root as given.
    pub root: PathBuf,

    /// Parsed documents, sorted by id.
    pub documents: Vec<Document>,

    /// Non-document files, as corpus-relative `/`-separated paths.
    pub assets: BTreeSet<String>,

    /// Folders, as corpus-relative `/`-separated paths (root excluded).
    pub directories: BTreeSet<String>,

    /// Hidden or excluded paths the walk did not enter. They are never
    /// documents, but links into them are valid when the file exists.
    pub skipped: BTreeSet<String>,
}

impl Corpus {
    /// Build a corpus from in-memory `(id, markdown)` pairs.
    ///
    /// Used by tests and fuzzing; folders are derived from document ids.
    #[must_use]
    pub fn from_sources<'a>(
        sources: impl IntoIterator<Item = (&'a str, &'a str)>,
        extensions: &[String],
    ) -> Self {
        let mut documents: Vec<Document> = sources
            .into_iter()
            .map(|(id, text)| parse_document(id, text, extensions))
            .collect();
        documents.sort_by(|a, b| a.id.cmp(&b.id));

        let directories = documents
            .iter()
            .flat_map(|d| ancestors(&d.id))
            .collect();

        Self {
            root: PathBuf::new(),
            documents,
            assets: BTreeSet::new(),
            directories,
            skipped: BTreeSet::new(),
        }
    }

    /// Returns `true` if `rel` lies at or below a skipped path and exists on
    /// disk.
    #[must_use]
    pub fn exists_beneath_skipped(&self, rel: &str) -> bool {
        let under_skipped = std::iter::once(rel.to_string())
            .chain(ancestors(rel))
            .any(|path| self.skipped.contains(&path));
        under_skipped && self.root.join(rel).exists()
    }
}

/// Scans `root` according to `config`.
///
/// Hidden entries (leading `.`) and paths matching the configured exclude
/// globs are not descended into or parsed; they are only remembered so links
/// into them can still be checked. Symlinks are not followed.
///
/// # Errors
///
/// Returns `ScanError` if the root is missing, traversal fails, a document is
/// unreadable, not UTF-8, or over a configured limit.
pub fn scan(
    root: &Path,
    config: &Config,
    patterns: &Patterns,
    limits: &ConfigLimits,
) -> Result<Corpus, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::RootNotFound {
            path: root.to_path_buf(),
        });
    }

    let mut corpus = Corpus {
        root: root.to_path_buf(),
        ..Corpus::default()
    };

    let mut walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    while let Some(entry) = walker.next() {
        let entry = entry.map_err(|e| ScanError::Walk {
            path: e.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf),
            message: e.to_string(),
        })?;
        if entry.depth() == 0 {
            continue;
        }

        let Some(rel) = relative_id(entry.path(), root) else {
            continue;
        };

        if is_skipped(&entry, &rel, patterns) {
            if entry.file_type().is_dir() {
                walker.skip_current_dir();
            }
            corpus.skipped.insert(rel);
            continue;
        }

        if entry.file_type().is_dir() {
            corpus.directories.insert(rel);
            continue;
        }
        if !entry.file_type().is_file() {
            continue;
        }

        if !is_document(entry.path(), &config.extensions) {
            corpus.assets.insert(rel);
            continue;
        }

        if corpus.documents.len() >= limits.max_documents {
            return Err(ScanError::TooManyDocuments {
                limit: limits.max_documents,
            });
        }
        corpus
            .documents
            .push(read_document(&entry, rel, config, limits)?);
    }

    corpus.documents.sort_by(|a, b| a.id.cmp(&b.id));

    tracing::info!(
        root = %root.display(),
        documents = corpus.documents.len(),
        assets = corpus.assets.len(),
        skipped = corpus.skipped.len(),
        "corpus scanned"
    );

    Ok(corpus)
}

fn read_document(
    entry: &DirEntry,
    id: String,
    config: &Config,
    limits: &ConfigLimits,
) -> Result<Document, ScanError> {
    let path = entry.path();
    let size = entry.metadata().map_or(0, |m| m.len());
    if size > limits.max_file_size {
        return Err(ScanError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            limit: limits.max_file_size,
        });
    }

    let bytes = std::fs::read(path).map_err(|source| ScanError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|_| ScanError::NotUtf8 {
        path: path.to_path_buf(),
    })?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

    let document = parse_document(&id, text, &config.extensions);
    tracing::debug!(
        document = %document.id,
        links = document.links.len(),
        sections = document.sections.len(),
        "document parsed"
    );
    Ok(document)
}

fn is_skipped(entry: &DirEntry, rel: &str, patterns: &Patterns) -> bool {
    if entry.file_name().to_string_lossy().starts_with('.') {
        tracing::trace!(path = %rel, "hidden");
        return true;
    }
    let excluded = patterns.is_excluded(rel);
    if excluded {
        tracing::trace!(path = %rel, "excluded");
    }
    excluded
}

fn is_document(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| extensions.iter().any(|x| x.eq_ignore_ascii_case(e)))
}

/// Corpus-relative id with `/` separators, or `None` for non-UTF-8 paths.
fn relative_id(path: &Path, root: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Option<Vec<&str>> = rel.components().map(|c| c.as_os_str().to_str()).collect();
    parts.map(|p| p.join("/"))
}

/// Every proper ancestor folder of a `/`-separated id.
fn ancestors(id: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = id;
    while let Some((parent, _)) = current.rsplit_once('/') {
        out.push(parent.to_string());
        current = parent;
    }
    out
}
