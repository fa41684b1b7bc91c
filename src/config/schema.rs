//! Configuration schema.
//!
//! Every field has a default, so an absent or empty `docgraph.yaml` yields a
//! usable configuration. Unknown keys are rejected to catch typos early.

use glob::{MatchOptions, Pattern};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default configuration file name looked up at the corpus root.
pub const DEFAULT_CONFIG_FILE: &str = "docgraph.yaml";

/// Checker configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Index document, relative to the corpus root.
    pub index: String,

    /// File extensions (without dot) treated as Markdown documents.
    pub extensions: Vec<String>,

    /// Glob patterns (relative to the root) excluded from the scan.
    pub exclude: Vec<String>,

    /// Glob patterns for documents that may be unreachable from the index.
    pub allow_orphans: Vec<String>,

    /// Regexes; links whose raw destination matches any of them are skipped.
    pub ignore_links: Vec<String>,

    /// Verify `#fragment` targets against heading anchors.
    pub check_anchors: bool,

    /// Verify that external URLs are syntactically valid.
    pub check_external: bool,

    /// Treat warnings as failures.
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            index: "README.md".to_string(),
            extensions: vec!["md".to_string(), "markdown".to_string()],
            exclude: vec!["target/**".to_string(), "node_modules/**".to_string()],
            allow_orphans: Vec::new(),
            ignore_links: Vec::new(),
            check_anchors: true,
            check_external: true,
            strict: false,
        }
    }
}

/// Compiled glob and regex patterns from a [`Config`].
#[derive(Debug, Clone, Default)]
pub struct Patterns {
    exclude: Vec<Pattern>,
    allow_orphans: Vec<Pattern>,
    ignore_links: Vec<Regex>,
}

impl Patterns {
    /// Compile all patterns in `config`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidPattern` for the first pattern that fails
    /// to compile.
    pub fn compile(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            exclude: compile_globs("exclude", &config.exclude)?,
            allow_orphans: compile_globs("allow_orphans", &config.allow_orphans)?,
            ignore_links: config
                .ignore_links
                .iter()
                .map(|p| {
                    Regex::new(p).map_err(|e| ConfigError::InvalidPattern {
                        field: "ignore_links".to_string(),
                        pattern: p.clone(),
                        message: e.to_string(),
                    })
                })
                .collect::<Result<_, _>>()?,
        })
    }

    /// Returns `true` if the corpus-relative path is excluded from the scan.
    #[must_use]
    pub fn is_excluded(&self, rel_path: &str) -> bool {
        matches_any(&self.exclude, rel_path)
    }

    /// Returns `true` if the document may be an orphan.
    #[must_use]
    pub fn is_orphan_allowed(&self, id: &str) -> bool {
        matches_any(&self.allow_orphans, id)
    }

    /// Returns `true` if the raw link destination should not be checked.
    #[must_use]
    pub fn is_link_ignored(&self, raw: &str) -> bool {
        self.ignore_links.iter().any(|re| re.is_match(raw))
    }
}

fn compile_globs(field: &str, patterns: &[String]) -> Result<Vec<Pattern>, ConfigError> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|e| ConfigError::InvalidPattern {
                field: field.to_string(),
                pattern: p.clone(),
                message: e.to_string(),
            })
        })
        .collect()
}

/// `*` stays within one path segment; `**` crosses segments.
const GLOB_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

fn matches_any(patterns: &[Pattern], path: &str) -> bool {
    patterns
        .iter()
        .any(|p| p.matches_with(path, GLOB_OPTIONS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.index, "README.md");
        assert!(config.check_anchors);
        assert!(!config.strict);
        assert_eq!(config.extensions, vec!["md", "markdown"]);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: Config = serde_yaml::from_str("index: docs/INDEX.md\nstrict: true\n").unwrap();
        assert_eq!(config.index, "docs/INDEX.md");
        assert!(config.strict);
        assert!(config.check_external);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result: Result<Config, _> = serde_yaml::from_str("indx: README.md\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_exclude_globs() {
        let config = Config {
            exclude: vec!["drafts/**".to_string(), "*.tmp.md".to_string()],
            ..Config::default()
        };
        let patterns = Patterns::compile(&config).unwrap();
        assert!(patterns.is_excluded("drafts/a/b.md"));
        assert!(patterns.is_excluded("notes.tmp.md"));
        assert!(!patterns.is_excluded("topic/notes.tmp.md"));
        assert!(!patterns.is_excluded("patterns/observer.md"));
    }

    #[test]
    fn test_allow_orphans() {
        let config = Config {
            allow_orphans: vec!["archive/**".to_string()],
            ..Config::default()
        };
        let patterns = Patterns::compile(&config).unwrap();
        assert!(patterns.is_orphan_allowed("archive/old.md"));
        assert!(!patterns.is_orphan_allowed("testing/mocks.md"));
    }

    #[test]
    fn test_ignore_links() {
        let config = Config {
            ignore_links: vec![r"^https://intranet\.".to_string()],
            ..Config::default()
        };
        let patterns = Patterns::compile(&config).unwrap();
        assert!(patterns.is_link_ignored("https://intranet.example/x"));
        assert!(!patterns.is_link_ignored("https://example.com"));
    }

    #[test]
    fn test_invalid_glob() {
        let config = Config {
            exclude: vec!["[".to_string()],
            ..Config::default()
        };
        let err = Patterns::compile(&config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { ref field, .. } if field == "exclude"));
    }

    #[test]
    fn test_invalid_regex() {
        let config = Config {
            ignore_links: vec!["(".to_string()],
            ..Config::default()
        };
        assert!(Patterns::compile(&config).is_err());
    }
}
