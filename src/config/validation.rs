//! Configuration validation
//!
//! Semantic checks on a deserialized [`Config`]. Validation collects all
//! issues instead of stopping at the first one; warnings may normalize the
//! configuration in place (for example `.md` becomes `md`).

use std::collections::HashSet;
use std::path::Path;

use crate::config::schema::Config;
use crate::error::{Severity, ValidationIssue};
use crate::graph::resolve::{PathResolution, normalize_path};

/// Result of configuration validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Validation errors (prevent loading).
    pub errors: Vec<ValidationIssue>,

    /// Validation warnings (informational).
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Returns `true` if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns `true` if validation passed (no errors).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Configuration validator.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

impl Validator {
    /// Creates a new validator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates (and normalizes) a configuration.
    pub fn validate(&mut self, config: &mut Config) -> ValidationResult {
        self.errors.clear();
        self.warnings.clear();

        self.validate_extensions(config);
        self.validate_index(config);

        ValidationResult {
            errors: std::mem::take(&mut self.errors),
            warnings: std::mem::take(&mut self.warnings),
        }
    }

    fn validate_extensions(&mut self, config: &mut Config) {
        if config.extensions.is_empty() {
            self.error("extensions", "at least one document extension is required");
            return;
        }

        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(config.extensions.len());
        for (i, ext) in config.extensions.iter().enumerate() {
            let trimmed = ext.trim().trim_start_matches('.');
            if trimmed.len() != ext.len() {
                self.warning(
                    &format!("extensions[{i}]"),
                    &format!("'{ext}' normalized to '{trimmed}'"),
                );
            }
            if trimmed.is_empty() || trimmed.contains('/') {
                self.error(
                    &format!("extensions[{i}]"),
                    &format!("'{ext}' is not a file extension"),
                );
                continue;
            }
            if seen.insert(trimmed.to_ascii_lowercase()) {
                normalized.push(trimmed.to_string());
            } else {
                self.warning(
                    &format!("extensions[{i}]"),
                    &format!("duplicate extension '{trimmed}'"),
                );
            }
        }
        config.extensions = normalized;
    }

    fn validate_index(&mut self, config: &mut Config) {
        if config.index.trim().is_empty() {
            self.error("index", "index document path must not be empty");
            return;
        }
        if Path::new(&config.index).is_absolute() || config.index.starts_with(['/', '\\']) {
            self.error("index", "index document path must be relative to the root");
            return;
        }
        match normalize_path(&config.index) {
            PathResolution::OutsideRoot => {
                self.error("index", "index document must live inside the root");
                return;
            }
            PathResolution::Inside(normalized) if normalized.is_empty() => {
                self.error("index", "index document path must name a file");
                return;
            }
            PathResolution::Inside(normalized) => config.index = normalized,
        }

        let has_doc_extension = Path::new(&config.index)
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| config.extensions.iter().any(|x| x.eq_ignore_ascii_case(e)));
        if !has_doc_extension {
            self.warning(
                "index",
                &format!(
                    "'{}' does not have a document extension ({})",
                    config.index,
                    config.extensions.join(", ")
                ),
            );
        }
    }

    fn error(&mut self, path: &str, message: &str) {
        self.errors.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Error,
        });
    }

    fn warning(&mut self, path: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Warning,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let mut config = Config::default();
        let result = Validator::new().validate(&mut config);
        assert!(result.is_valid());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_empty_extensions_rejected() {
        let mut config = Config {
            extensions: vec![],
            ..Config::default()
        };
        let result = Validator::new().validate(&mut config);
        assert!(result.has_errors());
        assert_eq!(result.errors[0].path, "extensions");
    }

    #[test]
    fn test_leading_dot_normalized() {
        let mut config = Config {
            extensions: vec![".md".to_string(), "MD".to_string()],
            ..Config::default()
        };
        let result = Validator::new().validate(&mut config);
        assert!(result.is_valid());
        assert_eq!(config.extensions, vec!["md"]);
        assert_eq!(result.warnings.len(), 2);
    }

    #[test]
    fn test_absolute_index_rejected() {
        let mut config = Config {
            index: "/etc/README.md".to_string(),
            ..Config::default()
        };
        let result = Validator::new().validate(&mut config);
        assert!(result.has_errors());
    }

    #[test]
    fn test_escaping_index_rejected() {
        let mut config = Config {
            index: "../README.md".to_string(),
            ..Config::default()
        };
        let result = Validator::new().validate(&mut config);
        assert!(result.has_errors());
    }

    #[test]
    fn test_index_path_normalized() {
        let mut config = Config {
            index: "./docs\\guide/../README.md".to_string(),
            ..Config::default()
        };
        let result = Validator::new().validate(&mut config);
        assert!(result.is_valid());
        assert!(result.warnings.is_empty());
        assert_eq!(config.index, "docs/README.md");
    }

    #[test]
    fn test_index_naming_the_root_rejected() {
        let mut config = Config {
            index: "./".to_string(),
            ..Config::default()
        };
        let result = Validator::new().validate(&mut config);
        assert!(result.has_errors());
    }

    #[test]
    fn test_non_document_index_warns() {
        let mut config = Config {
            index: "index.txt".to_string(),
            ..Config::default()
        };
        let result = Validator::new().validate(&mut config);
        assert!(result.is_valid());
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].path, "index");
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = Config {
            index: String::new(),
            extensions: vec![String::new()],
            ..Config::default()
        };
        let result = Validator::new().validate(&mut config);
        assert_eq!(result.errors.len(), 2);
    }
}
