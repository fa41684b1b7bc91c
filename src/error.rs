//! Error types for `docgraph`
//!
//! Findings about the corpus (broken links, orphans, ...) are report data and
//! never appear here. These types cover the failures that halt a run: bad
//! configuration, an unreadable corpus, or a strict-mode verdict.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `docgraph` CLI operations.
///
/// These codes follow Unix conventions.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution, corpus is clean (or only has tolerated warnings)
    pub const SUCCESS: i32 = 0;

    /// The check produced failing findings
    pub const FINDINGS: i32 = 1;

    /// Configuration error (invalid YAML, bad glob, missing index)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O or scan error (root not found, unreadable document)
    pub const IO_ERROR: i32 = 3;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `docgraph` operations.
///
/// Aggregates the domain-specific errors and maps each one to an exit code.
#[derive(Debug, Error)]
pub enum DocGraphError {
    /// Configuration loading or validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Corpus scanning error
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// The check completed but the corpus failed it
    #[error("check failed: {errors} error(s), {warnings} warning(s)")]
    Findings {
        /// Number of error-severity findings
        errors: usize,
        /// Number of warning-severity findings
        warnings: usize,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DocGraphError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => ExitCode::CONFIG_ERROR,
            Self::Scan(_) | Self::Json(_) => ExitCode::IO_ERROR,
            Self::Findings { .. } => ExitCode::FINDINGS,
        }
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing failed
    #[error("parse error in {path}: {message}")]
    ParseError {
        /// Path to the configuration file
        path: PathBuf,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// Configuration validation failed
    #[error("validation failed for {path}")]
    ValidationError {
        /// Path to the configuration file (or `<defaults>`)
        path: String,
        /// List of validation issues found
        errors: Vec<ValidationIssue>,
    },

    /// Explicitly requested configuration file not found
    #[error("file not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// The index document does not exist in the corpus
    #[error("index document '{index}' not found under {root}")]
    MissingIndex {
        /// Configured index path, relative to the root
        index: String,
        /// Corpus root
        root: PathBuf,
    },

    /// Field has an invalid value
    #[error("invalid value for '{field}': got '{value}', expected {expected}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The actual value provided
        value: String,
        /// Description of what was expected
        expected: String,
    },

    /// A glob or regex pattern failed to compile
    #[error("invalid pattern in '{field}': '{pattern}': {message}")]
    InvalidPattern {
        /// Configuration field holding the pattern
        field: String,
        /// The pattern text
        pattern: String,
        /// Compiler error message
        message: String,
    },
}

// ============================================================================
// Validation Types
// ============================================================================

/// A single validation issue found during configuration validation.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Path to the problematic field (e.g., "exclude[2]")
    pub path: String,
    /// Description of the validation issue
    pub message: String,
    /// Severity level of the issue
    pub severity: Severity,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} at {}", self.severity, self.message, self.path)
    }
}

/// Severity level shared by configuration issues and corpus findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error - a failure that must be fixed
    Error,
    /// Warning - a potential issue that does not fail a non-strict run
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => f.write_str("error"),
            Self::Warning => f.write_str("warning"),
        }
    }
}

// ============================================================================
// Scan Errors
// ============================================================================

/// Errors raised while walking and reading the corpus.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Corpus root does not exist or is not a directory
    #[error("corpus root not found: {path}")]
    RootNotFound {
        /// The configured root
        path: PathBuf,
    },

    /// A document is not valid UTF-8
    #[error("document is not valid UTF-8: {path}")]
    NotUtf8 {
        /// Offending document
        path: PathBuf,
    },

    /// A document exceeds the size limit
    #[error("document too large: {path} ({size} bytes, limit: {limit})")]
    FileTooLarge {
        /// Offending document
        path: PathBuf,
        /// Actual size in bytes
        size: u64,
        /// Configured limit in bytes
        limit: u64,
    },

    /// The corpus exceeds the document count limit
    #[error("too many documents: limit is {limit}")]
    TooManyDocuments {
        /// Configured limit
        limit: usize,
    },

    /// Directory traversal failed
    #[error("failed to walk {path}: {message}")]
    Walk {
        /// Path being visited when the failure occurred
        path: PathBuf,
        /// Underlying error message
        message: String,
    },

    /// Reading a document failed
    #[error("failed to read {path}: {source}")]
    Read {
        /// Document path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

// ============================================================================
// Tests
// ============================================================================
