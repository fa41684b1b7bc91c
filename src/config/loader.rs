//! Configuration loader
//!
//! Loading pipeline:
//! 1. Locate the file (explicit path, or `docgraph.yaml` at the root)
//! 2. Size check and UTF-8 BOM stripping
//! 3. YAML parsing into [`Config`] (empty file means defaults)
//! 4. Command-line overrides
//! 5. Validation and normalization
//! 6. Pattern compilation

use std::path::{Path, PathBuf};

use crate::config::schema::{Config, DEFAULT_CONFIG_FILE, Patterns};
use crate::config::validation::Validator;
use crate::error::ConfigError;

// ============================================================================
// Public API
// ============================================================================

/// Options for the configuration loader.
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Corpus root; `docgraph.yaml` is looked up here when no explicit
    /// configuration file is given.
    pub root: PathBuf,

    /// Explicit configuration file. Must exist when set.
    pub config_path: Option<PathBuf>,

    /// Resource limits.
    pub limits: ConfigLimits,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            config_path: None,
            limits: ConfigLimits::default(),
        }
    }
}

/// Limits that keep a scan bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigLimits {
    /// Maximum number of documents in a corpus.
    pub max_documents: usize,

    /// Maximum size of a single document in bytes.
    pub max_file_size: u64,

    /// Maximum size of the configuration file in bytes.
    pub max_config_size: u64,
}

impl Default for ConfigLimits {
    fn default() -> Self {
        Self {
            max_documents: env_or("DOCGRAPH_MAX_DOCUMENTS", 10_000),
            max_file_size: env_or("DOCGRAPH_MAX_FILE_SIZE", 5 * 1024 * 1024),
            max_config_size: env_or("DOCGRAPH_MAX_CONFIG_SIZE", 1024 * 1024),
        }
    }
}

/// Command-line values that take precedence over the configuration file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Replacement index document.
    pub index: Option<String>,

    /// Additional exclude globs.
    pub exclude: Vec<String>,

    /// Force strict mode on.
    pub strict: bool,

    /// Force anchor checking off.
    pub no_anchors: bool,
}

/// Result of loading a configuration.
#[derive(Debug)]
pub struct LoadResult {
    /// The loaded and validated configuration.
    pub config: Config,

    /// Compiled patterns from `config`.
    pub patterns: Patterns,

    /// Limits in effect.
    pub limits: ConfigLimits,

    /// File the configuration came from, `None` for built-in defaults.
    pub source: Option<PathBuf>,

    /// Warnings encountered during loading.
    pub warnings: Vec<LoadWarning>,
}

/// Warning during configuration loading.
#[derive(Debug, Clone)]
pub struct LoadWarning {
    /// Warning message.
    pub message: String,

    /// Location where the warning occurred.
    pub location: Option<String>,
}

/// Configuration loader.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: LoaderOptions,
}

impl ConfigLoader {
    /// Creates a new configuration loader with the given options.
    #[must_use]
    pub const fn new(options: LoaderOptions) -> Self {
        Self { options }
    }

    /// Loads, overrides, validates and compiles the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An explicit configuration file does not exist
    /// - The file is too large or YAML parsing fails
    /// - Validation fails
    /// - A glob or regex pattern does not compile
    pub fn load(&self, overrides: &Overrides) -> Result<LoadResult, ConfigError> {
        let mut warnings = Vec::new();

        // Stage 1: locate
        let source = self.locate()?;

        // Stages 2-3: read and parse
        let mut config = match &source {
            Some(path) => self.read(path)?,
            None => Config::default(),
        };

        // Stage 4: overrides
        apply_overrides(&mut config, overrides);

        // Stage 5: validation
        let mut validator = Validator::new();
        let result = validator.validate(&mut config);
        if result.has_errors() {
            return Err(ConfigError::ValidationError {
                path: source
                    .as_ref()
                    .map_or_else(|| "<defaults>".to_string(), |p| p.display().to_string()),
                errors: result.errors,
            });
        }
        warnings.extend(result.warnings.into_iter().map(|issue| LoadWarning {
            message: issue.message,
            location: Some(issue.path),
        }));

        // Stage 6: patterns
        let patterns = Patterns::compile(&config)?;

        tracing::debug!(
            source = ?source,
            index = %config.index,
            strict = config.strict,
            "configuration loaded"
        );

        Ok(LoadResult {
            config,
            patterns,
            limits: self.options.limits,
            source,
            warnings,
        })
    }

    fn locate(&self) -> Result<Option<PathBuf>, ConfigError> {
        if let Some(path) = &self.options.config_path {
            if !path.is_file() {
                return Err(ConfigError::MissingFile { path: path.clone() });
            }
            return Ok(Some(path.clone()));
        }

        let default_path = self.options.root.join(DEFAULT_CONFIG_FILE);
        Ok(default_path.is_file().then_some(default_path))
    }

    fn read(&self, path: &Path) -> Result<Config, ConfigError> {
        let metadata = std::fs::metadata(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;
        if metadata.len() > self.options.limits.max_config_size {
            return Err(ConfigError::InvalidValue {
                field: "file_size".to_string(),
                value: format!("{} bytes", metadata.len()),
                expected: format!("at most {} bytes", self.options.limits.max_config_size),
            });
        }

        let raw_content = std::fs::read_to_string(path).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            line: None,
            message: e.to_string(),
        })?;
        let raw_content = raw_content.strip_prefix('\u{feff}').unwrap_or(&raw_content);

        if raw_content.trim().is_empty() {
            return Ok(Config::default());
        }

        serde_yaml::from_str(raw_content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            line: e.location().map(|l| l.line()),
            message: e.to_string(),
        })
    }
}

/// Applies command-line overrides onto a configuration.
pub fn apply_overrides(config: &mut Config, overrides: &Overrides) {
    if let Some(index) = &overrides.index {
        config.index.clone_from(index);
    }
    config.exclude.extend(overrides.exclude.iter().cloned());
    if overrides.strict {
        config.strict = true;
    }
    if overrides.no_anchors {
        config.check_anchors = false;
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
