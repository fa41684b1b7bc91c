//! Configuration module
//!
//! Handles loading and validation of the optional `docgraph.yaml` file and
//! the command-line overrides layered on top of it.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{ConfigLimits, ConfigLoader, LoadResult, LoadWarning, LoaderOptions, Overrides};
pub use schema::{Config, Patterns};
pub use validation::{ValidationResult, Validator};
