//! Observability module
//!
//! Structured logging for `docgraph` runs. Logs go to stderr so stdout stays
//! reserved for reports.

pub mod logging;

pub use logging::{LogFormat, build_filter, init_logging, verbosity_to_directive};
