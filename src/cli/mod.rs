//! Command-line interface
//!
//! Argument definitions and command handlers for the `docgraph` binary.

pub mod args;
pub mod commands;
