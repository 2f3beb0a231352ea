//! # evops-cli: EVOps Compliance Command-Line Interface
//!
//! Offline access to the compliance evaluator for operators and CI.
//!
//! ## Subcommands
//!
//! - `evaluate`: evaluate JSON/YAML document and requirement fixtures
//! - `catalog`: print a scope's built-in catalog or its document type index
//!
//! Argument parsing is separated from the handlers, which write to any
//! `io::Write` and return the process exit code.

pub mod catalog;
pub mod evaluate;
pub mod input;
