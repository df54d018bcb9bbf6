//! Command line front end for `gherkin-split`.
//!
//! The binary expands source patterns, splits every matched feature file into
//! single-scenario files, and prints the written paths (or a JSON report).
//!
//! # Configuration
//!
//! - `GHERKIN_SPLIT_LOG_LEVEL`: log verbosity (trace, debug, info, warn,
//!   error); `--log-level` takes precedence.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
