//! CLI support for sqlog
//!
//! Provides programmatic access to sqlog CLI functionality for embedding
//! in other tools.

mod check;

pub use check::{execute_check, CheckOptions, CheckResult};

use std::io;

/// Errors that can occur during CLI operations
#[derive(Debug)]
pub enum CliError {
    /// Parser error
    Parse(crate::ParseError),
    /// AST serialization error
    Json(serde_json::Error),
    /// IO error
    Io(io::Error),
    /// No query provided
    NoQuery,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Parse(e) => write!(f, "Parse error: {}", e),
            CliError::Json(e) => write!(f, "JSON error: {}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::NoQuery => write!(f, "No query provided (argument or stdin)"),
        }
    }
}

impl std::error::Error for CliError {}
