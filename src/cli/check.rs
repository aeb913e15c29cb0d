//! Validate sqlog queries and dump their compiled form

use super::CliError;
use crate::{parse, Statement};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The query to compile
    pub query: String,
    /// Dump the compiled statement instead of just validating
    pub ast: bool,
    /// Render the statement as JSON
    pub json: bool,
    /// Pretty-print the JSON rendering
    pub pretty: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Compiled statement, Debug-formatted
    Ast(String),
    /// Compiled statement, JSON-formatted
    Json(String),
}

/// Compile a query and render the requested output
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let statement: Statement = parse(&options.query).map_err(CliError::Parse)?;

    if options.json {
        let rendered = if options.pretty {
            serde_json::to_string_pretty(&statement)
        } else {
            serde_json::to_string(&statement)
        }
        .map_err(CliError::Json)?;
        return Ok(CheckResult::Json(rendered));
    }

    if options.ast {
        return Ok(CheckResult::Ast(format!("{:#?}", statement)));
    }

    Ok(CheckResult::SyntaxValid)
}
