//! Execute SPL queries against JSON input

use tracing::debug;

use super::CliError;
use crate::{Spl, json::records_to_json, parse_query};

/// Options for the run command
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// The query to execute
    pub query: String,
    /// JSON input string: one object or an array of objects
    pub input: Option<String>,
    /// Only validate syntax, don't execute
    pub syntax_only: bool,
}

/// Result of a run operation
#[derive(Debug)]
pub enum RunResult {
    /// Every stage parsed
    SyntaxValid { stages: usize },
    /// Query executed successfully; the output record set as a JSON array
    Success(serde_json::Value),
}

/// Parse and, unless `syntax_only` is set, execute a query.
pub fn execute_run(options: &RunOptions) -> Result<RunResult, CliError> {
    if options.syntax_only {
        let query = parse_query(&options.query)?;
        return Ok(RunResult::SyntaxValid {
            stages: query.len(),
        });
    }

    let json_str = options.input.as_ref().ok_or(CliError::NoInput)?;
    let json_value: serde_json::Value = serde_json::from_str(json_str)?;

    let spl = Spl::from_json(json_value)?;
    debug!(records = spl.records().len(), "input loaded");

    let output = spl.search(&options.query)?;
    Ok(RunResult::Success(records_to_json(output)))
}
