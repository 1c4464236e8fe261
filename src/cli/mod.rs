//! CLI support for spl-lang
//!
//! Provides programmatic access to the `spl` binary's functionality so other
//! tools can embed it.

mod docs;
mod run;

pub use docs::{DocTopic, get_doc_topic, get_docs_overview};
pub use run::{RunOptions, RunResult, execute_run};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Query(#[from] crate::SplError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No input provided. Use --input or pipe JSON to stdin.")]
    NoInput,

    #[error("Unknown topic: '{0}'\nRun 'spl docs' to see available topics.")]
    UnknownTopic(String),
}
