//! Error types for query parsing and execution.

use thiserror::Error;

/// Errors raised while turning query text into tokens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("unterminated string starting at position {position}")]
    UnterminatedString { position: usize },

    #[error("unexpected character '{ch}' at position {position}")]
    UnexpectedChar { ch: char, position: usize },

    #[error("invalid number '{text}'")]
    InvalidNumber { text: String },
}

/// Token-level grammar errors for conditions and expressions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntaxError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("expected {expected}, found {found}")]
    Unexpected { expected: String, found: String },

    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    #[error("'{0}' takes {1} arguments")]
    Arity(String, usize),
}

impl SyntaxError {
    pub(crate) fn unexpected(expected: impl Into<String>, found: impl std::fmt::Debug) -> Self {
        SyntaxError::Unexpected {
            expected: expected.into(),
            found: format!("{:?}", found),
        }
    }
}

/// Errors returned by [`crate::pipeline::execute`] and [`crate::Spl::search`].
///
/// Both parse-time kinds are raised before any stage runs, so a failed query
/// never yields partial results.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplError {
    /// Malformed stage syntax, unknown aggregation function or bad arguments.
    #[error("parse error in stage '{stage}': {message}")]
    Parse { stage: String, message: String },

    /// Malformed `eval` expression.
    #[error("evaluation error in stage '{stage}': {message}")]
    Evaluation { stage: String, message: String },

    /// Input data that cannot be represented as flat records.
    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

impl SplError {
    pub(crate) fn parse(stage: &str, message: impl ToString) -> Self {
        SplError::Parse {
            stage: stage.to_string(),
            message: message.to_string(),
        }
    }

    pub(crate) fn evaluation(stage: &str, message: impl ToString) -> Self {
        SplError::Evaluation {
            stage: stage.to_string(),
            message: message.to_string(),
        }
    }

    /// The stage text a parse or evaluation error refers to.
    pub fn stage(&self) -> Option<&str> {
        match self {
            SplError::Parse { stage, .. } | SplError::Evaluation { stage, .. } => Some(stage),
            SplError::InvalidRecord(_) => None,
        }
    }
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, SplError>;
