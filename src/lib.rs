//! An SPL-style query pipeline over in-memory records.
//!
//! A query is a sequence of commands separated by `|`. Each command consumes
//! the record set produced by the previous one:
//!
//! ```text
//! city="NYC" | eval total = price * quantity | stats sum(total) as revenue by store | sort -revenue
//! ```
//!
//! Start with [`Spl`] or [`pipeline::execute`].

pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod error;
pub mod evaluator;
pub mod filter;
pub mod json;
pub mod lexer;
pub mod order;
pub mod parser;
pub mod pipeline;
pub mod project;
pub mod query;
pub mod record;
mod spl;
pub mod stats;
pub mod value;

pub use ast::{AggFunc, AggSpec, Command, Direction, Expr, FieldsMode, Query, SortKey, Token};
pub use error::{LexError, Result, SplError, SyntaxError};
pub use lexer::Lexer;
pub use parser::Parser;
pub use pipeline::execute;
pub use query::parse_query;
pub use record::{Record, RecordSet};
pub use spl::Spl;
pub use value::Value;
