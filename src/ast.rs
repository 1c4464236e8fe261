//! # SPL Pipelines - Abstract Syntax Tree
//!
//! This module defines the syntax tree for Splunk-style search pipelines run
//! against in-memory records.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[operators]** - Arithmetic and comparison operators
//! - **[expressions]** - `eval` expressions and `if()` conditions
//! - **[command]** - One typed command per pipeline stage
//! - **[query]** - A complete, validated pipeline
//!
//! ## Pipeline Structure
//!
//! A query is a sequence of stages separated by `|`. Each stage consumes the
//! records produced by the previous one:
//!
//! ```text
//! status=200 method="GET" | stats count avg(duration) as avg_ms by path | sort -count | head 5
//! ```
//!
//! A stage that does not start with a command keyword is an implicit search.
//!
//! ## Commands
//!
//! - **search / where** - keep records matching every condition
//! - **stats** - collapse records into one row per group
//! - **eventstats** - annotate every record with its group's aggregates
//! - **fields / table** - keep or drop fields
//! - **rename** - rename fields
//! - **eval** - compute a field from an expression
//! - **sort** - stable multi-key sort
//! - **head / tail** - keep the first or last records
//!
//! ## Examples
//!
//! ```text
//! city="NYC" | stats avg(score)
//! eventstats avg(score) as city_avg by city | where score > city_avg
//! eval grade = if(score >= 90, "A", "B") | fields name, grade
//! sort city, -age | tail 3
//! ```
pub mod command;
pub mod expressions;
pub mod operators;
pub mod query;
pub mod tokens;

pub use command::{AggFunc, AggSpec, Command, Condition, ConditionOp, Direction, FieldsMode, Operand, SortKey};
pub use expressions::Expr;
pub use operators::{BinOp, CompareOp};
pub use query::{Query, Stage};
pub use tokens::Token;
