//! Folds parsed commands over a record set.

use std::borrow::Cow;

use tracing::debug;

use crate::{
    ast::{Command, Query},
    error::Result,
    evaluator, filter, order, project,
    query::parse_query,
    record::{Record, RecordSet},
    stats,
};

/// Parses `query` and runs it over `records`.
///
/// The input is never modified; every stage produces new records. If any
/// stage fails to parse, nothing runs.
///
/// # Examples
///
/// ```
/// use spl_lang::{Record, Value, pipeline};
///
/// let records: Vec<Record> = vec![
///     [("city", Value::from("NYC")), ("score", Value::Integer(85))].into_iter().collect(),
///     [("city", Value::from("NYC")), ("score", Value::Integer(78))].into_iter().collect(),
///     [("city", Value::from("LA")), ("score", Value::Integer(92))].into_iter().collect(),
/// ];
///
/// let out = pipeline::execute(&records, r#"city="NYC" | stats avg(score)"#).unwrap();
/// assert_eq!(out.len(), 1);
/// assert_eq!(out[0].get("avg(score)"), Some(&Value::Float(81.5)));
/// ```
pub fn execute(records: &[Record], query: &str) -> Result<RecordSet> {
    let query = parse_query(query)?;
    Ok(run(records, &query))
}

/// Runs an already parsed query.
pub fn run(records: &[Record], query: &Query) -> RecordSet {
    let mut current: Cow<'_, [Record]> = Cow::Borrowed(records);

    for (index, stage) in query.stages.iter().enumerate() {
        let input = current.len();
        let output = apply(&stage.command, &current);
        debug!(
            stage = index,
            command = stage.command.name(),
            input,
            output = output.len(),
            "stage complete"
        );
        current = Cow::Owned(output);
    }
    current.into_owned()
}

/// Applies one command.
pub fn apply(command: &Command, records: &[Record]) -> RecordSet {
    match command {
        Command::Search(conditions) => filter::search(records, conditions),
        Command::Stats {
            aggregations,
            group_by,
        } => stats::stats(records, aggregations, group_by),
        Command::EventStats {
            aggregations,
            group_by,
        } => stats::eventstats(records, aggregations, group_by),
        Command::Fields { mode, fields } => project::fields(records, *mode, fields),
        Command::Rename(pairs) => project::rename(records, pairs),
        Command::Eval { target, expr } => records
            .iter()
            .map(|record| {
                let value = evaluator::eval_expr(expr, record);
                let mut updated = record.clone();
                updated.insert(target.as_str(), value);
                updated
            })
            .collect(),
        Command::Sort(keys) => order::sort(records, keys),
        Command::Head(n) => order::head(records, *n),
        Command::Tail(n) => order::tail(records, *n),
    }
}
