//! `search` / `where`: keep the records for which every condition holds.

use crate::{
    ast::{Condition, ConditionOp, Operand},
    record::{Record, RecordSet},
    value::Value,
};

pub fn search(records: &[Record], conditions: &[Condition]) -> RecordSet {
    records
        .iter()
        .filter(|r| matches(r, conditions))
        .cloned()
        .collect()
}

/// True when every condition holds. No conditions match everything.
pub fn matches(record: &Record, conditions: &[Condition]) -> bool {
    conditions.iter().all(|c| condition_holds(record, c))
}

/// Evaluates one condition.
///
/// A missing or null field fails every relational test (including `!=`);
/// only `field!=*` succeeds on it.
pub fn condition_holds(record: &Record, condition: &Condition) -> bool {
    let actual = record.present(&condition.field);

    let op = match condition.op {
        ConditionOp::Exists => return actual.is_some(),
        ConditionOp::NotExists => return actual.is_none(),
        ConditionOp::Compare(op) => op,
    };
    let Some(actual) = actual else {
        return false;
    };

    let ordering = match &condition.value {
        Operand::Quoted(expected) => actual.as_string().as_str().cmp(expected.as_str()),
        Operand::Number(expected) => actual.compare(expected),
        Operand::Word(word) => match record.present(word) {
            Some(other) => actual.compare(other),
            None => actual.compare(&Value::String(word.clone())),
        },
        Operand::Wildcard => return false,
    };
    op.holds(ordering)
}
