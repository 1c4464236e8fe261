//! `stats` and `eventstats`: grouping and the aggregation functions.

use indexmap::IndexMap;
use rust_decimal::{Decimal, prelude::FromPrimitive, prelude::ToPrimitive};
use std::collections::HashSet;

use crate::{
    ast::{AggFunc, AggSpec},
    record::{Record, RecordSet},
    value::{DistinctKey, Value},
};

/// Records bucketed by their group-by key, in first-seen order.
struct Groups<'a> {
    /// Group key values, one per `by` field, as first observed.
    keys: Vec<Vec<Value>>,
    members: Vec<Vec<&'a Record>>,
    /// Group index of every input record, in input order.
    assignment: Vec<usize>,
}

impl<'a> Groups<'a> {
    fn build(records: &'a [Record], group_by: &[String]) -> Self {
        let mut index: IndexMap<Vec<DistinctKey>, usize> = IndexMap::new();
        let mut groups = Groups {
            keys: vec![],
            members: vec![],
            assignment: Vec::with_capacity(records.len()),
        };

        for record in records {
            // missing fields become a null key component
            let key: Vec<Value> = group_by
                .iter()
                .map(|f| record.get(f).cloned().unwrap_or(Value::Null))
                .collect();
            let hashed = key.iter().map(Value::distinct_key).collect();

            let next = groups.keys.len();
            let slot = *index.entry(hashed).or_insert(next);
            if slot == next {
                groups.keys.push(key);
                groups.members.push(vec![]);
            }
            groups.members[slot].push(record);
            groups.assignment.push(slot);
        }
        groups
    }
}

impl AggFunc {
    /// Applies the function to one group.
    ///
    /// Field-scoped functions only see records where `field` is present and
    /// not null; `count` without a field counts every record.
    pub fn apply(self, records: &[&Record], field: Option<&str>) -> Value {
        let Some(field) = field else {
            return match self {
                AggFunc::Count => Value::Integer(records.len() as i64),
                _ => Value::Null,
            };
        };
        let values = records.iter().filter_map(|r| r.present(field));

        match self {
            AggFunc::Count => Value::Integer(values.count() as i64),
            AggFunc::Sum => sum(values),
            AggFunc::Avg => avg(values),
            AggFunc::Min => values.min_by(|a, b| a.sort_cmp(b)).cloned().unwrap_or(Value::Null),
            AggFunc::Max => values.max_by(|a, b| a.sort_cmp(b)).cloned().unwrap_or(Value::Null),
            AggFunc::Stdev | AggFunc::StdevP => stdev(values, false),
            AggFunc::StdevS => stdev(values, true),
            AggFunc::Values => {
                let mut distinct = distinct(values);
                distinct.sort_by(Value::sort_cmp);
                Value::Array(distinct)
            }
            AggFunc::List => Value::Array(values.cloned().collect()),
            AggFunc::Dc => Value::Integer(distinct(values).len() as i64),
        }
    }
}

fn distinct<'v>(values: impl Iterator<Item = &'v Value>) -> Vec<Value> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(v.distinct_key()))
        .cloned()
        .collect()
}

/// Integer when every contributing value is an integer, float otherwise.
/// Non-numeric values do not contribute.
fn sum<'v>(values: impl Iterator<Item = &'v Value>) -> Value {
    let mut all_integers = true;
    let mut total = Decimal::ZERO;
    let mut float_total = 0.0;
    let mut exact = true;

    for v in values.filter_map(Value::as_numeric) {
        let x = match &v {
            Value::Integer(n) => Decimal::from_i64(*n),
            Value::Float(n) => {
                all_integers = false;
                Decimal::from_f64(*n)
            }
            _ => continue,
        };
        float_total += v.as_number().unwrap_or(0.0);
        match x.and_then(|x| total.checked_add(x)) {
            Some(t) => total = t,
            None => exact = false,
        }
    }

    if exact {
        if all_integers && let Some(n) = total.to_i64() {
            return Value::Integer(n);
        }
        if let Some(f) = total.to_f64() {
            return Value::Float(f);
        }
    }
    Value::Float(float_total)
}

fn avg<'v>(values: impl Iterator<Item = &'v Value>) -> Value {
    let numbers: Vec<Value> = values.filter_map(Value::as_numeric).collect();
    if numbers.is_empty() {
        return Value::Null;
    }
    let count = numbers.len();

    let mean = match sum(numbers.iter()) {
        Value::Integer(n) => Decimal::from_i64(n)
            .and_then(|d| d.checked_div(Decimal::from(count)))
            .and_then(|d| d.to_f64())
            .unwrap_or(n as f64 / count as f64),
        Value::Float(f) => f / count as f64,
        _ => return Value::Null,
    };
    Value::Float(mean)
}

/// Welford's single-pass variance.
fn stdev<'v>(values: impl Iterator<Item = &'v Value>, sample: bool) -> Value {
    let mut count = 0usize;
    let mut mean = 0.0;
    let mut m2 = 0.0;

    for x in values.filter_map(Value::as_number) {
        count += 1;
        let delta = x - mean;
        mean += delta / count as f64;
        m2 += delta * (x - mean);
    }

    let divisor = match (count, sample) {
        (0, _) | (1, true) => return Value::Null,
        (1, false) => return Value::Float(0.0),
        (n, true) => n - 1,
        (n, false) => n,
    };
    Value::Float((m2 / divisor as f64).sqrt())
}

fn aggregate(members: &[&Record], aggregations: &[AggSpec]) -> Vec<(String, Value)> {
    aggregations
        .iter()
        .map(|agg| {
            (
                agg.output_name(),
                agg.function.apply(members, agg.field.as_deref()),
            )
        })
        .collect()
}

/// One row per group: the group-by fields followed by the aggregates.
///
/// Without `by` there is exactly one row, even for empty input.
pub fn stats(records: &[Record], aggregations: &[AggSpec], group_by: &[String]) -> RecordSet {
    if group_by.is_empty() {
        let all: Vec<&Record> = records.iter().collect();
        return vec![aggregate(&all, aggregations).into_iter().collect()];
    }

    let groups = Groups::build(records, group_by);
    groups
        .keys
        .into_iter()
        .zip(&groups.members)
        .map(|(key, members)| {
            let mut row: Record = group_by.iter().cloned().zip(key).collect();
            for (name, value) in aggregate(members, aggregations) {
                row.insert(name, value);
            }
            row
        })
        .collect()
}

/// Every input record, in order, with its group's aggregates added.
pub fn eventstats(
    records: &[Record],
    aggregations: &[AggSpec],
    group_by: &[String],
) -> RecordSet {
    let groups = Groups::build(records, group_by);
    let results: Vec<Vec<(String, Value)>> = groups
        .members
        .iter()
        .map(|members| aggregate(members, aggregations))
        .collect();

    records
        .iter()
        .zip(&groups.assignment)
        .map(|(record, &group)| {
            let mut enriched = record.clone();
            for (name, value) in &results[group] {
                enriched.insert(name.clone(), value.clone());
            }
            enriched
        })
        .collect()
}
