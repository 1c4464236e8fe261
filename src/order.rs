//! `sort`, `head` and `tail`.

use std::cmp::Ordering;

use crate::{
    ast::SortKey,
    record::{Record, RecordSet},
};

/// Stable multi-key sort.
///
/// Keys are compared left to right. Present values use the
/// numeric-then-string order of [`crate::Value::sort_cmp`]; missing or null
/// values sort after present ones, and `Desc` reverses the whole key
/// comparison including that placement.
pub fn sort(records: &[Record], keys: &[SortKey]) -> RecordSet {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| {
        keys.iter()
            .map(|key| key.direction.apply(compare_field(a, b, &key.field)))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    });
    sorted
}

fn compare_field(a: &Record, b: &Record, field: &str) -> Ordering {
    match (a.present(field), b.present(field)) {
        (Some(x), Some(y)) => x.sort_cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn head(records: &[Record], n: usize) -> RecordSet {
    records.iter().take(n).cloned().collect()
}

/// The last `n` records in their original order; all of them when `n` is
/// not given.
pub fn tail(records: &[Record], n: Option<usize>) -> RecordSet {
    let n = n.unwrap_or(records.len()).min(records.len());
    records[records.len() - n..].to_vec()
}
