//! JSON <-> record conversion.
//!
//! Field order is preserved in both directions (`serde_json` is built with
//! `preserve_order`). Nested objects are rejected: records are flat.

use serde_json::{Map, Number};

use crate::{
    error::{Result, SplError},
    record::{Record, RecordSet},
    value::Value,
};

/// Converts a JSON value held in a record field.
pub fn json_to_value(v: serde_json::Value) -> Result<Value> {
    Ok(match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(json_to_value)
                .collect::<Result<Vec<_>>>()?,
        ),
        serde_json::Value::Object(_) => {
            return Err(SplError::InvalidRecord(
                "nested objects are not supported as field values".into(),
            ));
        }
    })
}

pub fn value_to_json(v: Value) -> serde_json::Value {
    match v {
        Value::Null => serde_json::Value::Null,
        Value::Boolean(b) => serde_json::Value::Bool(b),
        Value::Integer(i) => serde_json::Value::Number(i.into()),
        Value::Float(f) => Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s),
        Value::Array(items) => {
            serde_json::Value::Array(items.into_iter().map(value_to_json).collect())
        }
    }
}

pub fn json_to_record(v: serde_json::Value) -> Result<Record> {
    match v {
        serde_json::Value::Object(map) => map
            .into_iter()
            .map(|(k, v)| json_to_value(v).map(|v| (k, v)))
            .collect(),
        other => Err(SplError::InvalidRecord(format!(
            "expected an object, got {}",
            json_type_name(&other)
        ))),
    }
}

/// Accepts either one object or an array of objects.
pub fn json_to_records(v: serde_json::Value) -> Result<RecordSet> {
    match v {
        serde_json::Value::Array(items) => items.into_iter().map(json_to_record).collect(),
        obj @ serde_json::Value::Object(_) => Ok(vec![json_to_record(obj)?]),
        other => Err(SplError::InvalidRecord(format!(
            "expected an object or an array of objects, got {}",
            json_type_name(&other)
        ))),
    }
}

pub fn record_to_json(record: Record) -> serde_json::Value {
    serde_json::Value::Object(
        record
            .into_iter()
            .map(|(k, v)| (k, value_to_json(v)))
            .collect::<Map<_, _>>(),
    )
}

pub fn records_to_json(records: RecordSet) -> serde_json::Value {
    serde_json::Value::Array(records.into_iter().map(record_to_json).collect())
}

fn json_type_name(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

impl TryFrom<serde_json::Value> for Record {
    type Error = SplError;

    fn try_from(v: serde_json::Value) -> Result<Self> {
        json_to_record(v)
    }
}

impl From<Record> for serde_json::Value {
    fn from(record: Record) -> Self {
        record_to_json(record)
    }
}
