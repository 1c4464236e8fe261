use crate::{
    error::Result,
    json::json_to_records,
    pipeline,
    record::{Record, RecordSet},
};

/// A fixed collection of records that queries run against.
///
/// Queries never modify the collection, so one `Spl` can serve any number of
/// [`Spl::search`] calls.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use spl_lang::{Spl, Value};
///
/// let spl = Spl::from_json(json!([
///     {"name": "Alice", "age": 30, "city": "NYC"},
///     {"name": "Bob", "age": 25, "city": "LA"},
/// ]))
/// .unwrap();
///
/// let out = spl.search("age>26 | fields name").unwrap();
/// assert_eq!(out.len(), 1);
/// assert_eq!(out[0].get("name"), Some(&Value::from("Alice")));
/// assert_eq!(spl.records().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Spl {
    records: RecordSet,
}

impl Spl {
    pub fn new(records: RecordSet) -> Self {
        Spl { records }
    }

    pub fn from_record(record: Record) -> Self {
        Spl {
            records: vec![record],
        }
    }

    /// Accepts one JSON object or an array of objects.
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        json_to_records(value).map(Spl::new)
    }

    pub fn search(&self, query: &str) -> Result<RecordSet> {
        pipeline::execute(&self.records, query)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }
}

impl From<RecordSet> for Spl {
    fn from(records: RecordSet) -> Self {
        Spl::new(records)
    }
}
