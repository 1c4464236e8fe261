//! Ordered key/value records.
//!
//! A [`Record`] keeps its fields in insertion order; projection, renaming and
//! output all depend on that order. Field absence is a first-class outcome:
//! [`Record::get`] returns `None` for a missing field, and
//! [`Record::present`] additionally treats an explicit null as missing.

use indexmap::IndexMap;

use crate::value::Value;

/// An ordered sequence of records. Order is significant.
pub type RecordSet = Vec<Record>;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `field`, including explicit nulls.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Value of `field` if it is present and not null.
    pub fn present(&self, field: &str) -> Option<&Value> {
        self.fields.get(field).filter(|v| !v.is_null())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Sets `field`, overwriting in place if it already exists or appending
    /// it otherwise.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Removes `field`, keeping the order of the remaining fields.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.shift_remove(field)
    }

    /// Renames `old` to `new` at `old`'s position. An existing field called
    /// `new` is replaced. No-op when `old` is absent.
    pub fn rename(&mut self, old: &str, new: &str) {
        if old == new || !self.fields.contains_key(old) {
            return;
        }

        let fields = std::mem::take(&mut self.fields);
        self.fields = fields
            .into_iter()
            .filter(|(key, _)| key != new)
            .map(|(key, value)| {
                if key == old {
                    (new.to_string(), value)
                } else {
                    (key, value)
                }
            })
            .collect();
    }

    /// A new record holding only `fields` that exist here, in the given order.
    pub fn project(&self, fields: &[String]) -> Record {
        fields
            .iter()
            .filter_map(|f| self.fields.get(f).map(|v| (f.clone(), v.clone())))
            .collect()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Record {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
