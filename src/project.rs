//! `fields`, `table` and `rename`. None of these change the record count.

use crate::{
    ast::FieldsMode,
    record::{Record, RecordSet},
};

pub fn fields(records: &[Record], mode: FieldsMode, names: &[String]) -> RecordSet {
    records
        .iter()
        .map(|record| match mode {
            FieldsMode::Include => record.project(names),
            FieldsMode::Exclude => {
                let mut kept = record.clone();
                for name in names {
                    kept.remove(name);
                }
                kept
            }
        })
        .collect()
}

/// Applies the pairs in order, so a later pair can rename a field an
/// earlier pair produced.
pub fn rename(records: &[Record], pairs: &[(String, String)]) -> RecordSet {
    records
        .iter()
        .map(|record| {
            let mut renamed = record.clone();
            for (old, new) in pairs {
                renamed.rename(old, new);
            }
            renamed
        })
        .collect()
}
