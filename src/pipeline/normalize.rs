use crate::common::error::{EtlError, Result};
use crate::pipeline::table::{json_kind, ProductTable};
use chrono::NaiveDate;
use serde_json::{Map, Value};
use std::collections::HashSet;

pub const LOAD_DATE_COLUMN: &str = "load_date";

/// Flatten the fetched record collection into a [`ProductTable`], nested
/// objects becoming dotted-path columns, and append a constant `load_date`
/// column for the run.
///
/// A top-level array yields one row per element; a top-level object yields a
/// single row. Row order is preserved and no rows are gained or lost.
pub fn normalize(records: &Value, load_date: NaiveDate) -> Result<ProductTable> {
    let record_list: Vec<&Value> = match records {
        Value::Array(items) => items.iter().collect(),
        Value::Object(_) => vec![records],
        other => {
            return Err(EtlError::Normalize(format!(
                "expected a JSON array or object of records, got {}",
                json_kind(other)
            )))
        }
    };

    let mut rows = Vec::with_capacity(record_list.len());
    for (index, record) in record_list.iter().enumerate() {
        let fields = record.as_object().ok_or_else(|| {
            EtlError::Normalize(format!(
                "record {} is not a JSON object ({})",
                index,
                json_kind(record)
            ))
        })?;

        let mut flat = Map::new();
        for (key, value) in fields {
            flatten_into(key, value, &mut flat);
        }
        rows.push(flat);
    }

    fill_missing_columns(&mut rows);

    let mut table = ProductTable::from_rows(rows);
    table.set_constant_column(
        LOAD_DATE_COLUMN,
        Value::String(load_date.format("%Y-%m-%d").to_string()),
    );
    Ok(table)
}

/// Nested objects flatten to dotted key paths; everything else (including
/// arrays) is kept as a cell value.
fn flatten_into(prefix: &str, value: &Value, out: &mut Map<String, Value>) {
    match value {
        Value::Object(fields) => {
            for (key, nested) in fields {
                flatten_into(&format!("{}.{}", prefix, key), nested, out);
            }
        }
        other => {
            out.insert(prefix.to_string(), other.clone());
        }
    }
}

/// Make rows dense: every column discovered anywhere in the collection exists
/// in every row, null-filled where the source record had no such field.
fn fill_missing_columns(rows: &mut [Map<String, Value>]) {
    let mut columns: HashSet<String> = HashSet::new();
    for row in rows.iter() {
        columns.extend(row.keys().cloned());
    }
    for row in rows.iter_mut() {
        for column in &columns {
            if !row.contains_key(column) {
                row.insert(column.clone(), Value::Null);
            }
        }
    }
}
