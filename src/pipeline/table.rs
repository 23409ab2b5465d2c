use crate::common::error::Result;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Flat tabular view of the product catalog: one dense JSON object per row.
/// Every row carries every column; fields absent from a source record are
/// `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductTable {
    rows: Vec<Map<String, Value>>,
}

impl ProductTable {
    pub fn from_rows(rows: Vec<Map<String, Value>>) -> Self {
        Self { rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Map<String, Value>] {
        &self.rows
    }

    /// Set `name` to the same value in every row.
    pub fn set_constant_column(&mut self, name: &str, value: Value) {
        for row in &mut self.rows {
            row.insert(name.to_string(), value.clone());
        }
    }

    /// Rewrite a column name in every row. A no-op when the column is absent.
    pub fn rename_column(&mut self, from: &str, to: &str) {
        for row in &mut self.rows {
            if let Some(value) = row.remove(from) {
                row.insert(to.to_string(), value);
            }
        }
    }

    /// Remove byte-identical rows, keeping the first occurrence and preserving
    /// order. Returns the number of rows removed.
    pub fn drop_duplicates(&mut self) -> usize {
        let before = self.rows.len();
        let mut seen: HashSet<String> = HashSet::new();
        self.rows.retain(|row| {
            let key = serde_json::to_string(row).unwrap_or_else(|_| String::new());
            seen.insert(key)
        });
        before - self.rows.len()
    }

    /// Append a column derived from `source`, one value per row. The whole
    /// column is computed before any row is touched, so a failing cell leaves
    /// the table unchanged.
    pub fn derive_column<F>(&mut self, source: &str, target: &str, mut f: F) -> Result<()>
    where
        F: FnMut(usize, &Value) -> Result<Value>,
    {
        let mut derived = Vec::with_capacity(self.rows.len());
        for (index, row) in self.rows.iter().enumerate() {
            let cell = row.get(source).unwrap_or(&Value::Null);
            derived.push(f(index, cell)?);
        }
        for (row, value) in self.rows.iter_mut().zip(derived) {
            row.insert(target.to_string(), value);
        }
        Ok(())
    }

    /// The table as a top-level JSON array of row objects.
    pub fn to_json_rows(&self) -> Value {
        Value::Array(self.rows.iter().cloned().map(Value::Object).collect())
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::EtlError;
    use serde_json::json;

    fn row(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn drop_duplicates_keeps_first_and_preserves_order() {
        let mut table = ProductTable::from_rows(vec![
            row(json!({"id": 1, "title": "a"})),
            row(json!({"id": 2, "title": "b"})),
            row(json!({"id": 1, "title": "a"})),
            row(json!({"id": 3, "title": "c"})),
        ]);

        let dropped = table.drop_duplicates();

        assert_eq!(dropped, 1);
        assert_eq!(table.row_count(), 3);
        let ids: Vec<i64> = table.rows().iter().map(|r| r["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn rename_column_moves_values() {
        let mut table = ProductTable::from_rows(vec![row(json!({"rating.rate": 3.9}))]);
        table.rename_column("rating.rate", "rating_rate");

        assert_eq!(table.rows()[0]["rating_rate"], json!(3.9));
        assert!(table.rows()[0].get("rating.rate").is_none());
    }

    #[test]
    fn rename_missing_column_is_a_noop() {
        let mut table = ProductTable::from_rows(vec![row(json!({"title": "a"}))]);
        table.rename_column("category", "kind");
        assert_eq!(table.rows()[0], row(json!({"title": "a"})));
    }

    #[test]
    fn derive_column_is_all_or_nothing() {
        let mut table = ProductTable::from_rows(vec![
            row(json!({"title": "ok"})),
            row(json!({"title": 7})),
        ]);

        let result = table.derive_column("title", "title_len", |_, cell| {
            cell.as_str()
                .map(|s| json!(s.len()))
                .ok_or_else(|| EtlError::TextProcessing("not a string".into()))
        });

        assert!(result.is_err());
        assert!(table.rows().iter().all(|r| r.get("title_len").is_none()));
    }

    #[test]
    fn to_json_rows_is_an_array_of_objects() {
        let table = ProductTable::from_rows(vec![row(json!({"title": "x"}))]);
        assert_eq!(table.to_json_rows(), json!([{"title": "x"}]));
    }
}
