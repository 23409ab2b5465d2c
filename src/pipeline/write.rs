use crate::common::error::{EtlError, Result};
use crate::pipeline::table::ProductTable;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

const DATASET: &str = "products";

/// Write the table as a JSON array of row objects under the dated partition
/// `{root}/products/{YYYY}/{MM}/{DD}/products_{YYYY}{MM}{DD}.json`.
///
/// Directory creation is idempotent and an existing file is overwritten. The
/// table is serialized to a buffer first, so no partial rows are observable on
/// success.
pub fn write_dated_json(table: &ProductTable, root: &Path, date: NaiveDate) -> Result<PathBuf> {
    let year = date.format("%Y").to_string();
    let month = date.format("%m").to_string();
    let day = date.format("%d").to_string();

    let out_dir = root.join(DATASET).join(&year).join(&month).join(&day);
    fs::create_dir_all(&out_dir).map_err(|e| EtlError::Write { path: out_dir.clone(), source: e })?;

    let out_file = out_dir.join(format!("{}_{}{}{}.json", DATASET, year, month, day));
    let body = serde_json::to_vec(&table.to_json_rows())?;
    fs::write(&out_file, body).map_err(|e| EtlError::Write { path: out_file.clone(), source: e })?;

    tracing::debug!("Wrote {} rows to {}", table.row_count(), out_file.display());
    Ok(out_file)
}
