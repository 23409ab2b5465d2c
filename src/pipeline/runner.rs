use crate::app::ports::HttpClientPort;
use crate::common::error::Result;
use crate::config::Config;
use crate::pipeline::fetch::Fetcher;
use crate::pipeline::normalize::normalize;
use crate::pipeline::text::add_text_features;
use crate::pipeline::write::write_dated_json;
use chrono::NaiveDate;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Counts and output locations for one completed run.
#[derive(Debug)]
pub struct RunSummary {
    pub fetched_rows: usize,
    pub duplicates_dropped: usize,
    pub curated_rows: usize,
    pub raw_path: PathBuf,
    pub curated_path: PathBuf,
}

/// Run the whole pipeline once: fetch, normalize, land the raw copy, then
/// rename, deduplicate, derive text features and write the curated copy.
///
/// Strictly sequential and fail-fast: the first stage error aborts the run.
/// The load date is computed once by the caller and passed in, so backfills
/// and tests can pin it.
pub async fn run(
    config: &Config,
    http: Arc<dyn HttpClientPort>,
    run_date: NaiveDate,
) -> Result<RunSummary> {
    info!("🔄 Starting catalog run for load date {}", run_date);

    let fetcher = Fetcher::new(http);
    let records = fetcher.fetch(&config.source.endpoint).await?;

    let mut table = normalize(&records, run_date)?;
    let fetched_rows = table.row_count();
    info!("📊 Normalized {} product rows", fetched_rows);

    let raw_path = write_dated_json(&table, &config.storage.landing_root, run_date)?;
    info!("Landed raw copy at {}", raw_path.display());

    for (from, to) in &config.curation.renames {
        table.rename_column(from, to);
    }

    let duplicates_dropped = table.drop_duplicates();
    if duplicates_dropped > 0 {
        debug!("Dropped {} duplicate rows", duplicates_dropped);
    }

    for column in &config.curation.text_columns {
        add_text_features(&mut table, column)?;
    }

    let curated_path = write_dated_json(&table, &config.storage.curated_root, run_date)?;
    info!("✅ Curated copy at {}", curated_path.display());

    Ok(RunSummary {
        fetched_rows,
        duplicates_dropped,
        curated_rows: table.row_count(),
        raw_path,
        curated_path,
    })
}
