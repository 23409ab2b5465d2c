use catalog_lake::app::ports::HttpClientPort;
use catalog_lake::config::Config;
use catalog_lake::infra::http_client::ReqwestHttp;
use catalog_lake::observability::logging::init_logging;
use catalog_lake::pipeline::runner;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(name = "catalog-lake")]
#[command(about = "Product catalog loader: lands raw API data and curates a tokenized copy")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the fetch -> land -> curate pipeline once
    Run {
        /// Path to the TOML config file (defaults to ./config.toml)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Load date override (YYYY-MM-DD) for backfills; defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize logging
    init_logging();

    match cli.command {
        Commands::Run { config, date } => {
            let config = Config::load(config.as_deref())?;
            let run_date = date.unwrap_or_else(|| Utc::now().date_naive());
            let http: Arc<dyn HttpClientPort> =
                Arc::new(ReqwestHttp::new(Duration::from_secs(config.source.timeout_seconds))?);

            let summary = runner::run(&config, http, run_date).await?;
            info!(
                "Run complete: {} rows landed, {} duplicates dropped, {} rows curated",
                summary.fetched_rows, summary.duplicates_dropped, summary.curated_rows
            );
        }
    }

    Ok(())
}
