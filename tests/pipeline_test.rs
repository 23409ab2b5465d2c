use async_trait::async_trait;
use catalog_lake::app::ports::{HttpClientPort, HttpGetResult};
use catalog_lake::common::error::{EtlError, Result};
use catalog_lake::config::{Config, CurationConfig, SourceConfig, StorageConfig};
use catalog_lake::pipeline::runner;
use chrono::NaiveDate;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;

struct CannedHttp {
    status: u16,
    body: Vec<u8>,
}

impl CannedHttp {
    fn ok(records: Value) -> Self {
        Self { status: 200, body: serde_json::to_vec(&records).unwrap() }
    }
}

#[async_trait]
impl HttpClientPort for CannedHttp {
    async fn get(&self, _url: &str) -> Result<HttpGetResult> {
        Ok(HttpGetResult { status: self.status, bytes: self.body.clone() })
    }
}

fn test_config(landing: &Path, curated: &Path) -> Config {
    Config {
        source: SourceConfig {
            endpoint: "http://example.test/products".to_string(),
            timeout_seconds: 10,
        },
        storage: StorageConfig {
            landing_root: landing.to_path_buf(),
            curated_root: curated.to_path_buf(),
        },
        curation: CurationConfig::default(),
    }
}

fn catalog_fixture() -> Value {
    let shirt = json!({
        "id": 1,
        "title": "Slim Fit Casual Shirts",
        "description": "The Quick Foxes 123 running!",
        "rating": {"rate": 3.9, "count": 120}
    });
    json!([
        shirt.clone(),
        shirt,
        {
            "id": 2,
            "title": "Waterproof Hiking Jackets",
            "description": "Lightweight shell for wet days",
            "rating": {"rate": 4.4, "count": 59}
        }
    ])
}

fn read_rows(path: &Path) -> Vec<Value> {
    let content = fs::read_to_string(path).unwrap();
    serde_json::from_str::<Value>(&content).unwrap().as_array().unwrap().clone()
}

#[tokio::test]
async fn full_run_lands_raw_and_curates() {
    let landing = tempdir().unwrap();
    let curated = tempdir().unwrap();
    let config = test_config(landing.path(), curated.path());
    let run_date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
    let http = Arc::new(CannedHttp::ok(catalog_fixture()));

    let summary = runner::run(&config, http, run_date).await.unwrap();

    assert_eq!(summary.fetched_rows, 3);
    assert_eq!(summary.duplicates_dropped, 1);
    assert_eq!(summary.curated_rows, 2);

    // Raw copy: all rows, dotted columns, constant load date.
    assert_eq!(
        summary.raw_path,
        landing.path().join("products/2024/03/07/products_20240307.json")
    );
    let raw_rows = read_rows(&summary.raw_path);
    assert_eq!(raw_rows.len(), 3);
    for row in &raw_rows {
        assert_eq!(row["load_date"], json!("2024-03-07"));
    }
    assert_eq!(raw_rows[0]["rating.rate"], json!(3.9));

    // Curated copy: deduplicated, renamed, with derived text columns.
    assert_eq!(
        summary.curated_path,
        curated.path().join("products/2024/03/07/products_20240307.json")
    );
    let curated_rows = read_rows(&summary.curated_path);
    assert_eq!(curated_rows.len(), 2);

    let first = &curated_rows[0];
    assert_eq!(first["rating_rate"], json!(3.9));
    assert!(first.get("rating.rate").is_none());
    assert_eq!(first["title_tokenize"], json!(["slim", "fit", "casual", "shirts"]));
    assert_eq!(first["title_stemm"], json!("slim fit casual shirt"));
    assert_eq!(first["description_tokenize"], json!(["quick", "foxes", "running"]));
    assert_eq!(first["description_stemm"], json!("quick fox run"));
}

#[tokio::test]
async fn rerunning_the_same_date_overwrites_outputs() {
    let landing = tempdir().unwrap();
    let curated = tempdir().unwrap();
    let config = test_config(landing.path(), curated.path());
    let run_date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();

    let first = runner::run(&config, Arc::new(CannedHttp::ok(catalog_fixture())), run_date)
        .await
        .unwrap();
    let first_content = fs::read_to_string(&first.curated_path).unwrap();

    let second = runner::run(&config, Arc::new(CannedHttp::ok(catalog_fixture())), run_date)
        .await
        .unwrap();
    let second_content = fs::read_to_string(&second.curated_path).unwrap();

    assert_eq!(first.curated_path, second.curated_path);
    assert_eq!(first_content, second_content);
}

#[tokio::test]
async fn not_found_endpoint_fails_without_writing() {
    let landing = tempdir().unwrap();
    let curated = tempdir().unwrap();
    let config = test_config(landing.path(), curated.path());
    let run_date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
    let http = Arc::new(CannedHttp { status: 404, body: Vec::new() });

    let err = runner::run(&config, http, run_date).await.unwrap_err();

    match err {
        EtlError::FetchStatus { status, .. } => assert_eq!(status, 404),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!landing.path().join("products").exists());
    assert!(!curated.path().join("products").exists());
}

#[tokio::test]
async fn non_string_text_column_aborts_before_the_curated_write() {
    let landing = tempdir().unwrap();
    let curated = tempdir().unwrap();
    let config = test_config(landing.path(), curated.path());
    let run_date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
    let http = Arc::new(CannedHttp::ok(json!([
        {"id": 1, "title": "Fine", "description": 7}
    ])));

    let err = runner::run(&config, http, run_date).await.unwrap_err();

    assert!(matches!(err, EtlError::TextProcessing(_)));
    // Fail-fast: the raw copy written by an earlier stage stays on disk.
    assert!(landing.path().join("products/2024/03/07/products_20240307.json").exists());
    assert!(!curated.path().join("products").exists());
}
