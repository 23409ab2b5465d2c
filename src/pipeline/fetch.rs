use crate::app::ports::HttpClientPort;
use crate::common::error::{EtlError, Result};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// Fetches the product catalog with a single GET. No retries: a non-200
/// status, transport failure or undecodable body fails the run.
pub struct Fetcher {
    http: Arc<dyn HttpClientPort>,
}

impl Fetcher {
    pub fn new(http: Arc<dyn HttpClientPort>) -> Self {
        Self { http }
    }

    pub async fn fetch(&self, endpoint: &str) -> Result<Value> {
        info!("Fetching product catalog from {}", endpoint);
        let response = self.http.get(endpoint).await?;

        if response.status != 200 {
            return Err(EtlError::FetchStatus {
                url: endpoint.to_string(),
                status: response.status,
            });
        }

        let records = serde_json::from_slice(&response.bytes).map_err(EtlError::FetchDecode)?;
        Ok(records)
    }
}
