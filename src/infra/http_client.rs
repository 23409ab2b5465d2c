use crate::app::ports::{HttpClientPort, HttpGetResult};
use crate::common::error::{EtlError, Result};
use async_trait::async_trait;
use std::time::Duration;

/// reqwest-backed adapter for [`HttpClientPort`] with a fixed request timeout.
pub struct ReqwestHttp {
    client: reqwest::Client,
}

impl ReqwestHttp {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EtlError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClientPort for ReqwestHttp {
    async fn get(&self, url: &str) -> Result<HttpGetResult> {
        tracing::debug!("HTTP GET request to: {}", url);
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| EtlError::FetchTransport { url: url.to_string(), source: e })?;
        let status = resp.status().as_u16();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| EtlError::FetchTransport { url: url.to_string(), source: e })?
            .to_vec();
        tracing::debug!("HTTP response: status={}, size={} bytes", status, bytes.len());
        Ok(HttpGetResult { status, bytes })
    }
}
