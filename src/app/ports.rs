use crate::common::error::Result;
use async_trait::async_trait;

/// Response surface the pipeline needs from an HTTP GET: just the status and
/// the raw body bytes.
pub struct HttpGetResult {
    pub status: u16,
    pub bytes: Vec<u8>,
}

/// Outbound HTTP port. The production adapter is reqwest-backed; tests plug in
/// a canned implementation so no network is touched.
#[async_trait]
pub trait HttpClientPort: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpGetResult>;
}
