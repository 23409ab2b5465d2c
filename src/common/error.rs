use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("fetch failed for {url}: HTTP status {status}")]
    FetchStatus { url: String, status: u16 },

    #[error("fetch failed for {url}: {source}")]
    FetchTransport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("fetch returned a body that is not valid JSON: {0}")]
    FetchDecode(#[source] serde_json::Error),

    #[error("normalize failed: {0}")]
    Normalize(String),

    #[error("write failed for {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("text processing failed: {0}")]
    TextProcessing(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EtlError>;
