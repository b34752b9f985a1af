use async_trait::async_trait;
use reqwest::{header, StatusCode};
use tracing::debug;

use crate::address::ContentAddress;
use crate::error::MirrorError;

/// One replica of the content-addressed store.
#[async_trait]
pub trait Mirror: Send + Sync {
    /// Stable label used in logs.
    fn name(&self) -> &str;

    /// Returns the bytes the mirror serves for `address`, unverified, or an
    /// error once more than `max_bytes` would be read.
    async fn get(&self, address: &ContentAddress, max_bytes: u64) -> Result<Vec<u8>, MirrorError>;
}

/// Path-style HTTP gateway, `{endpoint}/{address}`.
#[derive(Clone, Debug)]
pub struct HttpMirror {
    endpoint: String,
    raw_blocks: bool,
    http: reqwest::Client,
}

impl HttpMirror {
    pub fn new(endpoint: impl Into<String>, raw_blocks: bool, http: reqwest::Client) -> Self {
        let mut endpoint = endpoint.into();
        while endpoint.ends_with('/') {
            endpoint.pop();
        }
        Self {
            endpoint,
            raw_blocks,
            http,
        }
    }

    /// Raw-block mode asks for the exact block the address hashes, which is
    /// the only form a dag-pb address can be verified against.
    pub fn url_for(&self, address: &ContentAddress) -> String {
        if self.raw_blocks {
            format!("{}/{}?format=raw", self.endpoint, address)
        } else {
            format!("{}/{}", self.endpoint, address)
        }
    }
}

#[async_trait]
impl Mirror for HttpMirror {
    fn name(&self) -> &str {
        &self.endpoint
    }

    async fn get(&self, address: &ContentAddress, max_bytes: u64) -> Result<Vec<u8>, MirrorError> {
        let url = self.url_for(address);
        debug!(%url, "requesting");

        let mut request = self.http.get(&url);
        if self.raw_blocks {
            request = request.header(header::ACCEPT, "application/vnd.ipld.raw");
        }
        let mut response = request.send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(MirrorError::NotFound);
        }
        if !status.is_success() {
            return Err(MirrorError::Status(status.as_u16()));
        }
        if response.content_length().is_some_and(|len| len > max_bytes) {
            return Err(MirrorError::TooLarge { limit: max_bytes });
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if (body.len() + chunk.len()) as u64 > max_bytes {
                return Err(MirrorError::TooLarge { limit: max_bytes });
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}
