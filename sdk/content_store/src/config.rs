use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::client::{FetchOptions, DEFAULT_MAX_BYTES, DEFAULT_TIMEOUT};
use crate::error::ConfigError;

/// Public gateways the legacy clients polled, in their original order.
pub const DEFAULT_MIRRORS: [&str; 4] = [
    "https://gateway.pinata.cloud/ipfs",
    "https://cloudflare-ipfs.com/ipfs",
    "https://dweb.link/ipfs",
    "https://ipfs.io/ipfs",
];

pub const DEFAULT_CACHE_BYTES: usize = 64 * 1024 * 1024;

/// Content store settings. Every field is optional in JSON and falls back
/// to its default.
///
/// ```json
/// { "mirrors": ["https://ipfs.io/ipfs"], "timeout_ms": 5000 }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentStoreConfig {
    pub mirrors: Vec<String>,
    pub timeout_ms: u64,
    pub max_bytes: u64,
    /// Request `?format=raw` blocks. Must stay on for dag-pb (CIDv0)
    /// addresses, whose digest covers the block rather than the file.
    pub raw_blocks: bool,
    pub cache_bytes: usize,
}

impl Default for ContentStoreConfig {
    fn default() -> Self {
        Self {
            mirrors: DEFAULT_MIRRORS.iter().map(|m| m.to_string()).collect(),
            timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
            max_bytes: DEFAULT_MAX_BYTES,
            raw_blocks: true,
            cache_bytes: DEFAULT_CACHE_BYTES,
        }
    }
}

impl ContentStoreConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mirrors.is_empty() {
            return Err(ConfigError::NoMirrors);
        }
        if let Some(bad) = self
            .mirrors
            .iter()
            .find(|m| !(m.starts_with("https://") || m.starts_with("http://")))
        {
            return Err(ConfigError::BadMirror(bad.clone()));
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::Zero("timeout_ms"));
        }
        if self.max_bytes == 0 {
            return Err(ConfigError::Zero("max_bytes"));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            timeout: self.timeout(),
            max_bytes: self.max_bytes,
        }
    }
}
