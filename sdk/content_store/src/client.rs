use std::sync::Arc;
use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{debug, info, instrument, warn};

use crate::address::ContentAddress;
use crate::cache::{Blob, BlobCache};
use crate::config::ContentStoreConfig;
use crate::error::{ConfigError, FetchError, MetadataError, MirrorError};
use crate::metadata::{DoctorMetadata, PatientMetadata, ProfileMetadata};
use crate::mirror::{HttpMirror, Mirror};
use crate::unixfs;

/// Fifty mebibytes, the largest file the upload relay accepts.
pub const DEFAULT_MAX_BYTES: u64 = 50 * 1024 * 1024;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchOptions {
    /// Bound on the whole logical fetch, across every mirror.
    pub timeout: Duration,
    pub max_bytes: u64,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}

/// Races every mirror for `address` and returns the first response that
/// hashes to it. Mismatched, oversized and failed responses are discarded;
/// the remaining requests are dropped as soon as one mirror wins.
pub async fn fetch_from(
    address: &ContentAddress,
    mirrors: &[Arc<dyn Mirror>],
    options: &FetchOptions,
) -> Result<Vec<u8>, FetchError> {
    if mirrors.is_empty() {
        return Err(FetchError::NoMirrors);
    }

    let race = async {
        let mut in_flight: FuturesUnordered<_> = mirrors
            .iter()
            .map(|mirror| async move {
                let outcome = mirror.get(address, options.max_bytes).await;
                (mirror.name(), outcome)
            })
            .collect();

        let mut not_found = 0usize;
        while let Some((mirror, outcome)) = in_flight.next().await {
            match outcome {
                Ok(body) if body.len() as u64 > options.max_bytes => {
                    warn!(mirror, bytes = body.len(), "response over size limit");
                }
                Ok(body) if address.verifies(&body) => {
                    debug!(mirror, bytes = body.len(), "verified response");
                    return Ok(body);
                }
                Ok(body) => {
                    warn!(mirror, bytes = body.len(), "digest mismatch, discarding response");
                }
                Err(MirrorError::NotFound) => {
                    debug!(mirror, "not found");
                    not_found += 1;
                }
                Err(err) => {
                    debug!(mirror, error = %err, "mirror failed");
                }
            }
        }

        if not_found == mirrors.len() {
            Err(FetchError::NotFound {
                address: address.to_string(),
            })
        } else {
            Err(FetchError::Unavailable {
                address: address.to_string(),
                attempts: mirrors.len(),
            })
        }
    };

    match tokio::time::timeout(options.timeout, race).await {
        Ok(outcome) => outcome,
        Err(_) => {
            warn!(timeout_ms = options.timeout.as_millis() as u64, "fetch timed out");
            Err(FetchError::Unavailable {
                address: address.to_string(),
                attempts: mirrors.len(),
            })
        }
    }
}

struct Inner {
    mirrors: Vec<Arc<dyn Mirror>>,
    options: FetchOptions,
    cache: BlobCache,
}

/// Cheap to clone; clones share mirrors and cache.
#[derive(Clone)]
pub struct ContentStoreClient {
    inner: Arc<Inner>,
}

impl ContentStoreClient {
    /// HTTP gateways from `config`, sharing one connection pool.
    pub fn new(config: &ContentStoreConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let http = reqwest::Client::builder().timeout(config.timeout()).build()?;
        let mirrors = config
            .mirrors
            .iter()
            .map(|endpoint| {
                Arc::new(HttpMirror::new(endpoint.as_str(), config.raw_blocks, http.clone()))
                    as Arc<dyn Mirror>
            })
            .collect();
        Ok(Self::with_mirrors(mirrors, config.fetch_options(), config.cache_bytes))
    }

    pub fn with_mirrors(
        mirrors: Vec<Arc<dyn Mirror>>,
        options: FetchOptions,
        cache_bytes: usize,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                mirrors,
                options,
                cache: BlobCache::new(cache_bytes),
            }),
        }
    }

    pub fn options(&self) -> &FetchOptions {
        &self.inner.options
    }

    pub fn cache(&self) -> &BlobCache {
        &self.inner.cache
    }

    /// Verified content for `address`. dag-pb blocks are unwrapped to the
    /// file they hold.
    #[instrument(skip(self, address), fields(address = %address))]
    pub async fn fetch(&self, address: &ContentAddress) -> Result<Blob, FetchError> {
        if let Some(hit) = self.inner.cache.get(address) {
            debug!(bytes = hit.len(), "cache hit");
            return Ok(hit);
        }

        let block = fetch_from(address, &self.inner.mirrors, &self.inner.options).await?;
        let content = if address.is_dag_pb() {
            unixfs::single_block_content(&block).ok_or_else(|| FetchError::UnsupportedLayout {
                address: address.to_string(),
            })?
        } else {
            block
        };

        let blob: Blob = Arc::from(content);
        self.inner.cache.insert(address, Arc::clone(&blob));
        info!(bytes = blob.len(), "fetched");
        Ok(blob)
    }

    /// Parses `reference` and fetches it. A malformed reference never
    /// reaches the network.
    pub async fn fetch_str(&self, reference: &str) -> Result<Blob, FetchError> {
        let address = ContentAddress::parse(reference)?;
        self.fetch(&address).await
    }

    pub async fn fetch_patient_metadata(
        &self,
        address: &ContentAddress,
    ) -> Result<PatientMetadata, MetadataError> {
        let blob = self.fetch(address).await?;
        PatientMetadata::from_json(&blob)
    }

    pub async fn fetch_doctor_metadata(
        &self,
        address: &ContentAddress,
    ) -> Result<DoctorMetadata, MetadataError> {
        let blob = self.fetch(address).await?;
        DoctorMetadata::from_json(&blob)
    }
}
