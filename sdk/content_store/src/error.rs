use thiserror::Error;

/// Why a string is not a fetchable content address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("not a content address: {0:?}")]
    Syntax(common::ContentRefError),
    #[error("malformed CID: {0}")]
    Decode(String),
    #[error("unsupported multihash 0x{0:x}; only sha2-256 can be verified")]
    UnsupportedHash(u64),
}

/// Failure reported by a single mirror.
#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("content not found on mirror")]
    NotFound,
    #[error("mirror answered with HTTP {0}")]
    Status(u16),
    #[error("response exceeds {limit} bytes")]
    TooLarge { limit: u64 },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{0}")]
    Other(String),
}

/// Outcome of a logical fetch that did not produce verified bytes.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{address} unavailable after {attempts} mirror attempt(s)")]
    Unavailable { address: String, attempts: usize },
    #[error("{address} not found on any mirror")]
    NotFound { address: String },
    #[error("invalid content reference: {0}")]
    InvalidReference(#[from] AddressError),
    #[error("no mirrors configured")]
    NoMirrors,
    #[error("{address} is a multi-block file; only single-block documents are supported")]
    UnsupportedLayout { address: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("at least one mirror is required")]
    NoMirrors,
    #[error("mirror {0:?} is not an http(s) URL")]
    BadMirror(String),
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
    #[error("http client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Failure talking to an upload relay or pinning service.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("relay transport error: {0}")]
    Transport(String),
    #[error("relay rejected the request: {0}")]
    Rejected(String),
    #[error("relay returned an invalid address: {0}")]
    BadAddress(#[from] AddressError),
}

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("metadata is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("unsupported metadata version {0}")]
    UnsupportedVersion(u32),
    #[error("metadata field `{0}` is required")]
    MissingField(&'static str),
    #[error("metadata field `{field}` holds an invalid content address: {source}")]
    BadDocument {
        field: &'static str,
        source: AddressError,
    },
    #[error(transparent)]
    Pin(#[from] RelayError),
}
