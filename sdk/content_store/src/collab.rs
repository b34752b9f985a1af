//! Interfaces to the services that put bytes into the content store. The
//! client only consumes their results; implementations live elsewhere.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::address::ContentAddress;
use crate::error::RelayError;

/// A file handed to the upload relay, tagged with the form field it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadFile {
    pub field_name: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub field_name: String,
    pub original_name: String,
    pub content_address: ContentAddress,
}

#[async_trait]
pub trait UploadRelay: Send + Sync {
    /// Stores each file and reports its address. Files the relay could not
    /// store are omitted from the result.
    async fn upload(&self, files: Vec<UploadFile>) -> Result<Vec<UploadedFile>, RelayError>;
}

#[async_trait]
pub trait MetadataPinner: Send + Sync {
    async fn pin_json(&self, document: serde_json::Value) -> Result<ContentAddress, RelayError>;
}
