//! Off-chain client for the content-addressed document store behind the
//! medical ledger.
//!
//! The ledger records only content addresses. This crate resolves them:
//! every configured mirror is raced, each response is hashed and compared to
//! the address, and the first verified response wins. It also defines the
//! typed metadata documents profiles point at and the collaborator traits
//! for uploading and pinning.

pub mod address;
pub mod cache;
pub mod client;
pub mod collab;
pub mod config;
pub mod error;
pub mod metadata;
pub mod mirror;
mod unixfs;

pub use address::ContentAddress;
pub use cache::{Blob, BlobCache};
pub use client::{fetch_from, ContentStoreClient, FetchOptions};
pub use collab::{MetadataPinner, UploadFile, UploadRelay, UploadedFile};
pub use config::ContentStoreConfig;
pub use error::{AddressError, ConfigError, FetchError, MetadataError, MirrorError, RelayError};
pub use metadata::{publish_metadata, DoctorMetadata, PatientMetadata, ProfileMetadata};
pub use mirror::{HttpMirror, Mirror};
