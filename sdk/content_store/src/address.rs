//! Parsed, verifiable content addresses.
//!
//! A [`ContentAddress`] is only constructed once the string has passed the
//! shared syntax rules in `common::content_ref`, decoded as a CID, and been
//! found to carry a sha2-256 multihash. Anything the client cannot verify is
//! rejected up front rather than fetched.

use std::fmt;
use std::str::FromStr;

use cid::multihash::Multihash;
use cid::Cid;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::error::AddressError;

/// Multihash code for sha2-256.
pub const SHA2_256: u64 = 0x12;
/// Multicodec for raw bytes.
pub const RAW: u64 = 0x55;
/// Multicodec for dag-pb (UnixFS) blocks. Every CIDv0 uses it.
pub const DAG_PB: u64 = 0x70;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContentAddress {
    text: String,
    codec: u64,
    digest: [u8; 32],
}

impl ContentAddress {
    pub fn parse(reference: &str) -> Result<Self, AddressError> {
        common::classify(reference.as_bytes()).map_err(AddressError::Syntax)?;

        let cid = Cid::try_from(reference).map_err(|e| AddressError::Decode(e.to_string()))?;
        let hash = cid.hash();
        if hash.code() != SHA2_256 {
            return Err(AddressError::UnsupportedHash(hash.code()));
        }
        let digest: [u8; 32] = hash
            .digest()
            .try_into()
            .map_err(|_| AddressError::Decode("sha2-256 digest is not 32 bytes".to_owned()))?;

        Ok(Self {
            text: reference.to_owned(),
            codec: cid.codec(),
            digest,
        })
    }

    /// CIDv1 (raw codec) of `bytes`.
    pub fn for_raw_bytes(bytes: &[u8]) -> Result<Self, AddressError> {
        let digest: [u8; 32] = Sha256::digest(bytes).into();
        let hash = Multihash::<64>::wrap(SHA2_256, &digest)
            .map_err(|e| AddressError::Decode(e.to_string()))?;
        Ok(Self {
            text: Cid::new_v1(RAW, hash).to_string(),
            codec: RAW,
            digest,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn codec(&self) -> u64 {
        self.codec
    }

    pub fn is_dag_pb(&self) -> bool {
        self.codec == DAG_PB
    }

    pub fn digest(&self) -> &[u8; 32] {
        &self.digest
    }

    /// True when `block` hashes to this address.
    pub fn verifies(&self, block: &[u8]) -> bool {
        Sha256::digest(block).as_slice() == self.digest.as_slice()
    }
}

impl fmt::Display for ContentAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for ContentAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ContentAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for ContentAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
