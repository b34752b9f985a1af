//! Content address syntax.
//!
//! Two address shapes are accepted:
//!
//! | Form  | Prefix | Alphabet                  | Length   |
//! |-------|--------|---------------------------|----------|
//! | CIDv0 | `Qm`   | base58btc                 | 46       |
//! | CIDv1 | `b`    | RFC 4648 base32 lowercase | 59 – 100 |
//!
//! Only syntax is checked here. Whether the address decodes to a digest the
//! client can verify is decided off-chain.

/// Length of a base58btc CIDv0 (`Qm` + 44 characters).
pub const CIDV0_LEN: usize = 46;

/// Shortest base32 CIDv1 carrying a 32-byte digest.
pub const CIDV1_MIN_LEN: usize = 59;

/// Upper bound on any stored content reference.
pub const MAX_CONTENT_REF_LEN: usize = 100;

const BASE58_ALPHABET: &[u8] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ContentRefKind {
    /// Base58btc, implicit dag-pb codec and sha2-256 multihash.
    V0,
    /// Multibase base32 (`b` prefix), explicit codec.
    V1,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ContentRefError {
    Empty,
    TooLong,
    UnknownPrefix,
    BadLength,
    /// Offending byte offset.
    BadCharacter(usize),
}

fn is_base58(byte: u8) -> bool {
    BASE58_ALPHABET.contains(&byte)
}

fn is_base32_lower(byte: u8) -> bool {
    matches!(byte, b'a'..=b'z' | b'2'..=b'7')
}

/// Classifies `bytes` as a CIDv0 or CIDv1 string, or reports why it is neither.
pub fn classify(bytes: &[u8]) -> Result<ContentRefKind, ContentRefError> {
    if bytes.is_empty() {
        return Err(ContentRefError::Empty);
    }
    if bytes.len() > MAX_CONTENT_REF_LEN {
        return Err(ContentRefError::TooLong);
    }

    if bytes.starts_with(b"Qm") {
        if bytes.len() != CIDV0_LEN {
            return Err(ContentRefError::BadLength);
        }
        if let Some(pos) = bytes.iter().position(|b| !is_base58(*b)) {
            return Err(ContentRefError::BadCharacter(pos));
        }
        return Ok(ContentRefKind::V0);
    }

    if bytes[0] == b'b' {
        if bytes.len() < CIDV1_MIN_LEN {
            return Err(ContentRefError::BadLength);
        }
        if let Some(pos) = bytes[1..].iter().position(|b| !is_base32_lower(*b)) {
            return Err(ContentRefError::BadCharacter(pos + 1));
        }
        return Ok(ContentRefKind::V1);
    }

    Err(ContentRefError::UnknownPrefix)
}

/// Returns `true` when `bytes` is a syntactically valid content address.
pub fn is_valid_content_ref(bytes: &[u8]) -> bool {
    classify(bytes).is_ok()
}
