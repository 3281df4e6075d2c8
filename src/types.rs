//! Core types shared across the crate.

use crate::error::ManifestError;

/// A 256-bit hash value (SHA-256 output).
pub type Hash = [u8; 32];

/// Encode a hash as lowercase hexadecimal, the form used in manifests
/// and CLI output.
pub fn to_hex(hash: &Hash) -> String {
    hex::encode(hash)
}

/// Parse a 64-character lowercase hex string into a [`Hash`].
///
/// Rejects wrong lengths, uppercase, and non-hex characters; manifest
/// hash fields are canonical lowercase and anything else is malformed.
pub fn parse_hex(s: &str) -> Result<Hash, ManifestError> {
    if s.len() != 64 || !s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
        return Err(ManifestError::InvalidHash(s.to_string()));
    }
    let bytes = hex::decode(s).map_err(|_| ManifestError::InvalidHash(s.to_string()))?;
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&bytes);
    Ok(hash)
}
