//! Content and node hash computation using SHA-256
//!
//! Node hashes are domain-separated: a one-byte tag is prepended to the
//! hashed payload so a leaf hash, an internal hash, and a directory node
//! hash can never collide in meaning even if their raw bytes coincide.

use crate::error::ScanError;
use crate::types::Hash;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Domain tag for leaf (file) nodes.
pub const TAG_LEAF: u8 = 0x00;
/// Domain tag for internal Merkle nodes.
pub const TAG_INTERNAL: u8 = 0x01;
/// Domain tag for directory nodes wrapping a subtree root.
pub const TAG_DIRNODE: u8 = 0x02;

/// Read chunk size for file hashing (64 KiB).
const CHUNK_SIZE: usize = 64 * 1024;

/// Compute the SHA-256 content digest of a file.
///
/// Reads the file in bounded chunks, so memory use is independent of file
/// size. Fails with [`ScanError::Unreadable`] if the file cannot be opened
/// or a read fails partway; no partial digest is ever returned.
pub fn hash_file(path: &Path) -> Result<Hash, ScanError> {
    let mut file = File::open(path).map_err(|e| ScanError::Unreadable {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; CHUNK_SIZE];
    loop {
        let n = file.read(&mut buffer).map_err(|e| ScanError::Unreadable {
            path: path.to_path_buf(),
            source: e,
        })?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(hasher.finalize().into())
}

/// Compute the SHA-256 digest of a byte slice.
pub fn hash_bytes(data: &[u8]) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute the leaf hash for a file: `H(0x00 || content_digest)`.
pub fn leaf_hash(content_digest: &Hash) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update([TAG_LEAF]);
    hasher.update(content_digest);
    hasher.finalize().into()
}

/// Compute an internal Merkle node hash: `H(0x01 || left || right)`.
///
/// Order-sensitive: `left` and `right` must be passed as already ordered by
/// the reduction, not swapped or normalized.
pub fn internal_hash(left: &Hash, right: &Hash) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update([TAG_INTERNAL]);
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().into()
}

/// Compute a directory node hash wrapping a subtree root: `H(0x02 || root)`.
pub fn dir_node_hash(subtree_root: &Hash) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update([TAG_DIRNODE]);
    hasher.update(subtree_root);
    hasher.finalize().into()
}
