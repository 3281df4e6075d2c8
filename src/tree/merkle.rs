//! Pairwise Merkle reduction with odd-node duplication
//!
//! Reduces an ordered level of node hashes to a single root. An odd-length
//! level duplicates its last element before pairing; duplication is NOT the
//! same as carrying the unpaired node forward unhashed, and the convention is
//! kept here as a named primitive so it can be tested in isolation.

use crate::tree::hasher::{self, TAG_INTERNAL};
use crate::types::Hash;
use sha2::{Digest, Sha256};

/// The canonical root of an empty directory: `H(0x01 || "")`, the internal
/// node hash applied to a zero-length payload.
pub fn empty_root() -> Hash {
    let mut h = Sha256::new();
    h.update([TAG_INTERNAL]);
    h.finalize().into()
}

/// Reduce an ordered list of node hashes to one root hash.
///
/// Ordering is the caller's responsibility; the scanner supplies child
/// hashes in byte-wise lexicographic name order. A single-element list is
/// already reduced and returns that element unchanged.
pub fn merkle_root(hashes: &[Hash]) -> Hash {
    if hashes.is_empty() {
        return empty_root();
    }

    let mut level = hashes.to_vec();
    while level.len() > 1 {
        if level.len() % 2 != 0 {
            let last = *level.last().expect("level is non-empty");
            level.push(last);
        }
        level = level
            .chunks(2)
            .map(|pair| hasher::internal_hash(&pair[0], &pair[1]))
            .collect();
    }
    level[0]
}
