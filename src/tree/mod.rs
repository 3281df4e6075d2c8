//! Directory Merkle-hashing engine
//!
//! Turns a directory tree into a single deterministic root hash: file bytes
//! become content digests, digests become domain-tagged node hashes, and each
//! directory's sorted child hashes reduce pairwise to a per-directory root.

pub mod hasher;
pub mod merkle;
pub mod path;
pub mod scanner;
