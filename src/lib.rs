//! MerkleWatch: Deterministic Directory Integrity Verification
//!
//! Computes a tamper-evident Merkle fingerprint of a directory tree, persists
//! it as a manifest, and later re-derives it to detect exactly what changed.

pub mod cli;
pub mod config;
pub mod error;
pub mod ignore;
pub mod logging;
pub mod manifest;
pub mod tree;
pub mod types;
pub mod verify;
