//! Integration tests for the MerkleWatch integrity engine

mod manifest_roundtrip;
mod scan_determinism;
mod verify_diff;
