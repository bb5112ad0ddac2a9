//! Keccak-256 backend, byte compatible with Solidity's `keccak256` so roots
//! and proofs can be checked by EVM contracts.

use sha3::{Digest as _, Keccak256};

use super::config::HashFamily;
use crate::merkle::{Digest, MerkleHasher};

/// Keccak-256 (pre-standard SHA-3 padding).
#[derive(Debug, Clone, Copy, Default)]
pub struct Keccak256Hasher;

impl MerkleHasher for Keccak256Hasher {
    fn hash(bytes: &[u8]) -> Digest {
        digest_from_output(&Keccak256::digest(bytes))
    }

    fn hash_pair(first: &Digest, second: &Digest) -> Digest {
        let mut hasher = Keccak256::new();
        hasher.update(first.as_bytes());
        hasher.update(second.as_bytes());
        digest_from_output(&hasher.finalize())
    }

    fn hash_family() -> HashFamily {
        HashFamily::Keccak256
    }
}

fn digest_from_output(output: &[u8]) -> Digest {
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(output);
    Digest::new(bytes)
}
