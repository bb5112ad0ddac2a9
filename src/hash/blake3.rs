//! BLAKE3 backend.

use super::config::HashFamily;
use crate::merkle::{Digest, MerkleHasher};

/// BLAKE3 with the default 32 byte output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3Hasher;

impl MerkleHasher for Blake3Hasher {
    fn hash(bytes: &[u8]) -> Digest {
        Digest::new(*::blake3::hash(bytes).as_bytes())
    }

    fn hash_pair(first: &Digest, second: &Digest) -> Digest {
        let mut hasher = ::blake3::Hasher::new();
        hasher.update(first.as_bytes());
        hasher.update(second.as_bytes());
        Digest::new(*hasher.finalize().as_bytes())
    }

    fn hash_family() -> HashFamily {
        HashFamily::Blake3
    }
}
