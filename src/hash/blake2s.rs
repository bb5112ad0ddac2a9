//! Blake2s-256 backend built on the `blake2` crate.

use blake2::{Blake2s256, Digest as _};

use super::config::HashFamily;
use crate::merkle::{Digest, MerkleHasher};

/// Blake2s with a 32 byte output and no key.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake2sHasher;

impl MerkleHasher for Blake2sHasher {
    fn hash(bytes: &[u8]) -> Digest {
        digest_from_output(&Blake2s256::digest(bytes))
    }

    fn hash_pair(first: &Digest, second: &Digest) -> Digest {
        let mut hasher = Blake2s256::new();
        hasher.update(first.as_bytes());
        hasher.update(second.as_bytes());
        digest_from_output(&hasher.finalize())
    }

    fn hash_family() -> HashFamily {
        HashFamily::Blake2s
    }
}

fn digest_from_output(output: &[u8]) -> Digest {
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(output);
    Digest::new(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_matches_reference() {
        assert_eq!(
            Blake2sHasher::hash(b"").to_hex(),
            "0x69217a3079908094e11121d042354a7c1f55b6482ca1a51e1b250dfd1ed0eef9"
        );
    }

    #[test]
    fn streaming_pair_matches_one_shot() {
        let a = Blake2sHasher::hash(b"left");
        let b = Blake2sHasher::hash(b"right");
        let mut joined = Vec::with_capacity(64);
        joined.extend_from_slice(a.as_bytes());
        joined.extend_from_slice(b.as_bytes());
        assert_eq!(Blake2sHasher::hash_pair(&a, &b), Blake2sHasher::hash(&joined));
    }
}
