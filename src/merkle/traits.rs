use crate::hash::HashFamily;

use super::types::Digest;

/// Hash abstraction used by the tree, the proof generator and the verifiers.
///
/// Implementations only provide the raw primitive; the sorted-pair
/// combination rule lives in [`MerkleHasher::combine`] so that every backend
/// orders operands identically.
pub trait MerkleHasher: Send + Sync + 'static {
    /// Hashes an arbitrary byte string.
    fn hash(bytes: &[u8]) -> Digest;

    /// Hashes `first || second` in the given order.
    fn hash_pair(first: &Digest, second: &Digest) -> Digest {
        let mut joined = [0u8; 64];
        joined[..32].copy_from_slice(first.as_bytes());
        joined[32..].copy_from_slice(second.as_bytes());
        Self::hash(&joined)
    }

    /// Commutative node hash: `hash(min(a, b) || max(a, b))`.
    fn combine(a: &Digest, b: &Digest) -> Digest {
        if a <= b {
            Self::hash_pair(a, b)
        } else {
            Self::hash_pair(b, a)
        }
    }

    fn hash_family() -> HashFamily;
}
