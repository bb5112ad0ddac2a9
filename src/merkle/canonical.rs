//! Canonical leaf form: hashed, deduplicated, sorted ascending.
//!
//! Two trees built from the same logical set always share a structure
//! because the leaf order depends only on digest values, never on the order
//! in which values were supplied.

use super::traits::MerkleHasher;
use super::types::Digest;
use crate::utils::parallel::map_items;

/// Hashes one application value into its leaf digest.
pub fn hash_leaf<H: MerkleHasher>(value: &[u8]) -> Digest {
    H::hash(value)
}

/// Hashes every non-empty value and returns the canonical leaf sequence.
pub fn canonicalize<H, V>(values: &[V]) -> Vec<Digest>
where
    H: MerkleHasher,
    V: AsRef<[u8]> + Sync,
{
    let present: Vec<&[u8]> = values
        .iter()
        .map(AsRef::as_ref)
        .filter(|value| !value.is_empty())
        .collect();
    let hashed = map_items(&present, |value| hash_leaf::<H>(value));
    sort_and_dedup(hashed)
}

/// Puts already-hashed leaves into canonical order.
pub fn sort_and_dedup(mut leaves: Vec<Digest>) -> Vec<Digest> {
    leaves.sort_unstable();
    leaves.dedup();
    leaves
}
