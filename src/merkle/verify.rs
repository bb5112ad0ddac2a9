//! Stateless multiproof verification.
//!
//! Every function here is total: malformed, truncated or adversarial input
//! yields `false`. Nothing depends on the tree that produced the proof.

use std::collections::VecDeque;
use std::marker::PhantomData;

use tracing::trace;

use crate::config::VerifierLimits;

use super::canonical::sort_and_dedup;
use super::traits::MerkleHasher;
use super::types::Digest;

/// Replays a flag tape against `root`.
///
/// The known FIFO is seeded with the sorted, deduplicated `leaves`. A `true`
/// flag combines the two oldest known values, a `false` flag combines the
/// oldest known value with the next proof element.
pub fn verify_with_flags<H: MerkleHasher>(
    root: &Digest,
    leaves: &[Digest],
    proof: &[Digest],
    flags: &[bool],
) -> bool {
    let mut known: VecDeque<Digest> = sort_and_dedup(leaves.to_vec()).into();
    let mut proof_iter = proof.iter();

    for (position, &both_known) in flags.iter().enumerate() {
        let Some(first) = known.pop_front() else {
            trace!(step = position, "flag replay ran out of known values");
            return false;
        };
        let second = if both_known {
            known.pop_front()
        } else {
            proof_iter.next().copied()
        };
        let Some(second) = second else {
            trace!(step = position, both_known, "flag replay ran out of operands");
            return false;
        };
        known.push_back(H::combine(&first, &second));
    }

    if proof_iter.next().is_some() || known.len() != 1 {
        return false;
    }
    known.front() == Some(root)
}

/// Replays an id tape against `root`.
///
/// Ids address `[proof..., leaves..., computed...]` where `leaves` is the
/// sorted, deduplicated leaf set and `computed[i]` the result of pair `i`.
/// Every proof and leaf entry must be consumed exactly once, and the last
/// computed value must be the only one left over.
pub fn verify_with_ids<H: MerkleHasher>(
    root: &Digest,
    leaves: &[Digest],
    proof: &[Digest],
    ids: &[u32],
) -> bool {
    if ids.len() % 2 != 0 {
        return false;
    }
    let leaves = sort_and_dedup(leaves.to_vec());
    let step_count = ids.len() / 2;
    if step_count == 0 {
        return proof.is_empty() && leaves.len() == 1 && leaves[0] == *root;
    }

    let inputs = proof.len() + leaves.len();
    let mut values: Vec<Digest> = Vec::with_capacity(inputs + step_count);
    values.extend_from_slice(proof);
    values.extend_from_slice(&leaves);
    let mut consumed = vec![false; inputs + step_count];

    for (position, pair) in ids.chunks_exact(2).enumerate() {
        let (a, b) = (pair[0] as usize, pair[1] as usize);
        let available = values.len();
        if a == b || a >= available || b >= available || consumed[a] || consumed[b] {
            trace!(step = position, a, b, "id replay references unavailable value");
            return false;
        }
        consumed[a] = true;
        consumed[b] = true;
        let combined = H::combine(&values[a], &values[b]);
        values.push(combined);
    }

    let last = values.len() - 1;
    let leftovers = consumed.iter().filter(|used| !**used).count();
    leftovers == 1 && !consumed[last] && values[last] == *root
}

/// Folds a single-leaf authentication path into a root and compares.
pub fn verify_proof<H: MerkleHasher>(root: &Digest, leaf: &Digest, proof: &[Digest]) -> bool {
    let computed = proof
        .iter()
        .fold(*leaf, |node, sibling| H::combine(&node, sibling));
    computed == *root
}

/// Verifier bound to a hash backend and a set of [`VerifierLimits`].
#[derive(Debug, Clone, Copy)]
pub struct MultiProofVerifier<H: MerkleHasher> {
    limits: VerifierLimits,
    marker: PhantomData<H>,
}

impl<H: MerkleHasher> Default for MultiProofVerifier<H> {
    fn default() -> Self {
        Self::new(VerifierLimits::default())
    }
}

impl<H: MerkleHasher> MultiProofVerifier<H> {
    pub fn new(limits: VerifierLimits) -> Self {
        Self {
            limits,
            marker: PhantomData,
        }
    }

    pub fn limits(&self) -> &VerifierLimits {
        &self.limits
    }

    pub fn verify_flags(
        &self,
        root: &Digest,
        leaves: &[Digest],
        proof: &[Digest],
        flags: &[bool],
    ) -> bool {
        if !self.limits.admits(leaves.len(), proof.len(), flags.len()) {
            trace!("flag proof exceeds verifier limits");
            return false;
        }
        verify_with_flags::<H>(root, leaves, proof, flags)
    }

    pub fn verify_ids(&self, root: &Digest, leaves: &[Digest], proof: &[Digest], ids: &[u32]) -> bool {
        if !self.limits.admits(leaves.len(), proof.len(), ids.len() / 2) {
            trace!("id proof exceeds verifier limits");
            return false;
        }
        verify_with_ids::<H>(root, leaves, proof, ids)
    }
}
