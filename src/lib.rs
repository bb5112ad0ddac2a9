//! Core library entry point for `multimerkle`.
//!
//! Builds binary hash trees over sets of opaque values and produces compact
//! multi-membership proofs that cheap, stateless verifiers can replay. The
//! functions at the crate root use the Keccak-256 backend, matching
//! `keccak256` based on-chain verifiers; the [`merkle`] module exposes the
//! same operations generically over any [`MerkleHasher`].

pub mod config;
pub mod hash;
pub mod merkle;
pub mod ser;
pub mod utils;

use hash::Keccak256Hasher;
use merkle::{Digest, MerkleError, MerkleHasher, MerkleTree};

pub use merkle::{MultiProof, EMPTY_ROOT};

/// Builds a Keccak-256 tree from raw values.
pub fn build_tree<V>(values: &[V]) -> MerkleTree<Keccak256Hasher>
where
    V: AsRef<[u8]> + Sync,
{
    MerkleTree::new(values)
}

/// Minimal sibling set proving membership of `requested` in `tree`.
pub fn get_multi_proof<H: MerkleHasher>(
    tree: &MerkleTree<H>,
    requested: &[Digest],
) -> Result<Vec<Digest>, MerkleError> {
    tree.multi_proof(requested)
}

/// Flag tape for a proof previously returned by [`get_multi_proof`].
pub fn get_proof_flags<H: MerkleHasher>(
    tree: &MerkleTree<H>,
    requested: &[Digest],
    proof: &[Digest],
) -> Result<Vec<bool>, MerkleError> {
    tree.proof_flags(requested, proof)
}

/// Id tape for a proof previously returned by [`get_multi_proof`].
pub fn get_proof_ids<H: MerkleHasher>(
    tree: &MerkleTree<H>,
    requested: &[Digest],
    proof: &[Digest],
) -> Result<Vec<u32>, MerkleError> {
    tree.proof_ids(requested, proof)
}

pub fn get_root<H: MerkleHasher>(tree: &MerkleTree<H>) -> Digest {
    tree.root()
}

/// Keccak-256 flag replay. See [`merkle::verify_with_flags`].
pub fn verify_with_flags(root: &Digest, leaves: &[Digest], proof: &[Digest], flags: &[bool]) -> bool {
    merkle::verify_with_flags::<Keccak256Hasher>(root, leaves, proof, flags)
}

/// Keccak-256 id replay. See [`merkle::verify_with_ids`].
pub fn verify_with_ids(root: &Digest, leaves: &[Digest], proof: &[Digest], ids: &[u32]) -> bool {
    merkle::verify_with_ids::<Keccak256Hasher>(root, leaves, proof, ids)
}
