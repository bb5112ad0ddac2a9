//! Sorted-pair Merkle trees and multi-membership proofs.
//!
//! The module fixes the following protocol rules:
//!
//! * **Leaves:** every non-empty value is hashed once. Leaf digests are
//!   deduplicated and sorted ascending (unsigned lexicographic) before the
//!   tree is built, so the structure depends only on the value set.
//! * **Nodes:** `combine(a, b) = H(min(a, b) || max(a, b))`. A verifier never
//!   needs to know whether a sibling sat on the left or the right.
//! * **Odd layers:** the trailing node of an odd-length layer is promoted to
//!   the next layer unchanged. There is no duplication or padding.
//! * **Empty sets:** the sentinel tree has root [`EMPTY_ROOT`], the all-zero
//!   digest, unless [`EmptyTreePolicy::Reject`](crate::config::EmptyTreePolicy)
//!   is configured.
//!
//! A multiproof is the set of siblings that cannot be derived from the
//! requested leaves, in layer-major, left-to-right order. Two replay tapes
//! describe how a verifier recombines leaves and proof:
//!
//! * **Flags** drive a FIFO of known values: `true` combines the two oldest
//!   known values, `false` the oldest known value with the next proof digest.
//! * **Ids** name both operands of every step explicitly as positions in
//!   `[proof..., leaves..., computed...]`.
//!
//! Flags are compact but cannot express every request on trees whose leaf
//! count is not a power of two; ids always can.

mod canonical;
mod proof;
mod ser;
pub mod traits;
mod tree;
mod types;
mod verify;

pub use canonical::{canonicalize, hash_leaf};
pub use proof::{MultiProof, ProofBuilder, Traversal};
pub use ser::{decode_multi_proof, encode_multi_proof, MULTI_PROOF_VERSION};
pub use traits::MerkleHasher;
pub use tree::MerkleTree;
pub use types::{to_hex_vec, Digest, MerkleError, DIGEST_SIZE, EMPTY_ROOT};
pub use verify::{verify_proof, verify_with_flags, verify_with_ids, MultiProofVerifier};
