//! Hash backends for the tree.
//!
//! The tree is generic over [`MerkleHasher`](crate::merkle::MerkleHasher);
//! this module provides the concrete primitives:
//!
//! * [`keccak`] – Keccak-256, the default, byte compatible with on-chain
//!   `keccak256` verifiers.
//! * [`blake3`] – BLAKE3 for off-chain consumers that want speed.
//! * [`blake2s`] – Blake2s-256.
//!
//! Swapping the backend changes every digest but not the algorithm.
//! [`HashFamily`] names the backend on the wire.

pub mod blake2s;
pub mod blake3;
pub mod config;
pub mod keccak;

pub use self::blake3::Blake3Hasher;
pub use blake2s::Blake2sHasher;
pub use config::HashFamily;
pub use keccak::Keccak256Hasher;
