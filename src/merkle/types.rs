use crate::ser::SerError;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Width in bytes of every digest stored in a tree.
pub const DIGEST_SIZE: usize = 32;

/// Fixed-width hash output, the atomic unit stored in a tree.
///
/// Ordering is unsigned lexicographic over the raw bytes, which is the order
/// used both for canonical leaf sorting and for the operands of
/// [`MerkleHasher::combine`](super::MerkleHasher::combine).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Digest([u8; DIGEST_SIZE]);

/// Root reported for a tree built from zero values.
pub const EMPTY_ROOT: Digest = Digest::ZERO;

impl Digest {
    /// The all-zero digest.
    pub const ZERO: Digest = Digest([0u8; DIGEST_SIZE]);

    /// Wraps raw digest bytes.
    pub const fn new(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self(bytes)
    }

    /// Builds a digest from a slice, returning `None` unless it is exactly
    /// [`DIGEST_SIZE`] bytes long.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let array: [u8; DIGEST_SIZE] = bytes.try_into().ok()?;
        Some(Self(array))
    }

    /// Returns a reference to the underlying bytes.
    pub const fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.0
    }

    /// Consumes the digest and returns the bytes.
    pub const fn into_bytes(self) -> [u8; DIGEST_SIZE] {
        self.0
    }

    /// Mutable view into the digest bytes.
    pub fn as_bytes_mut(&mut self) -> &mut [u8; DIGEST_SIZE] {
        &mut self.0
    }

    /// Renders the digest as `0x`-prefixed lowercase hex.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Parses a 64 character hex string, with or without a `0x` prefix.
    pub fn from_hex(input: &str) -> Result<Self, MerkleError> {
        let trimmed = input
            .strip_prefix("0x")
            .or_else(|| input.strip_prefix("0X"))
            .unwrap_or(input);
        let mut bytes = [0u8; DIGEST_SIZE];
        hex::decode_to_slice(trimmed, &mut bytes).map_err(|_| MerkleError::InvalidHex)?;
        Ok(Self(bytes))
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; DIGEST_SIZE]> for Digest {
    fn from(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self(bytes)
    }
}

impl From<Digest> for [u8; DIGEST_SIZE] {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

/// Renders a digest sequence the way external verifiers usually accept it.
pub fn to_hex_vec(digests: &[Digest]) -> Vec<String> {
    digests.iter().map(Digest::to_hex).collect()
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            serializer.serialize_bytes(&self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DigestVisitor;

        impl<'de> Visitor<'de> for DigestVisitor {
            type Value = Digest;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a {DIGEST_SIZE}-byte digest as hex string or bytes")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Digest, E> {
                Digest::from_hex(value).map_err(E::custom)
            }

            fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Digest, E> {
                Digest::from_slice(value).ok_or_else(|| E::invalid_length(value.len(), &self))
            }

            fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Digest, A::Error> {
                let mut bytes = [0u8; DIGEST_SIZE];
                for (position, slot) in bytes.iter_mut().enumerate() {
                    *slot = seq
                        .next_element()?
                        .ok_or_else(|| de::Error::invalid_length(position, &self))?;
                }
                if seq.next_element::<u8>()?.is_some() {
                    return Err(de::Error::invalid_length(DIGEST_SIZE + 1, &self));
                }
                Ok(Digest(bytes))
            }
        }

        if deserializer.is_human_readable() {
            deserializer.deserialize_str(DigestVisitor)
        } else {
            deserializer.deserialize_bytes(DigestVisitor)
        }
    }
}

/// Errors emitted while building trees or generating proofs.
///
/// Verification never produces these: malformed proofs resolve to `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MerkleError {
    /// No values were supplied where a non-degenerate tree or request is required.
    EmptyInput,
    /// A requested digest is not a leaf of the tree.
    UnknownLeaf { digest: Digest },
    /// The supplied proof is not the one generated for the requested leaves.
    ProofMismatch,
    /// The request cannot be replayed by the flag verifier's FIFO order.
    UnrepresentableFlags,
    /// A digest could not be parsed from hex.
    InvalidHex,
    /// Canonical byte encoding or decoding failed.
    Serialization(SerError),
}

impl fmt::Display for MerkleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MerkleError::EmptyInput => write!(f, "no values supplied"),
            MerkleError::UnknownLeaf { digest } => {
                write!(f, "element {} does not exist in merkle tree", digest)
            }
            MerkleError::ProofMismatch => {
                write!(f, "proof does not belong to the requested leaves")
            }
            MerkleError::UnrepresentableFlags => {
                write!(f, "request cannot be encoded as proof flags")
            }
            MerkleError::InvalidHex => write!(f, "invalid hex digest"),
            MerkleError::Serialization(err) => write!(f, "serialisation error: {}", err),
        }
    }
}

impl std::error::Error for MerkleError {}

impl From<SerError> for MerkleError {
    fn from(err: SerError) -> Self {
        MerkleError::Serialization(err)
    }
}
