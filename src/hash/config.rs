//! Hash family identifiers shared by tree builders, verifiers and the wire
//! codec. The tag byte is part of the encoded proof bundle, so values must
//! never be reused.

use serde::{Deserialize, Serialize};

/// Hash primitive backing a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashFamily {
    /// Legacy Keccak-256 as used by the EVM (`keccak256`).
    Keccak256,
    /// BLAKE3 with the default 32 byte output.
    Blake3,
    /// Blake2s with a 32 byte output.
    Blake2s,
}

impl HashFamily {
    /// Every supported family in tag order.
    pub const ALL: [HashFamily; 3] = [HashFamily::Keccak256, HashFamily::Blake3, HashFamily::Blake2s];

    /// Stable one byte tag used in encoded bundles.
    pub const fn tag(self) -> u8 {
        match self {
            HashFamily::Keccak256 => 1,
            HashFamily::Blake3 => 2,
            HashFamily::Blake2s => 3,
        }
    }

    /// Inverse of [`HashFamily::tag`].
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(HashFamily::Keccak256),
            2 => Some(HashFamily::Blake3),
            3 => Some(HashFamily::Blake2s),
            _ => None,
        }
    }

    /// Human readable identifier.
    pub const fn name(self) -> &'static str {
        match self {
            HashFamily::Keccak256 => "keccak256",
            HashFamily::Blake3 => "blake3",
            HashFamily::Blake2s => "blake2s256",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_roundtrip_and_are_unique() {
        for family in HashFamily::ALL {
            assert_eq!(HashFamily::from_tag(family.tag()), Some(family));
        }
        assert_eq!(HashFamily::from_tag(0), None);
        assert_eq!(HashFamily::from_tag(4), None);
    }
}
