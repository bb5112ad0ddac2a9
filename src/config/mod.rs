//! Construction and verification knobs.
//!
//! Trees have a single policy decision, what to do with an empty value set.
//! Verifiers run on untrusted input, so [`VerifierLimits`] caps how much work
//! a single call may perform before it answers `false`.

use serde::{Deserialize, Serialize};

/// Behaviour of the tree builder when no non-empty values remain after
/// canonicalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmptyTreePolicy {
    /// Build the degenerate single-layer tree rooted at
    /// [`EMPTY_ROOT`](crate::merkle::EMPTY_ROOT).
    #[default]
    Sentinel,
    /// Fail with [`MerkleError::EmptyInput`](crate::merkle::MerkleError::EmptyInput).
    Reject,
}

/// Tree construction configuration.
///
/// | Field | Default |
/// |-------|---------|
/// | `empty_tree` | [`EmptyTreePolicy::Sentinel`] |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeConfig {
    pub empty_tree: EmptyTreePolicy,
}

impl TreeConfig {
    /// Configuration that refuses to build degenerate trees.
    pub const fn strict() -> Self {
        Self {
            empty_tree: EmptyTreePolicy::Reject,
        }
    }

    pub const fn with_empty_tree(mut self, policy: EmptyTreePolicy) -> Self {
        self.empty_tree = policy;
        self
    }
}

/// Upper bounds enforced by [`MultiProofVerifier`](crate::merkle::MultiProofVerifier).
///
/// | Field | Default |
/// |-------|---------|
/// | `max_leaves` | `1 << 20` |
/// | `max_proof_len` | `1 << 20` |
/// | `max_steps` | `1 << 21` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifierLimits {
    /// Maximum number of leaves handed to the verifier (before deduplication).
    pub max_leaves: usize,
    /// Maximum number of proof digests.
    pub max_proof_len: usize,
    /// Maximum number of combine steps (flags, or id pairs).
    pub max_steps: usize,
}

impl VerifierLimits {
    /// No bounds beyond available memory.
    pub const UNBOUNDED: VerifierLimits = VerifierLimits {
        max_leaves: usize::MAX,
        max_proof_len: usize::MAX,
        max_steps: usize::MAX,
    };

    /// Returns `true` when the input sizes are within every bound.
    pub fn admits(&self, leaves: usize, proof: usize, steps: usize) -> bool {
        leaves <= self.max_leaves && proof <= self.max_proof_len && steps <= self.max_steps
    }
}

impl Default for VerifierLimits {
    fn default() -> Self {
        Self {
            max_leaves: 1 << 20,
            max_proof_len: 1 << 20,
            max_steps: 1 << 21,
        }
    }
}
