use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::traits::MerkleHasher;
use super::tree::MerkleTree;
use super::types::{Digest, MerkleError};
use super::verify::{verify_with_flags, verify_with_ids};

/// Origin of one combine operand, as seen by a verifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Source {
    Proof(usize),
    Leaf(usize),
    Computed(usize),
}

/// One combine operation of the replay. The proof operand, if any, is
/// always stored second.
#[derive(Clone, Copy, Debug)]
struct Step {
    first: (Source, Digest),
    second: (Source, Digest),
}

impl Step {
    fn is_known_pair(&self) -> bool {
        !matches!(self.second.0, Source::Proof(_))
    }
}

/// Combination order recorded while walking a tree for one request.
#[derive(Clone, Debug)]
pub struct Traversal {
    leaves: Vec<Digest>,
    proof: Vec<Digest>,
    steps: Vec<Step>,
}

impl Traversal {
    /// Sorted, deduplicated requested leaves.
    pub fn leaves(&self) -> &[Digest] {
        &self.leaves
    }

    pub fn proof(&self) -> &[Digest] {
        &self.proof
    }

    pub fn into_proof(self) -> Vec<Digest> {
        self.proof
    }

    /// Number of combine operations needed to reach the root.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Flag tape, or [`MerkleError::UnrepresentableFlags`] when a FIFO replay
    /// would pop operands in a different order than the traversal.
    pub fn flags(&self) -> Result<Vec<bool>, MerkleError> {
        let mut queue: VecDeque<Source> = (0..self.leaves.len()).map(Source::Leaf).collect();
        for (position, step) in self.steps.iter().enumerate() {
            let consistent = if step.is_known_pair() {
                match (queue.pop_front(), queue.pop_front()) {
                    (Some(a), Some(b)) => {
                        (a == step.first.0 && b == step.second.0)
                            || (a == step.second.0 && b == step.first.0)
                    }
                    _ => false,
                }
            } else {
                queue.pop_front() == Some(step.first.0)
            };
            if !consistent {
                debug!(step = position, "flag tape cannot express combination order");
                return Err(MerkleError::UnrepresentableFlags);
            }
            queue.push_back(Source::Computed(position));
        }
        if queue.len() != 1 {
            debug!(remaining = queue.len(), "flag replay leaves extra values");
            return Err(MerkleError::UnrepresentableFlags);
        }
        Ok(self.steps.iter().map(Step::is_known_pair).collect())
    }

    /// Id tape over `[proof..., leaves..., computed...]`, lower operand first.
    pub fn ids(&self) -> Vec<u32> {
        let leaf_offset = self.proof.len();
        let computed_offset = leaf_offset + self.leaves.len();
        let id = |source: Source| -> u32 {
            let absolute = match source {
                Source::Proof(index) => index,
                Source::Leaf(index) => leaf_offset + index,
                Source::Computed(index) => computed_offset + index,
            };
            absolute as u32
        };

        let mut ids = Vec::with_capacity(self.steps.len() * 2);
        for step in &self.steps {
            let (lo, hi) = if step.first.1 <= step.second.1 {
                (step.first.0, step.second.0)
            } else {
                (step.second.0, step.first.0)
            };
            ids.push(id(lo));
            ids.push(id(hi));
        }
        ids
    }
}

/// Walks a tree to derive multiproofs and their replay tapes.
pub struct ProofBuilder<'a, H: MerkleHasher> {
    tree: &'a MerkleTree<H>,
}

impl<'a, H: MerkleHasher> ProofBuilder<'a, H> {
    pub fn new(tree: &'a MerkleTree<H>) -> Self {
        Self { tree }
    }

    /// Maps requested digests to sorted, distinct layer-0 positions.
    fn positions(&self, requested: &[Digest]) -> Result<Vec<usize>, MerkleError> {
        if requested.is_empty() {
            return Err(MerkleError::EmptyInput);
        }
        let mut positions = requested
            .iter()
            .map(|leaf| self.tree.position(leaf))
            .collect::<Result<Vec<_>, _>>()?;
        positions.sort_unstable();
        positions.dedup();
        Ok(positions)
    }

    /// Layer-major walk from the requested leaves up to the root.
    pub fn traverse(&self, requested: &[Digest]) -> Result<Traversal, MerkleError> {
        let positions = self.positions(requested)?;
        let layers = self.tree.layers();
        let leaves: Vec<Digest> = positions.iter().map(|&index| layers[0][index]).collect();

        let mut current: Vec<(usize, Source)> = positions
            .iter()
            .enumerate()
            .map(|(slot, &index)| (index, Source::Leaf(slot)))
            .collect();
        let mut proof = Vec::new();
        let mut steps = Vec::new();

        for (depth, layer) in layers[..self.tree.depth()].iter().enumerate() {
            let mut next = Vec::with_capacity(current.len());
            let mut cursor = 0;
            while cursor < current.len() {
                let (index, source) = current[cursor];
                let sibling = index ^ 1;
                if sibling >= layer.len() {
                    next.push((index / 2, source));
                    cursor += 1;
                    continue;
                }
                let operand = match current.get(cursor + 1) {
                    Some(&(neighbour, other)) if neighbour == sibling => {
                        cursor += 2;
                        other
                    }
                    _ => {
                        proof.push(layer[sibling]);
                        cursor += 1;
                        Source::Proof(proof.len() - 1)
                    }
                };
                steps.push(Step {
                    first: (source, layer[index]),
                    second: (operand, layer[sibling]),
                });
                next.push((index / 2, Source::Computed(steps.len() - 1)));
            }
            trace!(depth, carried = next.len(), "traversal layer done");
            current = next;
        }

        debug!(
            requested = leaves.len(),
            proof_len = proof.len(),
            steps = steps.len(),
            "multiproof generated"
        );
        Ok(Traversal {
            leaves,
            proof,
            steps,
        })
    }

    /// Traverses and checks that `proof` is the one this request produces.
    fn traverse_matching(
        &self,
        requested: &[Digest],
        proof: &[Digest],
    ) -> Result<Traversal, MerkleError> {
        let traversal = self.traverse(requested)?;
        if traversal.proof != proof {
            return Err(MerkleError::ProofMismatch);
        }
        Ok(traversal)
    }

    pub fn multi_proof(&self, requested: &[Digest]) -> Result<Vec<Digest>, MerkleError> {
        Ok(self.traverse(requested)?.into_proof())
    }

    pub fn flags(&self, requested: &[Digest], proof: &[Digest]) -> Result<Vec<bool>, MerkleError> {
        self.traverse_matching(requested, proof)?.flags()
    }

    pub fn ids(&self, requested: &[Digest], proof: &[Digest]) -> Result<Vec<u32>, MerkleError> {
        Ok(self.traverse_matching(requested, proof)?.ids())
    }

    pub fn bundle(&self, requested: &[Digest]) -> Result<MultiProof, MerkleError> {
        let traversal = self.traverse(requested)?;
        let flags = match traversal.flags() {
            Ok(flags) => Some(flags),
            Err(MerkleError::UnrepresentableFlags) => None,
            Err(err) => return Err(err),
        };
        let ids = traversal.ids();
        Ok(MultiProof {
            root: self.tree.root(),
            leaves: traversal.leaves,
            proof: traversal.proof,
            flags,
            ids,
        })
    }
}

/// Everything a verifier needs to check one multiproof.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiProof {
    pub root: Digest,
    pub leaves: Vec<Digest>,
    pub proof: Vec<Digest>,
    /// Absent when the request cannot be replayed as a flag tape.
    pub flags: Option<Vec<bool>>,
    pub ids: Vec<u32>,
}

impl MultiProof {
    /// Checks the ids tape and, when present, the flags tape.
    pub fn verify<H: MerkleHasher>(&self) -> bool {
        let by_ids = verify_with_ids::<H>(&self.root, &self.leaves, &self.proof, &self.ids);
        match &self.flags {
            Some(flags) => {
                by_ids && verify_with_flags::<H>(&self.root, &self.leaves, &self.proof, flags)
            }
            None => by_ids,
        }
    }
}
