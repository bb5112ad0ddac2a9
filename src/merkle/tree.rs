use std::collections::HashMap;
use std::marker::PhantomData;

use tracing::debug;

use crate::config::{EmptyTreePolicy, TreeConfig};
use crate::hash::Keccak256Hasher;
use crate::utils::parallel::map_pairs;

use super::canonical::{canonicalize, hash_leaf, sort_and_dedup};
use super::proof::{MultiProof, ProofBuilder};
use super::traits::MerkleHasher;
use super::types::{Digest, MerkleError, EMPTY_ROOT};

/// Binary Merkle tree over a canonical leaf set.
///
/// Layer 0 holds the sorted, deduplicated leaves; every following layer
/// combines adjacent pairs with [`MerkleHasher::combine`] and promotes an odd
/// trailing node unchanged. The tree is immutable once built.
#[derive(Clone, Debug)]
pub struct MerkleTree<H: MerkleHasher = Keccak256Hasher> {
    layers: Vec<Vec<Digest>>,
    positions: HashMap<Digest, usize>,
    leaf_count: usize,
    marker: PhantomData<H>,
}

impl<H: MerkleHasher> MerkleTree<H> {
    /// Builds a tree from raw values under the default configuration.
    ///
    /// Empty values are ignored. Without any remaining value the tree is the
    /// sentinel tree rooted at [`EMPTY_ROOT`].
    pub fn new<V>(values: &[V]) -> Self
    where
        V: AsRef<[u8]> + Sync,
    {
        Self::from_canonical(canonicalize::<H, V>(values))
    }

    /// Builds a tree from raw values, honouring the empty-tree policy.
    pub fn with_config<V>(values: &[V], config: TreeConfig) -> Result<Self, MerkleError>
    where
        V: AsRef<[u8]> + Sync,
    {
        let leaves = canonicalize::<H, V>(values);
        if leaves.is_empty() && config.empty_tree == EmptyTreePolicy::Reject {
            return Err(MerkleError::EmptyInput);
        }
        Ok(Self::from_canonical(leaves))
    }

    /// Builds a tree from digests that are already leaf hashes.
    pub fn from_leaves(leaves: Vec<Digest>) -> Self {
        Self::from_canonical(sort_and_dedup(leaves))
    }

    fn from_canonical(leaves: Vec<Digest>) -> Self {
        let leaf_count = leaves.len();
        if leaf_count == 0 {
            debug!("building sentinel tree for empty value set");
            return Self {
                layers: vec![vec![EMPTY_ROOT]],
                positions: HashMap::new(),
                leaf_count: 0,
                marker: PhantomData,
            };
        }

        let positions = leaves
            .iter()
            .enumerate()
            .map(|(index, leaf)| (*leaf, index))
            .collect();
        let layers = build_layers::<H>(leaves);
        debug!(leaf_count, depth = layers.len() - 1, "merkle tree built");
        Self {
            layers,
            positions,
            leaf_count,
            marker: PhantomData,
        }
    }

    pub fn root(&self) -> Digest {
        self.layers
            .last()
            .and_then(|layer| layer.first())
            .copied()
            .unwrap_or(EMPTY_ROOT)
    }

    pub fn hex_root(&self) -> String {
        self.root().to_hex()
    }

    /// All layers, leaves first and root last.
    pub fn layers(&self) -> &[Vec<Digest>] {
        &self.layers
    }

    /// Canonical leaf sequence; empty for the sentinel tree.
    pub fn leaves(&self) -> &[Digest] {
        match self.layers.first() {
            Some(layer) if self.leaf_count > 0 => layer,
            _ => &[],
        }
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Number of combine levels between the leaves and the root.
    pub fn depth(&self) -> usize {
        self.layers.len() - 1
    }

    pub fn contains(&self, leaf: &Digest) -> bool {
        self.positions.contains_key(leaf)
    }

    /// Position of `leaf` in layer 0.
    pub fn index_of(&self, leaf: &Digest) -> Option<usize> {
        self.positions.get(leaf).copied()
    }

    pub(crate) fn position(&self, leaf: &Digest) -> Result<usize, MerkleError> {
        self.index_of(leaf)
            .ok_or(MerkleError::UnknownLeaf { digest: *leaf })
    }

    /// Hashes raw values and checks that each is a leaf, keeping input order.
    pub fn elements<V: AsRef<[u8]>>(&self, values: &[V]) -> Result<Vec<Digest>, MerkleError> {
        values
            .iter()
            .map(|value| {
                let leaf = hash_leaf::<H>(value.as_ref());
                self.position(&leaf).map(|_| leaf)
            })
            .collect()
    }

    /// Expands a request with the layer-0 sibling of every requested leaf.
    ///
    /// The result is deduplicated and sorted, ready to be used as a request.
    pub fn pairs(&self, leaves: &[Digest]) -> Result<Vec<Digest>, MerkleError> {
        let layer = self.leaves();
        let mut expanded = Vec::with_capacity(leaves.len() * 2);
        for leaf in leaves {
            let index = self.position(leaf)?;
            expanded.push(*leaf);
            if let Some(sibling) = layer.get(index ^ 1) {
                expanded.push(*sibling);
            }
        }
        Ok(sort_and_dedup(expanded))
    }

    /// Authentication path for a single leaf, bottom-up.
    ///
    /// Levels where the node is promoted contribute nothing.
    pub fn proof(&self, leaf: &Digest) -> Result<Vec<Digest>, MerkleError> {
        let mut index = self.position(leaf)?;
        let mut path = Vec::with_capacity(self.depth());
        for layer in &self.layers[..self.depth()] {
            if let Some(sibling) = layer.get(index ^ 1) {
                path.push(*sibling);
            }
            index /= 2;
        }
        Ok(path)
    }

    /// Returns a proof builder borrowing this tree.
    pub fn prover(&self) -> ProofBuilder<'_, H> {
        ProofBuilder::new(self)
    }

    /// Minimal sibling set proving membership of every requested leaf.
    pub fn multi_proof(&self, requested: &[Digest]) -> Result<Vec<Digest>, MerkleError> {
        Ok(self.prover().traverse(requested)?.into_proof())
    }

    /// Proof, flags (when representable) and ids for `requested`, bundled.
    pub fn multi_proof_bundle(&self, requested: &[Digest]) -> Result<MultiProof, MerkleError> {
        self.prover().bundle(requested)
    }

    pub fn proof_flags(
        &self,
        requested: &[Digest],
        proof: &[Digest],
    ) -> Result<Vec<bool>, MerkleError> {
        self.prover().flags(requested, proof)
    }

    pub fn proof_ids(&self, requested: &[Digest], proof: &[Digest]) -> Result<Vec<u32>, MerkleError> {
        self.prover().ids(requested, proof)
    }
}

fn build_layers<H: MerkleHasher>(leaves: Vec<Digest>) -> Vec<Vec<Digest>> {
    let mut layers = vec![leaves];
    while let Some(current) = layers.last().filter(|layer| layer.len() > 1) {
        let next = map_pairs(current, |chunk| {
            chunk
                .iter()
                .copied()
                .reduce(|left, right| H::combine(&left, &right))
                .unwrap_or_default()
        });
        layers.push(next);
    }
    layers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::Blake3Hasher;

    fn numbered(count: usize) -> Vec<String> {
        (1..=count).map(|value| value.to_string()).collect()
    }

    #[test]
    fn layer_sizes_halve_and_promote_odd_tail() {
        let tree = MerkleTree::<Keccak256Hasher>::new(&numbered(5));
        let sizes: Vec<usize> = tree.layers().iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![5, 3, 2, 1]);
        assert_eq!(tree.layers()[1][2], tree.leaves()[4]);
        assert_eq!(tree.depth(), 3);
    }

    #[test]
    fn root_of_two_leaves_is_their_combination() {
        let tree = MerkleTree::<Keccak256Hasher>::new(&["a", "b"]);
        let a = hash_leaf::<Keccak256Hasher>(b"a");
        let b = hash_leaf::<Keccak256Hasher>(b"b");
        assert_eq!(tree.root(), Keccak256Hasher::combine(&a, &b));
    }

    #[test]
    fn single_value_tree_roots_at_its_leaf() {
        let tree = MerkleTree::<Keccak256Hasher>::new(&["only"]);
        assert_eq!(tree.root(), hash_leaf::<Keccak256Hasher>(b"only"));
        assert_eq!(tree.depth(), 0);
        assert!(tree.proof(&tree.root()).unwrap().is_empty());
    }

    #[test]
    fn empty_input_follows_policy() {
        let values: [&str; 2] = ["", ""];
        let tree = MerkleTree::<Keccak256Hasher>::new(&values);
        assert_eq!(tree.root(), EMPTY_ROOT);
        assert_eq!(tree.leaf_count(), 0);
        assert!(tree.leaves().is_empty());
        assert!(!tree.contains(&EMPTY_ROOT));

        let strict = MerkleTree::<Keccak256Hasher>::with_config(&values, TreeConfig::strict());
        assert_eq!(strict.err(), Some(MerkleError::EmptyInput));
    }

    #[test]
    fn from_leaves_matches_new() {
        let values = numbered(9);
        let hashed: Vec<Digest> = values
            .iter()
            .rev()
            .map(|value| hash_leaf::<Blake3Hasher>(value.as_bytes()))
            .collect();
        let direct = MerkleTree::<Blake3Hasher>::new(&values);
        let prehashed = MerkleTree::<Blake3Hasher>::from_leaves(hashed);
        assert_eq!(direct.root(), prehashed.root());
    }

    #[test]
    fn elements_and_pairs() {
        let tree = MerkleTree::<Keccak256Hasher>::new(&numbered(7));
        let requested = tree.elements(&["3", "1"]).unwrap();
        assert_eq!(requested[0], hash_leaf::<Keccak256Hasher>(b"3"));

        let missing = tree.elements(&["42"]);
        assert!(matches!(missing, Err(MerkleError::UnknownLeaf { .. })));

        let last = *tree.leaves().last().unwrap();
        let paired = tree.pairs(&[last]).unwrap();
        assert_eq!(paired, vec![last]);

        let first = tree.leaves()[0];
        let paired = tree.pairs(&[first, first]).unwrap();
        assert_eq!(paired, vec![tree.leaves()[0], tree.leaves()[1]]);
    }

    #[test]
    fn single_leaf_paths_skip_promotions() {
        let tree = MerkleTree::<Keccak256Hasher>::new(&numbered(5));
        let last = tree.leaves()[4];
        assert_eq!(tree.proof(&last).unwrap().len(), 1);
        let first = tree.leaves()[0];
        assert_eq!(tree.proof(&first).unwrap().len(), 3);
    }
}
