
use _fixtures::{flip_byte, numbered, pick, KeccakTree, SIXTEEN, WIDE, WIDE_EVEN};
use multimerkle::config::VerifierLimits;
use multimerkle::hash::Keccak256Hasher;
use multimerkle::merkle::{Digest, MerkleError, MultiProofVerifier, EMPTY_ROOT};
use multimerkle::{verify_with_flags, verify_with_ids};

struct Case {
    root: Digest,
    leaves: Vec<Digest>,
    proof: Vec<Digest>,
    flags: Vec<bool>,
    ids: Vec<u32>,
}

impl Case {
    fn new(tree: &KeccakTree, indices: &[usize]) -> Self {
        let leaves = pick(tree, indices);
        let proof = tree.multi_proof(&leaves).unwrap();
        let flags = tree.proof_flags(&leaves, &proof).unwrap();
        let ids = tree.proof_ids(&leaves, &proof).unwrap();
        Self {
            root: tree.root(),
            leaves,
            proof,
            flags,
            ids,
        }
    }

    fn by_flags(&self) -> bool {
        verify_with_flags(&self.root, &self.leaves, &self.proof, &self.flags)
    }

    fn by_ids(&self) -> bool {
        verify_with_ids(&self.root, &self.leaves, &self.proof, &self.ids)
    }

    /// Both encodings must reach the same verdict.
    fn verdict(&self) -> bool {
        let flags = self.by_flags();
        assert_eq!(flags, self.by_ids(), "encodings disagree");
        flags
    }
}

#[test]
fn baseline_verifies() {
    assert!(Case::new(&*SIXTEEN, &[0, 3, 9]).verdict());
}

#[test]
fn tampered_leaf_fails() {
    let mut case = Case::new(&*SIXTEEN, &[0, 3, 9]);
    case.leaves[1] = flip_byte(&case.leaves[1], 31);
    assert!(!case.verdict());
}

#[test]
fn substituted_leaf_fails() {
    let mut case = Case::new(&*SIXTEEN, &[0, 3, 9]);
    case.leaves[2] = SIXTEEN.leaves()[10];
    assert!(!case.verdict());
}

#[test]
fn tampered_proof_element_fails() {
    let case = Case::new(&*SIXTEEN, &[1, 6, 11]);
    for index in 0..case.proof.len() {
        let mut tampered = Case::new(&*SIXTEEN, &[1, 6, 11]);
        tampered.proof[index] = flip_byte(&case.proof[index], 0);
        assert!(!tampered.verdict(), "proof element {index}");
    }
}

#[test]
fn wrong_root_fails() {
    let mut case = Case::new(&*SIXTEEN, &[4, 5]);
    case.root = flip_byte(&case.root, 7);
    assert!(!case.verdict());
    case.root = EMPTY_ROOT;
    assert!(!case.verdict());
}

#[test]
fn proof_from_another_tree_fails() {
    let names = numbered(0, 10);
    let requested_a = WIDE.elements(&names).unwrap();
    let even: Vec<String> = (0..10).map(|value| (value * 2).to_string()).collect();
    let requested_b = WIDE_EVEN.elements(&even).unwrap();
    let proof_b = WIDE_EVEN.multi_proof(&requested_b).unwrap();
    let flags_b = WIDE_EVEN.proof_flags(&requested_b, &proof_b).unwrap();
    let ids_b = WIDE_EVEN.proof_ids(&requested_b, &proof_b).unwrap();

    assert!(!verify_with_flags(&WIDE.root(), &requested_a, &proof_b, &flags_b));
    assert!(!verify_with_ids(&WIDE.root(), &requested_a, &proof_b, &ids_b));
    assert!(!verify_with_flags(&WIDE.root(), &requested_b, &proof_b, &flags_b));
}

#[test]
fn truncated_or_extended_tapes_fail() {
    let base = Case::new(&*SIXTEEN, &[2, 9, 14]);

    let mut short = Case::new(&*SIXTEEN, &[2, 9, 14]);
    short.flags.pop();
    short.ids.truncate(short.ids.len() - 2);
    assert!(!short.verdict());

    let mut long = Case::new(&*SIXTEEN, &[2, 9, 14]);
    long.flags.push(true);
    long.ids.extend_from_slice(&[0, 1]);
    assert!(!long.verdict());

    let mut odd_ids = Case::new(&*SIXTEEN, &[2, 9, 14]);
    odd_ids.ids.pop();
    assert!(!odd_ids.by_ids());

    let mut missing_proof = Case::new(&*SIXTEEN, &[2, 9, 14]);
    missing_proof.proof.pop();
    assert!(!missing_proof.verdict());

    let mut extra_proof = Case::new(&*SIXTEEN, &[2, 9, 14]);
    extra_proof.proof.push(base.proof[0]);
    assert!(!extra_proof.verdict());
}

#[test]
fn inverted_flag_fails() {
    let base = Case::new(&*SIXTEEN, &[2, 9, 14]);
    for position in 0..base.flags.len() {
        let mut flipped = base.flags.clone();
        flipped[position] = !flipped[position];
        assert!(!verify_with_flags(&base.root, &base.leaves, &base.proof, &flipped));
    }
}

#[test]
fn reused_or_forward_ids_fail() {
    let base = Case::new(&*SIXTEEN, &[2, 9, 14]);
    let mut reused = base.ids.clone();
    reused[3] = reused[0];
    assert!(!verify_with_ids(&base.root, &base.leaves, &base.proof, &reused));

    let mut forward = base.ids.clone();
    forward[0] = (base.proof.len() + base.leaves.len() + base.ids.len()) as u32;
    assert!(!verify_with_ids(&base.root, &base.leaves, &base.proof, &forward));
}

#[test]
fn empty_inputs_never_verify() {
    let root = SIXTEEN.root();
    assert!(!verify_with_flags(&root, &[], &[], &[]));
    assert!(!verify_with_ids(&root, &[], &[], &[]));
    assert!(!verify_with_flags(&root, &[], &[root], &[false]));
}

#[test]
fn limits_turn_oversized_input_into_false() {
    let case = Case::new(&*SIXTEEN, &[0, 1, 2, 3, 4, 5, 6, 7]);
    let strict = MultiProofVerifier::<Keccak256Hasher>::new(VerifierLimits {
        max_leaves: 4,
        ..VerifierLimits::default()
    });
    assert!(!strict.verify_flags(&case.root, &case.leaves, &case.proof, &case.flags));
    assert!(!strict.verify_ids(&case.root, &case.leaves, &case.proof, &case.ids));

    let relaxed = MultiProofVerifier::<Keccak256Hasher>::new(VerifierLimits::UNBOUNDED);
    assert!(relaxed.verify_flags(&case.root, &case.leaves, &case.proof, &case.flags));
    assert!(relaxed.verify_ids(&case.root, &case.leaves, &case.proof, &case.ids));
}

#[test]
fn generator_errors() {
    let stranger = Digest::new([0xaa; 32]);
    assert_eq!(
        SIXTEEN.multi_proof(&[stranger]),
        Err(MerkleError::UnknownLeaf { digest: stranger })
    );
    assert_eq!(SIXTEEN.multi_proof(&[]), Err(MerkleError::EmptyInput));

    let requested = pick(&*SIXTEEN, &[3]);
    let other = SIXTEEN.multi_proof(&pick(&*SIXTEEN, &[4])).unwrap();
    assert_eq!(
        SIXTEEN.proof_flags(&requested, &other),
        Err(MerkleError::ProofMismatch)
    );

    let sentinel = KeccakTree::new(&[""]);
    assert_eq!(sentinel.root(), EMPTY_ROOT);
    assert!(matches!(
        sentinel.multi_proof(&[EMPTY_ROOT]),
        Err(MerkleError::UnknownLeaf { .. })
    ));
}
