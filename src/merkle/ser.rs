//! Canonical byte layout for [`MultiProof`] bundles.
//!
//! ```text
//! version: u16 | hash_family: u8 | root: [u8; 32]
//! leaves:  u32 count | [u8; 32] * count
//! proof:   u32 count | [u8; 32] * count
//! flags:   u8 (0 = absent, 1 = present) [ | u32 count | u8 * count ]
//! ids:     u32 count | u32 * count
//! ```
//!
//! All integers are little-endian.

use crate::hash::HashFamily;
use crate::ser::{
    read_option, read_vec, write_option, write_vec, ByteReader, ByteWriter, SerError, SerKind,
    SerResult,
};

use super::proof::MultiProof;
use super::traits::MerkleHasher;
use super::types::{Digest, MerkleError, DIGEST_SIZE};

/// Current bundle layout version.
pub const MULTI_PROOF_VERSION: u16 = 1;

fn write_digest(out: &mut ByteWriter, digest: &Digest) -> SerResult<()> {
    out.put_bytes(digest.as_bytes());
    Ok(())
}

fn read_digest(cursor: &mut ByteReader<'_>, kind: SerKind, field: &'static str) -> SerResult<Digest> {
    cursor.read_array::<DIGEST_SIZE>(kind, field).map(Digest::new)
}

/// Serialises a bundle produced for hash backend `H`.
pub fn encode_multi_proof<H: MerkleHasher>(bundle: &MultiProof) -> Result<Vec<u8>, MerkleError> {
    let estimate = 3
        + DIGEST_SIZE
        + 4
        + bundle.leaves.len() * DIGEST_SIZE
        + 4
        + bundle.proof.len() * DIGEST_SIZE
        + 5
        + bundle.flags.as_ref().map_or(0, Vec::len)
        + 4
        + bundle.ids.len() * 4;
    let mut out = ByteWriter::with_capacity(estimate);

    out.put_u16(MULTI_PROOF_VERSION);
    out.put_u8(H::hash_family().tag());
    write_digest(&mut out, &bundle.root)?;
    write_vec(&mut out, &bundle.leaves, SerKind::Leaves, "leaves", write_digest)?;
    write_vec(&mut out, &bundle.proof, SerKind::Proof, "proof", write_digest)?;
    write_option(&mut out, &bundle.flags, |out, flags| {
        write_vec(out, flags, SerKind::Flags, "flags", |out, flag| {
            out.put_bool(*flag);
            Ok(())
        })
    })?;
    write_vec(&mut out, &bundle.ids, SerKind::Ids, "ids", |out, id| {
        out.put_u32(*id);
        Ok(())
    })?;
    Ok(out.into_bytes())
}

/// Parses a bundle, requiring it to have been produced for backend `H`.
pub fn decode_multi_proof<H: MerkleHasher>(bytes: &[u8]) -> Result<MultiProof, MerkleError> {
    let mut cursor = ByteReader::new(bytes);

    let version = cursor.read_u16(SerKind::Header, "version")?;
    if version != MULTI_PROOF_VERSION {
        return Err(SerError::invalid_value(SerKind::Header, "version").into());
    }
    let tag = cursor.read_u8(SerKind::Header, "hash_family")?;
    match HashFamily::from_tag(tag) {
        Some(family) if family == H::hash_family() => {}
        _ => return Err(SerError::invalid_value(SerKind::Header, "hash_family").into()),
    }

    let root = read_digest(&mut cursor, SerKind::Root, "root")?;
    let leaves = read_vec(&mut cursor, DIGEST_SIZE, SerKind::Leaves, "leaves", |cursor| {
        read_digest(cursor, SerKind::Leaves, "leaf")
    })?;
    let proof = read_vec(&mut cursor, DIGEST_SIZE, SerKind::Proof, "proof", |cursor| {
        read_digest(cursor, SerKind::Proof, "sibling")
    })?;
    let flags = read_option(&mut cursor, SerKind::Flags, "flags", |cursor| {
        read_vec(cursor, 1, SerKind::Flags, "flags", |cursor| {
            cursor.read_bool(SerKind::Flags, "flag")
        })
    })?;
    let ids = read_vec(&mut cursor, 4, SerKind::Ids, "ids", |cursor| {
        cursor.read_u32(SerKind::Ids, "id")
    })?;
    cursor.finish(SerKind::Ids)?;

    Ok(MultiProof {
        root,
        leaves,
        proof,
        flags,
        ids,
    })
}
