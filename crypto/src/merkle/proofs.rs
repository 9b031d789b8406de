// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use alloc::vec::Vec;

use utils::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable};

use crate::Hasher;

// CONSTANTS
// ================================================================================================

/// Maximum length of an authentication path accepted during deserialization.
const MAX_PATH_LENGTH: usize = 64;

// MERKLE PROOF
// ================================================================================================

/// An authentication path for a single leaf of a [MerkleTree](super::MerkleTree).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleProof<H: Hasher> {
    index: usize,
    leaf: H::Digest,
    path: Vec<H::Digest>,
}

impl<H: Hasher> MerkleProof<H> {
    /// Returns a new proof for the leaf at `index` with the specified authentication path.
    pub fn new(index: usize, leaf: H::Digest, path: Vec<H::Digest>) -> Self {
        MerkleProof { index, leaf, path }
    }

    /// Returns the index of the authenticated leaf.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the authenticated leaf.
    pub fn leaf(&self) -> &H::Digest {
        &self.leaf
    }

    /// Returns sibling digests ordered from the leaf level up to the level below the root.
    pub fn path(&self) -> &[H::Digest] {
        &self.path
    }

    /// Returns the depth of the tree this proof was generated for.
    pub fn depth(&self) -> usize {
        self.path.len()
    }
}

// SERIALIZATION / DESERIALIZATION
// ------------------------------------------------------------------------------------------------

impl<H: Hasher> Serializable for MerkleProof<H> {
    /// Serializes `self` and writes the resulting bytes into the `target`.
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        target.write_usize(self.index);
        self.leaf.write_into(target);
        target.write_usize(self.path.len());
        target.write_many(&self.path);
    }
}

impl<H: Hasher> Deserializable for MerkleProof<H> {
    /// Reads a Merkle proof from the specified `source`.
    ///
    /// # Errors
    /// Returns an error if a valid proof could not be read from the source, or if the path is
    /// longer than any tree this crate can build.
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let index = source.read_usize()?;
        let leaf = source.read()?;
        let path_len = source.read_bounded_usize(MAX_PATH_LENGTH)?;
        let path = source.read_many(path_len)?;
        Ok(MerkleProof { index, leaf, path })
    }
}
