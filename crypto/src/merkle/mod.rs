// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use alloc::vec::Vec;

use crate::{errors::MerkleTreeError, hash::Hasher};

mod proofs;
pub use proofs::MerkleProof;

#[cfg(feature = "concurrent")]
pub mod concurrent;


// MERKLE TREE
// ================================================================================================

/// A fully-balanced binary Merkle tree.
///
/// The tree is stored as a single vector of `2 * n` digests in heap order: the node at position
/// `i` is the parent of nodes `2 * i` and `2 * i + 1`, the root is at position 1, and the `n`
/// leaves occupy positions `n..2 * n`. Position 0 is unused.
///
/// Each internal node is computed as `H::merge([left, right])`. A tree with a single leaf has
/// depth 0 and its root is that leaf.
///
/// When the `concurrent` feature is enabled, levels with at least [MIN_CONCURRENT_LEAVES]
/// nodes are hashed in multiple threads.
#[derive(Debug)]
pub struct MerkleTree<H: Hasher> {
    nodes: Vec<H::Digest>,
}

// MERKLE TREE IMPLEMENTATION
// ================================================================================================

impl<H: Hasher> MerkleTree<H> {
    // CONSTRUCTOR
    // --------------------------------------------------------------------------------------------
    /// Returns a new Merkle tree instantiated from the provided leaves.
    ///
    /// # Errors
    /// Returns an error if:
    /// * `leaves` is empty.
    /// * The number of leaves is not a power of two.
    pub fn new(leaves: Vec<H::Digest>) -> Result<Self, MerkleTreeError> {
        if leaves.is_empty() {
            return Err(MerkleTreeError::TooFewLeaves);
        }
        if !leaves.len().is_power_of_two() {
            return Err(MerkleTreeError::NumberOfLeavesNotPowerOfTwo(leaves.len()));
        }

        let nodes = build_merkle_nodes::<H>(&leaves);
        Ok(MerkleTree { nodes })
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the root of the tree.
    pub fn root(&self) -> &H::Digest {
        &self.nodes[1]
    }

    /// Returns the depth of the tree; a tree with a single leaf has depth 0.
    pub fn depth(&self) -> usize {
        self.num_leaves().trailing_zeros() as usize
    }

    /// Returns the number of leaves in the tree.
    pub fn num_leaves(&self) -> usize {
        self.nodes.len() / 2
    }

    /// Returns the leaves of the tree in their natural order.
    pub fn leaves(&self) -> &[H::Digest] {
        &self.nodes[self.num_leaves()..]
    }

    /// Returns the leaf at the specified `index`.
    ///
    /// # Errors
    /// Returns an error if `index` is greater than or equal to the number of leaves.
    pub fn get_leaf(&self, index: usize) -> Result<&H::Digest, MerkleTreeError> {
        let num_leaves = self.num_leaves();
        if index >= num_leaves {
            return Err(MerkleTreeError::LeafIndexOutOfBounds { index, num_leaves });
        }
        Ok(&self.nodes[num_leaves + index])
    }

    // PROVING METHODS
    // --------------------------------------------------------------------------------------------

    /// Returns a Merkle proof for the leaf at the specified `index`.
    ///
    /// The authentication path lists one sibling per level, starting with the sibling of the
    /// leaf and ending with a child of the root.
    ///
    /// # Errors
    /// Returns an error if `index` is greater than or equal to the number of leaves.
    pub fn prove(&self, index: usize) -> Result<MerkleProof<H>, MerkleTreeError> {
        let leaf = *self.get_leaf(index)?;

        let mut path = Vec::with_capacity(self.depth());
        let mut position = index + self.num_leaves();
        while position > 1 {
            path.push(self.nodes[position ^ 1]);
            position >>= 1;
        }

        Ok(MerkleProof::new(index, leaf, path))
    }

    /// Returns Merkle proofs for all leaves at the specified `indexes`, in the same order.
    ///
    /// # Errors
    /// Returns an error if any of the indexes is out of bounds.
    pub fn prove_batch(&self, indexes: &[usize]) -> Result<Vec<MerkleProof<H>>, MerkleTreeError> {
        indexes.iter().map(|&index| self.prove(index)).collect()
    }

    // VERIFICATION METHODS
    // --------------------------------------------------------------------------------------------

    /// Checks whether `proof` authenticates its leaf against the specified `root`.
    ///
    /// Starting from the leaf, each level hashes the running digest with the next sibling of the
    /// path, placing the running digest on the left when the running index is even. Returns
    /// `false` if the leaf index does not fit into a tree of the depth implied by the path or if
    /// the recomputed root differs from `root`.
    pub fn verify(root: &H::Digest, proof: &MerkleProof<H>) -> bool {
        let depth = proof.path().len();
        if depth >= usize::BITS as usize || proof.index() >> depth != 0 {
            return false;
        }

        let mut index = proof.index();
        let mut value = *proof.leaf();
        for sibling in proof.path() {
            value = if index & 1 == 0 {
                H::merge(&[value, *sibling])
            } else {
                H::merge(&[*sibling, value])
            };
            index >>= 1;
        }

        value == *root
    }
}

// HELPER FUNCTIONS
// ================================================================================================

/// Returns all nodes of a Merkle tree with the specified leaves, in heap order.
///
/// The number of leaves is assumed to be a non-zero power of two.
pub fn build_merkle_nodes<H: Hasher>(leaves: &[H::Digest]) -> Vec<H::Digest> {
    let n = leaves.len();
    let mut nodes = vec![H::Digest::default(); 2 * n];
    nodes[n..].copy_from_slice(leaves);

    // each level occupies positions [level_start, 2 * level_start); its children occupy the
    // level right after it
    let mut level_start = n / 2;
    while level_start > 0 {
        let (parents, children) = nodes.split_at_mut(2 * level_start);
        let parents = &mut parents[level_start..];
        let children = &children[..2 * level_start];

        #[cfg(feature = "concurrent")]
        if level_start >= concurrent::MIN_CONCURRENT_LEAVES {
            concurrent::hash_level::<H>(parents, children);
            level_start /= 2;
            continue;
        }

        hash_level::<H>(parents, children);
        level_start /= 2;
    }

    nodes
}

/// Sets each of `parents` to the merge of the corresponding pair of `children`.
fn hash_level<H: Hasher>(parents: &mut [H::Digest], children: &[H::Digest]) {
    for (parent, pair) in parents.iter_mut().zip(children.chunks_exact(2)) {
        *parent = H::merge(&[pair[0], pair[1]]);
    }
}
