// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use core::fmt;

// MERKLE TREE ERROR
// ================================================================================================

/// Defines errors which can occur when building Merkle trees or generating Merkle proofs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MerkleTreeError {
    /// The number of leaves is not a power of two.
    NumberOfLeavesNotPowerOfTwo(usize),
    /// A tree must contain at least one leaf.
    TooFewLeaves,
    /// A leaf index was greater than or equal to the number of leaves in the tree.
    LeafIndexOutOfBounds { index: usize, num_leaves: usize },
}

impl fmt::Display for MerkleTreeError {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NumberOfLeavesNotPowerOfTwo(num_leaves) => {
                write!(f, "number of leaves must be a power of two, but was {num_leaves}")
            }
            Self::TooFewLeaves => {
                write!(f, "a Merkle tree must contain at least one leaf")
            }
            Self::LeafIndexOutOfBounds { index, num_leaves } => {
                write!(f, "leaf index {index} cannot exceed {}, the number of leaves in the tree", num_leaves - 1)
            }
        }
    }
}

impl core::error::Error for MerkleTreeError {}

// TRANSCRIPT ERROR
// ================================================================================================

/// Defines errors which can occur when drawing values from a [Transcript](crate::Transcript).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptError {
    /// A valid field element could not be drawn after the specified number of attempts.
    FailedToDrawFieldElement(usize),
    /// Query positions can only be drawn from a domain whose size is a power of two.
    DomainSizeNotPowerOfTwo(usize),
}

impl fmt::Display for TranscriptError {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FailedToDrawFieldElement(num_tries) => {
                write!(f, "failed to generate a valid field element after {num_tries} tries")
            }
            Self::DomainSizeNotPowerOfTwo(size) => {
                write!(f, "query positions must be drawn from a power-of-two domain, but domain size was {size}")
            }
        }
    }
}

impl core::error::Error for TranscriptError {}
