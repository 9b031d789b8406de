// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use alloc::vec::Vec;

use crypto::{Hasher, MerkleProof};
use math::StarkField;
use utils::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable};

// CONSTANTS
// ================================================================================================

/// Maximum number of layer commitments accepted during deserialization.
const MAX_LAYERS: usize = 64;

/// Maximum number of final polynomial coefficients accepted during deserialization.
const MAX_FINAL_POLY_LENGTH: usize = 1 << 20;

/// Maximum number of queries accepted during deserialization.
const MAX_QUERIES: usize = 1 << 16;

// FRI PROOF
// ================================================================================================

/// A proof generated by a FRI prover.
///
/// A FRI proof contains:
/// * The Merkle root of every committed layer, in folding order.
/// * The coefficients of the final polynomial, lowest degree first.
/// * One [FriQuery] for every (query position, layer) pair, grouped by query position and
///   ordered by layer within each group.
///
/// Folding challenges are not part of the proof; the verifier re-derives them from the layer
/// commitments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriProof<E: StarkField, H: Hasher> {
    layer_commitments: Vec<H::Digest>,
    final_poly: Vec<E>,
    queries: Vec<FriQuery<E, H>>,
}

impl<E: StarkField, H: Hasher> FriProof<E, H> {
    // CONSTRUCTOR
    // --------------------------------------------------------------------------------------------
    /// Creates a new FRI proof from the provided layer commitments, final polynomial, and
    /// queries.
    pub fn new(
        layer_commitments: Vec<H::Digest>,
        final_poly: Vec<E>,
        queries: Vec<FriQuery<E, H>>,
    ) -> Self {
        FriProof { layer_commitments, final_poly, queries }
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the number of layers in this FRI proof.
    pub fn num_layers(&self) -> usize {
        self.layer_commitments.len()
    }

    /// Returns the Merkle roots of all committed layers.
    pub fn layer_commitments(&self) -> &[H::Digest] {
        &self.layer_commitments
    }

    /// Returns the coefficients of the final polynomial.
    pub fn final_poly(&self) -> &[E] {
        &self.final_poly
    }

    /// Returns all queries of this proof.
    pub fn queries(&self) -> &[FriQuery<E, H>] {
        &self.queries
    }

    /// Consumes this proof and returns its layer commitments, final polynomial, and queries.
    #[allow(clippy::type_complexity)]
    pub fn into_parts(self) -> (Vec<H::Digest>, Vec<E>, Vec<FriQuery<E, H>>) {
        (self.layer_commitments, self.final_poly, self.queries)
    }

    /// Returns a mutable reference to the layer commitments.
    #[cfg(test)]
    pub(crate) fn layer_commitments_mut(&mut self) -> &mut Vec<H::Digest> {
        &mut self.layer_commitments
    }

    /// Returns a mutable reference to the queries.
    #[cfg(test)]
    pub(crate) fn queries_mut(&mut self) -> &mut Vec<FriQuery<E, H>> {
        &mut self.queries
    }

    /// Returns a mutable reference to the final polynomial.
    #[cfg(test)]
    pub(crate) fn final_poly_mut(&mut self) -> &mut Vec<E> {
        &mut self.final_poly
    }
}

impl<E: StarkField, H: Hasher> Serializable for FriProof<E, H> {
    /// Serializes `self` and writes the resulting bytes into the `target` writer.
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        target.write_usize(self.layer_commitments.len());
        target.write_many(&self.layer_commitments);

        target.write_usize(self.final_poly.len());
        target.write_many(&self.final_poly);

        target.write_usize(self.queries.len());
        target.write_many(&self.queries);
    }
}

impl<E: StarkField, H: Hasher> Deserializable for FriProof<E, H> {
    /// Reads a FRI proof from the specified `source` and returns the result.
    ///
    /// # Errors
    /// Returns an error if a valid proof could not be read from the source.
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let num_layers = source.read_bounded_usize(MAX_LAYERS)?;
        let layer_commitments = source.read_many(num_layers)?;

        let final_poly_len = source.read_bounded_usize(MAX_FINAL_POLY_LENGTH)?;
        let final_poly = source.read_many(final_poly_len)?;

        let num_queries = source.read_bounded_usize(MAX_QUERIES)?;
        let queries = source.read_many(num_queries)?;

        Ok(FriProof { layer_commitments, final_poly, queries })
    }
}

// FRI QUERY
// ================================================================================================

/// Values opened at a single position of a single FRI layer.
///
/// `value` is the layer evaluation at `position` and `sibling_value` the evaluation at the
/// position holding the negated domain element. Both are accompanied by Merkle proofs against
/// the layer commitment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriQuery<E: StarkField, H: Hasher> {
    pub layer: usize,
    pub position: usize,
    pub value: E,
    pub sibling_value: E,
    pub proof: MerkleProof<H>,
    pub sibling_proof: MerkleProof<H>,
}

impl<E: StarkField, H: Hasher> Serializable for FriQuery<E, H> {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        target.write_usize(self.layer);
        target.write_usize(self.position);
        target.write(self.value);
        target.write(self.sibling_value);
        self.proof.write_into(target);
        self.sibling_proof.write_into(target);
    }
}

impl<E: StarkField, H: Hasher> Deserializable for FriQuery<E, H> {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let layer = source.read_bounded_usize(MAX_LAYERS)?;
        let position = source.read_usize()?;
        let value = source.read()?;
        let sibling_value = source.read()?;
        let proof = source.read()?;
        let sibling_proof = source.read()?;
        Ok(FriQuery {
            layer,
            position,
            value,
            sibling_value,
            proof,
            sibling_proof,
        })
    }
}
