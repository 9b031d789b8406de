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

/// Largest number of rows a single set of queries may open: every constraint row is opened
/// together with its successor.
const MAX_QUERY_ROWS: usize = 256;

// QUERIES
// ================================================================================================
/// Execution trace rows opened at a set of positions of the low-degree extension domain.
///
/// Each row comes with a Merkle proof against the trace commitment; the leaf of the proof is
/// the hash of the row.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Queries<E: StarkField, H: Hasher> {
    width: usize,
    values: Vec<E>,
    proofs: Vec<MerkleProof<H>>,
}

impl<E: StarkField, H: Hasher> Queries<E, H> {
    // CONSTRUCTOR
    // --------------------------------------------------------------------------------------------
    /// Returns queries constructed from opened rows and a Merkle proof for each row.
    ///
    /// # Panics
    /// Panics if:
    /// * No rows were provided or the rows are empty.
    /// * The rows are not all of the same length.
    /// * The number of proofs differs from the number of rows.
    pub fn new(rows: Vec<Vec<E>>, proofs: Vec<MerkleProof<H>>) -> Self {
        assert!(!rows.is_empty(), "query values cannot be empty");
        let width = rows[0].len();
        assert_ne!(width, 0, "a query must contain at least one evaluation");
        assert_eq!(rows.len(), proofs.len(), "every opened row must have a proof");

        let mut values = Vec::with_capacity(rows.len() * width);
        for row in rows.iter() {
            assert_eq!(row.len(), width, "all queries must contain the same number of evaluations");
            values.extend_from_slice(row);
        }

        Queries { width, values, proofs }
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the number of opened rows.
    pub fn num_rows(&self) -> usize {
        self.proofs.len()
    }

    /// Returns the number of values in every opened row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the opened row at the specified index.
    ///
    /// # Panics
    /// Panics if `index` is not smaller than the number of rows.
    pub fn row(&self, index: usize) -> &[E] {
        &self.values[index * self.width..(index + 1) * self.width]
    }

    /// Returns an iterator over the opened rows.
    pub fn rows(&self) -> impl Iterator<Item = &[E]> {
        self.values.chunks(self.width)
    }

    /// Returns Merkle proofs for the opened rows.
    pub fn proofs(&self) -> &[MerkleProof<H>] {
        &self.proofs
    }

    /// Returns a mutable reference to the opened values.
    #[cfg(test)]
    pub(crate) fn values_mut(&mut self) -> &mut Vec<E> {
        &mut self.values
    }
}

// SERIALIZATION
// ================================================================================================

impl<E: StarkField, H: Hasher> Serializable for Queries<E, H> {
    /// Serializes `self` and writes the resulting bytes into the `target`.
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        target.write_u8(self.width as u8);
        target.write_usize(self.num_rows());
        target.write_many(&self.values);
        target.write_many(&self.proofs);
    }
}

impl<E: StarkField, H: Hasher> Deserializable for Queries<E, H> {
    /// Reads queries from the specified `source` and returns the result.
    ///
    /// # Errors
    /// Returns an error if a valid set of queries could not be read from the `source`.
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let width = source.read_u8()? as usize;
        if width == 0 {
            return Err(DeserializationError::InvalidValue(
                "a query must contain at least one evaluation".into(),
            ));
        }

        let num_rows = source.read_bounded_usize(MAX_QUERY_ROWS)?;
        if num_rows == 0 {
            return Err(DeserializationError::InvalidValue("query values cannot be empty".into()));
        }

        let values = source.read_many(num_rows * width)?;
        let proofs = source.read_many(num_rows)?;
        Ok(Queries { width, values, proofs })
    }
}
