// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use alloc::vec::Vec;

use super::{Deserializable, DeserializationError};

// BYTE READER TRAIT
// ================================================================================================

/// Sequential reader of proof bytes.
///
/// Every `read_*` method advances the reader past the bytes it consumed. A failed read may leave
/// the reader partially advanced.
pub trait ByteReader {
    // REQUIRED METHODS
    // --------------------------------------------------------------------------------------------

    /// Reads a single byte.
    ///
    /// # Errors
    /// Returns [DeserializationError::UnexpectedEOF] if no bytes are left.
    fn read_u8(&mut self) -> Result<u8, DeserializationError>;

    /// Reads the next `len` bytes.
    ///
    /// # Errors
    /// Returns [DeserializationError::UnexpectedEOF] if fewer than `len` bytes are left.
    fn read_slice(&mut self, len: usize) -> Result<&[u8], DeserializationError>;

    /// Returns the number of bytes which have not been read yet.
    fn remaining_len(&self) -> usize;

    // PROVIDED METHODS
    // --------------------------------------------------------------------------------------------

    /// Returns true if some bytes have not been read yet.
    fn has_more_bytes(&self) -> bool {
        self.remaining_len() != 0
    }

    /// Reads the next `N` bytes into an array.
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DeserializationError> {
        let mut result = [0u8; N];
        result.copy_from_slice(self.read_slice(N)?);
        Ok(result)
    }

    /// Reads a little-endian u64 value.
    fn read_u64(&mut self) -> Result<u64, DeserializationError> {
        self.read_array().map(u64::from_le_bytes)
    }

    /// Reads a usize value encoded in [vint64](https://docs.rs/vint64/latest/vint64/) format.
    ///
    /// # Errors
    /// Returns an error if the encoding is truncated or the value does not fit into `usize` on
    /// this platform.
    fn read_usize(&mut self) -> Result<usize, DeserializationError> {
        let prefix = self.read_u8()?;
        let value = match prefix.trailing_zeros() as usize {
            8 => self.read_u64()?,
            num_tail_bytes => {
                let mut encoded = [0u8; 8];
                encoded[0] = prefix;
                encoded[1..=num_tail_bytes].copy_from_slice(self.read_slice(num_tail_bytes)?);
                u64::from_le_bytes(encoded) >> (num_tail_bytes + 1)
            },
        };

        usize::try_from(value).map_err(|_| {
            DeserializationError::InvalidValue(format!("{value} does not fit into usize"))
        })
    }

    /// Reads a vint64-encoded length and rejects it if it exceeds `max`.
    ///
    /// Every length prefix in a proof is read this way, so a hostile encoding cannot request an
    /// unbounded allocation.
    fn read_bounded_usize(&mut self, max: usize) -> Result<usize, DeserializationError> {
        match self.read_usize()? {
            value if value > max => Err(DeserializationError::InvalidValue(format!(
                "length {value} exceeds the maximum of {max}"
            ))),
            value => Ok(value),
        }
    }

    /// Reads a single deserializable value.
    fn read<D>(&mut self) -> Result<D, DeserializationError>
    where
        Self: Sized,
        D: Deserializable,
    {
        D::read_from(self)
    }

    /// Reads `num_elements` consecutive deserializable values.
    fn read_many<D>(&mut self, num_elements: usize) -> Result<Vec<D>, DeserializationError>
    where
        Self: Sized,
        D: Deserializable,
    {
        D::read_batch_from(self, num_elements)
    }
}

// SLICE READER
// ================================================================================================

/// Reads proof bytes from an in-memory slice.
///
/// Reading past the end of the slice fails with [DeserializationError::UnexpectedEOF]; it never
/// panics.
pub struct SliceReader<'a> {
    remaining: &'a [u8],
}

impl<'a> SliceReader<'a> {
    pub fn new(source: &'a [u8]) -> Self {
        SliceReader { remaining: source }
    }
}

impl ByteReader for SliceReader<'_> {
    fn read_u8(&mut self) -> Result<u8, DeserializationError> {
        let (&byte, rest) =
            self.remaining.split_first().ok_or(DeserializationError::UnexpectedEOF)?;
        self.remaining = rest;
        Ok(byte)
    }

    fn read_slice(&mut self, len: usize) -> Result<&[u8], DeserializationError> {
        if len > self.remaining.len() {
            return Err(DeserializationError::UnexpectedEOF);
        }
        let (head, rest) = self.remaining.split_at(len);
        self.remaining = rest;
        Ok(head)
    }

    fn remaining_len(&self) -> usize {
        self.remaining.len()
    }
}
