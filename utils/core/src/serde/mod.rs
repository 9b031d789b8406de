// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use alloc::vec::Vec;

use super::DeserializationError;

mod byte_reader;
pub use byte_reader::{ByteReader, SliceReader};

mod byte_writer;
pub use byte_writer::ByteWriter;

// SERIALIZABLE
// ================================================================================================

/// Values which can be written into a [ByteWriter].
pub trait Serializable: Sized {
    /// Writes `self` into the `target`.
    fn write_into<W: ByteWriter>(&self, target: &mut W);

    /// Returns `self` serialized into a vector of bytes.
    fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(self.get_size_hint());
        self.write_into(&mut result);
        result
    }

    /// Writes every element of `source` into the `target`, without a length prefix.
    fn write_batch_into<W: ByteWriter>(source: &[Self], target: &mut W) {
        source.iter().for_each(|item| item.write_into(target));
    }

    /// Returns the expected number of serialized bytes; zero when unknown.
    fn get_size_hint(&self) -> usize {
        0
    }
}

impl Serializable for u8 {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        target.write_u8(*self);
    }

    fn get_size_hint(&self) -> usize {
        1
    }
}

impl Serializable for u64 {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        target.write_u64(*self);
    }

    fn get_size_hint(&self) -> usize {
        8
    }
}

impl<const N: usize> Serializable for [u8; N] {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        target.write_bytes(self);
    }

    fn get_size_hint(&self) -> usize {
        N
    }
}

impl<T: Serializable> Serializable for Vec<T> {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        T::write_batch_into(self, target);
    }
}

impl<T: Serializable> Serializable for &[T] {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        T::write_batch_into(self, target);
    }
}

// DESERIALIZABLE
// ================================================================================================

/// Values which can be read from a [ByteReader].
pub trait Deserializable: Sized {
    /// Reads a value of `Self` from the `source`.
    ///
    /// # Errors
    /// Returns an error if the `source` ends before a complete value is read, or if the bytes
    /// read do not encode a valid value of `Self`.
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError>;

    /// Reads a value of `Self` from the start of `bytes`; bytes after the value are ignored.
    fn read_from_bytes(bytes: &[u8]) -> Result<Self, DeserializationError> {
        Self::read_from(&mut SliceReader::new(bytes))
    }

    /// Reads a value of `Self` which must span all of `bytes`.
    ///
    /// # Errors
    /// Returns [DeserializationError::UnconsumedBytes] if bytes remain after the value.
    fn read_from_exact_bytes(bytes: &[u8]) -> Result<Self, DeserializationError> {
        let mut source = SliceReader::new(bytes);
        let result = Self::read_from(&mut source)?;
        match source.has_more_bytes() {
            true => Err(DeserializationError::UnconsumedBytes),
            false => Ok(result),
        }
    }

    /// Reads `num_elements` consecutive values of `Self` from the `source`.
    fn read_batch_from<R: ByteReader>(
        source: &mut R,
        num_elements: usize,
    ) -> Result<Vec<Self>, DeserializationError> {
        (0..num_elements).map(|_| Self::read_from(source)).collect()
    }
}

impl Deserializable for u8 {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        source.read_u8()
    }
}

impl Deserializable for u64 {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        source.read_u64()
    }
}

impl<const N: usize> Deserializable for [u8; N] {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        source.read_array::<N>()
    }
}
