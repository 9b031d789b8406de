// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use core::fmt::{Debug, Display, Formatter};

use math::{FieldElement, StarkField};
use utils::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable};

mod blake;
pub use blake::Blake3_256;

mod sha;
pub use sha::Sha3_256;

// HASHER TRAITS
// ================================================================================================

/// Defines a cryptographic hash function.
///
/// Implementors provide byte hashing; merging two digests and deriving a digest from a seed and
/// a counter are both defined in terms of it.
pub trait Hasher {
    /// Specifies a digest type returned by this hasher.
    type Digest: Digest;

    /// Returns a hash of the provided sequence of bytes.
    fn hash(bytes: &[u8]) -> Self::Digest;

    /// Returns hash(`values[0]` || `values[1]`); used to build Merkle trees.
    fn merge(values: &[Self::Digest; 2]) -> Self::Digest {
        let mut data = [0u8; 64];
        data[..32].copy_from_slice(&values[0].as_bytes());
        data[32..].copy_from_slice(&values[1].as_bytes());
        Self::hash(&data)
    }

    /// Returns hash(`seed` || `value`), with `value` in little-endian byte order; used to draw
    /// challenges from a transcript.
    fn merge_with_int(seed: Self::Digest, value: u64) -> Self::Digest {
        let mut data = [0u8; 40];
        data[..32].copy_from_slice(&seed.as_bytes());
        data[32..].copy_from_slice(&value.to_le_bytes());
        Self::hash(&data)
    }
}

/// Defines a cryptographic hash function for hashing field elements.
///
/// Elements are hashed in their canonical serialized form, so two slices hash to the same digest
/// only if they contain the same elements in the same order.
pub trait ElementHasher: Hasher {
    /// Specifies a base field for elements which can be hashed with this hasher.
    type BaseField: StarkField;

    /// Returns a hash of the provided field elements.
    fn hash_elements<E: FieldElement>(elements: &[E]) -> Self::Digest;
}

// DIGEST TRAIT
// ================================================================================================

/// Defines output type for a cryptographic hash function.
pub trait Digest:
    Debug + Default + Copy + Clone + Eq + PartialEq + Send + Sync + Serializable + Deserializable
{
    /// Returns this digest serialized into an array of bytes.
    ///
    /// Digests shorter than 32 bytes are padded with zeros on the right.
    fn as_bytes(&self) -> [u8; 32];
}

// BYTE DIGEST
// ================================================================================================

/// A digest consisting of `N` raw bytes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct ByteDigest<const N: usize>([u8; N]);

impl<const N: usize> ByteDigest<N> {
    pub const fn new(value: [u8; N]) -> Self {
        Self(value)
    }

    /// Returns a reference to the raw bytes of this digest.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> Default for ByteDigest<N> {
    fn default() -> Self {
        Self([0; N])
    }
}

impl<const N: usize> Digest for ByteDigest<N> {
    fn as_bytes(&self) -> [u8; 32] {
        let mut result = [0; 32];
        result[..N].copy_from_slice(&self.0);
        result
    }
}

impl<const N: usize> Display for ByteDigest<N> {
    /// Formats the digest as lowercase hex.
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        for byte in self.0.iter() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl<const N: usize> Serializable for ByteDigest<N> {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        target.write_bytes(&self.0);
    }

    fn get_size_hint(&self) -> usize {
        N
    }
}

impl<const N: usize> Deserializable for ByteDigest<N> {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        Ok(ByteDigest(source.read_array()?))
    }
}
