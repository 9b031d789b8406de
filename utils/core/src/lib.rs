// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Byte-level serialization, random-byte decoding, and iteration helpers shared by all sigstark
//! crates.
#![no_std]

#[macro_use]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod iterators;

mod serde;
pub use serde::{ByteReader, ByteWriter, Deserializable, Serializable, SliceReader};

mod errors;
pub use errors::DeserializationError;


// FEATURE-BASED RE-EXPORTS
// ================================================================================================

#[cfg(feature = "concurrent")]
pub use rayon;

// RANDOMNESS
// ================================================================================================

/// Defines how `Self` can be read from a sequence of pseudo-random bytes.
///
/// Transcripts use this to turn hash output into challenges: when the bytes do not encode a valid
/// value, the caller is expected to re-hash and try again.
pub trait Randomizable: Sized {
    /// Number of bytes consumed by [from_random_bytes()](Self::from_random_bytes).
    const VALUE_SIZE: usize;

    /// Returns `Self` if the leading `VALUE_SIZE` bytes of `source` form a valid value.
    fn from_random_bytes(source: &[u8]) -> Option<Self>;
}

impl Randomizable for u64 {
    const VALUE_SIZE: usize = 8;

    fn from_random_bytes(source: &[u8]) -> Option<Self> {
        let bytes = source.get(..Self::VALUE_SIZE)?;
        bytes.try_into().ok().map(u64::from_le_bytes)
    }
}
