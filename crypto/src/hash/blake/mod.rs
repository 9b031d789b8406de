// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use core::marker::PhantomData;

use math::{FieldElement, StarkField};
use utils::ByteWriter;

use super::{ByteDigest, ElementHasher, Hasher};


// BLAKE3 256-BIT OUTPUT
// ================================================================================================

/// BLAKE3 with 256-bit output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blake3_256<B: StarkField>(PhantomData<B>);

impl<B: StarkField> Hasher for Blake3_256<B> {
    type Digest = ByteDigest<32>;

    fn hash(bytes: &[u8]) -> Self::Digest {
        ByteDigest(*blake3::hash(bytes).as_bytes())
    }
}

impl<B: StarkField> ElementHasher for Blake3_256<B> {
    type BaseField = B;

    fn hash_elements<E: FieldElement>(elements: &[E]) -> Self::Digest {
        let mut writer = Blake3Writer(blake3::Hasher::new());
        writer.write_many(elements);
        ByteDigest(*writer.0.finalize().as_bytes())
    }
}

/// Streams serialized field elements into a BLAKE3 hasher.
struct Blake3Writer(blake3::Hasher);

impl ByteWriter for Blake3Writer {
    fn write_u8(&mut self, value: u8) {
        self.0.update(&[value]);
    }

    fn write_bytes(&mut self, values: &[u8]) {
        self.0.update(values);
    }
}
