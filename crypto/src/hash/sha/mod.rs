// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use core::marker::PhantomData;

use math::{FieldElement, StarkField};
use sha3::Digest as _;
use utils::ByteWriter;

use super::{ByteDigest, ElementHasher, Hasher};

// SHA3 WITH 256-BIT OUTPUT
// ================================================================================================

/// SHA3 with 256-bit output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sha3_256<B: StarkField>(PhantomData<B>);

impl<B: StarkField> Hasher for Sha3_256<B> {
    type Digest = ByteDigest<32>;

    fn hash(bytes: &[u8]) -> Self::Digest {
        ByteDigest(sha3::Sha3_256::digest(bytes).into())
    }
}

impl<B: StarkField> ElementHasher for Sha3_256<B> {
    type BaseField = B;

    fn hash_elements<E: FieldElement>(elements: &[E]) -> Self::Digest {
        let mut writer = Sha3Writer(sha3::Sha3_256::new());
        writer.write_many(elements);
        ByteDigest(writer.0.finalize().into())
    }
}

/// Streams serialized field elements into a SHA3 hasher.
struct Sha3Writer(sha3::Sha3_256);

impl ByteWriter for Sha3Writer {
    fn write_u8(&mut self, value: u8) {
        self.0.update([value]);
    }

    fn write_bytes(&mut self, values: &[u8]) {
        self.0.update(values);
    }
}
