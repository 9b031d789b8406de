// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use alloc::vec::Vec;

use super::Serializable;

// BYTE WRITER TRAIT
// ================================================================================================

/// Sink for serialized proof bytes.
pub trait ByteWriter: Sized {
    /// Appends a single byte.
    fn write_u8(&mut self, value: u8);

    /// Appends a sequence of bytes.
    fn write_bytes(&mut self, values: &[u8]);

    /// Appends a u64 value in little-endian byte order.
    fn write_u64(&mut self, value: u64) {
        self.write_bytes(&value.to_le_bytes());
    }

    /// Appends a usize value in [vint64](https://docs.rs/vint64/latest/vint64/) format.
    ///
    /// A value made of `k <= 8` groups of 7 bits takes `k` bytes, and the number of trailing zeros
    /// in the first byte is `k - 1`. Larger values take a zero byte followed by the value as a
    /// little-endian u64.
    fn write_usize(&mut self, value: usize) {
        let value = value as u64;
        let num_bits = (u64::BITS - value.leading_zeros()).max(1) as usize;
        match num_bits.div_ceil(7) {
            len if len > 8 => {
                self.write_u8(0);
                self.write_u64(value);
            },
            len => {
                let encoded = (value << len) | (1 << (len - 1));
                self.write_bytes(&encoded.to_le_bytes()[..len]);
            },
        }
    }

    /// Appends a serializable value.
    fn write<S: Serializable>(&mut self, value: S) {
        value.write_into(self)
    }

    /// Appends a sequence of serializable values without a length prefix.
    fn write_many<S: Serializable>(&mut self, values: &[S]) {
        S::write_batch_into(values, self)
    }
}

impl ByteWriter for Vec<u8> {
    fn write_u8(&mut self, value: u8) {
        self.push(value);
    }

    fn write_bytes(&mut self, values: &[u8]) {
        self.extend_from_slice(values);
    }
}
