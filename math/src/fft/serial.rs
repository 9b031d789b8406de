// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use super::permute;
use crate::field::StarkField;

// CORE FFT ALGORITHM
// ================================================================================================

/// Iterative radix-2 decimation-in-time FFT with natural-order input and output.
///
/// `twiddles[k]` must equal `g^k` for the root `g` of order `values.len()`.
pub(super) fn fft_in_place<E: StarkField>(values: &mut [E], twiddles: &[E]) {
    let n = values.len();
    permute(values);

    let mut half = 1;
    while half < n {
        let stride = n / (2 * half);
        for group in values.chunks_mut(2 * half) {
            let (lo, hi) = group.split_at_mut(half);
            butterflies(lo, hi, twiddles, stride);
        }
        half *= 2;
    }
}

#[inline(always)]
pub(super) fn butterflies<E: StarkField>(
    lo: &mut [E],
    hi: &mut [E],
    twiddles: &[E],
    stride: usize,
) {
    for (j, (u, v)) in lo.iter_mut().zip(hi.iter_mut()).enumerate() {
        let t = *v * twiddles[j * stride];
        *v = *u - t;
        *u += t;
    }
}
