// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use utils::iterators::*;

use super::{permute, serial::butterflies, MIN_CONCURRENT_SIZE};
use crate::field::StarkField;

// CORE FFT ALGORITHM
// ================================================================================================

/// Same as the serial FFT, but butterfly groups of each layer are distributed across rayon
/// threads. Once groups become larger than [MIN_CONCURRENT_SIZE], the butterflies inside a group
/// are split as well.
pub(super) fn fft_in_place<E: StarkField>(values: &mut [E], twiddles: &[E]) {
    let n = values.len();
    permute(values);

    let mut half = 1;
    while half < n {
        let stride = n / (2 * half);
        values.par_chunks_mut(2 * half).for_each(|group| {
            let (lo, hi) = group.split_at_mut(half);
            if half < MIN_CONCURRENT_SIZE {
                butterflies(lo, hi, twiddles, stride);
            } else {
                lo.par_chunks_mut(MIN_CONCURRENT_SIZE)
                    .zip(hi.par_chunks_mut(MIN_CONCURRENT_SIZE))
                    .enumerate()
                    .for_each(|(k, (lo, hi))| {
                        let offset = k * MIN_CONCURRENT_SIZE;
                        butterflies(lo, hi, &twiddles[offset * stride..], stride);
                    });
            }
        });
        half *= 2;
    }
}
