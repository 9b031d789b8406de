// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use alloc::vec::Vec;

#[cfg(feature = "concurrent")]
use utils::iterators::*;

use crate::field::FieldElement;


// CONSTANTS
// ================================================================================================

const MIN_CONCURRENT_SIZE: usize = 1024;

// MATH FUNCTIONS
// ================================================================================================

/// Returns a vector containing successive powers of a given base.
///
/// More precisely, for base `b`, generates a vector with values [1, b, b^2, b^3, ..., b^(n-1)].
///
/// When `concurrent` feature is enabled, series generation is done concurrently in multiple
/// threads.
///
/// # Examples
/// ```
/// # use sigstark_math::get_power_series;
/// # use sigstark_math::{fields::f64::BaseElement, FieldElement};
/// let b = BaseElement::new(3);
/// let n = 8;
///
/// let expected = (0..n).map(|p| b.exp(p as u64)).collect::<Vec<_>>();
///
/// let actual = get_power_series(b, n);
/// assert_eq!(expected, actual);
/// ```
pub fn get_power_series<E: FieldElement>(b: E, n: usize) -> Vec<E> {
    get_power_series_with_offset(b, E::ONE, n)
}

/// Returns a vector containing successive powers of a given base offset by the specified value.
///
/// More precisely, for base `b` and offset `s`, generates a vector with values
/// [s, s * b, s * b^2, s * b^3, ..., s * b^(n-1)].
pub fn get_power_series_with_offset<E: FieldElement>(b: E, s: E, n: usize) -> Vec<E> {
    let mut result = E::zeroed_vector(n);
    if n == 0 {
        return result;
    }

    if cfg!(feature = "concurrent") && n >= MIN_CONCURRENT_SIZE {
        #[cfg(feature = "concurrent")]
        {
            let batch_size = n.div_ceil(rayon_num_threads());
            result.par_chunks_mut(batch_size).enumerate().for_each(|(i, batch)| {
                let start = s * b.exp(((i * batch_size) as u64).into());
                fill_power_series(batch, b, start);
            });
        }
    } else {
        fill_power_series(&mut result, b, s);
    }
    result
}

/// Computes multiplicative inverses of all slice elements using batch inversion method.
///
/// Zero elements are mapped to zero. Only one field inversion is performed per batch; with the
/// `concurrent` feature each rayon job handles its own batch.
pub fn batch_inversion<E: FieldElement>(values: &[E]) -> Vec<E> {
    let mut result = E::zeroed_vector(values.len());
    if cfg!(feature = "concurrent") && values.len() >= MIN_CONCURRENT_SIZE {
        #[cfg(feature = "concurrent")]
        {
            let batch_size = values.len().div_ceil(rayon_num_threads());
            result.par_chunks_mut(batch_size).zip(values.par_chunks(batch_size)).for_each(
                |(result, values)| {
                    serial_batch_inversion(values, result);
                },
            );
        }
    } else {
        serial_batch_inversion(values, &mut result);
    }

    result
}

/// Returns base 2 logarithm of `n`, where `n` is a power of two.
///
/// # Panics
/// Panics if `n` is not a power of two.
pub fn log2(n: usize) -> u32 {
    assert!(n.is_power_of_two(), "n must be a power of two");
    n.trailing_zeros()
}

// HELPER FUNCTIONS
// ------------------------------------------------------------------------------------------------

#[inline(always)]
fn fill_power_series<E: FieldElement>(result: &mut [E], base: E, start: E) {
    result[0] = start;
    for i in 1..result.len() {
        result[i] = result[i - 1] * base;
    }
}

fn serial_batch_inversion<E: FieldElement>(values: &[E], result: &mut [E]) {
    let mut last = E::ONE;
    for (result, &value) in result.iter_mut().zip(values.iter()) {
        *result = last;
        if value != E::ZERO {
            last *= value;
        }
    }

    last = last.inv();

    for i in (0..values.len()).rev() {
        if values[i] == E::ZERO {
            result[i] = E::ZERO;
        } else {
            result[i] *= last;
            last *= values[i];
        }
    }
}
