// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Contains functions for folding FRI layers.
//!
//! This module is exposed publicly primarily for benchmarking and documentation purposes. The
//! functions contained here are not intended to be used by the end-user of the crate.

use alloc::vec::Vec;

use math::{batch_inversion, get_power_series_with_offset, EvaluationDomain, StarkField};
#[cfg(feature = "concurrent")]
use utils::iterators::*;
use utils::iter_mut;

#[cfg(test)]
mod tests;

// CONSTANTS
// ================================================================================================

#[cfg(feature = "concurrent")]
const MIN_CONCURRENT_FOLD: usize = 1024;

// LAYER FOLDING
// ================================================================================================

/// Folds evaluations of a polynomial over `domain` into evaluations of a polynomial of half the
/// degree over the squared domain.
///
/// Let *f(x) = g(x^2) + x h(x^2)*. For every `i` in the first half of the domain, with
/// *a = f(x_i)* and *b = f(-x_i)* (stored at `i + n/2`), the folded value is
///
///   *(a + b) / 2 + c (a - b) / (2 x_i) = g(x_i^2) + c h(x_i^2)*.
///
/// The result has `values.len() / 2` entries and its `i`-th entry is the evaluation at the
/// `i`-th element of `domain.folded()`.
///
/// # Panics
/// Panics if the number of values does not match the size of the domain.
pub fn fold<E: StarkField>(values: &[E], domain: &EvaluationDomain<E>, c: E) -> Vec<E> {
    assert_eq!(
        values.len(),
        domain.size(),
        "number of values must match the domain size"
    );

    let half = values.len() / 2;
    let inv_two = E::from(2u32).inv();
    let inv_twice_xs = get_inv_twice_domain(domain, half);

    let (first_half, second_half) = values.split_at(half);
    let mut result = E::zeroed_vector(half);
    iter_mut!(result, MIN_CONCURRENT_FOLD)
        .zip(first_half)
        .zip(second_half)
        .zip(&inv_twice_xs)
        .for_each(|(((result, &a), &b), &inv_twice_x)| {
            *result = (a + b) * inv_two + c * (a - b) * inv_twice_x;
        });

    result
}

/// Folds a single pair of values opened at `position` in a layer of `layer_size` values.
///
/// `value` is the evaluation at `position`, `sibling` the evaluation at
/// [sibling_position()](sibling_position), and `x` the domain element at
/// `position % (layer_size / 2)`. The result equals entry `position % (layer_size / 2)` of
/// [fold()] applied to the whole layer.
pub fn fold_pair<E: StarkField>(
    position: usize,
    layer_size: usize,
    value: E,
    sibling: E,
    x: E,
    c: E,
) -> E {
    let (a, b) = if position < layer_size / 2 {
        (value, sibling)
    } else {
        (sibling, value)
    };
    (a + b) / E::from(2u32) + c * (a - b) / x.double()
}

// POSITION FOLDING
// ================================================================================================

/// Returns the position holding the evaluation at the negation of the domain element at
/// `position`.
pub fn sibling_position(position: usize, layer_size: usize) -> usize {
    let half = layer_size / 2;
    if position < half {
        position + half
    } else {
        position - half
    }
}

/// Maps a position in a layer of `layer_size` values to the position of its folded value in the
/// next layer.
pub fn fold_position(position: usize, layer_size: usize) -> usize {
    position % (layer_size / 2)
}

// HELPER FUNCTIONS
// ================================================================================================

/// Returns 1 / (2 x_i) for the first `half` elements of the domain.
fn get_inv_twice_domain<E: StarkField>(domain: &EvaluationDomain<E>, half: usize) -> Vec<E> {
    let twice_xs = get_power_series_with_offset(domain.generator(), domain.offset().double(), half);
    batch_inversion(&twice_xs)
}
