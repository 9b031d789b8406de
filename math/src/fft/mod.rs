// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! FFT-based polynomial evaluation and interpolation.
//!
//! Functions in this module evaluate and interpolate polynomials over multiplicative subgroups
//! of the field (optionally shifted by a coset offset) whose sizes are powers of two. They run in
//! O(n log n) time, as opposed to the O(n^2) helpers in the [polynom](crate::polynom) module.
//!
//! Twiddles are passed in by the caller so they can be computed once per domain and reused
//! across all columns of a trace. Both twiddle vectors and evaluations are in natural order:
//! `evaluations[i]` is the value at `offset * g^i`.

use alloc::vec::Vec;

use crate::{field::StarkField, utils::get_power_series};

mod serial;

#[cfg(feature = "concurrent")]
mod concurrent;


// CONSTANTS
// ================================================================================================

const MIN_CONCURRENT_SIZE: usize = 1024;

// POLYNOMIAL EVALUATION
// ================================================================================================

/// Evaluates a polynomial on all points of the subgroup of size `p.len()`, in place.
///
/// `twiddles` must be the output of [get_twiddles()] for `p.len()`.
///
/// # Panics
/// Panics if `p.len()` is not a power of two, does not match the number of twiddles, or exceeds
/// the two-adicity of the field.
pub fn evaluate_poly<E: StarkField>(p: &mut [E], twiddles: &[E]) {
    check_domain::<E>(p.len(), twiddles.len());
    fft_in_place(p, twiddles);
}

/// Evaluates a polynomial over the coset `domain_offset * <g>` of size `p.len() * blowup_factor`
/// and returns the evaluations.
///
/// `twiddles` must be the output of [get_twiddles()] for the full evaluation domain size.
///
/// # Panics
/// Panics if:
/// * `blowup_factor` is not a power of two;
/// * the evaluation domain size is not valid for the field or does not match `twiddles`;
/// * `domain_offset` is zero.
pub fn evaluate_poly_with_offset<E: StarkField>(
    p: &[E],
    twiddles: &[E],
    domain_offset: E,
    blowup_factor: usize,
) -> Vec<E> {
    assert!(blowup_factor.is_power_of_two(), "blowup factor must be a power of 2");
    assert_ne!(domain_offset, E::ZERO, "domain offset cannot be zero");
    let domain_size = p.len() * blowup_factor;
    check_domain::<E>(domain_size, twiddles.len());

    // f(offset * x) has coefficients c_i * offset^i
    let mut result = E::zeroed_vector(domain_size);
    let mut factor = E::ONE;
    for (r, &c) in result.iter_mut().zip(p) {
        *r = c * factor;
        factor *= domain_offset;
    }

    fft_in_place(&mut result, twiddles);
    result
}

// POLYNOMIAL INTERPOLATION
// ================================================================================================

/// Interpolates evaluations over the subgroup of size `evaluations.len()` into coefficient form,
/// in place.
///
/// `inv_twiddles` must be the output of [get_inv_twiddles()] for `evaluations.len()`.
pub fn interpolate_poly<E: StarkField>(evaluations: &mut [E], inv_twiddles: &[E]) {
    check_domain::<E>(evaluations.len(), inv_twiddles.len());
    fft_in_place(evaluations, inv_twiddles);

    let length = E::from(2u32).exp((evaluations.len().ilog2() as u64).into());
    let inv_length = length.inv();
    for e in evaluations.iter_mut() {
        *e *= inv_length;
    }
}

/// Interpolates evaluations over the coset `domain_offset * <g>` into coefficient form, in
/// place.
pub fn interpolate_poly_with_offset<E: StarkField>(
    evaluations: &mut [E],
    inv_twiddles: &[E],
    domain_offset: E,
) {
    assert_ne!(domain_offset, E::ZERO, "domain offset cannot be zero");
    interpolate_poly(evaluations, inv_twiddles);

    let inv_offset = domain_offset.inv();
    let mut factor = E::ONE;
    for coeff in evaluations.iter_mut() {
        *coeff *= factor;
        factor *= inv_offset;
    }
}

// TWIDDLES
// ================================================================================================

/// Returns the twiddles `[1, g, g^2, ..., g^(n/2 - 1)]` for a domain of size `n`, where `g` is
/// the primitive root of unity of order `n`.
///
/// # Panics
/// Panics if `domain_size` is not a power of two, is smaller than 2, or exceeds the two-adicity
/// of the field.
pub fn get_twiddles<E: StarkField>(domain_size: usize) -> Vec<E> {
    check_domain::<E>(domain_size, domain_size / 2);
    let root = E::get_root_of_unity(domain_size.ilog2());
    get_power_series(root, domain_size / 2)
}

/// Returns the inverse twiddles `[1, g^-1, g^-2, ..., g^-(n/2 - 1)]` for a domain of size `n`.
pub fn get_inv_twiddles<E: StarkField>(domain_size: usize) -> Vec<E> {
    check_domain::<E>(domain_size, domain_size / 2);
    let root = E::get_root_of_unity(domain_size.ilog2());
    get_power_series(root.inv(), domain_size / 2)
}

// DEGREE INFERENCE
// ================================================================================================

/// Returns the degree of the polynomial implied by evaluations over the coset
/// `domain_offset * <g>`.
pub fn infer_degree<E: StarkField>(evaluations: &[E], domain_offset: E) -> usize {
    let mut poly = evaluations.to_vec();
    let inv_twiddles = get_inv_twiddles::<E>(evaluations.len());
    interpolate_poly_with_offset(&mut poly, &inv_twiddles, domain_offset);
    super::polynom::degree_of(&poly)
}

// PERMUTATIONS
// ================================================================================================

/// Computes the bit-reversed position of `index` in a domain of `size` elements.
pub fn permute_index(size: usize, index: usize) -> usize {
    const USIZE_BITS: u32 = usize::BITS;

    debug_assert!(index < size);
    debug_assert!(size.is_power_of_two());

    if size == 1 {
        return 0;
    }
    let bits = size.trailing_zeros();
    index.reverse_bits() >> (USIZE_BITS - bits)
}

/// Re-orders `values` into bit-reversed order, in place.
pub fn permute<T>(values: &mut [T]) {
    let n = values.len();
    for i in 0..n {
        let j = permute_index(n, i);
        if j > i {
            values.swap(i, j);
        }
    }
}

// HELPER FUNCTIONS
// ================================================================================================

fn fft_in_place<E: StarkField>(values: &mut [E], twiddles: &[E]) {
    if cfg!(feature = "concurrent") && values.len() >= MIN_CONCURRENT_SIZE {
        #[cfg(feature = "concurrent")]
        concurrent::fft_in_place(values, twiddles);
    } else {
        serial::fft_in_place(values, twiddles);
    }
}

fn check_domain<E: StarkField>(size: usize, num_twiddles: usize) {
    assert!(size.is_power_of_two(), "domain size must be a power of 2, but was {size}");
    assert!(size >= 2, "domain size must be at least 2, but was {size}");
    assert!(
        size.ilog2() <= E::TWO_ADICITY,
        "multiplicative subgroup of size {size} does not exist in the specified base field"
    );
    assert_eq!(
        size,
        num_twiddles * 2,
        "invalid number of twiddles: expected {} but received {}",
        size / 2,
        num_twiddles
    );
}
