// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Basic polynomial operations.
//!
//! Polynomials are represented as slices of coefficients in ascending order of degree: the
//! constant term is at index 0. Functions here run in O(n) or O(n^2) time; for evaluation and
//! interpolation over power-of-two subgroups use the [fft](crate::fft) module instead.

use alloc::vec::Vec;
use core::cmp;

use crate::{field::FieldElement, utils::batch_inversion};


// POLYNOMIAL EVALUATION
// ================================================================================================

/// Evaluates a polynomial at a single point using Horner's method.
///
/// An empty slice is the zero polynomial.
///
/// # Examples
/// ```
/// # use sigstark_math::polynom::*;
/// # use sigstark_math::{fields::f64::BaseElement, FieldElement};
/// // define polynomial: f(x) = 3 * x^2 + 2 * x + 1
/// let p = (1u32..4).map(BaseElement::from).collect::<Vec<_>>();
///
/// // evaluate the polynomial at point 4
/// let x = BaseElement::new(4);
/// assert_eq!(BaseElement::new(57), eval(&p, x));
/// ```
pub fn eval<E: FieldElement>(p: &[E], x: E) -> E {
    p.iter().rev().fold(E::ZERO, |acc, &coeff| acc * x + coeff)
}

/// Evaluates a polynomial at multiple points.
pub fn eval_many<E: FieldElement>(p: &[E], xs: &[E]) -> Vec<E> {
    xs.iter().map(|x| eval(p, *x)).collect()
}

// POLYNOMIAL INTERPOLATION
// ================================================================================================

/// Returns a polynomial in coefficient form interpolated from a set of X and Y coordinates.
///
/// Uses Lagrange interpolation; the X coordinates must be distinct. When `remove_leading_zeros`
/// is true, trailing zero coefficients are stripped from the result.
///
/// # Panics
/// Panics if the number of X and Y coordinates differs.
pub fn interpolate<E: FieldElement>(xs: &[E], ys: &[E], remove_leading_zeros: bool) -> Vec<E> {
    assert_eq!(xs.len(), ys.len(), "number of X and Y coordinates must be the same");

    let roots = get_zero_roots(xs);
    let numerators: Vec<Vec<E>> = xs.iter().map(|&x| div(&roots, &[-x, E::ONE])).collect();

    let denominators: Vec<E> =
        numerators.iter().zip(xs).map(|(numerator, &x)| eval(numerator, x)).collect();
    let denominators = batch_inversion(&denominators);

    let mut result = E::zeroed_vector(xs.len());
    for ((numerator, &y), &inv_denominator) in numerators.iter().zip(ys).zip(&denominators) {
        if y == E::ZERO {
            continue;
        }
        let y_slice = y * inv_denominator;
        for (res, &coeff) in result.iter_mut().zip(numerator) {
            *res += coeff * y_slice;
        }
    }

    if remove_leading_zeros {
        self::remove_leading_zeros(&result)
    } else {
        result
    }
}

// POLYNOMIAL MATH OPERATIONS
// ================================================================================================

/// Returns a polynomial resulting from adding two polynomials together.
pub fn add<E: FieldElement>(a: &[E], b: &[E]) -> Vec<E> {
    let result_len = cmp::max(a.len(), b.len());
    (0..result_len)
        .map(|i| a.get(i).copied().unwrap_or(E::ZERO) + b.get(i).copied().unwrap_or(E::ZERO))
        .collect()
}

/// Returns a polynomial resulting from subtracting one polynomial from another.
pub fn sub<E: FieldElement>(a: &[E], b: &[E]) -> Vec<E> {
    let result_len = cmp::max(a.len(), b.len());
    (0..result_len)
        .map(|i| a.get(i).copied().unwrap_or(E::ZERO) - b.get(i).copied().unwrap_or(E::ZERO))
        .collect()
}

/// Returns a polynomial resulting from multiplying two polynomials together.
pub fn mul<E: FieldElement>(a: &[E], b: &[E]) -> Vec<E> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    let mut result = E::zeroed_vector(a.len() + b.len() - 1);
    for (i, &ai) in a.iter().enumerate() {
        for (j, &bj) in b.iter().enumerate() {
            result[i + j] += ai * bj;
        }
    }
    result
}

/// Returns a polynomial resulting from multiplying a given polynomial by a scalar value.
pub fn mul_by_const<E: FieldElement>(p: &[E], k: E) -> Vec<E> {
    p.iter().map(|&coeff| coeff * k).collect()
}

/// Returns the quotient of dividing `a` by `b`; the remainder is discarded.
///
/// # Panics
/// Panics if `b` is the zero polynomial or has a higher degree than `a`.
pub fn div<E: FieldElement>(a: &[E], b: &[E]) -> Vec<E> {
    let mut apos = degree_of(a);
    let mut a = a.to_vec();

    let bpos = degree_of(b);
    assert!(apos >= bpos, "cannot divide by polynomial of higher degree");
    assert!(b[bpos] != E::ZERO, "cannot divide polynomial by zero");

    let lead_inv = b[bpos].inv();
    let mut result = E::zeroed_vector(apos - bpos + 1);
    for i in (0..result.len()).rev() {
        let quot = a[apos] * lead_inv;
        result[i] = quot;
        for j in (0..bpos).rev() {
            a[i + j] -= b[j] * quot;
        }
        apos = apos.wrapping_sub(1);
    }

    result
}

// DEGREE INFERENCE
// ================================================================================================

/// Returns the degree of the provided polynomial: the index of its highest non-zero coefficient.
///
/// The zero polynomial (including an empty slice) has degree 0.
pub fn degree_of<E: FieldElement>(poly: &[E]) -> usize {
    poly.iter().rposition(|&coeff| coeff != E::ZERO).unwrap_or(0)
}

/// Returns a copy of the polynomial with trailing zero coefficients removed.
pub fn remove_leading_zeros<E: FieldElement>(values: &[E]) -> Vec<E> {
    match values.iter().rposition(|&coeff| coeff != E::ZERO) {
        Some(last) => values[..=last].to_vec(),
        None => Vec::new(),
    }
}

// HELPER FUNCTIONS
// ================================================================================================

/// Returns the coefficients of prod_i (x - xs[i]).
fn get_zero_roots<E: FieldElement>(xs: &[E]) -> Vec<E> {
    let mut result = vec![E::ONE];
    for &x in xs {
        result = mul(&result, &[-x, E::ONE]);
    }
    result
}
