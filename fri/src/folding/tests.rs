// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use alloc::vec::Vec;

use math::{fields::f64::BaseElement, polynom, EvaluationDomain, FieldElement, StarkField};
use proptest::prelude::*;
use rand_utils::{rand_value, rand_vector};

use super::{fold, fold_pair, fold_position, sibling_position};

#[test]
fn fold_halves_degree() {
    let c: BaseElement = rand_value();

    // degree 7 polynomial f(x)
    let poly: Vec<BaseElement> = rand_vector(8);

    // f'(x) = g(x) + c * h(x) where g and h consist of the even and odd coefficients of f
    let folded_poly: Vec<BaseElement> =
        (0..poly.len() / 2).map(|i| poly[2 * i] + c * poly[2 * i + 1]).collect();

    for offset in [BaseElement::ONE, BaseElement::GENERATOR] {
        let domain = EvaluationDomain::new(32, offset).unwrap();
        let folded_domain = domain.folded().unwrap();

        let evaluations = polynom::eval_many(&poly, &domain.elements());
        let expected = polynom::eval_many(&folded_poly, &folded_domain.elements());

        assert_eq!(expected, fold(&evaluations, &domain, c));
    }
}

#[test]
fn fold_is_deterministic() {
    let domain = EvaluationDomain::new(16, BaseElement::ONE).unwrap();
    let values: Vec<BaseElement> = rand_vector(16);
    let c: BaseElement = rand_value();

    let r1 = fold(&values, &domain, c);
    let r2 = fold(&values, &domain, c);
    assert_eq!(8, r1.len());
    assert_eq!(r1, r2);

    let r3 = fold(&values, &domain, c + BaseElement::ONE);
    assert_ne!(r1, r3);
}

#[test]
fn fold_minimal_layer() {
    let domain = EvaluationDomain::new(2, BaseElement::ONE).unwrap();
    let a = BaseElement::new(10);
    let b = BaseElement::new(4);
    let c = BaseElement::new(3);

    // x_0 = 1: (10 + 4) / 2 + 3 * (10 - 4) / 2 = 7 + 9
    assert_eq!(vec![BaseElement::new(16)], fold(&[a, b], &domain, c));
}

#[test]
fn fold_pair_matches_fold() {
    let domain = EvaluationDomain::new(32, BaseElement::ONE).unwrap();
    let values: Vec<BaseElement> = rand_vector(32);
    let c: BaseElement = rand_value();
    let folded = fold(&values, &domain, c);

    for position in 0..32 {
        let sibling = sibling_position(position, 32);
        let next = fold_position(position, 32);
        let x = domain.element(next);
        let result = fold_pair(position, 32, values[position], values[sibling], x, c);
        assert_eq!(folded[next], result);
    }
}

#[test]
fn positions() {
    assert_eq!(20, sibling_position(4, 32));
    assert_eq!(4, sibling_position(20, 32));
    assert_eq!(4, fold_position(20, 32));
    assert_eq!(4, fold_position(4, 32));
    assert_eq!(0, fold_position(1, 2));
}

proptest! {
    #[test]
    fn fold_length_proptest(log_n in 1usize..9, c in any::<u64>()) {
        let n = 1 << log_n;
        let domain = EvaluationDomain::new(n, BaseElement::ONE).unwrap();
        let values: Vec<BaseElement> = (0..n as u64).map(BaseElement::new).collect();
        let result = fold(&values, &domain, BaseElement::new(c));
        prop_assert_eq!(n / 2, result.len());
    }
}
