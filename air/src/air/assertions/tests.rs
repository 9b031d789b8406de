// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use math::{fields::f64::BaseElement, FieldElement};

use super::Assertion;
use crate::{errors::AssertionError, TraceInfo};

#[test]
fn single_assertion() {
    let value = BaseElement::new(123);
    let a = Assertion::single(2, 0, value);
    assert_eq!(2, a.column());
    assert_eq!(0, a.step());
    assert_eq!(value, a.value());
    assert_eq!("(column=2, step=0, value=123)", format!("{a}"));
}

#[test]
fn assertion_overlap() {
    let a = Assertion::single(3, 2, BaseElement::ONE);
    assert!(a.overlaps_with(&Assertion::single(3, 2, BaseElement::ZERO)));
    assert!(!a.overlaps_with(&Assertion::single(3, 1, BaseElement::ONE)));
    assert!(!a.overlaps_with(&Assertion::single(2, 2, BaseElement::ONE)));
}

#[test]
fn validate_assertion() {
    let trace_info = TraceInfo::new(6, 8);
    assert_eq!(Ok(()), Assertion::single(5, 7, BaseElement::ONE).validate(&trace_info));
    assert_eq!(
        Err(AssertionError::TraceWidthTooShort(7, 6)),
        Assertion::single(6, 0, BaseElement::ONE).validate(&trace_info)
    );
    assert_eq!(
        Err(AssertionError::TraceLengthTooShort(9, 8)),
        Assertion::single(0, 8, BaseElement::ONE).validate(&trace_info)
    );
}

#[test]
fn evaluate_assertion() {
    let a = Assertion::single(1, 0, BaseElement::new(456));
    let row = [BaseElement::new(1), BaseElement::new(459), BaseElement::new(3)];

    assert_eq!(BaseElement::new(3), a.evaluate_at(0, &row));
    assert_eq!(BaseElement::ZERO, a.evaluate_at(1, &row));

    let satisfied = [BaseElement::new(1), BaseElement::new(456), BaseElement::new(3)];
    assert_eq!(BaseElement::ZERO, a.evaluate_at(0, &satisfied));
}
