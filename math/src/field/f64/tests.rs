// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use num_bigint::BigUint;
use proptest::prelude::*;
use rand_utils::rand_value;
use utils::{Deserializable, Randomizable};

use super::{BaseElement, DeserializationError, FieldElement, Serializable, StarkField, M};

// MANUAL TESTS
// ================================================================================================

#[test]
fn add() {
    // identity
    let r: BaseElement = rand_value();
    assert_eq!(r, r + BaseElement::ZERO);

    // test addition within bounds
    assert_eq!(BaseElement::new(5), BaseElement::new(2) + BaseElement::new(3));

    // test overflow
    let t = BaseElement::new(M - 1);
    assert_eq!(BaseElement::ZERO, t + BaseElement::ONE);
    assert_eq!(BaseElement::ONE, t + BaseElement::new(2));

    // both operands close to the modulus so the u64 sum wraps
    assert_eq!(BaseElement::new(M - 2), t + t);
}

#[test]
fn sub() {
    // identity
    let r: BaseElement = rand_value();
    assert_eq!(r, r - BaseElement::ZERO);

    // test subtraction within bounds
    assert_eq!(BaseElement::new(2), BaseElement::new(5) - BaseElement::new(3));

    // test underflow
    let expected = BaseElement::new(M - 2);
    assert_eq!(expected, BaseElement::new(3) - BaseElement::new(5));
    assert_eq!(BaseElement::ONE, BaseElement::ZERO - BaseElement::new(M - 1));
}

#[test]
fn neg() {
    assert_eq!(BaseElement::ZERO, -BaseElement::ZERO);
    assert_eq!(BaseElement::new(M - 1), -BaseElement::ONE);

    let r: BaseElement = rand_value();
    assert_eq!(r, -(-r));
}

#[test]
fn mul() {
    // identity
    let r: BaseElement = rand_value();
    assert_eq!(BaseElement::ZERO, r * BaseElement::ZERO);
    assert_eq!(r, r * BaseElement::ONE);

    // test multiplication within bounds
    assert_eq!(BaseElement::from(15u8), BaseElement::from(5u8) * BaseElement::from(3u8));

    // test overflow
    let t = BaseElement::new(M - 1);
    assert_eq!(BaseElement::ONE, t * t);
    assert_eq!(BaseElement::new(M - 2), t * BaseElement::from(2u8));
    assert_eq!(BaseElement::new(M - 4), t * BaseElement::from(4u8));

    let t = M.div_ceil(2);
    assert_eq!(BaseElement::ONE, BaseElement::new(t) * BaseElement::from(2u8));
}

#[test]
fn exp() {
    let a = BaseElement::ZERO;
    assert_eq!(a.exp(0), BaseElement::ONE);
    assert_eq!(a.exp(1), BaseElement::ZERO);

    let a = BaseElement::ONE;
    assert_eq!(a.exp(0), BaseElement::ONE);
    assert_eq!(a.exp(1), BaseElement::ONE);
    assert_eq!(a.exp(3), BaseElement::ONE);

    let a: BaseElement = rand_value();
    assert_eq!(a.exp(3), a.cube());
    assert_eq!(a.exp(2), a.square());
}

#[test]
fn inv() {
    assert_eq!(BaseElement::ONE, BaseElement::inv(BaseElement::ONE));
    assert_eq!(BaseElement::ZERO, BaseElement::inv(BaseElement::ZERO));

    let two = BaseElement::from(2u8);
    assert_eq!(BaseElement::new(M.div_ceil(2)), two.inv());
}

#[test]
fn element_as_int() {
    let v = u64::MAX;
    let e = BaseElement::new(v);
    assert_eq!(v % M, e.as_int());

    let e1 = BaseElement::new(0);
    let e2 = BaseElement::new(M);
    assert_eq!(e1.as_int(), e2.as_int());
    assert_eq!(e1.as_int(), 0);
}

#[test]
fn equals() {
    let a = BaseElement::ONE;
    let b = BaseElement::new(M - 1) * BaseElement::new(M - 1);

    // elements are equal
    assert_eq!(a, b);
    assert_eq!(a.as_int(), b.as_int());
    assert_eq!(a.to_bytes(), b.to_bytes());
}

#[test]
fn ordering_follows_canonical_residue() {
    let small = BaseElement::new(3);
    let large = BaseElement::new(M - 1);

    assert!(small < large);
    assert!(-small > small);
    assert_eq!(BaseElement::new(M + 3), small);
    assert_eq!(core::cmp::Ordering::Equal, BaseElement::new(M + 3).cmp(&small));

    let mut values = vec![large, BaseElement::ONE, BaseElement::ZERO, small];
    values.sort();
    assert_eq!(vec![BaseElement::ZERO, BaseElement::ONE, small, large], values);
}

// ROOTS OF UNITY
// ------------------------------------------------------------------------------------------------

#[test]
fn get_root_of_unity() {
    let root_32 = BaseElement::get_root_of_unity(32);
    assert_eq!(BaseElement::TWO_ADIC_ROOT_OF_UNITY, root_32);
    assert_eq!(BaseElement::ONE, root_32.exp(1u64 << 32));
    assert_ne!(BaseElement::ONE, root_32.exp(1u64 << 31));

    let root_31 = BaseElement::get_root_of_unity(31);
    let expected = root_32.exp(2);
    assert_eq!(expected, root_31);
    assert_eq!(BaseElement::ONE, root_31.exp(1u64 << 31));

    // the two-adic root is a power of the group generator
    let k = (M - 1) >> 32;
    assert_eq!(BaseElement::TWO_ADIC_ROOT_OF_UNITY, BaseElement::GENERATOR.exp(k));
}

#[test]
fn root_of_order_two_is_minus_one() {
    assert_eq!(-BaseElement::ONE, BaseElement::get_root_of_unity(1));
}

// SERIALIZATION AND DESERIALIZATION
// ------------------------------------------------------------------------------------------------

#[test]
fn read_from_bytes() {
    let bytes = 1u64.to_le_bytes();
    let result = BaseElement::read_from_bytes(&bytes);
    assert_eq!(Ok(BaseElement::ONE), result);

    let bytes = [1u8, 0, 0, 0, 0, 0, 0];
    let result = BaseElement::read_from_bytes(&bytes);
    assert_eq!(Err(DeserializationError::UnexpectedEOF), result);

    let bytes = M.to_le_bytes();
    let result = BaseElement::read_from_bytes(&bytes);
    assert!(matches!(result, Err(DeserializationError::InvalidValue(_))));
}

#[test]
fn from_random_bytes_rejects_non_canonical() {
    assert_eq!(Some(BaseElement::new(5)), BaseElement::from_random_bytes(&5u64.to_le_bytes()));
    assert_eq!(None, BaseElement::from_random_bytes(&u64::MAX.to_le_bytes()));
    assert_eq!(None, BaseElement::from_random_bytes(&[1, 2, 3]));
}

// RANDOMIZED TESTS
// ================================================================================================

proptest! {

    #[test]
    fn add_proptest(a in any::<u64>(), b in any::<u64>()) {
        let v1 = BaseElement::new(a);
        let v2 = BaseElement::new(b);
        let result = v1 + v2;

        let a = (a % M) as u128;
        let b = (b % M) as u128;
        let expected = ((a + b) % (M as u128)) as u64;
        prop_assert_eq!(expected, result.as_int());
    }

    #[test]
    fn sub_proptest(a in any::<u64>(), b in any::<u64>()) {
        let v1 = BaseElement::new(a);
        let v2 = BaseElement::new(b);
        let result = v1 - v2;

        let a = a % M;
        let b = b % M;
        let expected = if a < b { M - b + a } else { a - b };

        prop_assert_eq!(expected, result.as_int());
    }

    #[test]
    fn neg_proptest(a in any::<u64>()) {
        let v = BaseElement::new(a);
        let expected = (M - (a % M)) % M;

        prop_assert_eq!(expected, (-v).as_int());
    }

    #[test]
    fn mul_proptest(a in any::<u64>(), b in any::<u64>()) {
        let v1 = BaseElement::new(a);
        let v2 = BaseElement::new(b);
        let result = v1 * v2;

        let a = (a % M) as u128;
        let b = (b % M) as u128;
        let expected = ((a * b) % M as u128) as u64;
        prop_assert_eq!(expected, result.as_int());
    }

    #[test]
    fn double_proptest(x in any::<u64>()) {
        let v = BaseElement::new(x);
        let result = v.double();

        let expected = ((((x % M) as u128) * 2) % M as u128) as u64;
        prop_assert_eq!(expected, result.as_int());
    }

    #[test]
    fn exp_proptest(a in any::<u64>(), b in any::<u64>()) {
        let result = BaseElement::new(a).exp(b);

        let m = BigUint::from(M);
        let expected = BigUint::from(a % M).modpow(&BigUint::from(b), &m);
        let expected = expected.to_u64_digits().first().copied().unwrap_or(0);
        prop_assert_eq!(expected, result.as_int());
    }

    #[test]
    fn inv_proptest(a in any::<u64>()) {
        let a = BaseElement::new(a);
        let b = a.inv();

        let expected = if a == BaseElement::ZERO { BaseElement::ZERO } else { BaseElement::ONE };
        prop_assert_eq!(expected, a * b);
    }

    #[test]
    fn element_as_int_proptest(a in any::<u64>()) {
        let e = BaseElement::new(a);
        prop_assert_eq!(a % M, e.as_int());
    }

    #[test]
    fn ordering_proptest(a in any::<u64>(), b in any::<u64>()) {
        let v1 = BaseElement::new(a);
        let v2 = BaseElement::new(b);
        prop_assert_eq!((a % M).cmp(&(b % M)), v1.cmp(&v2));
    }

    #[test]
    fn serialization_proptest(a in any::<u64>()) {
        let e = BaseElement::new(a);
        prop_assert_eq!(Ok(e), BaseElement::read_from_bytes(&e.to_bytes()));
    }
}
