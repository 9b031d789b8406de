// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use alloc::vec::Vec;
use core::{
    fmt::{Debug, Display},
    ops::{
        Add, AddAssign, BitAnd, Div, DivAssign, Mul, MulAssign, Neg, Shl, ShrAssign, Sub,
        SubAssign,
    },
};

use utils::{Deserializable, Randomizable, Serializable};

// FIELD ELEMENT
// ================================================================================================

/// Defines an element of a finite field.
///
/// Elements are stored reduced, compare by their canonical residue, and all arithmetic is
/// performed modulo the field prime. The [Ord] bound orders elements by that residue; it is the
/// only ordering used anywhere in the workspace.
pub trait FieldElement:
    Copy
    + Clone
    + Debug
    + Display
    + Default
    + Send
    + Sync
    + Eq
    + PartialEq
    + Ord
    + PartialOrd
    + Sized
    + Add<Self, Output = Self>
    + Sub<Self, Output = Self>
    + Mul<Self, Output = Self>
    + Div<Self, Output = Self>
    + AddAssign<Self>
    + SubAssign<Self>
    + MulAssign<Self>
    + DivAssign<Self>
    + Neg<Output = Self>
    + From<u32>
    + From<u8>
    + Randomizable
    + Serializable
    + Deserializable
{
    /// A type defining positive integers big enough to describe a field modulus for
    /// `Self::BaseField` with no loss of precision.
    type PositiveInteger: Debug
        + Copy
        + PartialEq
        + PartialOrd
        + ShrAssign
        + Shl<u32, Output = Self::PositiveInteger>
        + BitAnd<Output = Self::PositiveInteger>
        + From<u32>
        + From<u64>;

    /// Number of bytes needed to encode an element.
    const ELEMENT_BYTES: usize;

    /// The additive identity.
    const ZERO: Self;

    /// The multiplicative identity.
    const ONE: Self;

    // ALGEBRA
    // --------------------------------------------------------------------------------------------

    /// Returns this field element added to itself.
    #[must_use]
    fn double(self) -> Self {
        self + self
    }

    /// Returns this field element raised to power 2.
    #[must_use]
    fn square(self) -> Self {
        self * self
    }

    /// Returns this field element raised to power 3.
    #[must_use]
    fn cube(self) -> Self {
        self * self * self
    }

    /// Returns this field element raised to `power`, scanning the bits of `power` from the least
    /// significant one.
    #[must_use]
    fn exp(self, power: Self::PositiveInteger) -> Self {
        let zero = Self::PositiveInteger::from(0u32);
        let one = Self::PositiveInteger::from(1u32);

        let (mut result, mut base, mut power) = (Self::ONE, self, power);
        while power != zero {
            if power & one == one {
                result *= base;
            }
            base = base.square();
            power >>= one;
        }
        result
    }

    /// Returns a multiplicative inverse of this field element. If this element is ZERO, ZERO is
    /// returned.
    #[must_use]
    fn inv(self) -> Self;

    // INITIALIZATION
    // --------------------------------------------------------------------------------------------

    /// Returns a vector of length `n` initialized with all zero elements.
    fn zeroed_vector(n: usize) -> Vec<Self> {
        vec![Self::ZERO; n]
    }
}

// STARK FIELD
// ================================================================================================

/// Defines a prime field suitable for FFT-based STARK protocols.
///
/// The modulus must have the form `k * 2^n + 1` for a large `n` so that the multiplicative group
/// contains subgroups of every power-of-two order up to `2^n`.
pub trait StarkField: FieldElement {
    /// Prime modulus of the field.
    const MODULUS: Self::PositiveInteger;

    /// A generator of the multiplicative group of the field.
    const GENERATOR: Self;

    /// Let `MODULUS = k * 2^n + 1` with `k` odd; then TWO_ADICITY is `n`.
    const TWO_ADICITY: u32;

    /// A primitive root of unity of order `2^TWO_ADICITY`, computed as `GENERATOR^k`.
    const TWO_ADIC_ROOT_OF_UNITY: Self;

    /// Returns a primitive root of unity of order `2^n`.
    ///
    /// # Panics
    /// Panics if `n` is zero or greater than `TWO_ADICITY`; callers validate domain sizes before
    /// asking for their generators.
    fn get_root_of_unity(n: u32) -> Self {
        assert!(n != 0, "cannot get root of unity for n = 0");
        assert!(n <= Self::TWO_ADICITY, "order cannot exceed 2^{}", Self::TWO_ADICITY);
        let power = Self::PositiveInteger::from(1u32) << (Self::TWO_ADICITY - n);
        Self::TWO_ADIC_ROOT_OF_UNITY.exp(power)
    }

    /// Returns the canonical integer representation of this field element.
    fn as_int(&self) -> Self::PositiveInteger;
}
