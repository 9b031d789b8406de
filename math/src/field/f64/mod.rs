// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! An implementation of a 64-bit STARK-friendly prime field with modulus $2^{64} - 2^{32} + 1$.
//!
//! Elements are kept in canonical form, i.e. as integers in $[0, p)$. Products are computed in
//! 128 bits and reduced using the identities $2^{64} \equiv 2^{32} - 1$ and
//! $2^{96} \equiv -1 \pmod p$, so no intermediate result ever wraps silently.
//!
//! The multiplicative group has two-adicity 32, so FFT domains of up to $2^{32}$ elements exist.

use alloc::string::String;
use core::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter},
    hash::{Hash, Hasher},
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use utils::{
    ByteReader, ByteWriter, Deserializable, DeserializationError, Randomizable, Serializable,
};

use super::{FieldElement, StarkField};

#[cfg(test)]
mod tests;

// CONSTANTS
// ================================================================================================

/// Field modulus = 2^64 - 2^32 + 1
const M: u64 = 0xffffffff00000001;

/// 2^64 mod M = 2^32 - 1
const EPSILON: u64 = 0xffffffff;

/// Number of bytes needed to represent field element
const ELEMENT_BYTES: usize = core::mem::size_of::<u64>();

// FIELD ELEMENT
// ================================================================================================

/// Represents a base field element as its canonical residue in [0, M).
#[derive(Copy, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u64", into = "u64"))]
pub struct BaseElement(u64);

impl BaseElement {
    /// Creates a new field element from the provided `value`.
    ///
    /// If the value is greater than or equal to the field modulus, it is reduced.
    pub const fn new(value: u64) -> BaseElement {
        if value >= M {
            Self(value - M)
        } else {
            Self(value)
        }
    }

    /// Returns canonical integer representation of this field element.
    #[inline(always)]
    pub const fn as_int(&self) -> u64 {
        self.0
    }
}

impl FieldElement for BaseElement {
    type PositiveInteger = u64;

    const ZERO: Self = Self::new(0);
    const ONE: Self = Self::new(1);

    const ELEMENT_BYTES: usize = ELEMENT_BYTES;

    #[inline]
    fn double(self) -> Self {
        self + self
    }

    #[inline]
    fn inv(self) -> Self {
        // x^(M - 2) = x^-1 for any non-zero x; zero maps to zero
        self.exp(M - 2)
    }
}

impl StarkField for BaseElement {
    /// sage: MODULUS = 2^64 - 2^32 + 1 \
    /// sage: GF(MODULUS).is_prime_field() \
    /// True
    const MODULUS: Self::PositiveInteger = M;

    /// sage: GF(MODULUS).primitive_element() \
    /// 7
    const GENERATOR: Self = Self::new(7);

    /// sage: is_odd((MODULUS - 1) / 2^32) \
    /// True
    const TWO_ADICITY: u32 = 32;

    /// Root of unity of order 2^32, equal to 7^((MODULUS - 1) / 2^32).
    const TWO_ADIC_ROOT_OF_UNITY: Self = Self::new(7277203076849721926);

    #[inline]
    fn as_int(&self) -> Self::PositiveInteger {
        self.0
    }
}

impl Randomizable for BaseElement {
    const VALUE_SIZE: usize = ELEMENT_BYTES;

    /// Interprets the first 8 bytes as a little-endian integer; values at or above the modulus
    /// are rejected rather than reduced so that sampled elements stay uniform.
    fn from_random_bytes(bytes: &[u8]) -> Option<Self> {
        let value = u64::from_random_bytes(bytes)?;
        Self::try_from(value).ok()
    }
}

impl Debug for BaseElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{self}")
    }
}

impl Display for BaseElement {
    fn fmt(&self, f: &mut Formatter) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// EQUALITY AND ORDERING
// ================================================================================================

impl PartialEq for BaseElement {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for BaseElement {}

impl Hash for BaseElement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl PartialOrd for BaseElement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BaseElement {
    /// Orders elements by their canonical residue in [0, M).
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

// OVERLOADED OPERATORS
// ================================================================================================

impl Add for BaseElement {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        let (sum, over) = self.0.overflowing_add(rhs.0);
        if over {
            // a + b - 2^64 < M - 2^32, so adding 2^64 mod M cannot overflow again
            Self(sum + EPSILON)
        } else if sum >= M {
            Self(sum - M)
        } else {
            Self(sum)
        }
    }
}

impl AddAssign for BaseElement {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs
    }
}

impl Sub for BaseElement {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        let (diff, under) = self.0.overflowing_sub(rhs.0);
        if under {
            Self(diff.wrapping_sub(EPSILON))
        } else {
            Self(diff)
        }
    }
}

impl SubAssign for BaseElement {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul for BaseElement {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self(reduce128((self.0 as u128) * (rhs.0 as u128)))
    }
}

impl MulAssign for BaseElement {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs
    }
}

impl Div for BaseElement {
    type Output = Self;

    #[inline]
    #[allow(clippy::suspicious_arithmetic_impl)]
    fn div(self, rhs: Self) -> Self {
        self * rhs.inv()
    }
}

impl DivAssign for BaseElement {
    #[inline]
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs
    }
}

impl Neg for BaseElement {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::ZERO - self
    }
}

// TYPE CONVERSIONS
// ================================================================================================

impl From<u8> for BaseElement {
    fn from(value: u8) -> Self {
        Self::new(value.into())
    }
}

impl From<u16> for BaseElement {
    fn from(value: u16) -> Self {
        Self::new(value.into())
    }
}

impl From<u32> for BaseElement {
    fn from(value: u32) -> Self {
        Self::new(value.into())
    }
}

impl TryFrom<u64> for BaseElement {
    type Error = String;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value >= M {
            Err(format!(
                "invalid field element: value {value} is greater than or equal to the field modulus"
            ))
        } else {
            Ok(Self(value))
        }
    }
}

impl From<BaseElement> for u64 {
    fn from(value: BaseElement) -> Self {
        value.as_int()
    }
}

// SERIALIZATION / DESERIALIZATION
// ================================================================================================

impl Serializable for BaseElement {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        target.write_bytes(&self.0.to_le_bytes());
    }

    fn get_size_hint(&self) -> usize {
        ELEMENT_BYTES
    }
}

impl Deserializable for BaseElement {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let value = source.read_u64()?;
        Self::try_from(value).map_err(DeserializationError::InvalidValue)
    }
}

// HELPER FUNCTIONS
// ================================================================================================

/// Reduces a 128-bit value modulo M.
///
/// Writing x = x_lo + 2^64 * (x_hi_lo + 2^32 * x_hi_hi), we have
/// x = x_lo - x_hi_hi + x_hi_lo * (2^32 - 1) mod M.
#[inline(always)]
const fn reduce128(x: u128) -> u64 {
    let x_lo = x as u64;
    let x_hi = (x >> 64) as u64;
    let x_hi_hi = x_hi >> 32;
    let x_hi_lo = x_hi & EPSILON;

    let (mut t0, borrow) = x_lo.overflowing_sub(x_hi_hi);
    if borrow {
        // t0 wrapped past 2^64 - 2^32, so this cannot underflow
        t0 = t0.wrapping_sub(EPSILON);
    }
    let t1 = x_hi_lo * EPSILON;

    let (mut t2, carry) = t0.overflowing_add(t1);
    if carry {
        t2 = t2.wrapping_add(EPSILON);
    }

    if t2 >= M {
        t2 - M
    } else {
        t2
    }
}
