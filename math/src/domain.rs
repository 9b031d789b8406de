// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use alloc::vec::Vec;

use crate::{errors::DomainError, field::StarkField, utils::get_power_series_with_offset};

// EVALUATION DOMAIN
// ================================================================================================

/// A multiplicative coset `offset * <g>` of power-of-two size over which polynomials are
/// evaluated.
///
/// The generator `g` is always the primitive root of unity of order `size`, so the domain
/// elements are `offset * g^i` for `i` in `0..size`. Both the low-degree extension domain and
/// every FRI layer domain are values of this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationDomain<E: StarkField> {
    size: usize,
    generator: E,
    offset: E,
}

impl<E: StarkField> EvaluationDomain<E> {
    // CONSTRUCTORS
    // --------------------------------------------------------------------------------------------

    /// Returns a new domain of the specified `size` shifted by `offset`.
    ///
    /// # Errors
    /// Returns an error if:
    /// * `size` is not a power of two or is smaller than 2;
    /// * the field has no subgroup of order `size`;
    /// * `offset` is zero.
    pub fn new(size: usize, offset: E) -> Result<Self, DomainError> {
        if !size.is_power_of_two() || size < 2 {
            return Err(DomainError::SizeNotPowerOfTwo(size));
        }
        if size.ilog2() > E::TWO_ADICITY {
            return Err(DomainError::SizeTooLarge { size, max_log_size: E::TWO_ADICITY });
        }
        if offset == E::ZERO {
            return Err(DomainError::ZeroOffset);
        }

        let generator = E::get_root_of_unity(size.ilog2());
        Ok(EvaluationDomain { size, generator, offset })
    }

    /// Returns the domain obtained by squaring every element of this domain.
    ///
    /// The result has half the size; its generator and offset are squares of this domain's
    /// generator and offset. Returns `None` when this domain has only 2 elements.
    pub fn folded(&self) -> Option<Self> {
        if self.size <= 2 {
            return None;
        }
        Some(EvaluationDomain {
            size: self.size / 2,
            generator: self.generator.square(),
            offset: self.offset.square(),
        })
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the number of elements in this domain.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the primitive root of unity of order `size`.
    pub fn generator(&self) -> E {
        self.generator
    }

    /// Returns the coset offset of this domain.
    pub fn offset(&self) -> E {
        self.offset
    }

    /// Returns the domain element `offset * g^index`.
    ///
    /// Indexes wrap around the domain size.
    pub fn element(&self, index: usize) -> E {
        let index = (index % self.size) as u64;
        self.offset * self.generator.exp(index.into())
    }

    /// Returns all domain elements in natural order.
    pub fn elements(&self) -> Vec<E> {
        get_power_series_with_offset(self.generator, self.offset, self.size)
    }

    /// Returns the base-2 logarithm of the domain size.
    pub fn log_size(&self) -> u32 {
        self.size.ilog2()
    }
}

// TESTS
// ================================================================================================
