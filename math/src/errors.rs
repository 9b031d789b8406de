// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use core::fmt;

// DOMAIN ERROR
// ================================================================================================

/// Defines errors which can occur when constructing an [EvaluationDomain](crate::EvaluationDomain).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Domain size was not a power of two.
    SizeNotPowerOfTwo(usize),
    /// The field has no multiplicative subgroup of the requested size.
    SizeTooLarge { size: usize, max_log_size: u32 },
    /// Domain offset was zero.
    ZeroOffset,
}

impl fmt::Display for DomainError {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeNotPowerOfTwo(size) => {
                write!(f, "domain size must be a power of two, but was {size}")
            }
            Self::SizeTooLarge { size, max_log_size } => {
                write!(f, "domain size cannot exceed 2^{max_log_size}, but was {size}")
            }
            Self::ZeroOffset => {
                write!(f, "domain offset cannot be zero")
            }
        }
    }
}

impl core::error::Error for DomainError {}
