// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use core::fmt;

// CONFIGURATION ERROR
// ================================================================================================
/// Represents an error returned when proof options are invalid.
///
/// These errors are raised before any proof work begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The blowup factor is not a power of two.
    BlowupFactorNotPowerOfTwo(usize),
    /// The blowup factor is outside of the allowed range.
    BlowupFactorOutOfRange { value: usize, min: usize, max: usize },
    /// The number of queries is zero or greater than the maximum allowed.
    NumQueriesOutOfRange { value: usize, max: usize },
    /// The FRI round budget is zero or greater than the maximum allowed.
    RoundBudgetOutOfRange { value: usize, max: usize },
    /// The low-degree extension domain does not fit into the multiplicative subgroups of the field.
    DomainTooLarge { trace_length: usize, blowup_factor: usize, max_log_size: u32 },
}

impl fmt::Display for ConfigurationError {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlowupFactorNotPowerOfTwo(value) => {
                write!(f, "blowup factor must be a power of 2, but was {value}")
            }
            Self::BlowupFactorOutOfRange { value, min, max } => {
                write!(f, "blowup factor must be between {min} and {max}, but was {value}")
            }
            Self::NumQueriesOutOfRange { value, max } => {
                write!(f, "number of queries must be between 1 and {max}, but was {value}")
            }
            Self::RoundBudgetOutOfRange { value, max } => {
                write!(f, "FRI round budget must be between 1 and {max}, but was {value}")
            }
            Self::DomainTooLarge { trace_length, blowup_factor, max_log_size } => {
                write!(f, "extending a trace of length {trace_length} by a factor of {blowup_factor} exceeds the largest domain of 2^{max_log_size} elements")
            }
        }
    }
}

impl core::error::Error for ConfigurationError {}

// ASSERTION ERROR
// ================================================================================================
/// Represents an error returned when an assertion does not fit the execution trace it is
/// placed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssertionError {
    /// The trace does not contain the column specified by the assertion.
    TraceWidthTooShort(usize, usize),
    /// The trace does not contain the step specified by the assertion.
    TraceLengthTooShort(usize, usize),
}

impl fmt::Display for AssertionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TraceWidthTooShort(expected, actual) => {
                write!(f, "expected trace width to be at least {expected}, but was {actual}")
            },
            Self::TraceLengthTooShort(expected, actual) => {
                write!(f, "expected trace length to be at least {expected}, but was {actual}")
            },
        }
    }
}

impl core::error::Error for AssertionError {}
