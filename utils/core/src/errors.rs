// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use alloc::string::String;
use core::fmt;

// DESERIALIZATION ERROR
// ================================================================================================

/// Defines errors which can occur while decoding proofs and their components from bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeserializationError {
    /// Bytes in the input do not represent a valid value.
    InvalidValue(String),
    /// The input ended before a complete value could be read.
    UnexpectedEOF,
    /// A value was decoded but trailing bytes remain in the input.
    UnconsumedBytes,
    /// An unknown error has occurred.
    UnknownError(String),
}

impl fmt::Display for DeserializationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue(msg) => write!(f, "invalid value: {msg}"),
            Self::UnexpectedEOF => write!(f, "unexpected end of input"),
            Self::UnconsumedBytes => write!(f, "input contains bytes after the decoded value"),
            Self::UnknownError(msg) => write!(f, "unknown error: {msg}"),
        }
    }
}

impl core::error::Error for DeserializationError {}
