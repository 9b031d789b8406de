// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use utils::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable};

// TRACE INFO
// ================================================================================================
/// Information about a specific execution trace.
///
/// Trace info consists of the number of columns in the trace and the number of rows in it.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TraceInfo {
    width: usize,
    length: usize,
}

impl TraceInfo {
    /// Smallest allowed execution trace length; currently set at 8.
    pub const MIN_TRACE_LENGTH: usize = 8;
    /// Maximum number of columns in an execution trace; currently set at 255.
    pub const MAX_TRACE_WIDTH: usize = 255;

    // CONSTRUCTORS
    // --------------------------------------------------------------------------------------------

    /// Creates a new [TraceInfo] from the specified trace width and length.
    ///
    /// # Panics
    /// Panics if:
    /// * Trace width is zero or greater than 255.
    /// * Trace length is smaller than 8 or is not a power of two.
    pub fn new(width: usize, length: usize) -> Self {
        assert!(width > 0, "trace width must be greater than 0");
        assert!(
            width <= Self::MAX_TRACE_WIDTH,
            "trace width cannot be greater than {}, but was {}",
            Self::MAX_TRACE_WIDTH,
            width
        );
        assert!(
            length >= Self::MIN_TRACE_LENGTH,
            "trace length must be at least {}, but was {}",
            Self::MIN_TRACE_LENGTH,
            length
        );
        assert!(length.is_power_of_two(), "trace length must be a power of two, but was {length}");

        TraceInfo { width, length }
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the total number of columns in an execution trace.
    ///
    /// This is guaranteed to be between 1 and 255.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of steps in an execution trace.
    ///
    /// This is guaranteed to be a power of two greater than or equal to 8.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Returns the size of the low-degree extension domain for the specified blowup factor.
    pub fn lde_domain_size(&self, blowup_factor: usize) -> usize {
        self.length * blowup_factor
    }
}

// SERIALIZATION
// ================================================================================================

impl Serializable for TraceInfo {
    /// Serializes `self` and writes the resulting bytes into the `target`.
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        // width fits into a byte and length is stored as a power of two
        target.write_u8(self.width as u8);
        target.write_u8(self.length.ilog2() as u8);
    }
}

impl Deserializable for TraceInfo {
    /// Reads [TraceInfo] from the specified `source` and returns the result.
    ///
    /// # Errors
    /// Returns an error of a valid [TraceInfo] struct could not be read from the specified
    /// `source`.
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let width = source.read_u8()? as usize;
        if width == 0 {
            return Err(DeserializationError::InvalidValue(
                "trace width must be greater than zero".into(),
            ));
        }

        let log_length = source.read_u8()? as u32;
        if log_length >= usize::BITS {
            return Err(DeserializationError::InvalidValue(format!(
                "trace length cannot be 2^{log_length}"
            )));
        }
        let length = 1usize << log_length;
        if length < Self::MIN_TRACE_LENGTH {
            return Err(DeserializationError::InvalidValue(format!(
                "trace length must be at least {}, but was {}",
                Self::MIN_TRACE_LENGTH,
                length
            )));
        }

        Ok(TraceInfo { width, length })
    }
}
