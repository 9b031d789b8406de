// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use alloc::{string::ToString, vec::Vec};

use fri::FriOptions;
use math::StarkField;
use utils::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable};

use crate::{ConfigurationError, TraceInfo};

// PROOF OPTIONS
// ================================================================================================
/// STARK protocol parameters.
///
/// These parameters have a direct impact on proof soundness, proof generation time, and proof
/// size. Specifically:
///
/// 1. Number of queries - the number of positions drawn from the transcript at which the
///    extended trace and every FRI layer are opened. Must be a value between 1 and 128 (both
///    inclusive).
/// 2. Blowup factor - the ratio between the size of the low-degree extension domain and the
///    trace length. Must be a power of two between 2 and 128 (both inclusive).
/// 3. FRI round budget - the maximum number of folding rounds beyond the first one. FRI commits
///    to at most `fri_round_budget + 1` layers. Must be a value between 1 and 32 (both
///    inclusive).
///
/// Options are validated once, when they are created; an instance of this struct always
/// describes a valid configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofOptions {
    num_queries: u8,
    blowup_factor: u8,
    fri_round_budget: u8,
}

// PROOF OPTIONS IMPLEMENTATION
// ================================================================================================
impl ProofOptions {
    // CONSTANTS
    // --------------------------------------------------------------------------------------------

    /// Smallest allowed blowup factor; currently set at 2.
    pub const MIN_BLOWUP_FACTOR: usize = 2;
    /// Largest allowed blowup factor; currently set at 128.
    pub const MAX_BLOWUP_FACTOR: usize = 128;
    /// Largest allowed number of queries; currently set at 128.
    pub const MAX_NUM_QUERIES: usize = 128;
    /// Largest allowed FRI round budget; currently set at 32.
    pub const MAX_FRI_ROUND_BUDGET: usize = 32;

    // CONSTRUCTORS
    // --------------------------------------------------------------------------------------------
    /// Returns a new instance of [ProofOptions] struct constructed from the specified parameters.
    ///
    /// # Errors
    /// Returns an error if:
    /// * `num_queries` is zero or greater than 128.
    /// * `blowup_factor` is not a power of two, or is smaller than 2 or greater than 128.
    /// * `fri_round_budget` is zero or greater than 32.
    pub fn new(
        num_queries: usize,
        blowup_factor: usize,
        fri_round_budget: usize,
    ) -> Result<ProofOptions, ConfigurationError> {
        if num_queries == 0 || num_queries > Self::MAX_NUM_QUERIES {
            return Err(ConfigurationError::NumQueriesOutOfRange {
                value: num_queries,
                max: Self::MAX_NUM_QUERIES,
            });
        }
        if !blowup_factor.is_power_of_two() {
            return Err(ConfigurationError::BlowupFactorNotPowerOfTwo(blowup_factor));
        }
        if !(Self::MIN_BLOWUP_FACTOR..=Self::MAX_BLOWUP_FACTOR).contains(&blowup_factor) {
            return Err(ConfigurationError::BlowupFactorOutOfRange {
                value: blowup_factor,
                min: Self::MIN_BLOWUP_FACTOR,
                max: Self::MAX_BLOWUP_FACTOR,
            });
        }
        if fri_round_budget == 0 || fri_round_budget > Self::MAX_FRI_ROUND_BUDGET {
            return Err(ConfigurationError::RoundBudgetOutOfRange {
                value: fri_round_budget,
                max: Self::MAX_FRI_ROUND_BUDGET,
            });
        }

        Ok(ProofOptions {
            num_queries: num_queries as u8,
            blowup_factor: blowup_factor as u8,
            fri_round_budget: fri_round_budget as u8,
        })
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the number of queries for a STARK proof.
    pub fn num_queries(&self) -> usize {
        self.num_queries as usize
    }

    /// Returns the trace blowup factor for a STARK proof.
    pub fn blowup_factor(&self) -> usize {
        self.blowup_factor as usize
    }

    /// Returns the maximum number of FRI folding rounds beyond the first one.
    pub fn fri_round_budget(&self) -> usize {
        self.fri_round_budget as usize
    }

    /// Returns the positions of the low-degree extension domain at which the rows of a trace
    /// of `trace_length` rows are located.
    pub fn trace_positions(&self, trace_length: usize) -> Vec<usize> {
        (0..trace_length).map(|row| row * self.blowup_factor()).collect()
    }

    /// Returns options for the FRI protocol instantiated with parameters from these proof options.
    pub fn to_fri_options(&self) -> FriOptions {
        FriOptions::new(self.blowup_factor(), self.fri_round_budget())
    }

    // VALIDATION
    // --------------------------------------------------------------------------------------------
    /// Checks that the low-degree extension of a trace described by `trace_info` fits into the
    /// field `B`.
    ///
    /// # Errors
    /// Returns an error if `trace_length * blowup_factor` exceeds `2^TWO_ADICITY` of the field.
    pub fn validate_for<B: StarkField>(
        &self,
        trace_info: &TraceInfo,
    ) -> Result<(), ConfigurationError> {
        let too_large = ConfigurationError::DomainTooLarge {
            trace_length: trace_info.length(),
            blowup_factor: self.blowup_factor(),
            max_log_size: B::TWO_ADICITY,
        };
        let lde_domain_size =
            trace_info.length().checked_mul(self.blowup_factor()).ok_or(too_large)?;
        if lde_domain_size.ilog2() > B::TWO_ADICITY {
            return Err(too_large);
        }
        Ok(())
    }
}

// SERIALIZATION
// ================================================================================================

impl Serializable for ProofOptions {
    /// Serializes `self` and writes the resulting bytes into the `target`.
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        target.write_u8(self.num_queries);
        target.write_u8(self.blowup_factor);
        target.write_u8(self.fri_round_budget);
    }

    fn get_size_hint(&self) -> usize {
        3
    }
}

impl Deserializable for ProofOptions {
    /// Reads proof options from the specified `source` and returns the result.
    ///
    /// # Errors
    /// Returns an error of a valid proof options could not be read from the specified `source`.
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let num_queries = source.read_u8()? as usize;
        let blowup_factor = source.read_u8()? as usize;
        let fri_round_budget = source.read_u8()? as usize;
        ProofOptions::new(num_queries, blowup_factor, fri_round_budget)
            .map_err(|err| DeserializationError::InvalidValue(err.to_string()))
    }
}

// TESTS
// ================================================================================================
