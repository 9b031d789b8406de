// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use crypto::{Hasher, Transcript, TranscriptTag};
use math::FieldElement;
use utils::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable};

use crate::{ProofOptions, TraceInfo};

// CONSTANTS
// ================================================================================================

/// Domain separator absorbed first into every transcript built for a STARK proof.
pub const DOMAIN_SEPARATOR: &[u8] = b"sigstark-v1";

// PROOF CONTEXT
// ================================================================================================
/// Basic metadata about a specific execution of a computation.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Context {
    trace_info: TraceInfo,
    options: ProofOptions,
}

impl Context {
    // CONSTRUCTOR
    // --------------------------------------------------------------------------------------------
    /// Creates a new context for a computation described by the specified trace info and proof
    /// options.
    pub fn new(trace_info: TraceInfo, options: ProofOptions) -> Self {
        Context { trace_info, options }
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns execution trace info for the computation described by this context.
    pub fn trace_info(&self) -> &TraceInfo {
        &self.trace_info
    }

    /// Returns the size of the low-degree extension domain for the computation described by
    /// this context.
    pub fn lde_domain_size(&self) -> usize {
        self.trace_info.lde_domain_size(self.options.blowup_factor())
    }

    /// Returns proof options which were used to generate a proof in this context.
    pub fn options(&self) -> &ProofOptions {
        &self.options
    }

    // TRANSCRIPT
    // --------------------------------------------------------------------------------------------

    /// Returns a new transcript which has absorbed the domain separator, the `public_inputs`,
    /// and this context.
    ///
    /// The prover and the verifier both start from this transcript, so a proof generated for
    /// one set of public inputs or parameters cannot be verified against another.
    pub fn build_transcript<H: Hasher, E: FieldElement>(
        &self,
        public_inputs: &[E],
    ) -> Transcript<H> {
        let mut transcript = Transcript::new(DOMAIN_SEPARATOR, public_inputs);
        transcript.absorb_element(TranscriptTag::PublicInput, self);
        transcript
    }
}

// SERIALIZATION
// ================================================================================================

impl Serializable for Context {
    /// Serializes `self` and writes the resulting bytes into the `target`.
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.trace_info.write_into(target);
        self.options.write_into(target);
    }
}

impl Deserializable for Context {
    /// Reads proof context from the specified `source` and returns the result.
    ///
    /// # Errors
    /// Returns an error of a valid Context struct could not be read from the specified `source`.
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let trace_info = TraceInfo::read_from(source)?;
        let options = ProofOptions::read_from(source)?;
        Ok(Context { trace_info, options })
    }
}
