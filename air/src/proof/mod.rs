// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Contains STARK proof struct and associated components.

use crypto::Hasher;
pub use fri::{FriProof, FriQuery};
use math::StarkField;
use utils::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable};

use crate::{ProofOptions, TraceInfo};

mod context;
pub use context::{Context, DOMAIN_SEPARATOR};

mod queries;
pub use queries::Queries;


// STARK PROOF
// ================================================================================================
/// A proof generated by the sigstark prover.
///
/// A STARK proof contains information proving that a computation was executed correctly. A proof
/// also contains basic metadata for the computation, but neither the definition of the
/// computation itself, nor public inputs consumed by the computation. These need to be provided
/// to the verifier.
///
/// A proof carries commitments and revealed values only. Every challenge used to build it is
/// derived from the Fiat-Shamir transcript, which the verifier rebuilds on its own.
///
/// A proof can be serialized into a sequence of bytes using [to_bytes()](Serializable::to_bytes)
/// and deserialized from a sequence of bytes using [from_bytes()](StarkProof::from_bytes).
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct StarkProof<E: StarkField, H: Hasher> {
    /// Basic metadata about the execution of the computation described by this proof.
    pub context: Context,
    /// Root of the Merkle tree built over the hashed rows of the extended execution trace.
    pub trace_commitment: H::Digest,
    /// Every row of the execution trace, opened in order for the constraint check.
    pub constraint_queries: Queries<E, H>,
    /// Trace rows opened at the FRI query positions.
    pub trace_queries: Queries<E, H>,
    /// Proof of low-degree of the batched extended trace.
    pub fri_proof: FriProof<E, H>,
    /// Transcript state after the public inputs and the trace commitment were absorbed.
    pub seed: H::Digest,
}

impl<E: StarkField, H: Hasher> StarkProof<E, H> {
    /// Returns STARK protocol parameters used to generate this proof.
    pub fn options(&self) -> &ProofOptions {
        self.context.options()
    }

    /// Returns trace info for the computation described by this proof.
    pub fn trace_info(&self) -> &TraceInfo {
        self.context.trace_info()
    }

    /// Returns the size of the low-degree extension domain for the computation described by
    /// this proof.
    pub fn lde_domain_size(&self) -> usize {
        self.context.lde_domain_size()
    }

    /// Returns the number of FRI layers committed to in this proof.
    pub fn num_fri_layers(&self) -> usize {
        self.fri_proof.num_layers()
    }

    // SERIALIZATION / DESERIALIZATION
    // --------------------------------------------------------------------------------------------

    /// Returns a STARK proof read from the specified `bytes`.
    ///
    /// # Errors
    /// Returns an error if a valid STARK proof could not be read from the specified `bytes`,
    /// including when bytes remain after the proof has been read.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DeserializationError> {
        Self::read_from_exact_bytes(bytes)
    }
}

// SERIALIZATION
// ================================================================================================

impl<E: StarkField, H: Hasher> Serializable for StarkProof<E, H> {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.context.write_into(target);
        self.trace_commitment.write_into(target);
        self.constraint_queries.write_into(target);
        self.trace_queries.write_into(target);
        self.fri_proof.write_into(target);
        self.seed.write_into(target);
    }
}

impl<E: StarkField, H: Hasher> Deserializable for StarkProof<E, H> {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        Ok(StarkProof {
            context: source.read()?,
            trace_commitment: source.read()?,
            constraint_queries: source.read()?,
            trace_queries: source.read()?,
            fri_proof: source.read()?,
            seed: source.read()?,
        })
    }
}
