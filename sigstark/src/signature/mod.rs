// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Proofs that a private witness binds a message hash, a public key, and a signature.
//!
//! The binding relation is expressed by [SignatureAir]: starting from the sum of the message
//! hash and the public key, an accumulator absorbs both private witness values once per step and
//! must end at the signature. The verifier learns the public input and that some pair of nonzero
//! values satisfies `signature = message_hash + public_key + 7 * (w0 + w1)`, but not the values
//! themselves.

use alloc::vec::Vec;

use crate::{
    crypto::ElementHasher,
    math::{fields::f64::BaseElement, ToElements},
    verify, ProofOptions, Prover, ProverError, StarkProof,
};
use tracing::{event, instrument, Level};

mod air;
pub use self::air::{SignatureAir, TRACE_LENGTH, TRACE_WIDTH};

mod prover;
pub use self::prover::SignatureProver;


// PUBLIC INPUTS
// ================================================================================================

/// Public input of a signature-binding proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicInputs {
    pub message_hash: BaseElement,
    pub public_key: BaseElement,
    pub signature: BaseElement,
}

impl PublicInputs {
    pub fn new(message_hash: BaseElement, public_key: BaseElement, signature: BaseElement) -> Self {
        Self { message_hash, public_key, signature }
    }
}

impl ToElements<BaseElement> for PublicInputs {
    fn to_elements(&self) -> Vec<BaseElement> {
        vec![self.message_hash, self.public_key, self.signature]
    }
}

// PRIVATE WITNESS
// ================================================================================================

/// Private witness of a signature-binding proof.
///
/// A valid witness consists of exactly [PrivateWitness::NUM_VALUES] nonzero field elements
/// `[w0, w1]` with `signature = message_hash + public_key + 7 * (w0 + w1)`. The number of values
/// is checked when the execution trace is built, so a witness of any length can be constructed.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateWitness(Vec<BaseElement>);

impl PrivateWitness {
    /// Number of values in a valid witness.
    pub const NUM_VALUES: usize = 2;

    pub fn new(values: Vec<BaseElement>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[BaseElement] {
        &self.0
    }
}

impl core::fmt::Debug for PrivateWitness {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "PrivateWitness({} values)", self.0.len())
    }
}

// ENTRY POINTS
// ================================================================================================

/// Returns a proof that `private_witness` binds the values of `public_input`.
///
/// # Errors
/// Returns an error if:
/// * The witness does not contain exactly two values.
/// * A witness value is zero, or the witness does not lead the accumulator to the signature.
/// * The `options` are not valid for the execution trace.
#[instrument(skip_all)]
pub fn generate_proof<H: ElementHasher<BaseField = BaseElement>>(
    public_input: &PublicInputs,
    private_witness: &PrivateWitness,
    options: ProofOptions,
) -> Result<StarkProof<BaseElement, H>, ProverError> {
    let prover = SignatureProver::<H>::new(options);
    let trace = prover.build_trace(public_input, private_witness)?;
    let proof = prover.prove(trace)?;
    event!(Level::DEBUG, num_fri_layers = proof.num_fri_layers(), "generated proof");
    Ok(proof)
}

/// Returns `true` if `proof` attests that some private witness binds the values of
/// `public_input`, and the proof was generated with the specified `options`.
///
/// The reason a proof is rejected is logged at `DEBUG` level.
#[instrument(skip_all)]
pub fn verify_proof<H: ElementHasher<BaseField = BaseElement>>(
    public_input: &PublicInputs,
    proof: StarkProof<BaseElement, H>,
    options: &ProofOptions,
) -> bool {
    verify::<SignatureAir, H>(proof, *public_input, options).is_ok()
}
