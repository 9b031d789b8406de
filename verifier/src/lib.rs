// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! This crate contains the sigstark STARK verifier.
//!
//! The verifier checks proofs generated by the sigstark prover. It rebuilds the Fiat-Shamir
//! transcript from the public inputs and the commitments in the proof, re-derives every challenge
//! on its own, and then checks:
//!
//! 1. that the proof seed matches the transcript state after the trace commitment;
//! 2. that all opened trace rows are authenticated by the trace commitment;
//! 3. that the first FRI layer is the random linear combination of the opened trace rows, and
//!    that the FRI proof attests to a low-degree vector;
//! 4. that the constraint composition vanishes at every row of the committed trace;
//! 5. that the final FRI polynomial respects the degree bound implied by the trace length.
//!
//! Verification stops at the first failed check. The crate never panics on malformed proofs;
//! every failure is reported as a [VerifierError].

#![no_std]

#[macro_use]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

use alloc::vec::Vec;

pub use air::{
    proof::{Context, Queries, StarkProof},
    Air, AirContext, Assertion, EvaluationFrame, ProofOptions, TraceInfo,
};
pub use crypto;
use crypto::{ElementHasher, MerkleTree, Transcript};
use fri::FriVerifier;
pub use math;
use math::{get_power_series, EvaluationDomain, FieldElement, StarkField, ToElements};
use tracing::{event, info_span, instrument, Level};
pub use utils::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable};

mod errors;
pub use errors::VerifierError;

#[cfg(test)]
mod tests;

// VERIFIER
// ================================================================================================

/// Verifies that the specified computation was executed correctly against the specified inputs.
///
/// Specifically, verifies that a computation specified by the `AIR` type parameter was executed
/// against the provided public inputs and produced a valid execution trace. The `proof` is
/// accepted only if it was generated with exactly the `acceptable_options`.
///
/// # Errors
/// Returns an error if the provided proof does not prove a correct execution of the computation,
/// or if the proof was generated with options other than `acceptable_options`.
#[instrument(skip_all)]
pub fn verify<AIR, HashFn>(
    proof: StarkProof<AIR::BaseField, HashFn>,
    pub_inputs: AIR::PublicInputs,
    acceptable_options: &ProofOptions,
) -> Result<(), VerifierError>
where
    AIR: Air,
    HashFn: ElementHasher<BaseField = AIR::BaseField>,
{
    let result = perform_verification::<AIR, HashFn>(proof, pub_inputs, acceptable_options);
    match &result {
        Ok(_) => event!(Level::DEBUG, "proof accepted"),
        Err(err) => event!(Level::DEBUG, %err, "proof rejected"),
    }
    result
}

// VERIFICATION PROCEDURE
// ================================================================================================

/// Performs the actual verification, stopping at the first failed check.
fn perform_verification<AIR, HashFn>(
    proof: StarkProof<AIR::BaseField, HashFn>,
    pub_inputs: AIR::PublicInputs,
    acceptable_options: &ProofOptions,
) -> Result<(), VerifierError>
where
    AIR: Air,
    HashFn: ElementHasher<BaseField = AIR::BaseField>,
{
    let StarkProof {
        context,
        trace_commitment,
        constraint_queries,
        trace_queries,
        fri_proof,
        seed,
    } = proof;
    let options = *context.options();
    let trace_info = *context.trace_info();

    // 0 ----- check proof context against the verifier configuration -----------------------------

    if &options != acceptable_options {
        return Err(VerifierError::InconsistentOptions);
    }
    options
        .validate_for::<AIR::BaseField>(&trace_info)
        .map_err(|_| VerifierError::InconsistentOptions)?;

    let pub_inputs_elements = pub_inputs.to_elements();
    let air = AIR::new(trace_info, pub_inputs, options);
    if air.trace_info() != &trace_info {
        return Err(VerifierError::InconsistentOptions);
    }
    let assertions = air
        .get_validated_assertions()
        .map_err(|err| VerifierError::MalformedProof(format!("{err}")))?;

    let num_queries = options.num_queries();
    let trace_length = trace_info.length();
    check_query_shape(&constraint_queries, trace_length, trace_info.width(), "constraint")?;
    check_query_shape(&trace_queries, num_queries, trace_info.width(), "trace")?;

    // 1 ----- check the seed ---------------------------------------------------------------------

    let mut transcript: Transcript<HashFn> = context.build_transcript(&pub_inputs_elements);
    transcript.absorb_commitment(&trace_commitment);
    if transcript.seed() != seed {
        return Err(VerifierError::SeedMismatch);
    }

    // 2 ----- re-derive challenges and authenticate the trace rows -------------------------------

    let lde_domain_size = air.lde_domain_size();
    let lde_depth = lde_domain_size.ilog2() as usize;
    let alpha: AIR::BaseField = transcript.challenge()?;
    let beta: AIR::BaseField = transcript.challenge()?;

    let constraint_positions = options.trace_positions(trace_length);
    info_span!("check_constraint_openings", num_rows = trace_length).in_scope(|| {
        check_openings(&constraint_queries, &constraint_positions, &trace_commitment, lde_depth)
    })?;

    // 3 ----- verify the FRI proof ---------------------------------------------------------------

    let domain = EvaluationDomain::new(lde_domain_size, AIR::BaseField::ONE)
        .map_err(|err| VerifierError::MalformedProof(format!("{err}")))?;
    let fri_verifier = FriVerifier::<AIR::BaseField, HashFn>::new(
        &mut transcript,
        fri_proof,
        options.to_fri_options(),
        domain,
    )?;
    let query_positions = transcript.challenge_indices(num_queries, lde_domain_size)?;

    info_span!("verify_fri_proof", num_layers = fri_verifier.num_layers()).in_scope(|| {
        check_openings(&trace_queries, &query_positions, &trace_commitment, lde_depth)?;

        let coefficients = get_power_series(beta, trace_info.width());
        let layer_zero: Vec<AIR::BaseField> =
            trace_queries.rows().map(|row| combine_row(row, &coefficients)).collect();
        fri_verifier.verify(&query_positions, &layer_zero).map_err(VerifierError::from)
    })?;

    // 4 ----- check constraints at every trace row -----------------------------------------------

    info_span!("check_constraints", num_rows = trace_length).in_scope(|| {
        let rows: Vec<&[AIR::BaseField]> = constraint_queries.rows().collect();
        for row in 0..trace_length {
            let next = rows[(row + 1) % trace_length];
            let frame = EvaluationFrame::from_rows(rows[row].to_vec(), next.to_vec());
            if air.evaluate_composition(&frame, row, &assertions, alpha) != AIR::BaseField::ZERO {
                return Err(VerifierError::ConstraintNotSatisfied { row });
            }
        }
        Ok(())
    })?;

    // 5 ----- check the degree of the final polynomial -------------------------------------------

    fri_verifier.check_final_degree().map_err(VerifierError::from)
}

// HELPER FUNCTIONS
// ================================================================================================

/// Checks that `queries` open exactly `num_rows` rows of the expected width.
fn check_query_shape<E: StarkField, H: ElementHasher<BaseField = E>>(
    queries: &Queries<E, H>,
    num_rows: usize,
    width: usize,
    kind: &str,
) -> Result<(), VerifierError> {
    if queries.num_rows() != num_rows {
        return Err(VerifierError::MalformedProof(format!(
            "expected {num_rows} {kind} queries, but found {}",
            queries.num_rows()
        )));
    }
    if queries.width() != width {
        return Err(VerifierError::MalformedProof(format!(
            "expected {kind} queries of width {width}, but found width {}",
            queries.width()
        )));
    }
    Ok(())
}

/// Checks that each opened row is authenticated against the trace commitment at the expected
/// position by a path of the specified `depth`.
fn check_openings<E: StarkField, H: ElementHasher<BaseField = E>>(
    queries: &Queries<E, H>,
    positions: &[usize],
    commitment: &H::Digest,
    depth: usize,
) -> Result<(), VerifierError> {
    let is_valid = queries.rows().zip(queries.proofs()).zip(positions).all(
        |((row, proof), &position)| {
            proof.index() == position
                && proof.depth() == depth
                && *proof.leaf() == H::hash_elements(row)
                && MerkleTree::<H>::verify(commitment, proof)
        },
    );
    if is_valid && queries.num_rows() == positions.len() {
        Ok(())
    } else {
        Err(VerifierError::TraceQueryDoesNotMatchCommitment)
    }
}

/// Returns `sum_j coefficients[j] * row[j]`.
fn combine_row<E: FieldElement>(row: &[E], coefficients: &[E]) -> E {
    row.iter().zip(coefficients).fold(E::ZERO, |acc, (&value, &k)| acc + k * value)
}
