// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! This crate contains the sigstark STARK prover.
//!
//! The prover generates non-interactive proofs that an execution trace satisfies the constraints
//! of a computation described by an [Air]. Verifier randomness is derived from a Fiat-Shamir
//! [Transcript](crypto::Transcript) which absorbs every commitment the prover makes.
//!
//! When the crate is compiled with `concurrent` feature enabled, the low-degree extension of
//! the trace, hashing of extended rows, and FRI folding are performed in multiple threads. The
//! number of threads can be configured via `RAYON_NUM_THREADS` environment variable.
//!
//! # Usage
//! To generate a proof that a computation was executed correctly, you'll need to do the
//! following:
//!
//! 1. Define an *algebraic intermediate representation* (AIR) for your computation. This can be
//!    done by implementing [Air] trait.
//! 2. Execute your computation and record its execution trace in a [TraceTable].
//! 3. Define your prover by implementing [Prover] trait. Then execute [Prover::prove()] function
//!    passing the trace generated in the previous step into it as a parameter. The function will
//!    return an instance of [StarkProof].
//!
//! Before making any commitment, the prover checks that every constraint is satisfied by the
//! trace; a trace which does not satisfy the constraints is rejected with
//! [ProverError::UnsoundWitness].

#![no_std]

#[macro_use]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub use air::{
    proof, proof::StarkProof, Air, AirContext, Assertion, ConfigurationError, EvaluationFrame,
    ProofOptions, TraceInfo,
};
use air::proof::Context;
pub use crypto;
use crypto::ElementHasher;
use fri::FriProver;
pub use math;
use math::{EvaluationDomain, FieldElement, StarkField, ToElements};
use tracing::{event, info_span, instrument, Level};
pub use utils::{
    iterators, ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable,
    SliceReader,
};

mod constraints;
pub use constraints::ConstraintEvaluator;

mod trace;
pub use trace::{TraceLde, TraceTable};

mod errors;
pub use errors::ProverError;

#[cfg(test)]
mod tests;

// PROVER
// ================================================================================================

/// Defines a STARK prover for a computation.
///
/// A STARK prover can be used to generate STARK proofs. The prover contains definitions of a
/// computation's AIR (specified via [Air](Prover::Air) associated type) and hash function to be
/// used (specified via [HashFn](Prover::HashFn) associated type), and exposes
/// [prove()](Prover::prove) method which can be used to build STARK proofs for provided
/// execution traces.
///
/// Thus, once a prover is defined and instantiated, generating a STARK proof consists of two
/// steps:
/// 1. Build an execution trace for a specific instance of the computation.
/// 2. Invoke [Prover::prove()] method generate a proof using the trace from the previous step as a
///    witness.
///
/// The generated proof is built using protocol parameters defined by the [ProofOptions] struct
/// return from [Prover::options] method.
pub trait Prover {
    /// Base field for the computation described by this prover.
    type BaseField: StarkField;

    /// Algebraic intermediate representation (AIR) for the computation described by this prover.
    type Air: Air<BaseField = Self::BaseField>;

    /// Hash function to be used for trace commitments, FRI commitments, and the transcript.
    type HashFn: ElementHasher<BaseField = Self::BaseField>;

    // REQUIRED METHODS
    // --------------------------------------------------------------------------------------------

    /// Returns a set of public inputs for an instance of the computation defined by the provided
    /// trace.
    ///
    /// Public inputs need to be shared with the verifier in order for them to verify a proof.
    fn get_pub_inputs(&self, trace: &TraceTable<Self::BaseField>)
        -> <Self::Air as Air>::PublicInputs;

    /// Returns [ProofOptions] which this prover uses to generate STARK proofs.
    fn options(&self) -> &ProofOptions;

    // PROVIDED METHODS
    // --------------------------------------------------------------------------------------------

    /// Returns a STARK proof attesting to a correct execution of a computation defined by the
    /// provided trace.
    ///
    /// The returned [StarkProof] attests that the specified `trace` is a valid execution trace
    /// of the computation described by [Self::Air](Prover::Air) and generated using some set of
    /// secret and public inputs.
    ///
    /// # Errors
    /// Returns an error if:
    /// * Proof options are not valid for the shape of the `trace`.
    /// * The `trace` does not have the shape expected by the AIR.
    /// * Some constraint of the AIR is not satisfied by the `trace`.
    /// * A commitment could not be built or a challenge could not be drawn.
    #[instrument(skip_all, fields(width = trace.width(), length = trace.length()))]
    fn prove(
        &self,
        trace: TraceTable<Self::BaseField>,
    ) -> Result<StarkProof<Self::BaseField, Self::HashFn>, ProverError> {
        self.options().validate_for::<Self::BaseField>(trace.info())?;
        let proof = self.generate_proof(trace);
        if let Err(err) = &proof {
            event!(Level::DEBUG, %err, "proof generation failed");
        }
        proof
    }

    // HELPER METHODS
    // --------------------------------------------------------------------------------------------

    /// Performs the actual proof generation procedure, generating the proof that the provided
    /// execution `trace` is valid against this prover's AIR.
    #[doc(hidden)]
    fn generate_proof(
        &self,
        trace: TraceTable<Self::BaseField>,
    ) -> Result<StarkProof<Self::BaseField, Self::HashFn>, ProverError> {
        let options = *self.options();

        // 0 ----- instantiate AIR and transcript -------------------------------------------------

        // serialize public inputs; these are the first values absorbed into the transcript
        let pub_inputs = self.get_pub_inputs(&trace);
        let pub_inputs_elements = pub_inputs.to_elements();

        let air = Self::Air::new(*trace.info(), pub_inputs, options);
        if air.trace_info() != trace.info() {
            return Err(ProverError::MalformedTrace(format!(
                "expected a trace of {} columns and {} rows, but received {} columns and {} rows",
                air.trace_width(),
                air.trace_length(),
                trace.width(),
                trace.length()
            )));
        }

        let context = Context::new(*trace.info(), options);
        let mut transcript =
            context.build_transcript::<Self::HashFn, _>(&pub_inputs_elements);

        // 1 ----- check the trace against the constraints ----------------------------------------

        let evaluator = ConstraintEvaluator::new(&air)?;
        info_span!("check_trace", num_constraints = evaluator.num_constraints())
            .in_scope(|| evaluator.check_trace(&trace))?;

        // 2 ----- extend and commit to the execution trace ---------------------------------------

        let trace_length = air.trace_length();
        let lde_domain_size = air.lde_domain_size();
        let domain = info_span!("build_domain", trace_length, lde_domain_size).in_scope(|| {
            EvaluationDomain::new(lde_domain_size, Self::BaseField::ONE)
                .map_err(|err| ProverError::MalformedTrace(format!("{err}")))
        })?;

        let trace_lde = info_span!("commit_to_trace", lde_domain_size)
            .in_scope(|| TraceLde::<Self::BaseField, Self::HashFn>::new(&trace, &domain))?;
        transcript.absorb_commitment(trace_lde.commitment());
        let seed = transcript.seed();

        // 3 ----- evaluate the constraint composition --------------------------------------------

        let alpha: Self::BaseField = transcript.challenge()?;
        info_span!("evaluate_constraints", num_rows = trace_length)
            .in_scope(|| evaluator.check_composition(&trace, alpha))?;

        // 4 ----- compute FRI layers -------------------------------------------------------------

        let beta: Self::BaseField = transcript.challenge()?;
        let mut fri_prover =
            FriProver::<Self::BaseField, Self::HashFn>::new(options.to_fri_options());
        let terminal = info_span!("compute_fri_layers").in_scope(|| {
            let layer_zero = trace_lde.combine_columns(beta);
            fri_prover.build_layers(&mut transcript, layer_zero, domain)
        })?;
        event!(Level::DEBUG, %terminal, num_layers = fri_prover.num_layers(), "built FRI layers");

        // 5 ----- determine query positions ------------------------------------------------------

        let num_positions = options.num_queries();
        let query_positions = {
            let _span = info_span!("determine_query_positions", num_positions).entered();
            transcript.challenge_indices(num_positions, lde_domain_size)?
        };
        event!(Level::DEBUG, "query_positions_len: {}", query_positions.len());

        // 6 ----- build proof object -------------------------------------------------------------

        let _span = info_span!("build_proof_object").entered();

        // every trace row is opened for the constraint check; on the extended domain trace row
        // i sits at position i * blowup
        let constraint_positions = options.trace_positions(trace_length);
        let constraint_queries = trace_lde.query(&constraint_positions)?;
        let trace_queries = trace_lde.query(&query_positions)?;
        let fri_proof = fri_prover.build_proof(&query_positions)?;

        Ok(StarkProof {
            context,
            trace_commitment: *trace_lde.commitment(),
            constraint_queries,
            trace_queries,
            fri_proof,
            seed,
        })
    }
}
