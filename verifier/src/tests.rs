// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use alloc::vec::Vec;

use crypto::{hashers::Blake3_256, ByteDigest, Digest};
use fri::{FriError, FriProof, FriProver};
use math::{fields::f64::BaseElement, EvaluationDomain, FieldElement, ToElements};
use prover::{Prover, TraceLde, TraceTable};

use super::{
    verify, Air, AirContext, Assertion, Context, EvaluationFrame, ProofOptions, Queries,
    Serializable, StarkProof, TraceInfo, VerifierError,
};

type Blake3 = Blake3_256<BaseElement>;

// VERIFICATION TESTS
// ================================================================================================

#[test]
fn verify_valid_proof() {
    let (proof, inputs) = prove(build_trace(8, 3));
    assert_eq!(Ok(()), verify::<CubeAir, Blake3>(proof, inputs, &build_options()));

    let (proof, inputs) = prove(build_trace(32, 7));
    assert_eq!(Ok(()), verify::<CubeAir, Blake3>(proof, inputs, &build_options()));
}

#[test]
fn verify_deserialized_proof() {
    let (proof, inputs) = prove(build_trace(16, 3));
    let proof = StarkProof::<BaseElement, Blake3>::from_bytes(&proof.to_bytes()).unwrap();
    assert_eq!(Ok(()), verify::<CubeAir, Blake3>(proof, inputs, &build_options()));
}

#[test]
fn reject_unexpected_options() {
    let (proof, inputs) = prove(build_trace(8, 3));
    let options = ProofOptions::new(16, 4, 3).unwrap();
    assert_eq!(
        Err(VerifierError::InconsistentOptions),
        verify::<CubeAir, Blake3>(proof, inputs, &options)
    );
}

#[test]
fn reject_unexpected_trace_shape() {
    let (mut proof, inputs) = prove(build_trace(8, 3));
    proof.context = Context::new(TraceInfo::new(3, 8), build_options());
    assert_eq!(
        Err(VerifierError::InconsistentOptions),
        verify::<CubeAir, Blake3>(proof, inputs, &build_options())
    );
}

#[test]
fn reject_wrong_public_inputs() {
    let (proof, inputs) = prove(build_trace(8, 3));
    let inputs = CubeInputs { start: inputs.start, result: inputs.result + BaseElement::ONE };
    assert_eq!(
        Err(VerifierError::SeedMismatch),
        verify::<CubeAir, Blake3>(proof, inputs, &build_options())
    );
}

#[test]
fn reject_tampered_seed_and_commitment() {
    let (mut proof, inputs) = prove(build_trace(8, 3));
    proof.seed = increment_digest(&proof.seed);
    assert_eq!(
        Err(VerifierError::SeedMismatch),
        verify::<CubeAir, Blake3>(proof, inputs, &build_options())
    );

    let (mut proof, inputs) = prove(build_trace(8, 3));
    proof.trace_commitment = increment_digest(&proof.trace_commitment);
    assert_eq!(
        Err(VerifierError::SeedMismatch),
        verify::<CubeAir, Blake3>(proof, inputs, &build_options())
    );
}

#[test]
fn reject_tampered_trace_openings() {
    let (mut proof, inputs) = prove(build_trace(8, 3));
    proof.trace_queries = tamper_row(&proof.trace_queries, 2);
    assert_eq!(
        Err(VerifierError::TraceQueryDoesNotMatchCommitment),
        verify::<CubeAir, Blake3>(proof, inputs, &build_options())
    );

    let (mut proof, inputs) = prove(build_trace(8, 3));
    proof.constraint_queries = tamper_row(&proof.constraint_queries, 5);
    assert_eq!(
        Err(VerifierError::TraceQueryDoesNotMatchCommitment),
        verify::<CubeAir, Blake3>(proof, inputs, &build_options())
    );
}

#[test]
fn reject_missing_trace_openings() {
    let (mut proof, inputs) = prove(build_trace(8, 3));
    let rows: Vec<Vec<BaseElement>> =
        proof.trace_queries.rows().skip(1).map(|row| row.to_vec()).collect();
    let proofs = proof.trace_queries.proofs()[1..].to_vec();
    proof.trace_queries = Queries::new(rows, proofs);
    assert!(matches!(
        verify::<CubeAir, Blake3>(proof, inputs, &build_options()),
        Err(VerifierError::MalformedProof(_))
    ));
}

#[test]
fn reject_tampered_fri_proof() {
    // layer commitment
    let (mut proof, inputs) = prove(build_trace(8, 3));
    let (mut commitments, final_poly, queries) = proof.fri_proof.into_parts();
    commitments[1] = increment_digest(&commitments[1]);
    proof.fri_proof = FriProof::new(commitments, final_poly, queries);
    assert!(verify::<CubeAir, Blake3>(proof, inputs, &build_options()).is_err());

    // query value
    let (mut proof, inputs) = prove(build_trace(8, 3));
    let (commitments, final_poly, mut queries) = proof.fri_proof.into_parts();
    queries[0].value += BaseElement::ONE;
    proof.fri_proof = FriProof::new(commitments, final_poly, queries);
    assert_eq!(
        Err(VerifierError::FriVerificationFailed(FriError::LayerCommitmentMismatch { layer: 0 })),
        verify::<CubeAir, Blake3>(proof, inputs, &build_options())
    );

    // final polynomial
    let (mut proof, inputs) = prove(build_trace(8, 3));
    let (commitments, mut final_poly, queries) = proof.fri_proof.into_parts();
    final_poly[0] += BaseElement::ONE;
    proof.fri_proof = FriProof::new(commitments, final_poly, queries);
    assert!(verify::<CubeAir, Blake3>(proof, inputs, &build_options()).is_err());
}

#[test]
fn reject_fri_layer_unrelated_to_trace() {
    // the first FRI layer is a valid low-degree vector, but not the combination of trace columns
    let trace = build_trace(8, 3);
    let inputs = get_inputs(&trace);
    let proof = build_proof_unchecked(&trace, &inputs, BaseElement::ONE);
    assert_eq!(
        Err(VerifierError::LayerZeroMismatch),
        verify::<CubeAir, Blake3>(proof, inputs, &build_options())
    );
}

#[test]
fn reject_unsatisfied_constraints() {
    // the key column changes on every step, so every transition but the last one is violated
    let trace = build_trace(8, 3);
    let mut columns = trace.columns().to_vec();
    for (step, value) in columns[1].iter_mut().enumerate() {
        *value += BaseElement::new(step as u64);
    }
    let trace = TraceTable::from_columns(columns).unwrap();
    let inputs = get_inputs(&trace);

    let proof = build_proof_unchecked(&trace, &inputs, BaseElement::ZERO);
    assert_eq!(
        Err(VerifierError::ConstraintNotSatisfied { row: 0 }),
        verify::<CubeAir, Blake3>(proof, inputs, &build_options())
    );
}

#[test]
fn reject_invalid_last_row() {
    // only the transition into the last row is broken; the result is taken from the broken
    // trace, so every assertion holds
    for delta in 1..=16 {
        let trace = build_trace(8, 3);
        let mut columns = trace.columns().to_vec();
        columns[0][7] += BaseElement::new(delta);
        let trace = TraceTable::from_columns(columns).unwrap();
        let inputs = get_inputs(&trace);

        let proof = build_proof_unchecked(&trace, &inputs, BaseElement::ZERO);
        assert_eq!(
            Err(VerifierError::ConstraintNotSatisfied { row: 6 }),
            verify::<CubeAir, Blake3>(proof, inputs, &build_options())
        );
    }
}

// CUBE AIR
// ================================================================================================

/// Repeatedly cubes a value and adds a key: `x' = x^3 + k` and `k' = k`.
struct CubeAir {
    context: AirContext,
    start: BaseElement,
    result: BaseElement,
}

impl Air for CubeAir {
    type BaseField = BaseElement;
    type PublicInputs = CubeInputs;

    fn new(trace_info: TraceInfo, inputs: CubeInputs, options: ProofOptions) -> Self {
        let trace_info = TraceInfo::new(2, trace_info.length());
        CubeAir {
            context: AirContext::new(trace_info, options, 2, 0, 0, 3),
            start: inputs.start,
            result: inputs.result,
        }
    }

    fn context(&self) -> &AirContext {
        &self.context
    }

    fn evaluate_transition(
        &self,
        frame: &EvaluationFrame<BaseElement>,
        result: &mut [BaseElement],
    ) {
        let current = frame.current();
        let next = frame.next();
        result[0] = next[0] - (current[0].cube() + current[1]);
        result[1] = next[1] - current[1];
    }

    fn get_assertions(&self) -> Vec<Assertion<BaseElement>> {
        let last_step = self.trace_length() - 1;
        vec![Assertion::single(0, 0, self.start), Assertion::single(0, last_step, self.result)]
    }
}

#[derive(Clone, Copy)]
struct CubeInputs {
    start: BaseElement,
    result: BaseElement,
}

impl ToElements<BaseElement> for CubeInputs {
    fn to_elements(&self) -> Vec<BaseElement> {
        vec![self.start, self.result]
    }
}

struct CubeProver {
    options: ProofOptions,
}

impl Prover for CubeProver {
    type BaseField = BaseElement;
    type Air = CubeAir;
    type HashFn = Blake3;

    fn get_pub_inputs(&self, trace: &TraceTable<BaseElement>) -> CubeInputs {
        get_inputs(trace)
    }

    fn options(&self) -> &ProofOptions {
        &self.options
    }
}

// HELPER FUNCTIONS
// ================================================================================================

fn build_options() -> ProofOptions {
    ProofOptions::new(8, 4, 3).unwrap()
}

fn build_trace(length: usize, key: u64) -> TraceTable<BaseElement> {
    TraceTable::build(
        2,
        length,
        |state| {
            state[0] = BaseElement::new(2);
            state[1] = BaseElement::new(key);
        },
        |_, state| state[0] = state[0].cube() + state[1],
    )
}

fn get_inputs(trace: &TraceTable<BaseElement>) -> CubeInputs {
    CubeInputs { start: trace.get(0, 0), result: trace.get(0, trace.length() - 1) }
}

fn prove(trace: TraceTable<BaseElement>) -> (StarkProof<BaseElement, Blake3>, CubeInputs) {
    let inputs = get_inputs(&trace);
    let proof = CubeProver { options: build_options() }.prove(trace).unwrap();
    (proof, inputs)
}

/// Runs the proof generation protocol without checking the trace against the constraints, and
/// adds `layer_shift` to every value of the first FRI layer.
fn build_proof_unchecked(
    trace: &TraceTable<BaseElement>,
    inputs: &CubeInputs,
    layer_shift: BaseElement,
) -> StarkProof<BaseElement, Blake3> {
    let options = build_options();
    let context = Context::new(*trace.info(), options);
    let mut transcript = context.build_transcript::<Blake3, _>(&inputs.to_elements());

    let trace_length = trace.length();
    let blowup = options.blowup_factor();
    let domain = EvaluationDomain::new(trace_length * blowup, BaseElement::ONE).unwrap();
    let lde = TraceLde::<BaseElement, Blake3>::new(trace, &domain).unwrap();
    transcript.absorb_commitment(lde.commitment());
    let seed = transcript.seed();

    let _alpha: BaseElement = transcript.challenge().unwrap();
    let beta: BaseElement = transcript.challenge().unwrap();

    let layer_zero = lde.combine_columns(beta).into_iter().map(|v| v + layer_shift).collect();
    let mut fri_prover = FriProver::<BaseElement, Blake3>::new(options.to_fri_options());
    fri_prover.build_layers(&mut transcript, layer_zero, domain).unwrap();
    let positions = transcript.challenge_indices(options.num_queries(), domain.size()).unwrap();

    StarkProof {
        context,
        trace_commitment: *lde.commitment(),
        constraint_queries: lde.query(&options.trace_positions(trace_length)).unwrap(),
        trace_queries: lde.query(&positions).unwrap(),
        fri_proof: fri_prover.build_proof(&positions).unwrap(),
        seed,
    }
}

fn tamper_row(
    queries: &Queries<BaseElement, Blake3>,
    index: usize,
) -> Queries<BaseElement, Blake3> {
    let mut rows: Vec<Vec<BaseElement>> = queries.rows().map(|row| row.to_vec()).collect();
    rows[index][0] += BaseElement::ONE;
    Queries::new(rows, queries.proofs().to_vec())
}

fn increment_digest(digest: &ByteDigest<32>) -> ByteDigest<32> {
    let mut bytes = digest.as_bytes();
    bytes[0] = bytes[0].wrapping_add(1);
    ByteDigest::new(bytes)
}
