// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use alloc::vec::Vec;

use air::proof::Context;
use crypto::{
    hashers::{Blake3_256, Sha3_256},
    ElementHasher, MerkleTree,
};
use math::{fields::f64::BaseElement, FieldElement, ToElements};
use utils::Serializable;

use super::{
    Air, AirContext, Assertion, EvaluationFrame, ProofOptions, Prover, ProverError, StarkProof,
    TraceInfo, TraceTable,
};

type Blake3 = Blake3_256<BaseElement>;

// PROOF GENERATION TESTS
// ================================================================================================

#[test]
fn prove_fibonacci() {
    let proof = prove::<Blake3>(build_fib_trace(8)).unwrap();

    assert_eq!(&TraceInfo::new(2, 8), proof.trace_info());
    assert_eq!(32, proof.lde_domain_size());
    assert_eq!(4, proof.num_fri_layers());
    assert_eq!(8, proof.constraint_queries.num_rows());
    assert_eq!(8, proof.trace_queries.num_rows());
    assert_eq!(2, proof.trace_queries.width());
}

#[test]
fn prove_fibonacci_with_sha3() {
    let proof = prove::<Sha3_256<BaseElement>>(build_fib_trace(16)).unwrap();
    assert_eq!(64, proof.lde_domain_size());
    assert_eq!(4, proof.num_fri_layers());
}

#[test]
fn proofs_are_deterministic() {
    let proof1 = prove::<Blake3>(build_fib_trace(8)).unwrap();
    let proof2 = prove::<Blake3>(build_fib_trace(8)).unwrap();
    assert_eq!(proof1, proof2);
    assert_eq!(proof1.to_bytes(), proof2.to_bytes());
}

#[test]
fn seed_binds_public_inputs_and_trace_commitment() {
    let trace = build_fib_trace(8);
    let result = trace.get(1, 7);
    let proof = prove::<Blake3>(trace).unwrap();

    let context = Context::new(TraceInfo::new(2, 8), build_options());
    let mut transcript = context.build_transcript::<Blake3, _>(&[result]);
    transcript.absorb_commitment(&proof.trace_commitment);
    assert_eq!(transcript.seed(), proof.seed);

    let mut transcript = context.build_transcript::<Blake3, _>(&[result + BaseElement::ONE]);
    transcript.absorb_commitment(&proof.trace_commitment);
    assert_ne!(transcript.seed(), proof.seed);
}

#[test]
fn trace_openings_are_authenticated() {
    let proof = prove::<Blake3>(build_fib_trace(8)).unwrap();

    for queries in [&proof.trace_queries, &proof.constraint_queries] {
        for (row, opening) in queries.rows().zip(queries.proofs()) {
            assert_eq!(&Blake3::hash_elements(row), opening.leaf());
            assert!(MerkleTree::<Blake3>::verify(&proof.trace_commitment, opening));
        }
    }
}

#[test]
fn constraint_openings_are_trace_rows() {
    let trace = build_fib_trace(16);
    let expected: Vec<Vec<BaseElement>> = (0..16).map(|step| trace.get_row(step)).collect();
    let proof = prove::<Blake3>(trace).unwrap();

    let rows: Vec<Vec<BaseElement>> =
        proof.constraint_queries.rows().map(|row| row.to_vec()).collect();
    assert_eq!(expected, rows);

    let positions: Vec<usize> =
        proof.constraint_queries.proofs().iter().map(|opening| opening.index()).collect();
    assert_eq!(build_options().trace_positions(16), positions);
}

#[test]
fn proof_serialization() {
    let proof = prove::<Blake3>(build_fib_trace(8)).unwrap();
    let bytes = proof.to_bytes();
    assert_eq!(Ok(proof), StarkProof::from_bytes(&bytes));
}

#[test]
fn prove_rejects_unsound_trace() {
    let trace = build_fib_trace(8);
    let mut columns = trace.columns().to_vec();
    columns[0][5] += BaseElement::ONE;
    let trace = TraceTable::from_columns(columns).unwrap();

    assert_eq!(Err(ProverError::UnsoundWitness { step: 4 }), prove::<Blake3>(trace));
}

#[test]
fn prove_rejects_trace_of_wrong_shape() {
    let trace = TraceTable::build(
        3,
        8,
        |state| state.fill(BaseElement::ONE),
        |_, state| {
            state[0] += state[1];
            state[1] += state[0];
        },
    );
    assert!(matches!(prove::<Blake3>(trace), Err(ProverError::MalformedTrace(_))));
}

// FIBONACCI AIR
// ================================================================================================

/// Computes two Fibonacci terms per row: `a' = a + b` and `b' = a' + b`.
pub(crate) struct FibAir {
    context: AirContext,
    result: BaseElement,
}

impl Air for FibAir {
    type BaseField = BaseElement;
    type PublicInputs = FibInputs;

    fn new(trace_info: TraceInfo, inputs: FibInputs, options: ProofOptions) -> Self {
        let trace_info = TraceInfo::new(2, trace_info.length());
        FibAir {
            context: AirContext::new(trace_info, options, 2, 0, 0, 1),
            result: inputs.0,
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
        result[0] = next[0] - (current[0] + current[1]);
        result[1] = next[1] - (next[0] + current[1]);
    }

    fn get_assertions(&self) -> Vec<Assertion<BaseElement>> {
        let last_step = self.trace_length() - 1;
        vec![
            Assertion::single(0, 0, BaseElement::ONE),
            Assertion::single(1, 0, BaseElement::ONE),
            Assertion::single(1, last_step, self.result),
        ]
    }
}

pub(crate) struct FibInputs(BaseElement);

impl ToElements<BaseElement> for FibInputs {
    fn to_elements(&self) -> Vec<BaseElement> {
        vec![self.0]
    }
}

struct FibProver<H> {
    options: ProofOptions,
    _hasher: core::marker::PhantomData<H>,
}

impl<H: ElementHasher<BaseField = BaseElement>> Prover for FibProver<H> {
    type BaseField = BaseElement;
    type Air = FibAir;
    type HashFn = H;

    fn get_pub_inputs(&self, trace: &TraceTable<BaseElement>) -> FibInputs {
        FibInputs(trace.get(1, trace.length() - 1))
    }

    fn options(&self) -> &ProofOptions {
        &self.options
    }
}

// HELPER FUNCTIONS
// ================================================================================================

pub(crate) fn build_options() -> ProofOptions {
    ProofOptions::new(8, 4, 3).unwrap()
}

pub(crate) fn build_fib_trace(length: usize) -> TraceTable<BaseElement> {
    TraceTable::build(
        2,
        length,
        |state| {
            state[0] = BaseElement::ONE;
            state[1] = BaseElement::ONE;
        },
        |_, state| {
            state[0] += state[1];
            state[1] += state[0];
        },
    )
}

pub(crate) fn build_fib_air(trace: &TraceTable<BaseElement>) -> FibAir {
    let inputs = FibInputs(trace.get(1, trace.length() - 1));
    FibAir::new(*trace.info(), inputs, build_options())
}

fn prove<H: ElementHasher<BaseField = BaseElement>>(
    trace: TraceTable<BaseElement>,
) -> Result<StarkProof<BaseElement, H>, ProverError> {
    let prover = FibProver::<H> { options: build_options(), _hasher: core::marker::PhantomData };
    prover.prove(trace)
}
