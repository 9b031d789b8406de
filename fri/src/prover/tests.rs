// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use alloc::vec::Vec;

use crypto::{hashers::Blake3_256, ByteDigest, Transcript};
use math::{fft, fields::f64::BaseElement, EvaluationDomain, FieldElement, StarkField};
use rand_utils::rand_vector;
use utils::{Deserializable, Serializable};

use super::{FoldingTerminal, FriProver};
use crate::{verifier::FriVerifier, FriError, FriOptions, FriProof};

type Blake3 = Blake3_256<BaseElement>;

const DOMAIN_SEPARATOR: &[u8] = b"sigstark-fri-test";
const NUM_QUERIES: usize = 8;

// PROVE/VERIFY TESTS
// ================================================================================================

#[test]
fn fri_prove_verify() {
    let trace_length = 8;
    let options = FriOptions::new(4, 3);
    let (domain, evaluations) = build_evaluations(trace_length, 4);

    let (proof, positions, terminal) = prove(options, &evaluations, domain);
    assert_eq!(FoldingTerminal::RoundBudgetExhausted, terminal);
    assert_eq!(4, proof.num_layers());
    assert_eq!(2, proof.final_poly().len());
    assert_eq!(NUM_QUERIES * 4, proof.queries().len());
    assert_eq!(NUM_QUERIES, positions.len());

    let result = verify(proof, options, &evaluations, domain);
    assert!(result.is_ok(), "{}", result.unwrap_err());
}

#[test]
fn fri_prove_verify_large_domain() {
    let trace_length = 256;
    let options = FriOptions::new(8, 4);
    let (domain, evaluations) = build_evaluations(trace_length, 8);

    let (proof, _, terminal) = prove(options, &evaluations, domain);
    assert_eq!(FoldingTerminal::RoundBudgetExhausted, terminal);
    assert_eq!(5, proof.num_layers());
    assert_eq!(64, proof.final_poly().len());

    let result = verify(proof, options, &evaluations, domain);
    assert!(result.is_ok(), "{}", result.unwrap_err());
}

#[test]
fn fri_prove_verify_coset_domain() {
    let options = FriOptions::new(4, 8);
    let domain = EvaluationDomain::new(64, BaseElement::GENERATOR).unwrap();
    let poly: Vec<BaseElement> = rand_vector(16);
    let twiddles = fft::get_twiddles::<BaseElement>(64);
    let evaluations = fft::evaluate_poly_with_offset(&poly, &twiddles, BaseElement::GENERATOR, 4);

    let (proof, _, terminal) = prove(options, &evaluations, domain);
    assert_eq!(FoldingTerminal::MinimalLength, terminal);
    assert_eq!(5, proof.num_layers());

    let result = verify(proof, options, &evaluations, domain);
    assert!(result.is_ok(), "{}", result.unwrap_err());
}

// COMMIT PHASE TESTS
// ================================================================================================

#[test]
fn build_layers_stops_at_minimal_length() {
    let options = FriOptions::new(4, 10);
    let (domain, evaluations) = build_evaluations(8, 4);

    let mut transcript = build_transcript();
    let mut prover = FriProver::<BaseElement, Blake3>::new(options);
    let terminal = prover.build_layers(&mut transcript, evaluations, domain).unwrap();

    assert_eq!(FoldingTerminal::MinimalLength, terminal);
    assert_eq!(4, prover.num_layers());
    assert_eq!(options.num_layers(32), prover.num_layers());
    assert_eq!(Some(2), prover.final_poly().map(|p| p.len()));

    // every layer halves the previous one
    let sizes: Vec<usize> = prover.layers().iter().map(|l| l.evaluations().len()).collect();
    assert_eq!(vec![32, 16, 8, 4], sizes);
    assert_eq!(4, transcript.round());
}

#[test]
fn build_layers_respects_round_budget() {
    for (budget, expected_layers) in [(0, 1), (1, 2), (2, 3), (3, 4)] {
        let options = FriOptions::new(4, budget);
        let (domain, evaluations) = build_evaluations(64, 4);

        let mut transcript = build_transcript();
        let mut prover = FriProver::<BaseElement, Blake3>::new(options);
        let terminal = prover.build_layers(&mut transcript, evaluations, domain).unwrap();

        assert_eq!(FoldingTerminal::RoundBudgetExhausted, terminal);
        assert_eq!(expected_layers, prover.num_layers());
        assert_eq!(Some(256 >> expected_layers), prover.final_poly().map(|p| p.len()));
    }
}

#[test]
fn build_layers_on_two_elements() {
    let options = FriOptions::new(2, 3);
    let domain = EvaluationDomain::new(2, BaseElement::ONE).unwrap();
    let evaluations = vec![BaseElement::new(5), BaseElement::new(5)];

    let mut transcript = build_transcript();
    let mut prover = FriProver::<BaseElement, Blake3>::new(options);
    let terminal = prover.build_layers(&mut transcript, evaluations, domain).unwrap();

    // nothing to fold; the constant polynomial is sent in the clear
    assert_eq!(FoldingTerminal::MinimalLength, terminal);
    assert_eq!(0, prover.num_layers());
    assert_eq!(Some(&[BaseElement::new(5), BaseElement::ZERO][..]), prover.final_poly());
}

#[test]
fn final_poly_has_folded_degree() {
    // degree 7 polynomial folded 3 times becomes a constant
    let options = FriOptions::new(8, 2);
    let (domain, evaluations) = build_evaluations(8, 8);

    let mut transcript = build_transcript();
    let mut prover = FriProver::<BaseElement, Blake3>::new(options);
    prover.build_layers(&mut transcript, evaluations, domain).unwrap();

    let final_poly = prover.final_poly().unwrap();
    assert_eq!(8, final_poly.len());
    assert!(final_poly[1..].iter().all(|&c| c == BaseElement::ZERO));
}

#[test]
fn build_layers_rejects_invalid_input() {
    let options = FriOptions::new(4, 3);
    let domain = EvaluationDomain::new(16, BaseElement::ONE).unwrap();
    let mut transcript = build_transcript();
    let mut prover = FriProver::<BaseElement, Blake3>::new(options);

    let result = prover.build_layers(&mut transcript, rand_vector(12), domain);
    assert_eq!(Err(FriError::NotPowerOfTwo(12)), result);

    let result = prover.build_layers(&mut transcript, rand_vector(32), domain);
    assert_eq!(Err(FriError::DomainSizeMismatch { evaluations: 32, domain: 16 }), result);
}

// QUERY PHASE TESTS
// ================================================================================================

#[test]
fn build_proof_requires_layers() {
    let prover = FriProver::<BaseElement, Blake3>::new(FriOptions::new(4, 3));
    assert_eq!(Err(FriError::LayersNotBuilt), prover.build_proof(&[0]));
}

#[test]
fn build_proof_rejects_out_of_bounds_position() {
    let options = FriOptions::new(4, 3);
    let (domain, evaluations) = build_evaluations(8, 4);

    let mut transcript = build_transcript();
    let mut prover = FriProver::<BaseElement, Blake3>::new(options);
    prover.build_layers(&mut transcript, evaluations, domain).unwrap();

    let result = prover.build_proof(&[3, 32]);
    assert_eq!(Err(FriError::PositionOutOfBounds { position: 32, domain_size: 32 }), result);
}

#[test]
fn query_trails_follow_folded_positions() {
    let options = FriOptions::new(4, 3);
    let (domain, evaluations) = build_evaluations(8, 4);

    let mut transcript = build_transcript();
    let mut prover = FriProver::<BaseElement, Blake3>::new(options);
    prover.build_layers(&mut transcript, evaluations.clone(), domain).unwrap();
    let proof = prover.build_proof(&[29, 2]).unwrap();

    let trail: Vec<(usize, usize)> =
        proof.queries()[..4].iter().map(|q| (q.layer, q.position)).collect();
    assert_eq!(vec![(0, 29), (1, 13), (2, 5), (3, 1)], trail);

    let first = &proof.queries()[0];
    assert_eq!(evaluations[29], first.value);
    assert_eq!(evaluations[13], first.sibling_value);
    assert_eq!(13, first.sibling_proof.index());

    let trail: Vec<(usize, usize)> =
        proof.queries()[4..].iter().map(|q| (q.layer, q.position)).collect();
    assert_eq!(vec![(0, 2), (1, 2), (2, 2), (3, 2)], trail);
}

#[test]
fn fri_proof_serialization() {
    let options = FriOptions::new(4, 3);
    let (domain, evaluations) = build_evaluations(8, 4);
    let (proof, ..) = prove(options, &evaluations, domain);

    let bytes = proof.to_bytes();
    let parsed = FriProof::<BaseElement, Blake3>::read_from_bytes(&bytes).unwrap();
    assert_eq!(proof, parsed);

    let result = verify(parsed, options, &evaluations, domain);
    assert!(result.is_ok(), "{}", result.unwrap_err());

    assert!(FriProof::<BaseElement, Blake3>::read_from_bytes(&bytes[..bytes.len() - 1]).is_err());
}

// TAMPERING TESTS
// ================================================================================================

#[test]
fn verify_rejects_tampered_layer_commitment() {
    let options = FriOptions::new(4, 3);
    let (domain, evaluations) = build_evaluations(8, 4);
    let (mut proof, ..) = prove(options, &evaluations, domain);

    proof.layer_commitments_mut()[1] = ByteDigest::new([7; 32]);
    assert!(verify(proof, options, &evaluations, domain).is_err());
}

#[test]
fn verify_rejects_tampered_query_value() {
    let options = FriOptions::new(4, 3);
    let (domain, evaluations) = build_evaluations(8, 4);
    let (mut proof, ..) = prove(options, &evaluations, domain);

    proof.queries_mut()[2].value += BaseElement::ONE;
    assert_eq!(
        Err(FriError::LayerCommitmentMismatch { layer: 2 }),
        verify(proof, options, &evaluations, domain)
    );
}

#[test]
fn verify_rejects_tampered_final_poly() {
    let options = FriOptions::new(4, 3);
    let (domain, evaluations) = build_evaluations(8, 4);
    let (mut proof, ..) = prove(options, &evaluations, domain);

    proof.final_poly_mut()[0] += BaseElement::ONE;
    assert!(verify(proof, options, &evaluations, domain).is_err());
}

#[test]
fn verify_rejects_wrong_initial_evaluations() {
    let options = FriOptions::new(4, 3);
    let (domain, evaluations) = build_evaluations(8, 4);
    let (proof, ..) = prove(options, &evaluations, domain);

    let wrong: Vec<BaseElement> = evaluations.iter().map(|&e| e + BaseElement::ONE).collect();
    let result = verify(proof, options, &wrong, domain);
    assert!(matches!(result, Err(FriError::InitialEvaluationMismatch { .. })));
}

#[test]
fn verify_rejects_wrong_number_of_layers() {
    let (domain, evaluations) = build_evaluations(8, 4);
    let (proof, ..) = prove(FriOptions::new(4, 3), &evaluations, domain);

    let result = verify(proof, FriOptions::new(4, 2), &evaluations, domain);
    assert_eq!(Err(FriError::NumLayersMismatch { expected: 3, actual: 4 }), result);
}

#[test]
fn verify_rejects_dropped_queries() {
    let options = FriOptions::new(4, 3);
    let (domain, evaluations) = build_evaluations(8, 4);
    let (mut proof, ..) = prove(options, &evaluations, domain);

    proof.queries_mut().pop();
    assert_eq!(
        Err(FriError::NumQueriesMismatch { expected: 32, actual: 31 }),
        verify(proof, options, &evaluations, domain)
    );
}

#[test]
fn verify_rejects_high_degree_function() {
    // random values are far from any polynomial of degree below 128; after two folds the
    // final polynomial has degree 63 instead of at most 31
    let options = FriOptions::new(2, 1);
    let domain = EvaluationDomain::new(256, BaseElement::ONE).unwrap();
    let evaluations: Vec<BaseElement> = rand_vector(256);

    let (proof, ..) = prove(options, &evaluations, domain);
    let result = verify(proof, options, &evaluations, domain);
    assert!(matches!(result, Err(FriError::FinalPolyDegreeTooHigh { max_degree: 31, .. })));
}

#[test]
fn verify_rejects_degree_above_blowup_bound() {
    // degree 15 over a domain of 32 values, while a blowup factor of 4 allows degree 7; two
    // folds leave a polynomial of degree 3 instead of at most 1
    let options = FriOptions::new(4, 1);
    let (domain, evaluations) = build_evaluations(16, 2);

    let (proof, ..) = prove(options, &evaluations, domain);
    assert_eq!(8, proof.final_poly().len());
    let result = verify(proof, options, &evaluations, domain);
    assert_eq!(Err(FriError::FinalPolyDegreeTooHigh { degree: 3, max_degree: 1 }), result);
}

// TEST UTILS
// ================================================================================================

fn build_transcript() -> Transcript<Blake3> {
    Transcript::new(DOMAIN_SEPARATOR, &[BaseElement::new(42)])
}

/// Evaluates a random polynomial with `trace_length` coefficients over a domain `blowup` times
/// larger than the number of coefficients.
fn build_evaluations(
    trace_length: usize,
    blowup: usize,
) -> (EvaluationDomain<BaseElement>, Vec<BaseElement>) {
    let domain_size = trace_length * blowup;
    let domain = EvaluationDomain::new(domain_size, BaseElement::ONE).unwrap();

    let mut poly: Vec<BaseElement> = rand_vector(trace_length);
    poly.resize(domain_size, BaseElement::ZERO);
    let twiddles = fft::get_twiddles::<BaseElement>(domain_size);
    fft::evaluate_poly(&mut poly, &twiddles);
    (domain, poly)
}

fn prove(
    options: FriOptions,
    evaluations: &[BaseElement],
    domain: EvaluationDomain<BaseElement>,
) -> (FriProof<BaseElement, Blake3>, Vec<usize>, FoldingTerminal) {
    let mut transcript = build_transcript();
    let mut prover = FriProver::<BaseElement, Blake3>::new(options);
    let terminal = prover.build_layers(&mut transcript, evaluations.to_vec(), domain).unwrap();
    let positions = transcript.challenge_indices(NUM_QUERIES, domain.size()).unwrap();
    let proof = prover.build_proof(&positions).unwrap();
    (proof, positions, terminal)
}

fn verify(
    proof: FriProof<BaseElement, Blake3>,
    options: FriOptions,
    evaluations: &[BaseElement],
    domain: EvaluationDomain<BaseElement>,
) -> Result<(), FriError> {
    let mut transcript = build_transcript();
    let verifier = FriVerifier::new(&mut transcript, proof, options, domain)?;
    let positions = transcript.challenge_indices(NUM_QUERIES, domain.size())?;
    let queried: Vec<BaseElement> = positions.iter().map(|&p| evaluations[p]).collect();
    verifier.verify(&positions, &queried)?;
    verifier.check_final_degree()
}
