// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use alloc::vec::Vec;

use air::{EvaluationFrame, TraceInfo};
use crypto::{hashers::Blake3_256, ElementHasher, MerkleTree};
use math::{fft, fields::f64::BaseElement, EvaluationDomain, FieldElement, StarkField};
use rand_utils::rand_vector;

use super::{TraceLde, TraceTable};
use crate::{tests::build_fib_trace, ProverError};

type Blake3 = Blake3_256<BaseElement>;

// TRACE TABLE TESTS
// ================================================================================================

#[test]
fn build_trace_table() {
    let trace = build_fib_trace(8);
    assert_eq!(&TraceInfo::new(2, 8), trace.info());
    assert_eq!(2, trace.width());
    assert_eq!(8, trace.length());

    // 1, 1, 2, 3, 5, 8, 13, 21, ...
    let expected: Vec<BaseElement> =
        [1u32, 2, 5, 13, 34, 89, 233, 610].into_iter().map(BaseElement::from).collect();
    assert_eq!(expected.as_slice(), trace.get_column(0));
    assert_eq!(BaseElement::from(987u32), trace.get(1, 7));
    assert_eq!(vec![BaseElement::from(5u32), BaseElement::from(8u32)], trace.get_row(2));
}

#[test]
fn build_passes_steps_to_update() {
    let trace = TraceTable::build(
        1,
        8,
        |state| state[0] = BaseElement::new(100),
        |step, state| state[0] = BaseElement::new(step as u64),
    );
    let expected: Vec<BaseElement> =
        [100u64, 0, 1, 2, 3, 4, 5, 6].into_iter().map(BaseElement::new).collect();
    assert_eq!(expected.as_slice(), trace.get_column(0));
}

#[test]
fn read_frame_wraps_around() {
    let trace = build_fib_trace(8);
    let mut frame = EvaluationFrame::new(2);

    trace.read_frame_into(3, &mut frame);
    assert_eq!(trace.get_row(3).as_slice(), frame.current());
    assert_eq!(trace.get_row(4).as_slice(), frame.next());

    trace.read_frame_into(7, &mut frame);
    assert_eq!(trace.get_row(7).as_slice(), frame.current());
    assert_eq!(trace.get_row(0).as_slice(), frame.next());
}

#[test]
fn from_columns_rejects_malformed_columns() {
    let empty = TraceTable::<BaseElement>::from_columns(vec![]);
    assert!(matches!(empty, Err(ProverError::MalformedTrace(_))));

    let short = vec![rand_vector::<BaseElement>(4)];
    assert!(matches!(TraceTable::from_columns(short), Err(ProverError::MalformedTrace(_))));

    let not_power_of_two = vec![rand_vector::<BaseElement>(12)];
    assert!(matches!(
        TraceTable::from_columns(not_power_of_two),
        Err(ProverError::MalformedTrace(_))
    ));

    let uneven = vec![rand_vector::<BaseElement>(8), rand_vector::<BaseElement>(16)];
    assert!(matches!(TraceTable::from_columns(uneven), Err(ProverError::MalformedTrace(_))));

    let columns = vec![rand_vector::<BaseElement>(16), rand_vector::<BaseElement>(16)];
    let trace = TraceTable::from_columns(columns.clone()).unwrap();
    assert_eq!(columns.as_slice(), trace.columns());
}

// TRACE LDE TESTS
// ================================================================================================

#[test]
fn extension_contains_trace() {
    let trace = build_trace(16, 3);
    let lde = build_lde(&trace, 8);
    assert_eq!(128, lde.lde_domain_size());
    assert_eq!(8, lde.blowup_factor());
    assert_eq!(3, lde.width());

    for step in 0..16 {
        assert_eq!(trace.get_row(step), lde.row(step * 8));
    }
}

#[test]
fn extended_columns_have_trace_degree() {
    let trace = build_trace(16, 3);
    let lde = build_lde(&trace, 4);

    for col_idx in 0..3 {
        let degree = fft::infer_degree(lde.get_column(col_idx), BaseElement::ONE);
        assert!(degree < 16, "column {col_idx} has degree {degree}");
    }
}

#[test]
fn commitment_is_built_over_extended_rows() {
    let trace = build_trace(8, 2);
    let lde = build_lde(&trace, 4);

    let leaves = (0..32).map(|i| Blake3::hash_elements(&lde.row(i))).collect();
    let tree = MerkleTree::<Blake3>::new(leaves).unwrap();
    assert_eq!(tree.root(), lde.commitment());
}

#[test]
fn queries_are_authenticated() {
    let trace = build_trace(8, 2);
    let lde = build_lde(&trace, 4);

    let positions = [0, 5, 5, 31];
    let queries = lde.query(&positions).unwrap();
    assert_eq!(4, queries.num_rows());
    for ((row, proof), &position) in queries.rows().zip(queries.proofs()).zip(positions.iter()) {
        assert_eq!(lde.row(position).as_slice(), row);
        assert_eq!(position, proof.index());
        assert!(MerkleTree::<Blake3>::verify(lde.commitment(), proof));
    }

    assert!(matches!(lde.query(&[32]), Err(ProverError::CommitmentFailed(_))));
}

#[test]
fn combined_columns_use_powers_of_beta() {
    let trace = build_trace(8, 3);
    let lde = build_lde(&trace, 2);

    let beta = BaseElement::new(3);
    let combined = lde.combine_columns(beta);
    assert_eq!(16, combined.len());
    for (i, &value) in combined.iter().enumerate() {
        let expected = lde.get_column(0)[i]
            + beta * lde.get_column(1)[i]
            + beta.square() * lde.get_column(2)[i];
        assert_eq!(expected, value);
    }

    // linear combination of low-degree columns stays low-degree
    assert!(fft::infer_degree(&combined, BaseElement::ONE) < 8);
}

#[test]
fn extension_rejects_invalid_domains() {
    let trace = build_trace(8, 2);

    let shifted = EvaluationDomain::new(32, BaseElement::GENERATOR).unwrap();
    assert!(matches!(
        TraceLde::<BaseElement, Blake3>::new(&trace, &shifted),
        Err(ProverError::MalformedTrace(_))
    ));

    let same_size = EvaluationDomain::new(8, BaseElement::ONE).unwrap();
    assert!(matches!(
        TraceLde::<BaseElement, Blake3>::new(&trace, &same_size),
        Err(ProverError::MalformedTrace(_))
    ));
}

// HELPER FUNCTIONS
// ================================================================================================

fn build_trace(length: usize, width: usize) -> TraceTable<BaseElement> {
    let columns = (0..width).map(|_| rand_vector::<BaseElement>(length)).collect();
    TraceTable::from_columns(columns).unwrap()
}

fn build_lde(trace: &TraceTable<BaseElement>, blowup: usize) -> TraceLde<BaseElement, Blake3> {
    let domain = EvaluationDomain::new(trace.length() * blowup, BaseElement::ONE).unwrap();
    TraceLde::new(trace, &domain).unwrap()
}
