// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use core::marker::PhantomData;

use super::{
    air::{ACC, INV, KEY, PAIR, SECRET, SIG},
    PrivateWitness, PublicInputs, SignatureAir, TRACE_LENGTH, TRACE_WIDTH,
};
use crate::{
    crypto::ElementHasher,
    math::{fields::f64::BaseElement, FieldElement},
    ProofOptions, Prover, ProverError, TraceTable,
};

// SIGNATURE PROVER
// ================================================================================================

/// Generates proofs for [SignatureAir] using hash function `H`.
pub struct SignatureProver<H: ElementHasher> {
    options: ProofOptions,
    _hasher: PhantomData<H>,
}

impl<H: ElementHasher> SignatureProver<H> {
    pub fn new(options: ProofOptions) -> Self {
        Self { options, _hasher: PhantomData }
    }

    /// Builds an execution trace binding `witness` to `pub_inputs`.
    ///
    /// The first row holds the public values and the witness; each next row adds both witness
    /// values to the accumulator and swaps them. The trace is built for any two witness values;
    /// whether they are valid for `pub_inputs` is checked against the constraints later.
    ///
    /// # Errors
    /// Returns an error if the witness does not contain exactly two values.
    pub fn build_trace(
        &self,
        pub_inputs: &PublicInputs,
        witness: &PrivateWitness,
    ) -> Result<TraceTable<BaseElement>, ProverError> {
        let (w0, w1) = match witness.values() {
            &[w0, w1] => (w0, w1),
            values => {
                return Err(ProverError::MalformedWitness {
                    expected: PrivateWitness::NUM_VALUES,
                    actual: values.len(),
                })
            },
        };

        let trace = TraceTable::build(
            TRACE_WIDTH,
            TRACE_LENGTH,
            |state| {
                state[ACC] = pub_inputs.message_hash + pub_inputs.public_key;
                state[KEY] = pub_inputs.public_key;
                state[SIG] = pub_inputs.signature;
                state[SECRET] = w0;
                state[PAIR] = w1;
                state[INV] = w0.inv();
            },
            |_, state| {
                state[ACC] += state[SECRET] + state[PAIR];
                state.swap(SECRET, PAIR);
                state[INV] = state[SECRET].inv();
            },
        );
        Ok(trace)
    }
}

impl<H: ElementHasher<BaseField = BaseElement>> Prover for SignatureProver<H> {
    type BaseField = BaseElement;
    type Air = SignatureAir;
    type HashFn = H;

    fn get_pub_inputs(&self, trace: &TraceTable<BaseElement>) -> PublicInputs {
        PublicInputs::new(
            trace.get(ACC, 0) - trace.get(KEY, 0),
            trace.get(KEY, 0),
            trace.get(SIG, 0),
        )
    }

    fn options(&self) -> &ProofOptions {
        &self.options
    }
}
