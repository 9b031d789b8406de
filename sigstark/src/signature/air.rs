// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use alloc::vec::Vec;

use air::{Air, AirContext, Assertion, EvaluationFrame, ProofOptions, TraceInfo};

use super::PublicInputs;
use crate::math::{fields::f64::BaseElement, FieldElement};

// CONSTANTS
// ================================================================================================

/// Number of columns in the execution trace.
pub const TRACE_WIDTH: usize = 6;

/// Number of rows in the execution trace.
pub const TRACE_LENGTH: usize = 8;

// column layout
pub(super) const ACC: usize = 0;
pub(super) const KEY: usize = 1;
pub(super) const SIG: usize = 2;
pub(super) const SECRET: usize = 3;
pub(super) const PAIR: usize = 4;
pub(super) const INV: usize = 5;

const NUM_TRANSITION_CONSTRAINTS: usize = 3;
const NUM_PERMUTATION_CONSTRAINTS: usize = 2;
const NUM_RANGE_CONSTRAINTS: usize = 1;
const COMPOSITION_DEGREE: usize = 2;

// SIGNATURE-BINDING AIR
// ================================================================================================

/// Constraints binding a private witness to a message hash, a public key, and a signature.
///
/// The execution trace has 6 columns and 8 rows:
///
/// | column   | contents                                         |
/// |----------|--------------------------------------------------|
/// | `acc`    | accumulator, starts at `message_hash + key`      |
/// | `key`    | public key, constant                             |
/// | `sig`    | signature, constant                              |
/// | `secret` | witness values `w0, w1, w0, ...`                 |
/// | `pair`   | witness values `w1, w0, w1, ...`                 |
/// | `inv`    | inverse of `secret`                              |
///
/// Every step enforces `acc' = acc + secret + pair`, keeps `key` and `sig` unchanged, and
/// requires `(secret', pair')` to be a permutation of `(secret, pair)`. Every row requires
/// `secret * inv = 1`, so witness values must be nonzero. The accumulator must end at the
/// signature, so a witness `[w0, w1]` is valid only when
/// `signature = message_hash + public_key + 7 * (w0 + w1)`.
///
/// The trace layout is fixed: this AIR always describes a trace of [TRACE_WIDTH] columns and
/// [TRACE_LENGTH] rows, whatever trace info it is instantiated with.
pub struct SignatureAir {
    context: AirContext,
    message_hash: BaseElement,
    public_key: BaseElement,
    signature: BaseElement,
}

impl Air for SignatureAir {
    type BaseField = BaseElement;
    type PublicInputs = PublicInputs;

    // CONSTRUCTOR
    // --------------------------------------------------------------------------------------------
    fn new(_trace_info: TraceInfo, pub_inputs: PublicInputs, options: ProofOptions) -> Self {
        let context = AirContext::new(
            TraceInfo::new(TRACE_WIDTH, TRACE_LENGTH),
            options,
            NUM_TRANSITION_CONSTRAINTS,
            NUM_PERMUTATION_CONSTRAINTS,
            NUM_RANGE_CONSTRAINTS,
            COMPOSITION_DEGREE,
        );
        SignatureAir {
            context,
            message_hash: pub_inputs.message_hash,
            public_key: pub_inputs.public_key,
            signature: pub_inputs.signature,
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
        debug_assert_eq!(TRACE_WIDTH, current.len());
        debug_assert_eq!(TRACE_WIDTH, next.len());

        result[0] = next[ACC] - (current[ACC] + current[SECRET] + current[PAIR]);
        result[1] = next[KEY] - current[KEY];
        result[2] = next[SIG] - current[SIG];
    }

    fn evaluate_permutation(
        &self,
        frame: &EvaluationFrame<BaseElement>,
        result: &mut [BaseElement],
    ) {
        let current = frame.current();
        let next = frame.next();

        // {secret', pair'} = {secret, pair} iff both the sums and the products agree
        result[0] = (next[SECRET] + next[PAIR]) - (current[SECRET] + current[PAIR]);
        result[1] = next[SECRET] * next[PAIR] - current[SECRET] * current[PAIR];
    }

    fn evaluate_range(&self, row: &[BaseElement], result: &mut [BaseElement]) {
        result[0] = row[SECRET] * row[INV] - BaseElement::ONE;
    }

    fn get_assertions(&self) -> Vec<Assertion<BaseElement>> {
        vec![
            Assertion::single(ACC, 0, self.message_hash + self.public_key),
            Assertion::single(KEY, 0, self.public_key),
            Assertion::single(SIG, 0, self.signature),
            Assertion::single(ACC, TRACE_LENGTH - 1, self.signature),
        ]
    }
}
