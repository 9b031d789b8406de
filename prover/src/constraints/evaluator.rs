// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use alloc::vec::Vec;

use air::{Air, Assertion, EvaluationFrame};
use math::FieldElement;
use tracing::instrument;

use crate::{ProverError, TraceTable};

// CONSTRAINT EVALUATOR
// ================================================================================================
/// Evaluates constraints of a computation against its execution trace.
///
/// Assertions of the computation are validated once when the evaluator is created.
pub struct ConstraintEvaluator<'a, A: Air> {
    air: &'a A,
    assertions: Vec<Assertion<A::BaseField>>,
}

impl<'a, A: Air> ConstraintEvaluator<'a, A> {
    /// Returns a new evaluator for the computation described by `air`.
    ///
    /// # Errors
    /// Returns an error if any of the assertions of the computation does not fit its trace.
    pub fn new(air: &'a A) -> Result<Self, ProverError> {
        let assertions = air
            .get_validated_assertions()
            .map_err(|err| ProverError::MalformedTrace(format!("{err}")))?;
        Ok(Self { air, assertions })
    }

    /// Returns the assertions evaluated by this evaluator.
    pub fn assertions(&self) -> &[Assertion<A::BaseField>] {
        &self.assertions
    }

    /// Returns the total number of constraints evaluated at every step.
    pub fn num_constraints(&self) -> usize {
        self.air.num_constraints(&self.assertions)
    }

    /// Checks that every constraint evaluates to zero at every step of the `trace`.
    ///
    /// # Errors
    /// Returns [ProverError::UnsoundWitness] with the first step at which some constraint does
    /// not evaluate to zero.
    #[instrument(skip_all, fields(trace_length = trace.length()))]
    pub fn check_trace(&self, trace: &TraceTable<A::BaseField>) -> Result<(), ProverError> {
        let mut frame = EvaluationFrame::new(trace.width());
        let mut evaluations = A::BaseField::zeroed_vector(self.num_constraints());
        for step in 0..trace.length() {
            trace.read_frame_into(step, &mut frame);
            self.air.evaluate_constraints(&frame, step, &self.assertions, &mut evaluations);
            if evaluations.iter().any(|&e| e != A::BaseField::ZERO) {
                return Err(ProverError::UnsoundWitness { step });
            }
        }
        Ok(())
    }

    /// Returns the random linear combination of all constraints at the specified `step`.
    pub fn evaluate_at(
        &self,
        trace: &TraceTable<A::BaseField>,
        step: usize,
        alpha: A::BaseField,
    ) -> A::BaseField {
        let mut frame = EvaluationFrame::new(trace.width());
        trace.read_frame_into(step, &mut frame);
        self.air.evaluate_composition(&frame, step, &self.assertions, alpha)
    }

    /// Checks that the random linear combination of all constraints is zero at every step of
    /// the `trace`.
    ///
    /// # Errors
    /// Returns [ProverError::UnsoundWitness] with the first step at which the combination is
    /// not zero.
    pub fn check_composition(
        &self,
        trace: &TraceTable<A::BaseField>,
        alpha: A::BaseField,
    ) -> Result<(), ProverError> {
        match (0..trace.length())
            .find(|&step| self.evaluate_at(trace, step, alpha) != A::BaseField::ZERO)
        {
            Some(step) => Err(ProverError::UnsoundWitness { step }),
            None => Ok(()),
        }
    }
}
