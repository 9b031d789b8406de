// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use alloc::vec::Vec;

use math::{FieldElement, StarkField, ToElements};

use crate::{errors::AssertionError, ProofOptions};

mod trace_info;
pub use trace_info::TraceInfo;

mod context;
pub use context::AirContext;

mod assertions;
pub use assertions::Assertion;

mod transition;
pub use transition::EvaluationFrame;


// AIR TRAIT
// ================================================================================================
/// Describes algebraic intermediate representation of a computation.
///
/// To describe AIR for a given computation, you'll need to implement the `Air` trait which
/// involves the following:
///
/// 1. Define base field for your computation via the [Air::BaseField] associated type (see
///    [math::fields] for available field options).
/// 2. Define a set of public inputs which are required for your computation via the
///    [Air::PublicInputs] associated type.
/// 3. Implement [Air::new()] function. As a part of this function you should create a
///    [AirContext] struct which takes the number of constraints in every constraint class and
///    the composition degree bound as constructor parameters.
/// 4. Implement [Air::context()] method which should return a reference to the [AirContext]
///    struct created in [Air::new()] function.
/// 5. Implement [Air::evaluate_transition()] method which should evaluate transition constraints
///    over a given evaluation frame.
/// 6. Implement [Air::get_assertions()] method which should return a vector of assertions for a
///    given instance of your computation.
/// 7. If your computation requires permutation or range constraints, override
///    [Air::evaluate_permutation()] and [Air::evaluate_range()].
///
/// ### Constraint classes
/// All constraints are polynomial relations which evaluate to zero on every step of a valid
/// execution trace:
///
/// * Transition constraints relate a row to its successor and are enforced on steps
///   `0..n - 1`.
/// * Permutation constraints also relate a row to its successor (e.g. by requiring equal sums
///   and products of a group of cells) and are enforced on steps `0..n - 1`.
/// * Range constraints are evaluated against a single row and are enforced on every step.
/// * Assertions pin a single cell to a public value.
///
/// Evaluations of all constraints at a step are combined into a single value by
/// [compose_constraints()] using powers of a random challenge. The combination is zero at a
/// step with overwhelming probability only when every constraint is satisfied at that step.
pub trait Air: Send + Sync {
    /// Base field for the computation described by this AIR.
    type BaseField: StarkField;

    /// A type defining shape of public inputs for the computation described by this AIR. Public
    /// inputs are absorbed into the Fiat-Shamir transcript as field elements.
    type PublicInputs: ToElements<Self::BaseField> + Send;

    // REQUIRED METHODS
    // --------------------------------------------------------------------------------------------

    /// Returns new instance of AIR for this computation instantiated from the provided parameters.
    fn new(trace_info: TraceInfo, pub_inputs: Self::PublicInputs, options: ProofOptions) -> Self;

    /// Returns context for this instance of the computation.
    fn context(&self) -> &AirContext;

    /// Evaluates transition constraints over the specified evaluation frame.
    ///
    /// The length of the `result` slice is equal to the number of transition constraints
    /// specified in the [AirContext].
    fn evaluate_transition(
        &self,
        frame: &EvaluationFrame<Self::BaseField>,
        result: &mut [Self::BaseField],
    );

    /// Returns a set of assertions against a concrete execution trace of this computation.
    fn get_assertions(&self) -> Vec<Assertion<Self::BaseField>>;

    // PROVIDED METHODS
    // --------------------------------------------------------------------------------------------

    /// Evaluates permutation constraints over the specified evaluation frame.
    ///
    /// The default implementation does nothing; computations which declare permutation
    /// constraints must override it.
    fn evaluate_permutation(
        &self,
        _frame: &EvaluationFrame<Self::BaseField>,
        _result: &mut [Self::BaseField],
    ) {
    }

    /// Evaluates range constraints against a single row of the execution trace.
    ///
    /// The default implementation does nothing; computations which declare range constraints
    /// must override it.
    fn evaluate_range(&self, _row: &[Self::BaseField], _result: &mut [Self::BaseField]) {}

    /// Returns assertions of this computation after checking that each of them fits the
    /// execution trace.
    ///
    /// # Errors
    /// Returns an error if an assertion is placed against a column or a step outside of the
    /// trace.
    fn get_validated_assertions(&self) -> Result<Vec<Assertion<Self::BaseField>>, AssertionError> {
        let assertions = self.get_assertions();
        for assertion in assertions.iter() {
            assertion.validate(self.trace_info())?;
        }
        Ok(assertions)
    }

    /// Evaluates all constraints of this computation at the specified `step`.
    ///
    /// Evaluations are written into `result` in a fixed order: transition constraints, then
    /// permutation constraints, then range constraints, then one evaluation per assertion.
    /// Transition and permutation constraints evaluate to zero on the last step of the trace,
    /// and an assertion evaluates to zero on every step other than the asserted one.
    ///
    /// # Panics
    /// Panics if the length of `result` differs from the number of step constraints plus the
    /// number of assertions.
    fn evaluate_constraints(
        &self,
        frame: &EvaluationFrame<Self::BaseField>,
        step: usize,
        assertions: &[Assertion<Self::BaseField>],
        result: &mut [Self::BaseField],
    ) {
        let context = self.context();
        assert_eq!(
            context.num_step_constraints() + assertions.len(),
            result.len(),
            "number of constraint evaluations must match the number of constraints"
        );

        let (transition, rest) = result.split_at_mut(context.num_transition_constraints());
        let (permutation, rest) = rest.split_at_mut(context.num_permutation_constraints());
        let (range, boundary) = rest.split_at_mut(context.num_range_constraints());

        if step + 1 < self.trace_length() {
            self.evaluate_transition(frame, transition);
            self.evaluate_permutation(frame, permutation);
        } else {
            transition.fill(Self::BaseField::ZERO);
            permutation.fill(Self::BaseField::ZERO);
        }

        self.evaluate_range(frame.current(), range);

        for (r, assertion) in boundary.iter_mut().zip(assertions) {
            *r = assertion.evaluate_at(step, frame.current());
        }
    }

    /// Evaluates all constraints at the specified `step` and combines them into a single value
    /// as `sum_k alpha^k * c_k`.
    fn evaluate_composition(
        &self,
        frame: &EvaluationFrame<Self::BaseField>,
        step: usize,
        assertions: &[Assertion<Self::BaseField>],
        alpha: Self::BaseField,
    ) -> Self::BaseField {
        let mut evaluations = Self::BaseField::zeroed_vector(self.num_constraints(assertions));
        self.evaluate_constraints(frame, step, assertions, &mut evaluations);
        compose_constraints(&evaluations, alpha)
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns options which specify STARK protocol parameters for an instance of the computation
    /// described by this AIR.
    fn options(&self) -> &ProofOptions {
        &self.context().options
    }

    /// Returns info of the execution trace for an instance of the computation described by
    /// this AIR.
    fn trace_info(&self) -> &TraceInfo {
        &self.context().trace_info
    }

    /// Returns length of the execution trace for an instance of the computation described by
    /// this AIR.
    ///
    /// This is guaranteed to be greater than or equal to 8 and a power of two.
    fn trace_length(&self) -> usize {
        self.context().trace_info.length()
    }

    /// Returns width of the execution trace for an instance of the computation described by
    /// this AIR.
    fn trace_width(&self) -> usize {
        self.context().trace_info.width()
    }

    /// Returns the declared degree bound of the constraint composition.
    fn composition_degree(&self) -> usize {
        self.context().composition_degree
    }

    /// Returns low-degree extension domain blowup factor for the computation described by this
    /// AIR.
    fn lde_blowup_factor(&self) -> usize {
        self.context().options.blowup_factor()
    }

    /// Returns the size of the low-degree extension domain.
    ///
    /// This is guaranteed to be a power of two, and is equal to `trace_length * lde_blowup_factor`.
    fn lde_domain_size(&self) -> usize {
        self.trace_length() * self.lde_blowup_factor()
    }

    /// Returns the total number of constraints evaluated at every step given the assertions of
    /// this computation.
    fn num_constraints(&self, assertions: &[Assertion<Self::BaseField>]) -> usize {
        self.context().num_step_constraints() + assertions.len()
    }
}

// HELPER FUNCTIONS
// ================================================================================================

/// Combines constraint evaluations into `sum_k alpha^k * evaluations[k]`.
pub fn compose_constraints<E: FieldElement>(evaluations: &[E], alpha: E) -> E {
    // Horner's rule over the reversed evaluations
    evaluations.iter().rev().fold(E::ZERO, |acc, &c| acc * alpha + c)
}
