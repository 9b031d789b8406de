// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use crate::{ProofOptions, TraceInfo};

// AIR CONTEXT
// ================================================================================================
/// STARK parameters and constraint counts for a specific execution of a computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AirContext {
    pub(super) options: ProofOptions,
    pub(super) trace_info: TraceInfo,
    pub(super) num_transition_constraints: usize,
    pub(super) num_permutation_constraints: usize,
    pub(super) num_range_constraints: usize,
    pub(super) composition_degree: usize,
}

impl AirContext {
    // CONSTRUCTORS
    // --------------------------------------------------------------------------------------------
    /// Returns a new instance of [AirContext].
    ///
    /// The constraint counts define the lengths of the `result` slices passed to
    /// [Air::evaluate_transition()](crate::Air::evaluate_transition),
    /// [Air::evaluate_permutation()](crate::Air::evaluate_permutation), and
    /// [Air::evaluate_range()](crate::Air::evaluate_range). `composition_degree` is the highest
    /// degree of any of these constraints in terms of trace cells.
    ///
    /// # Panics
    /// Panics if:
    /// * `num_transition_constraints` is zero.
    /// * `composition_degree` is zero.
    pub fn new(
        trace_info: TraceInfo,
        options: ProofOptions,
        num_transition_constraints: usize,
        num_permutation_constraints: usize,
        num_range_constraints: usize,
        composition_degree: usize,
    ) -> Self {
        assert!(
            num_transition_constraints > 0,
            "at least one transition constraint must be specified"
        );
        assert!(composition_degree > 0, "composition degree must be greater than zero");

        AirContext {
            options,
            trace_info,
            num_transition_constraints,
            num_permutation_constraints,
            num_range_constraints,
            composition_degree,
        }
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the trace info for an instance of a computation.
    pub fn trace_info(&self) -> &TraceInfo {
        &self.trace_info
    }

    /// Returns the proof options for an instance of a computation.
    pub fn options(&self) -> &ProofOptions {
        &self.options
    }

    /// Returns the number of transition constraints.
    pub fn num_transition_constraints(&self) -> usize {
        self.num_transition_constraints
    }

    /// Returns the number of permutation constraints.
    pub fn num_permutation_constraints(&self) -> usize {
        self.num_permutation_constraints
    }

    /// Returns the number of range constraints.
    pub fn num_range_constraints(&self) -> usize {
        self.num_range_constraints
    }

    /// Returns the number of constraints evaluated at every step, not counting assertions.
    pub fn num_step_constraints(&self) -> usize {
        self.num_transition_constraints
            + self.num_permutation_constraints
            + self.num_range_constraints
    }
}
