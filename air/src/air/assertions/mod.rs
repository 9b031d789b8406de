// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use core::fmt::{Display, Formatter};

use math::FieldElement;

use crate::{errors::AssertionError, TraceInfo};

#[cfg(test)]
mod tests;

// ASSERTION
// ================================================================================================
/// An assertion made against an execution trace.
///
/// An assertion specifies that the value in a given column at a given step of the trace must be
/// equal to a given value. Assertions tie public inputs to a specific execution trace and are
/// evaluated as boundary constraints: at the asserted step the constraint evaluates to
/// `trace[column] - value`, and it is absent on every other step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assertion<E: FieldElement> {
    column: usize,
    step: usize,
    value: E,
}

impl<E: FieldElement> Assertion<E> {
    // CONSTRUCTORS
    // --------------------------------------------------------------------------------------------
    /// Returns an assertion against a single cell of an execution trace.
    pub fn single(column: usize, step: usize, value: E) -> Self {
        Assertion { column, step, value }
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns index of the column against which this assertion is placed.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Returns the step at which the value is asserted.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Returns the asserted value.
    pub fn value(&self) -> E {
        self.value
    }

    // PUBLIC METHODS
    // --------------------------------------------------------------------------------------------

    /// Returns true if this assertion is placed against the same cell as the `other` one.
    pub fn overlaps_with(&self, other: &Assertion<E>) -> bool {
        self.column == other.column && self.step == other.step
    }

    /// Checks that this assertion fits an execution trace described by `trace_info`.
    ///
    /// # Errors
    /// Returns an error if the trace does not contain the asserted column or step.
    pub fn validate(&self, trace_info: &TraceInfo) -> Result<(), AssertionError> {
        if self.column >= trace_info.width() {
            return Err(AssertionError::TraceWidthTooShort(self.column + 1, trace_info.width()));
        }
        if self.step >= trace_info.length() {
            return Err(AssertionError::TraceLengthTooShort(self.step + 1, trace_info.length()));
        }
        Ok(())
    }

    /// Evaluates the boundary constraint of this assertion against the `row` of the trace at
    /// `step`; returns zero for any step other than the asserted one.
    pub fn evaluate_at(&self, step: usize, row: &[E]) -> E {
        if step == self.step {
            row[self.column] - self.value
        } else {
            E::ZERO
        }
    }
}

impl<E: FieldElement> Display for Assertion<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "(column={}, step={}, value={})", self.column, self.step, self.value)
    }
}
