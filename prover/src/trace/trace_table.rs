// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use alloc::vec::Vec;

use air::{EvaluationFrame, TraceInfo};
use math::StarkField;

use crate::ProverError;

// TRACE TABLE
// ================================================================================================
/// An execution trace of a computation: a table of field elements with a fixed number of
/// columns and a power-of-two number of rows.
///
/// There are two ways to create a trace table.
///
/// First, you can use the [TraceTable::from_columns()] function which takes a set of vectors,
/// where each vector contains values for a given column of the trace. The columns must all have
/// the same power-of-two length of at least [TraceInfo::MIN_TRACE_LENGTH] rows.
///
/// The other approach is to use [TraceTable::build()], which takes trace width and length and
/// two closures:
///
/// 1. The first closure is responsible for initializing the first state of the computation (the
///    first row of the execution trace).
/// 2. The second closure receives the step and the previous state of the execution trace, and
///    must update it to the next state of the computation.
///
/// A trace table exposes no mutable accessors: once built, it is read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceTable<B: StarkField> {
    info: TraceInfo,
    columns: Vec<Vec<B>>,
}

impl<B: StarkField> TraceTable<B> {
    // CONSTRUCTORS
    // --------------------------------------------------------------------------------------------

    /// Builds an execution trace of the specified width and length by executing the state
    /// transition function `update` starting from the state written by `init`.
    ///
    /// # Panics
    /// Panics if:
    /// * `width` is zero or greater than [TraceInfo::MAX_TRACE_WIDTH].
    /// * `length` is smaller than [TraceInfo::MIN_TRACE_LENGTH] or is not a power of two.
    pub fn build<I, U>(width: usize, length: usize, init: I, mut update: U) -> Self
    where
        I: FnOnce(&mut [B]),
        U: FnMut(usize, &mut [B]),
    {
        let info = TraceInfo::new(width, length);
        let mut columns = vec![B::zeroed_vector(length); width];

        let mut state = B::zeroed_vector(width);
        init(&mut state);
        write_row(&mut columns, 0, &state);
        for step in 0..length - 1 {
            update(step, &mut state);
            write_row(&mut columns, step + 1, &state);
        }

        Self { info, columns }
    }

    /// Creates a new execution trace from a list of provided trace columns.
    ///
    /// # Errors
    /// Returns an error if:
    /// * The `columns` vector is empty or has more than [TraceInfo::MAX_TRACE_WIDTH] columns.
    /// * Columns have different lengths.
    /// * The column length is not a power of two or is smaller than
    ///   [TraceInfo::MIN_TRACE_LENGTH].
    pub fn from_columns(columns: Vec<Vec<B>>) -> Result<Self, ProverError> {
        if columns.is_empty() {
            return Err(ProverError::MalformedTrace("trace must have at least one column".into()));
        }
        if columns.len() > TraceInfo::MAX_TRACE_WIDTH {
            return Err(ProverError::MalformedTrace(format!(
                "trace width cannot exceed {} columns, but was {}",
                TraceInfo::MAX_TRACE_WIDTH,
                columns.len()
            )));
        }

        let length = columns[0].len();
        if length < TraceInfo::MIN_TRACE_LENGTH || !length.is_power_of_two() {
            return Err(ProverError::MalformedTrace(format!(
                "trace length must be a power of two of at least {} rows, but was {}",
                TraceInfo::MIN_TRACE_LENGTH,
                length
            )));
        }
        if let Some(i) = columns.iter().position(|column| column.len() != length) {
            return Err(ProverError::MalformedTrace(format!(
                "column {i} has {} rows while column 0 has {length} rows",
                columns[i].len()
            )));
        }

        Ok(Self { info: TraceInfo::new(columns.len(), length), columns })
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the shape of this execution trace.
    pub fn info(&self) -> &TraceInfo {
        &self.info
    }

    /// Returns number of columns in this execution trace.
    pub fn width(&self) -> usize {
        self.info.width()
    }

    /// Returns number of rows in this execution trace.
    pub fn length(&self) -> usize {
        self.info.length()
    }

    /// Returns all columns of this execution trace.
    pub fn columns(&self) -> &[Vec<B>] {
        &self.columns
    }

    /// Returns the entire column at the specified index.
    pub fn get_column(&self, col_idx: usize) -> &[B] {
        &self.columns[col_idx]
    }

    /// Returns the value at the specified column and step.
    pub fn get(&self, column: usize, step: usize) -> B {
        self.columns[column][step]
    }

    /// Copies the row at the specified `step` into `target`.
    pub fn read_row_into(&self, step: usize, target: &mut [B]) {
        for (value, column) in target.iter_mut().zip(self.columns.iter()) {
            *value = column[step];
        }
    }

    /// Returns a copy of the row at the specified `step`.
    pub fn get_row(&self, step: usize) -> Vec<B> {
        let mut row = B::zeroed_vector(self.width());
        self.read_row_into(step, &mut row);
        row
    }

    /// Reads the rows at `step` and `step + 1` into the provided evaluation frame.
    ///
    /// On the last step the next row wraps around to the first row of the trace.
    pub fn read_frame_into(&self, step: usize, frame: &mut EvaluationFrame<B>) {
        let next_step = (step + 1) % self.length();
        self.read_row_into(step, frame.current_mut());
        self.read_row_into(next_step, frame.next_mut());
    }
}

// HELPER FUNCTIONS
// ================================================================================================

fn write_row<B: StarkField>(columns: &mut [Vec<B>], step: usize, state: &[B]) {
    for (column, &value) in columns.iter_mut().zip(state) {
        column[step] = value;
    }
}
