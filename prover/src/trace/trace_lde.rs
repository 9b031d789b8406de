// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use alloc::vec::Vec;

use air::proof::Queries;
use crypto::{ElementHasher, MerkleTree};
use math::{fft, get_power_series, EvaluationDomain, StarkField};
use tracing::{event, Level};
#[cfg(feature = "concurrent")]
use utils::iterators::*;
use utils::{iter, iter_mut};

use super::TraceTable;
use crate::ProverError;

// CONSTANTS
// ================================================================================================

#[cfg(feature = "concurrent")]
const MIN_CONCURRENT_ROWS: usize = 1024;

// TRACE LOW DEGREE EXTENSION
// ================================================================================================
/// Low-degree extension of an execution trace together with a commitment to it.
///
/// Each trace column is interpolated over the trace domain and evaluated over an extended domain
/// `blowup_factor` times larger. The extended domain has offset ONE, so row `i` of the trace is
/// row `i * blowup_factor` of the extension. The commitment is a Merkle tree whose leaves are
/// hashes of the extended rows.
pub struct TraceLde<B: StarkField, H: ElementHasher<BaseField = B>> {
    columns: Vec<Vec<B>>,
    tree: MerkleTree<H>,
    blowup_factor: usize,
}

impl<B: StarkField, H: ElementHasher<BaseField = B>> TraceLde<B, H> {
    // CONSTRUCTOR
    // --------------------------------------------------------------------------------------------
    /// Extends all columns of the `trace` over the `domain` and commits to the extended rows.
    ///
    /// # Errors
    /// Returns an error if the domain size is not a multiple of the trace length, the domain
    /// offset is not ONE, or the commitment could not be built.
    pub fn new(trace: &TraceTable<B>, domain: &EvaluationDomain<B>) -> Result<Self, ProverError> {
        let trace_length = trace.length();
        if domain.size() % trace_length != 0 || domain.size() == trace_length {
            return Err(ProverError::MalformedTrace(format!(
                "extended domain of size {} cannot extend a trace of {} rows",
                domain.size(),
                trace_length
            )));
        }
        if domain.offset() != B::ONE {
            return Err(ProverError::MalformedTrace(
                "extended domain must contain the trace domain".into(),
            ));
        }
        let blowup_factor = domain.size() / trace_length;

        let inv_twiddles = fft::get_inv_twiddles::<B>(trace_length);
        let twiddles = fft::get_twiddles::<B>(domain.size());
        let columns: Vec<Vec<B>> = iter!(trace.columns())
            .map(|column| {
                let mut poly = column.clone();
                fft::interpolate_poly(&mut poly, &inv_twiddles);
                fft::evaluate_poly_with_offset(&poly, &twiddles, domain.offset(), blowup_factor)
            })
            .collect();

        let mut row_hashes = vec![H::Digest::default(); domain.size()];
        iter_mut!(row_hashes, MIN_CONCURRENT_ROWS).enumerate().for_each(|(i, hash)| {
            let row: Vec<B> = columns.iter().map(|column| column[i]).collect();
            *hash = H::hash_elements(&row);
        });
        let tree = MerkleTree::new(row_hashes)?;
        event!(
            Level::DEBUG,
            num_columns = columns.len(),
            lde_domain_size = domain.size(),
            "extended and committed to the execution trace"
        );

        Ok(Self { columns, tree, blowup_factor })
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the root of the Merkle tree committing to the extended rows.
    pub fn commitment(&self) -> &H::Digest {
        self.tree.root()
    }

    /// Returns number of columns in the extended trace.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Returns the size of the extended domain.
    pub fn lde_domain_size(&self) -> usize {
        self.tree.num_leaves()
    }

    /// Returns the blowup factor of the extension.
    pub fn blowup_factor(&self) -> usize {
        self.blowup_factor
    }

    /// Returns the extended column at the specified index.
    pub fn get_column(&self, col_idx: usize) -> &[B] {
        &self.columns[col_idx]
    }

    /// Returns a copy of the extended row at the specified position.
    pub fn row(&self, position: usize) -> Vec<B> {
        self.columns.iter().map(|column| column[position]).collect()
    }

    // QUERIES
    // --------------------------------------------------------------------------------------------

    /// Returns extended rows at the specified positions together with Merkle proofs
    /// authenticating them against the commitment.
    ///
    /// # Errors
    /// Returns an error if any of the positions is outside of the extended domain.
    pub fn query(&self, positions: &[usize]) -> Result<Queries<B, H>, ProverError> {
        let proofs = self.tree.prove_batch(positions)?;
        let rows = positions.iter().map(|&position| self.row(position)).collect();
        Ok(Queries::new(rows, proofs))
    }

    /// Combines all extended columns into a single vector `sum_j beta^j * column_j`.
    ///
    /// This is the first layer of the FRI protocol; it is a low-degree vector only if every
    /// column is.
    pub fn combine_columns(&self, beta: B) -> Vec<B> {
        let coefficients = get_power_series(beta, self.width());
        let mut result = B::zeroed_vector(self.lde_domain_size());
        iter_mut!(result, MIN_CONCURRENT_ROWS).enumerate().for_each(|(i, r)| {
            *r = self
                .columns
                .iter()
                .zip(coefficients.iter())
                .fold(B::ZERO, |acc, (column, &k)| acc + k * column[i]);
        });
        result
    }
}
