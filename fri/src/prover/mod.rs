// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Contains an implementation of FRI prover and associated components.

use alloc::vec::Vec;
use core::fmt;

use crypto::{ElementHasher, MerkleTree, Transcript, TranscriptTag};
use math::{fft, EvaluationDomain, StarkField};
use tracing::{event, instrument, Level};
#[cfg(feature = "concurrent")]
use utils::iterators::*;
use utils::iter_mut;

use crate::{
    folding::{fold, fold_position, sibling_position},
    FriError, FriOptions, FriProof, FriQuery,
};

#[cfg(test)]
mod tests;

// CONSTANTS
// ================================================================================================

#[cfg(feature = "concurrent")]
const MIN_CONCURRENT_LEAVES: usize = 1024;

// FOLDING TERMINAL
// ================================================================================================

/// The reason the commit phase stopped folding.
///
/// This is not an error: every commit phase ends with one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldingTerminal {
    /// The evaluation vector shrank to two elements.
    MinimalLength,
    /// `round_budget + 1` layers were committed.
    RoundBudgetExhausted,
}

impl fmt::Display for FoldingTerminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MinimalLength => write!(f, "minimal length reached"),
            Self::RoundBudgetExhausted => write!(f, "round budget exhausted"),
        }
    }
}

// FRI LAYER
// ================================================================================================

/// A committed FRI layer: the layer evaluations, their domain, and the Merkle tree built over
/// them.
pub struct FriLayer<E: StarkField, H: ElementHasher<BaseField = E>> {
    tree: MerkleTree<H>,
    evaluations: Vec<E>,
    domain: EvaluationDomain<E>,
}

impl<E: StarkField, H: ElementHasher<BaseField = E>> FriLayer<E, H> {
    /// Returns the Merkle tree committing to this layer.
    pub fn tree(&self) -> &MerkleTree<H> {
        &self.tree
    }

    /// Returns the evaluations of this layer.
    pub fn evaluations(&self) -> &[E] {
        &self.evaluations
    }

    /// Returns the domain this layer was evaluated over.
    pub fn domain(&self) -> &EvaluationDomain<E> {
        &self.domain
    }
}

// FRI PROVER
// ================================================================================================

/// Implements the prover component of the FRI protocol.
///
/// Proof generation is performed in two phases: [build_layers()](FriProver::build_layers)
/// executes the commit phase against a transcript, and [build_proof()](FriProver::build_proof)
/// answers queries at positions drawn from the same transcript afterwards.
///
/// A prover instance can be reused: starting a new commit phase discards the layers of the
/// previous one.
pub struct FriProver<E: StarkField, H: ElementHasher<BaseField = E>> {
    options: FriOptions,
    layers: Vec<FriLayer<E, H>>,
    final_poly: Option<Vec<E>>,
}

impl<E: StarkField, H: ElementHasher<BaseField = E>> FriProver<E, H> {
    // CONSTRUCTOR
    // --------------------------------------------------------------------------------------------
    /// Returns a new FRI prover instantiated with the provided `options`.
    pub fn new(options: FriOptions) -> Self {
        FriProver { options, layers: Vec::new(), final_poly: None }
    }

    // ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the options this prover was instantiated with.
    pub fn options(&self) -> &FriOptions {
        &self.options
    }

    /// Returns the number of layers built during the last commit phase.
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    /// Returns the layers built during the last commit phase.
    pub fn layers(&self) -> &[FriLayer<E, H>] {
        &self.layers
    }

    /// Returns the final polynomial computed during the last commit phase.
    pub fn final_poly(&self) -> Option<&[E]> {
        self.final_poly.as_deref()
    }

    // COMMIT PHASE
    // --------------------------------------------------------------------------------------------
    /// Executes the commit phase of the FRI protocol.
    ///
    /// For round `0..=round_budget`: stops if the vector has at most two values; otherwise
    /// commits to the vector with a Merkle tree over hashes of individual values, absorbs the
    /// root into the `transcript`, draws a folding challenge, and folds. The remaining vector is
    /// interpolated into the final polynomial, which is absorbed into the transcript as well.
    ///
    /// Returns the reason folding stopped.
    ///
    /// # Errors
    /// Returns an error if:
    /// * The number of evaluations is not a power of two or differs from the domain size.
    /// * A layer could not be committed to or a challenge could not be drawn.
    #[instrument(skip_all, fields(domain_size = evaluations.len()))]
    pub fn build_layers(
        &mut self,
        transcript: &mut Transcript<H>,
        evaluations: Vec<E>,
        domain: EvaluationDomain<E>,
    ) -> Result<FoldingTerminal, FriError> {
        if !evaluations.len().is_power_of_two() {
            return Err(FriError::NotPowerOfTwo(evaluations.len()));
        }
        if evaluations.len() != domain.size() {
            return Err(FriError::DomainSizeMismatch {
                evaluations: evaluations.len(),
                domain: domain.size(),
            });
        }
        self.reset();

        let mut evaluations = evaluations;
        let mut domain = domain;
        let mut terminal = FoldingTerminal::RoundBudgetExhausted;
        for round in 0..=self.options.round_budget() {
            let next_domain = match domain.folded() {
                Some(next_domain) if evaluations.len() > 2 => next_domain,
                _ => {
                    terminal = FoldingTerminal::MinimalLength;
                    break;
                },
            };

            let tree = MerkleTree::<H>::new(hash_values::<H, E>(&evaluations))?;
            transcript.absorb_commitment(tree.root());
            let c: E = transcript.challenge()?;

            let folded = fold(&evaluations, &domain, c);
            event!(Level::DEBUG, round, layer_size = evaluations.len(), "committed FRI layer");

            self.layers.push(FriLayer { tree, evaluations, domain });
            evaluations = folded;
            domain = next_domain;
        }
        event!(Level::DEBUG, %terminal, num_layers = self.layers.len(), "FRI folding stopped");

        let final_poly = interpolate_final(evaluations, &domain);
        transcript.absorb_elements(TranscriptTag::FinalPolynomial, &final_poly);
        self.final_poly = Some(final_poly);

        Ok(terminal)
    }

    // QUERY PHASE
    // --------------------------------------------------------------------------------------------
    /// Executes the query phase of the FRI protocol.
    ///
    /// For each of the provided `positions` in the first layer, records the value at the
    /// position and at its sibling in every layer together with Merkle proofs for both, then
    /// moves to the position of the folded value in the next layer.
    ///
    /// # Errors
    /// Returns an error if the commit phase has not been executed or a position is outside of
    /// the first layer.
    #[instrument(skip_all, fields(num_positions = positions.len()))]
    pub fn build_proof(&self, positions: &[usize]) -> Result<FriProof<E, H>, FriError> {
        let final_poly = self.final_poly.as_ref().ok_or(FriError::LayersNotBuilt)?;
        let domain_size =
            self.layers.first().map_or(final_poly.len(), |layer| layer.evaluations.len());

        let mut queries = Vec::with_capacity(positions.len() * self.layers.len());
        for &position in positions {
            if position >= domain_size {
                return Err(FriError::PositionOutOfBounds { position, domain_size });
            }

            let mut position = position;
            for (layer_idx, layer) in self.layers.iter().enumerate() {
                let layer_size = layer.evaluations.len();
                let sibling = sibling_position(position, layer_size);
                queries.push(FriQuery {
                    layer: layer_idx,
                    position,
                    value: layer.evaluations[position],
                    sibling_value: layer.evaluations[sibling],
                    proof: layer.tree.prove(position)?,
                    sibling_proof: layer.tree.prove(sibling)?,
                });
                position = fold_position(position, layer_size);
            }
        }

        let layer_commitments = self.layers.iter().map(|layer| *layer.tree.root()).collect();
        Ok(FriProof::new(layer_commitments, final_poly.clone(), queries))
    }

    /// Clears all layers built during the last commit phase.
    pub fn reset(&mut self) {
        self.layers.clear();
        self.final_poly = None;
    }
}

// HELPER FUNCTIONS
// ================================================================================================

/// Hashes each value into a Merkle leaf.
pub fn hash_values<H: ElementHasher, E: StarkField>(values: &[E]) -> Vec<H::Digest> {
    let mut result = vec![H::Digest::default(); values.len()];
    iter_mut!(result, MIN_CONCURRENT_LEAVES).zip(values).for_each(|(r, v)| {
        *r = H::hash_elements(core::slice::from_ref(v));
    });
    result
}

/// Interpolates the values remaining after folding into coefficient form.
fn interpolate_final<E: StarkField>(mut values: Vec<E>, domain: &EvaluationDomain<E>) -> Vec<E> {
    if values.len() < 2 {
        return values;
    }
    let inv_twiddles = fft::get_inv_twiddles::<E>(values.len());
    fft::interpolate_poly_with_offset(&mut values, &inv_twiddles, domain.offset());
    values
}
