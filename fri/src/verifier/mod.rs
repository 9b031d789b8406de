// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Contains an implementation of FRI verifier and associated components.

use alloc::vec::Vec;

use crypto::{ElementHasher, MerkleProof, MerkleTree, Transcript, TranscriptTag};
use math::{polynom, EvaluationDomain, StarkField};
use tracing::instrument;
#[cfg(feature = "concurrent")]
use utils::iterators::*;
use utils::iter;

use crate::{
    folding::{fold_pair, fold_position, sibling_position},
    FriError, FriOptions, FriProof, FriQuery,
};

// FRI VERIFIER
// ================================================================================================
/// Implements the verifier component of the FRI protocol.
///
/// Given a small number of evaluations of some function *f* over domain *D* and a FRI proof, a
/// FRI verifier determines whether *f* is a polynomial of low degree.
///
/// Proof verification is performed in two phases: commit phase and query phase.
///
/// # Commit phase
/// During the commit phase, which is executed when the verifier is instantiated via
/// [new()](FriVerifier::new()), the verifier absorbs every layer commitment of the proof into
/// its own transcript and re-derives the folding challenge for that layer. It then checks the
/// length of the final polynomial and absorbs it as well.
///
/// # Query phase
/// During the query phase, which is executed via [verify()](FriVerifier::verify()), the verifier
/// checks for every query position that:
/// * Values opened in every layer are authenticated by that layer's commitment.
/// * Folding the opened pair of a layer with the re-derived challenge gives the value opened in
///   the next layer, or the final polynomial evaluated at the folded point after the last layer.
///
/// The degree of the final polynomial is checked separately via
/// [check_final_degree()](FriVerifier::check_final_degree()).
pub struct FriVerifier<E: StarkField, H: ElementHasher<BaseField = E>> {
    options: FriOptions,
    domain: EvaluationDomain<E>,
    layer_commitments: Vec<H::Digest>,
    layer_challenges: Vec<E>,
    final_poly: Vec<E>,
    queries: Vec<FriQuery<E, H>>,
}

impl<E: StarkField, H: ElementHasher<BaseField = E>> FriVerifier<E, H> {
    /// Returns a new FRI verifier for a `proof` of proximity of evaluations over `domain`.
    ///
    /// Creating a FRI verifier replays the commit phase against the `transcript`: for every
    /// layer commitment the commitment is absorbed and a folding challenge is drawn, after which
    /// the final polynomial is absorbed.
    ///
    /// # Errors
    /// Returns an error if:
    /// * The number of layer commitments differs from the number the prover would commit to for
    ///   a domain of this size.
    /// * The final polynomial length differs from the number of values left after folding.
    /// * A challenge could not be drawn from the transcript.
    pub fn new(
        transcript: &mut Transcript<H>,
        proof: FriProof<E, H>,
        options: FriOptions,
        domain: EvaluationDomain<E>,
    ) -> Result<Self, FriError> {
        let (layer_commitments, final_poly, queries) = proof.into_parts();

        let expected_layers = options.num_layers(domain.size());
        if layer_commitments.len() != expected_layers {
            return Err(FriError::NumLayersMismatch {
                expected: expected_layers,
                actual: layer_commitments.len(),
            });
        }

        let mut layer_challenges = Vec::with_capacity(layer_commitments.len());
        for commitment in layer_commitments.iter() {
            transcript.absorb_commitment(commitment);
            layer_challenges.push(transcript.challenge()?);
        }

        let expected_length = options.final_length(domain.size());
        if final_poly.len() != expected_length {
            return Err(FriError::FinalPolyLengthMismatch {
                expected: expected_length,
                actual: final_poly.len(),
            });
        }
        transcript.absorb_elements(TranscriptTag::FinalPolynomial, &final_poly);

        Ok(FriVerifier {
            options,
            domain,
            layer_commitments,
            layer_challenges,
            final_poly,
            queries,
        })
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the number of layers committed to by the prover.
    pub fn num_layers(&self) -> usize {
        self.layer_commitments.len()
    }

    /// Returns the folding challenges re-derived from the layer commitments.
    pub fn layer_challenges(&self) -> &[E] {
        &self.layer_challenges
    }

    /// Returns the coefficients of the final polynomial.
    pub fn final_poly(&self) -> &[E] {
        &self.final_poly
    }

    // VERIFICATION PROCEDURE
    // --------------------------------------------------------------------------------------------
    /// Executes the query phase of the FRI protocol.
    ///
    /// `positions` are the query positions in the first layer drawn from the transcript after
    /// the commit phase, and `evaluations` the values the verifier expects at these positions
    /// in the first layer.
    ///
    /// # Errors
    /// Returns an error if any of the checks described in the type-level documentation fails
    /// for any position.
    #[instrument(skip_all, fields(num_positions = positions.len()))]
    pub fn verify(&self, positions: &[usize], evaluations: &[E]) -> Result<(), FriError> {
        if positions.len() != evaluations.len() {
            return Err(FriError::NumPositionEvaluationMismatch(
                positions.len(),
                evaluations.len(),
            ));
        }

        let num_layers = self.num_layers();
        let expected_queries = positions.len() * num_layers;
        if self.queries.len() != expected_queries {
            return Err(FriError::NumQueriesMismatch {
                expected: expected_queries,
                actual: self.queries.len(),
            });
        }

        let trails: Vec<&[FriQuery<E, H>]> = if num_layers == 0 {
            vec![&[]; positions.len()]
        } else {
            self.queries.chunks(num_layers).collect()
        };

        iter!(trails).zip(positions).zip(evaluations).enumerate().try_for_each(
            |(query_idx, ((trail, &position), &evaluation))| {
                self.verify_trail(query_idx, position, evaluation, trail)
            },
        )
    }

    /// Checks that the degree of the final polynomial does not exceed the degree the folded
    /// vector has when the first layer is a polynomial of degree smaller than
    /// `domain_size / blowup_factor`.
    ///
    /// # Errors
    /// Returns an error if the degree of the final polynomial is too high.
    pub fn check_final_degree(&self) -> Result<(), FriError> {
        let degree = polynom::degree_of(&self.final_poly);
        let max_degree = self.options.max_final_degree(self.domain.size());
        if degree > max_degree {
            return Err(FriError::FinalPolyDegreeTooHigh { degree, max_degree });
        }
        Ok(())
    }

    // HELPER METHODS
    // --------------------------------------------------------------------------------------------

    /// Verifies the queries of a single starting position across all layers.
    fn verify_trail(
        &self,
        query_idx: usize,
        position: usize,
        evaluation: E,
        trail: &[FriQuery<E, H>],
    ) -> Result<(), FriError> {
        if position >= self.domain.size() {
            return Err(FriError::PositionOutOfBounds {
                position,
                domain_size: self.domain.size(),
            });
        }

        let mut position = position;
        let mut domain = self.domain;
        let mut expected = evaluation;
        for (layer, query) in trail.iter().enumerate() {
            let layer_size = domain.size();
            if query.layer != layer || query.position != position {
                return Err(FriError::QueryTrailMismatch { query: query_idx, layer });
            }

            let root = &self.layer_commitments[layer];
            let depth = layer_size.ilog2() as usize;
            let sibling = sibling_position(position, layer_size);
            if !authenticate(root, depth, position, query.value, &query.proof)
                || !authenticate(root, depth, sibling, query.sibling_value, &query.sibling_proof)
            {
                return Err(FriError::LayerCommitmentMismatch { layer });
            }

            if query.value != expected {
                return Err(match layer {
                    0 => FriError::InitialEvaluationMismatch { position },
                    _ => FriError::InvalidLayerFolding { layer: layer - 1 },
                });
            }

            let next_position = fold_position(position, layer_size);
            let x = domain.element(next_position);
            let c = self.layer_challenges[layer];
            expected = fold_pair(position, layer_size, query.value, query.sibling_value, x, c);

            position = next_position;
            domain = domain.folded().ok_or(FriError::NumLayersMismatch {
                expected: layer + 1,
                actual: self.num_layers(),
            })?;
        }

        let x = domain.element(position);
        if polynom::eval(&self.final_poly, x) != expected {
            return Err(match trail.len() {
                0 => FriError::InitialEvaluationMismatch { position },
                _ => FriError::InvalidFinalFolding { query: query_idx },
            });
        }

        Ok(())
    }
}

// HELPER FUNCTIONS
// ================================================================================================

/// Returns true if `proof` authenticates `value` at `position` in a tree of the specified
/// `depth` with the specified `root`.
fn authenticate<E: StarkField, H: ElementHasher<BaseField = E>>(
    root: &H::Digest,
    depth: usize,
    position: usize,
    value: E,
    proof: &MerkleProof<H>,
) -> bool {
    proof.index() == position
        && proof.depth() == depth
        && *proof.leaf() == H::hash_elements(&[value])
        && MerkleTree::<H>::verify(root, proof)
}
