// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use core::fmt;

use crypto::{MerkleTreeError, TranscriptError};

// FRI ERROR
// ================================================================================================

/// Defines errors which can occur during FRI proof generation and verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FriError {
    /// The number of evaluations to be folded is not a power of two.
    NotPowerOfTwo(usize),
    /// The number of evaluations does not match the size of the evaluation domain.
    DomainSizeMismatch { evaluations: usize, domain: usize },
    /// A FRI layer could not be committed to.
    CommitmentFailed(MerkleTreeError),
    /// A challenge could not be drawn from the transcript.
    TranscriptFailed(TranscriptError),
    /// The query phase was started before the commit phase.
    LayersNotBuilt,
    /// A query position falls outside of the evaluation domain.
    PositionOutOfBounds { position: usize, domain_size: usize },
    /// The proof contains a different number of layer commitments than the domain requires.
    NumLayersMismatch { expected: usize, actual: usize },
    /// The final polynomial has a different number of coefficients than the final layer has
    /// values.
    FinalPolyLengthMismatch { expected: usize, actual: usize },
    /// The number of query positions differs from the number of supplied evaluations.
    NumPositionEvaluationMismatch(usize, usize),
    /// The proof contains a different number of queries than positions times layers.
    NumQueriesMismatch { expected: usize, actual: usize },
    /// A query does not refer to the layer or position the verifier expected.
    QueryTrailMismatch { query: usize, layer: usize },
    /// Opened values did not match the commitment of a layer.
    LayerCommitmentMismatch { layer: usize },
    /// Folding the opened values of a layer did not produce the value opened in the next layer.
    InvalidLayerFolding { layer: usize },
    /// Folding the last layer did not match the final polynomial.
    InvalidFinalFolding { query: usize },
    /// The value opened in the first layer differs from the value the verifier computed.
    InitialEvaluationMismatch { position: usize },
    /// The final polynomial exceeds the allowed degree.
    FinalPolyDegreeTooHigh { degree: usize, max_degree: usize },
}

impl fmt::Display for FriError {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPowerOfTwo(len) => {
                write!(f, "number of evaluations must be a power of two, but was {len}")
            }
            Self::DomainSizeMismatch { evaluations, domain } => {
                write!(f, "number of evaluations ({evaluations}) must match the domain size ({domain})")
            }
            Self::CommitmentFailed(err) => {
                write!(f, "failed to commit to a FRI layer: {err}")
            }
            Self::TranscriptFailed(err) => {
                write!(f, "failed to draw a FRI challenge: {err}")
            }
            Self::LayersNotBuilt => {
                write!(f, "FRI layers have not been built yet")
            }
            Self::PositionOutOfBounds { position, domain_size } => {
                write!(f, "query position {position} is outside of the domain of size {domain_size}")
            }
            Self::NumLayersMismatch { expected, actual } => {
                write!(f, "expected {expected} FRI layer commitments, but proof contained {actual}")
            }
            Self::FinalPolyLengthMismatch { expected, actual } => {
                write!(f, "expected final polynomial with {expected} coefficients, but was {actual}")
            }
            Self::NumPositionEvaluationMismatch(num_positions, num_evaluations) => write!(f,
                "the number of query positions must be the same as the number of evaluations, but {num_positions} and {num_evaluations} were provided"
            ),
            Self::NumQueriesMismatch { expected, actual } => {
                write!(f, "expected {expected} FRI queries, but proof contained {actual}")
            }
            Self::QueryTrailMismatch { query, layer } => {
                write!(f, "FRI query {query} does not follow the folding trail at layer {layer}")
            }
            Self::LayerCommitmentMismatch { layer } => {
                write!(f, "FRI queries did not match the commitment at layer {layer}")
            }
            Self::InvalidLayerFolding { layer } => {
                write!(f, "folding is not consistent at layer {layer}")
            }
            Self::InvalidFinalFolding { query } => {
                write!(f, "folding of query {query} is inconsistent with the final polynomial")
            }
            Self::InitialEvaluationMismatch { position } => {
                write!(f, "value opened at position {position} does not match the evaluation supplied to the verifier")
            }
            Self::FinalPolyDegreeTooHigh { degree, max_degree } => {
                write!(f, "final polynomial has degree {degree}, but the maximum allowed degree is {max_degree}")
            }
        }
    }
}

impl core::error::Error for FriError {}

impl From<MerkleTreeError> for FriError {
    fn from(err: MerkleTreeError) -> Self {
        Self::CommitmentFailed(err)
    }
}

impl From<TranscriptError> for FriError {
    fn from(err: TranscriptError) -> Self {
        Self::TranscriptFailed(err)
    }
}
