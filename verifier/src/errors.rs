// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Contains error types for the verifier.

use alloc::string::String;
use core::fmt;

use crypto::TranscriptError;
use fri::FriError;

// VERIFIER ERROR
// ================================================================================================
/// Represents an error returned by the verifier during an execution of the protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifierError {
    /// This error occurs when the proof was generated with options or a trace shape which the
    /// verifier does not accept.
    InconsistentOptions,
    /// This error occurs when the seed recorded in the proof differs from the seed recomputed from
    /// the public inputs and the trace commitment.
    SeedMismatch,
    /// This error occurs when Merkle authentication paths of trace queries do not resolve to the
    /// execution trace commitment included in the proof, or are opened at unexpected positions.
    TraceQueryDoesNotMatchCommitment,
    /// This error occurs when the first FRI layer differs from the random linear combination of
    /// the opened trace rows.
    LayerZeroMismatch,
    /// This error occurs when the FRI proof does not attest to a low-degree vector.
    FriVerificationFailed(FriError),
    /// This error occurs when the constraint composition does not evaluate to zero at the
    /// specified trace row.
    ConstraintNotSatisfied { row: usize },
    /// This error occurs when the final FRI polynomial exceeds the allowed degree.
    FinalPolynomialDegreeTooHigh,
    /// This error occurs when the proof is structurally invalid.
    MalformedProof(String),
    /// This error occurs when the verifier fails to draw a challenge from the transcript.
    TranscriptFailed(TranscriptError),
}

impl fmt::Display for VerifierError {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InconsistentOptions => {
                write!(f, "proof context does not match the verifier configuration")
            }
            Self::SeedMismatch => {
                write!(f, "proof seed does not match the seed derived from public inputs and trace commitment")
            }
            Self::TraceQueryDoesNotMatchCommitment => {
                write!(f, "trace query did not match the commitment")
            }
            Self::LayerZeroMismatch => {
                write!(f, "first FRI layer is inconsistent with the opened trace rows")
            }
            Self::FriVerificationFailed(err) => {
                write!(f, "verification of low-degree proof failed: {err}")
            }
            Self::ConstraintNotSatisfied { row } => {
                write!(f, "constraints are not satisfied at trace row {row}")
            }
            Self::FinalPolynomialDegreeTooHigh => {
                write!(f, "final FRI polynomial exceeds the allowed degree")
            }
            Self::MalformedProof(reason) => {
                write!(f, "proof is malformed: {reason}")
            }
            Self::TranscriptFailed(err) => {
                write!(f, "failed to draw a challenge from the transcript: {err}")
            }
        }
    }
}

impl core::error::Error for VerifierError {}

impl From<TranscriptError> for VerifierError {
    fn from(err: TranscriptError) -> Self {
        Self::TranscriptFailed(err)
    }
}

impl From<FriError> for VerifierError {
    fn from(err: FriError) -> Self {
        match err {
            FriError::InitialEvaluationMismatch { .. } => Self::LayerZeroMismatch,
            FriError::FinalPolyDegreeTooHigh { .. } => Self::FinalPolynomialDegreeTooHigh,
            err => Self::FriVerificationFailed(err),
        }
    }
}
