// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Contains error types for the prover.

use alloc::string::String;
use core::fmt;

use air::ConfigurationError;
use crypto::{MerkleTreeError, TranscriptError};
use fri::FriError;

// PROVER ERROR
// ================================================================================================
/// Represents an error returned by the prover during an execution of the protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProverError {
    /// Proof options are not valid for the execution trace.
    InvalidConfiguration(ConfigurationError),
    /// The private witness has an unexpected number of values.
    MalformedWitness { expected: usize, actual: usize },
    /// The execution trace does not have the shape the computation requires.
    MalformedTrace(String),
    /// A constraint does not evaluate to zero at the specified step of the execution trace.
    UnsoundWitness { step: usize },
    /// The extended execution trace could not be committed to.
    CommitmentFailed(MerkleTreeError),
    /// The FRI protocol could not be executed.
    FriFailed(FriError),
    /// A challenge could not be drawn from the transcript.
    TranscriptFailed(TranscriptError),
}

impl fmt::Display for ProverError {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration(err) => {
                write!(f, "invalid proof options: {err}")
            }
            Self::MalformedWitness { expected, actual } => {
                write!(f, "private witness must contain {expected} values, but contained {actual}")
            }
            Self::MalformedTrace(reason) => {
                write!(f, "execution trace is malformed: {reason}")
            }
            Self::UnsoundWitness { step } => {
                write!(f, "the witness does not satisfy the constraints at step {step}")
            }
            Self::CommitmentFailed(err) => {
                write!(f, "failed to commit to the extended execution trace: {err}")
            }
            Self::FriFailed(err) => {
                write!(f, "FRI protocol failed: {err}")
            }
            Self::TranscriptFailed(err) => {
                write!(f, "failed to draw a challenge from the transcript: {err}")
            }
        }
    }
}

impl core::error::Error for ProverError {}

impl From<ConfigurationError> for ProverError {
    fn from(err: ConfigurationError) -> Self {
        Self::InvalidConfiguration(err)
    }
}

impl From<MerkleTreeError> for ProverError {
    fn from(err: MerkleTreeError) -> Self {
        Self::CommitmentFailed(err)
    }
}

impl From<FriError> for ProverError {
    fn from(err: FriError) -> Self {
        Self::FriFailed(err)
    }
}

impl From<TranscriptError> for ProverError {
    fn from(err: TranscriptError) -> Self {
        Self::TranscriptFailed(err)
    }
}
