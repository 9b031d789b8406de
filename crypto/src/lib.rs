// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Cryptographic primitives used by the sigstark prover and verifier.
//!
//! This crate contains:
//! * Hash functions exposed through the [Hasher] and [ElementHasher] traits
//!   ([hashers::Blake3_256] and [hashers::Sha3_256]).
//! * A binary [MerkleTree] used to commit to the low-degree extension of the execution trace and
//!   to every FRI layer.
//! * A Fiat-Shamir [Transcript] from which both the prover and the verifier derive every
//!   challenge of the protocol.
#![no_std]

#[macro_use]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod hash;
pub use hash::{ByteDigest, Digest, ElementHasher, Hasher};
pub mod hashers {
    //! Hash function implementations.

    pub use super::hash::{Blake3_256, Sha3_256};
}

mod merkle;
pub use merkle::{build_merkle_nodes, MerkleProof, MerkleTree};

#[cfg(feature = "concurrent")]
pub use merkle::concurrent;

mod transcript;
pub use transcript::{Transcript, TranscriptTag};

mod errors;
pub use errors::{MerkleTreeError, TranscriptError};
