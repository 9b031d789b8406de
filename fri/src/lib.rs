// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! This crate contains an implementation of the FRI protocol used by the sigstark prover and
//! verifier.
//!
//! FRI stands for Fast Reed-Solomon Interactive Oracle Proof of Proximity, and is used in the
//! STARK protocol for low-degree testing. Specifically, given a commitment to a set of evaluations
//! of some function over domain *D*, the verifier can be convinced that the function is a
//! polynomial of low degree. This is done in two phases:
//!
//! # Commit phase
//! The prover commits to the evaluations with a Merkle tree, absorbs the root into the
//! Fiat-Shamir [Transcript](crypto::Transcript), and draws a folding challenge *c*. Folding
//! splits the committed polynomial into its even and odd parts *f(x) = g(x^2) + x h(x^2)* and
//! replaces it with *g + c h*, which has half the degree and is evaluated on the squared domain
//! of half the size. This repeats until either the round budget is spent or the vector has
//! shrunk to two elements (see [FoldingTerminal]). The vector that remains is interpolated into
//! the final polynomial, which is sent in the clear.
//!
//! # Query phase
//! For each query position drawn from the transcript the prover opens the value at that
//! position and at its sibling (the position holding *f(-x)*) in every layer, together with
//! Merkle authentication paths. The verifier checks that every opening matches its layer
//! commitment and that folding the two values with the re-derived challenge yields the value
//! opened in the next layer, or the final polynomial evaluated at the folded point.
//!
//! # Concurrent execution
//! With the `concurrent` feature enabled, folding, leaf hashing, and query verification run on
//! the `rayon` thread pool.
#![no_std]

#[macro_use]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod folding;
pub mod prover;
pub mod verifier;

pub use prover::{FoldingTerminal, FriLayer, FriProver};
pub use verifier::FriVerifier;

mod options;
pub use options::FriOptions;

mod proof;
pub use proof::{FriProof, FriQuery};

mod errors;
pub use errors::FriError;
