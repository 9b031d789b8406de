// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! This crate contains the sigstark STARK prover and verifier.
//!
//! The crate proves, without revealing a private witness, that the witness binds a message hash,
//! a public key, and a signature together according to a fixed algebraic relation. Proofs are
//! succinct and non-interactive: verifier randomness is derived with the Fiat-Shamir transform,
//! and the low-degree test is the FRI protocol over a 64-bit STARK-friendly field.
//!
//! ## Proof generation
//! Proofs are generated with [generate_proof()], which takes the public input, the private
//! witness, and the [ProofOptions] used to generate the proof:
//!
//! 1. The witness and the public input are laid out into an execution trace.
//! 2. The trace is checked against the constraints of [SignatureAir]; a witness which does not
//!    satisfy them is rejected before anything is committed.
//! 3. The trace is extended over a larger domain and committed to with a Merkle tree.
//! 4. Constraint checks are sampled at random trace rows, and the FRI protocol proves that the
//!    committed extension is a low-degree polynomial.
//!
//! The resulting [StarkProof] carries commitments and opened values only; it can be serialized
//! with [Serializable::to_bytes()] and read back with [StarkProof::from_bytes()].
//!
//! ## Proof verification
//! Proofs are verified with [verify_proof()], which returns `true` only if the proof was
//! generated with the expected options and attests to the provided public input. The reason a
//! proof is rejected is logged at `DEBUG` level; [verify()] returns it as a [VerifierError].
//!
//! ## Custom computations
//! The trait-level API of the prover and the verifier is re-exported as well: implement [Air] for
//! a computation, [Prover] for its trace, and pass both to [Prover::prove()] and [verify()].
//!
//! When the crate is compiled with `concurrent` feature enabled, proof generation and
//! verification are performed in multiple threads. The number of threads can be configured via
//! `RAYON_NUM_THREADS` environment variable.

#![cfg_attr(not(feature = "std"), no_std)]

#[macro_use]
extern crate alloc;

pub use prover::{
    crypto, iterators, math, proof, Air, AirContext, Assertion, ByteReader, ByteWriter,
    ConfigurationError, ConstraintEvaluator, Deserializable, DeserializationError,
    EvaluationFrame, ProofOptions, Prover, ProverError, Serializable, SliceReader, StarkProof,
    TraceInfo, TraceLde, TraceTable,
};
pub use verifier::{verify, VerifierError};

pub mod signature;
pub use signature::{
    generate_proof, verify_proof, PrivateWitness, PublicInputs, SignatureAir, SignatureProver,
};
