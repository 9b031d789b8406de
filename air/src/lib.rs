// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! This crate contains components needed to describe arbitrary computations in a STARK-specific
//! format.
//!
//! Before we can generate proofs attesting that some computations were executed correctly, we
//! need to reduce these computations to algebraic statements involving a set of bounded-degree
//! polynomials. This step is usually called *arithmetization*. For basics of AIR arithmetization
//! please refer to the excellent posts from StarkWare:
//!
//! * [Arithmetization I](https://medium.com/starkware/arithmetization-i-15c046390862)
//! * [Arithmetization II](https://medium.com/starkware/arithmetization-ii-403c3b3f4355)
//! * [StarkDEX Deep Dive: the STARK Core Engine](https://medium.com/starkware/starkdex-deep-dive-the-stark-core-engine-497942d0f0ab)
//!
//! Coming up with efficient arithmetizations for computations is highly non-trivial, and
//! describing arithmetizations could be tedious and error-prone. The [Air] trait aims to help
//! with the latter, which, hopefully, also makes the former a little simpler.
//!
//! To define AIR for a given computation, you'll need to implement the [Air] trait, which
//! declares transition, permutation, and range constraints together with assertions binding the
//! trace to public inputs. Besides the trait, the crate contains:
//! * [ProofOptions], the validated STARK protocol parameters.
//! * [proof::StarkProof], the serializable proof produced by the prover and consumed by the
//!   verifier.
#![no_std]

#[macro_use]
extern crate alloc;

pub mod proof;

mod errors;
pub use errors::{AssertionError, ConfigurationError};

mod options;
pub use options::ProofOptions;

mod air;
pub use air::{compose_constraints, Air, AirContext, Assertion, EvaluationFrame, TraceInfo};
