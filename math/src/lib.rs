// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Prime field arithmetic and the polynomial machinery the sigstark prover and verifier are
//! built on.
//!
//! The crate provides:
//! * a 64-bit STARK-friendly prime field ([fields::f64::BaseElement]) together with the
//!   [FieldElement] and [StarkField] traits,
//! * FFT-based evaluation and interpolation over multiplicative subgroups ([fft]),
//! * coefficient-form polynomial helpers ([polynom]),
//! * power-of-two evaluation domains ([EvaluationDomain]).
//!
//! # Concurrent execution
//! With the `concurrent` feature enabled, FFTs, power series, and batch inversion over large
//! inputs run on the `rayon` thread pool.
#![no_std]

#[macro_use]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod fft;
pub mod polynom;

mod domain;
pub use domain::EvaluationDomain;

mod field;
pub use field::{FieldElement, StarkField};
pub mod fields {
    //! Concrete field implementations.

    pub use super::field::f64;
}

mod utils;
pub use crate::utils::{batch_inversion, get_power_series, get_power_series_with_offset, log2};

mod errors;
pub use errors::DomainError;

// TO ELEMENTS
// ================================================================================================

/// Defines how a value is converted into a sequence of field elements.
pub trait ToElements<E: FieldElement> {
    /// Returns the field elements which represent this value.
    fn to_elements(&self) -> alloc::vec::Vec<E>;
}

impl<E: FieldElement> ToElements<E> for [E] {
    fn to_elements(&self) -> alloc::vec::Vec<E> {
        self.to_vec()
    }
}
