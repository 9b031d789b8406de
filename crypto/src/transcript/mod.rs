// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use alloc::vec::Vec;
use core::marker::PhantomData;

use math::FieldElement;
use utils::{ByteWriter, Serializable};

use crate::{errors::TranscriptError, Digest, Hasher};


// CONSTANTS
// ================================================================================================

/// Number of nonces tried before giving up on drawing a valid field element.
const MAX_DRAW_TRIES: usize = 1000;

// TRANSCRIPT TAG
// ================================================================================================

/// Labels the kind of value recorded by a single transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TranscriptTag {
    DomainSeparator = 0,
    PublicInput = 1,
    Commitment = 2,
    Challenge = 3,
    QueryPositions = 4,
    FinalPolynomial = 5,
}

// TRANSCRIPT
// ================================================================================================

/// Fiat-Shamir transcript from which all protocol challenges are derived.
///
/// The transcript is an append-only list of `(tag, value)` entries together with a round counter
/// which is incremented every time a commitment is absorbed. Challenges are computed by hashing
/// the full entry list (each value length-prefixed and preceded by its tag), the round counter,
/// and the number of draws made so far. Every drawn challenge is absorbed back into the
/// transcript, so a value can influence all challenges derived after it but none before.
///
/// The prover and the verifier each build their own transcript and absorb the same values in
/// the same order; challenges are never read from a proof.
#[derive(Debug)]
pub struct Transcript<H: Hasher> {
    entries: Vec<(TranscriptTag, Vec<u8>)>,
    round: u64,
    draws: u64,
    _hasher: PhantomData<H>,
}

impl<H: Hasher> Transcript<H> {
    // CONSTRUCTOR
    // --------------------------------------------------------------------------------------------
    /// Returns a new transcript which has absorbed the `domain_separator` followed by every
    /// element of `public_input`.
    pub fn new<E: FieldElement>(domain_separator: &[u8], public_input: &[E]) -> Self {
        let mut transcript = Transcript {
            entries: Vec::new(),
            round: 0,
            draws: 0,
            _hasher: PhantomData,
        };
        transcript.absorb(TranscriptTag::DomainSeparator, domain_separator);
        transcript.absorb_elements(TranscriptTag::PublicInput, public_input);
        transcript
    }

    // ABSORBING
    // --------------------------------------------------------------------------------------------

    /// Appends a single entry to the transcript.
    pub fn absorb(&mut self, tag: TranscriptTag, value: &[u8]) {
        self.entries.push((tag, value.to_vec()));
    }

    /// Appends the serialized `value` to the transcript as a single entry.
    pub fn absorb_element<S: Serializable>(&mut self, tag: TranscriptTag, value: &S) {
        self.entries.push((tag, value.to_bytes()));
    }

    /// Appends every element of `values` to the transcript, one entry per element.
    pub fn absorb_elements<S: Serializable>(&mut self, tag: TranscriptTag, values: &[S]) {
        for value in values {
            self.absorb_element(tag, value);
        }
    }

    /// Appends a commitment root and advances the round counter.
    pub fn absorb_commitment(&mut self, root: &H::Digest) {
        self.absorb_element(TranscriptTag::Commitment, root);
        self.round += 1;
    }

    // DRAWING
    // --------------------------------------------------------------------------------------------

    /// Draws the next challenge and absorbs it back into the transcript.
    ///
    /// The first [FieldElement::ELEMENT_BYTES] of hash(`state` || `draws` || `nonce`) are
    /// interpreted as a field element; if they do not encode a canonical element, the nonce is
    /// incremented and hashing is repeated.
    ///
    /// # Errors
    /// Returns an error if no valid element was found after 1000 nonces.
    pub fn challenge<E: FieldElement>(&mut self) -> Result<E, TranscriptError> {
        let base = H::merge_with_int(self.state(), self.draws);
        for nonce in 0..MAX_DRAW_TRIES {
            let bytes = H::merge_with_int(base, nonce as u64).as_bytes();
            if let Some(element) = E::from_random_bytes(&bytes[..E::ELEMENT_BYTES]) {
                self.draws += 1;
                self.absorb_element(TranscriptTag::Challenge, &element);
                return Ok(element);
            }
        }

        Err(TranscriptError::FailedToDrawFieldElement(MAX_DRAW_TRIES))
    }

    /// Draws `count` integers from the range [0, `domain_size`) and absorbs them back into the
    /// transcript as a single entry.
    ///
    /// Values are drawn independently, so the result may contain duplicates.
    ///
    /// # Errors
    /// Returns an error if `domain_size` is not a power of two.
    pub fn challenge_indices(
        &mut self,
        count: usize,
        domain_size: usize,
    ) -> Result<Vec<usize>, TranscriptError> {
        if !domain_size.is_power_of_two() {
            return Err(TranscriptError::DomainSizeNotPowerOfTwo(domain_size));
        }

        let mask = (domain_size - 1) as u64;
        let base = H::merge_with_int(self.state(), self.draws);
        let mut indices = Vec::with_capacity(count);
        let mut encoded = Vec::with_capacity(count * 8);
        for i in 0..count {
            let bytes = H::merge_with_int(base, i as u64).as_bytes();
            let mut head = [0u8; 8];
            head.copy_from_slice(&bytes[..8]);
            let value = u64::from_le_bytes(head) & mask;
            encoded.write_u64(value);
            indices.push(value as usize);
        }

        self.draws += 1;
        self.absorb(TranscriptTag::QueryPositions, &encoded);
        Ok(indices)
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the digest of the current transcript state.
    ///
    /// After the public input and the trace commitment have been absorbed this is the public-coin
    /// seed recorded in a proof.
    pub fn seed(&self) -> H::Digest {
        self.state()
    }

    /// Returns the number of commitments absorbed so far.
    pub fn round(&self) -> u64 {
        self.round
    }

    /// Returns all entries absorbed so far, in order.
    pub fn entries(&self) -> &[(TranscriptTag, Vec<u8>)] {
        &self.entries
    }

    // HELPER METHODS
    // --------------------------------------------------------------------------------------------

    fn state(&self) -> H::Digest {
        let mut data = Vec::new();
        for (tag, value) in self.entries.iter() {
            data.write_u8(*tag as u8);
            data.write_usize(value.len());
            data.write_bytes(value);
        }
        data.write_u64(self.round);
        H::hash(&data)
    }
}
