// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Random values for tests and benchmarks. Nothing here is used to derive protocol randomness;
//! proof challenges always come from the Fiat-Shamir transcript.
//!
//! When compiled to WebAssembly all functions are omitted.

pub use internal::*;

#[cfg(not(target_family = "wasm"))]
mod internal {
    use rand::prelude::*;
    use utils::Randomizable;

    const MAX_TRIES: usize = 1000;

    /// Returns a single random value of the specified type.
    ///
    /// # Panics
    /// Panics if a valid value could not be generated after 1000 tries.
    pub fn rand_value<R: Randomizable>() -> R {
        let mut rng = rand::rng();
        for _ in 0..MAX_TRIES {
            let bytes = rng.random::<[u8; 32]>();
            if let Some(value) = R::from_random_bytes(&bytes[..R::VALUE_SIZE]) {
                return value;
            }
        }

        panic!("failed to generate a random value");
    }

    /// Returns a vector of `n` random values of the specified type.
    pub fn rand_vector<R: Randomizable>(n: usize) -> Vec<R> {
        let seed = rand::rng().random::<[u8; 32]>();
        prng_vector(seed, n)
    }

    /// Returns `n` values generated deterministically from `seed`.
    ///
    /// # Panics
    /// Panics if not enough valid values could be generated after `1000 * n` tries.
    pub fn prng_vector<R: Randomizable>(seed: [u8; 32], n: usize) -> Vec<R> {
        let mut result = Vec::with_capacity(n);
        let mut g = StdRng::from_seed(seed);
        for _ in 0..MAX_TRIES * n {
            if result.len() == n {
                return result;
            }
            let bytes = g.random::<[u8; 32]>();
            if let Some(element) = R::from_random_bytes(&bytes[..R::VALUE_SIZE]) {
                result.push(element);
            }
        }

        assert_eq!(result.len(), n, "failed to generate enough random values");
        result
    }

    /// Returns a random index in `[0, bound)`.
    pub fn rand_index(bound: usize) -> usize {
        rand::rng().random_range(0..bound)
    }

    /// Shuffles the provided slice in place.
    pub fn shuffle<T>(values: &mut [T]) {
        values.shuffle(&mut rand::rng());
    }
}

#[cfg(target_family = "wasm")]
mod internal {}
