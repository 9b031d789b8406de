// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

// FRI OPTIONS
// ================================================================================================

/// FRI protocol config options for proof generation and verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FriOptions {
    blowup_factor: usize,
    round_budget: usize,
}

impl FriOptions {
    /// Returns a new [FriOptions] struct instantiated with the specified parameters.
    ///
    /// The `round_budget` is the number of folding rounds allowed after the initial one; at most
    /// `round_budget + 1` layers are committed.
    ///
    /// Values are expected to have been validated by the caller (see `ProofOptions` in the AIR
    /// crate).
    pub fn new(blowup_factor: usize, round_budget: usize) -> Self {
        FriOptions { blowup_factor, round_budget }
    }

    /// Returns the factor by which the degree of a polynomial is smaller than the size of the
    /// domain it is evaluated over.
    pub fn blowup_factor(&self) -> usize {
        self.blowup_factor
    }

    /// Returns the number of folding rounds allowed after the initial one.
    pub fn round_budget(&self) -> usize {
        self.round_budget
    }

    /// Returns the number of layers committed when folding a vector of `domain_size` values.
    ///
    /// Folding stops once the vector has at most two values or `round_budget + 1` layers have
    /// been committed, so the result is `min(round_budget + 1, log2(domain_size) - 1)`.
    pub fn num_layers(&self, domain_size: usize) -> usize {
        if domain_size <= 2 {
            return 0;
        }
        let max_by_size = domain_size.ilog2() as usize - 1;
        max_by_size.min(self.round_budget + 1)
    }

    /// Returns the number of values remaining after all layers are folded.
    pub fn final_length(&self, domain_size: usize) -> usize {
        domain_size >> self.num_layers(domain_size)
    }

    /// Returns the maximum degree of the final polynomial accepted by the verifier when folding
    /// a vector of `domain_size` values.
    ///
    /// The folded vector is expected to be a polynomial of degree smaller than
    /// `domain_size / blowup_factor`; every fold halves the degree, rounding down.
    pub fn max_final_degree(&self, domain_size: usize) -> usize {
        let max_degree = (domain_size / self.blowup_factor).saturating_sub(1);
        max_degree >> self.num_layers(domain_size)
    }
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::FriOptions;

    #[test]
    fn num_layers() {
        let options = FriOptions::new(4, 3);
        assert_eq!(4, options.num_layers(32));
        assert_eq!(2, options.final_length(32));
        assert_eq!(4, options.num_layers(1024));
        assert_eq!(64, options.final_length(1024));
        assert_eq!(1, options.num_layers(4));
        assert_eq!(0, options.num_layers(2));
        assert_eq!(0, options.max_final_degree(32));
        assert_eq!(15, options.max_final_degree(1024));

        let options = FriOptions::new(8, 1);
        assert_eq!(2, options.num_layers(64));
        assert_eq!(1, options.max_final_degree(64));
    }
}
