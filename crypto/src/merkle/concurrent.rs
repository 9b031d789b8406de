// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use utils::iterators::*;

use crate::hash::Hasher;

// CONSTANTS
// ================================================================================================

pub const MIN_CONCURRENT_LEAVES: usize = 1024;

// PUBLIC FUNCTIONS
// ================================================================================================

/// Sets each of `parents` to the merge of the corresponding pair of `children`, hashing pairs in
/// multiple threads.
pub fn hash_level<H: Hasher>(parents: &mut [H::Digest], children: &[H::Digest]) {
    parents
        .par_iter_mut()
        .zip(children.par_chunks_exact(2))
        .for_each(|(parent, pair)| *parent = H::merge(&[pair[0], pair[1]]));
}

// TESTS
// ================================================================================================
