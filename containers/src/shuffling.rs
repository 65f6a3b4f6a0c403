//! Swap-or-not shuffle used for proposer and committee selection.

use crate::types::hash;

/// Position of `index` after shuffling a list of `index_count` elements.
///
/// `index` must be below `index_count`.
pub fn compute_shuffled_index(mut index: u64, index_count: u64, seed: &[u8; 32], rounds: u8) -> u64 {
    debug_assert!(index < index_count);

    let mut preimage = [0u8; 37];
    preimage[..32].copy_from_slice(seed);

    for round in 0..rounds {
        preimage[32] = round;

        let pivot_hash = hash(&preimage[..33]);
        let mut pivot_bytes = [0u8; 8];
        pivot_bytes.copy_from_slice(&pivot_hash[..8]);
        let pivot = u64::from_le_bytes(pivot_bytes) % index_count;

        let flip = (pivot + index_count - index) % index_count;
        let position = index.max(flip);

        preimage[33..].copy_from_slice(&((position / 256) as u32).to_le_bytes());
        let source = hash(&preimage);
        let byte = source[((position % 256) / 8) as usize];
        let bit = (byte >> (position % 8)) & 1;

        if bit == 1 {
            index = flip;
        }
    }

    index
}
