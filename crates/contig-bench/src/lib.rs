//! Benchmark workloads for contig.
//!
//! Shared input builders so every bench measures the same data:
//!
//! - [`payload_strings`]: heap-owning elements, where relocation cost
//!   differs between policies
//! - [`filled`]: an array built by repeated `push_back`
//! - [`scatter_positions`]: deterministic pseudo-random insert positions

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use contig_array::{DynamicArray, Relocation};
use rand::rngs::ChaCha8Rng;
use rand::{RngExt, SeedableRng};

/// `n` short owned strings, `"item-0"` through `"item-{n-1}"`.
pub fn payload_strings(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("item-{i}")).collect()
}

/// An array of `0..n` built element by element under policy `R`.
pub fn filled<R: Relocation<u64>>(n: usize, policy: R) -> DynamicArray<u64, R> {
    let mut arr = DynamicArray::new_in(policy);
    for v in 0..n as u64 {
        arr.push_back(v);
    }
    arr
}

/// `count` positions, each valid for an array whose length starts at
/// `start_len` and grows by one per step.
///
/// Seeded so runs are comparable.
pub fn scatter_positions(start_len: usize, count: usize, seed: u64) -> Vec<usize> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|step| rng.random_range(0..=start_len + step))
        .collect()
}
