//! Test utilities for pdelab development.
//!
//! Deterministic field fixtures (seeded [`ChaCha8Rng`]) and assertion
//! helpers shared by the unit, integration, and benchmark suites.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{gaussian_bump, hot_spot, random_field, unit_grid};

use pdelab_core::Field;
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Uniform sample in `[0, 1)` with 53 bits of precision.
pub fn unit_f64(rng: &mut ChaCha8Rng) -> f64 {
    (rng.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}

/// A seeded generator, so fixtures are reproducible across runs.
pub fn seeded(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Assert two fields have the same shape and agree within `tol` everywhere.
///
/// # Panics
///
/// Panics with the first offending index.
pub fn assert_fields_close(a: &Field, b: &Field, tol: f64) {
    assert_eq!(a.dim(), b.dim(), "field shapes differ");
    for ((idx, &x), &y) in a.indexed_iter().zip(b.iter()) {
        assert!(
            (x - y).abs() <= tol,
            "fields differ at {idx:?}: {x} vs {y} (tol {tol})"
        );
    }
}
