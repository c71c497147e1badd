// Copyright 2026 Ising Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Uniform random spin baselines.
//!
//! These samplers give the reference energies that solver results are
//! compared against: a single random assignment, and the best of many.

pub mod random;

pub use random::{
    evaluate_random_solution, random_spins, sample_random, sample_random_parallel, SampleSummary,
};
