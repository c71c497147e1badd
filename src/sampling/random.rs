// Copyright 2026 Ising Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Uniform random spin sampling.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::bqpjson::BqpModel;
use crate::energy::{compute_energy, Assignment, CompiledModel};
use crate::error::{Error, Result};
use crate::validation::require_spin_domain;

/// Outcome of a random sampling run.
#[derive(Debug, Clone)]
pub struct SampleSummary {
    /// Lowest energy seen, including the all-up baseline
    pub best_energy: f64,
    /// Assignment achieving `best_energy`
    pub best_assignment: Assignment,
    /// Number of random assignments drawn
    pub num_reads: u64,
    /// Sum of the energies of the drawn assignments
    energy_sum: f64,
}

impl SampleSummary {
    /// Mean energy over the drawn assignments, `None` if nothing was drawn.
    pub fn mean_energy(&self) -> Option<f64> {
        if self.num_reads == 0 {
            None
        } else {
            Some(self.energy_sum / self.num_reads as f64)
        }
    }

    /// Combine two runs over the same model. Ties keep `self`.
    fn merge(mut self, other: SampleSummary) -> SampleSummary {
        if other.best_energy < self.best_energy {
            self.best_energy = other.best_energy;
            self.best_assignment = other.best_assignment;
        }
        self.num_reads += other.num_reads;
        self.energy_sum += other.energy_sum;
        self
    }
}

/// Draw `n` spins uniformly from {-1, +1}.
pub fn random_spins<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<f64> {
    (0..n).map(|_| random_spin(rng)).collect()
}

fn random_spin<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    if rng.gen_bool(0.5) {
        1.0
    } else {
        -1.0
    }
}

/// Energy of a single uniformly random spin assignment.
pub fn evaluate_random_solution<R: Rng + ?Sized>(model: &BqpModel, rng: &mut R) -> Result<f64> {
    require_spin_domain(model)?;

    let values = random_spins(model.num_variables(), rng);
    let assignment = Assignment::from_positional(model, &values)?;
    compute_energy(model, &assignment)
}

/// Best energy over `num_reads` uniformly random spin assignments.
///
/// The search starts from the all-up assignment, so the result is never
/// worse than that baseline even when `num_reads` is zero.
pub fn sample_random<R: Rng + ?Sized>(
    model: &BqpModel,
    num_reads: u64,
    rng: &mut R,
) -> Result<SampleSummary> {
    require_spin_domain(model)?;

    let compiled = CompiledModel::new(model)?;
    let summary = sample_compiled(&compiled, num_reads, rng);

    info!(num_reads, best_energy = summary.best_energy, "Random sampling complete");
    Ok(summary)
}

/// Parallel form of [`sample_random`].
///
/// Reads are split as evenly as possible across `workers` blocking tasks.
/// Worker `k` is seeded with `seed + k`, so a fixed seed and worker count
/// reproduce the same result; with one worker the result equals
/// `sample_random` driven by `StdRng::seed_from_u64(seed)`.
pub async fn sample_random_parallel(
    model: &BqpModel,
    num_reads: u64,
    workers: usize,
    seed: Option<u64>,
) -> Result<SampleSummary> {
    require_spin_domain(model)?;

    let compiled = Arc::new(CompiledModel::new(model)?);
    let workers = workers.max(1);
    let base = num_reads / workers as u64;
    let remainder = num_reads % workers as u64;

    let mut handles = Vec::with_capacity(workers);
    for k in 0..workers {
        let reads = base + u64::from((k as u64) < remainder);
        let compiled = Arc::clone(&compiled);
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s.wrapping_add(k as u64)),
            None => StdRng::from_entropy(),
        };
        handles.push(tokio::task::spawn_blocking(move || {
            let summary = sample_compiled(&compiled, reads, &mut rng);
            debug!(worker = k, reads, best_energy = summary.best_energy, "Worker finished");
            summary
        }));
    }

    let mut merged: Option<SampleSummary> = None;
    for handle in handles {
        let summary = handle
            .await
            .map_err(|e| Error::Task(format!("sampling worker failed: {}", e)))?;
        merged = Some(match merged {
            Some(acc) => acc.merge(summary),
            None => summary,
        });
    }

    let summary = merged.ok_or_else(|| Error::Task("no sampling workers ran".into()))?;

    info!(
        num_reads = summary.num_reads,
        workers,
        best_energy = summary.best_energy,
        "Random sampling complete"
    );
    Ok(summary)
}

fn sample_compiled<R: Rng + ?Sized>(
    compiled: &CompiledModel,
    num_reads: u64,
    rng: &mut R,
) -> SampleSummary {
    let n = compiled.num_variables();

    let mut best_values = vec![1.0; n];
    let mut best_energy = compiled.energy(&best_values);
    let mut energy_sum = 0.0;
    let mut values = vec![0.0; n];

    let report_every = (num_reads / 10).max(1);

    for read in 0..num_reads {
        for v in values.iter_mut() {
            *v = random_spin(rng);
        }

        let energy = compiled.energy(&values);
        energy_sum += energy;

        if energy < best_energy {
            best_energy = energy;
            best_values.copy_from_slice(&values);
        }

        if (read + 1) % report_every == 0 {
            debug!(reads = read + 1, total = num_reads, best_energy, "Sampling progress");
        }
    }

    SampleSummary {
        best_energy,
        best_assignment: compiled.to_assignment(&best_values),
        num_reads,
        energy_sum,
    }
}
