// Copyright 2026 Ising Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Solver result logs: parsing, discovery and tabulation.
//!
//! # Modules
//!
//! - [`log`]: `BQP_DATA` / `BQP_SOLUTION` line parsing
//! - [`layout`]: run directory and instance naming conventions
//! - [`collect`]: asynchronous scan of an experiment directory
//! - [`table`]: best-energy pivot table and CSV output

pub mod collect;
pub mod layout;
pub mod log;
pub mod table;

pub use collect::collect_records;
pub use table::{write_records_csv, BestEnergyTable};

use serde::Serialize;

/// One solver run on one instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunRecord {
    /// Instance id, e.g. `Pegasus-Lattice_Size-16_00027`
    pub instance: String,
    pub solver: String,
    pub time_group: String,
    pub energy: f64,
    pub solve_time: f64,
    pub total_time: f64,
    /// Lattice size parsed from the instance id, if present
    pub lattice_size: Option<u32>,
}
