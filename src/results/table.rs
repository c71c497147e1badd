// Copyright 2026 Ising Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Best-energy tables and CSV output.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::{info, warn};

use super::RunRecord;
use crate::error::Result;

/// Minimum energy per instance and solver.
///
/// Runs of the same solver in different time groups are folded together,
/// so each cell is the best energy that solver reached under any budget.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BestEnergyTable {
    solvers: BTreeSet<String>,
    rows: BTreeMap<String, BTreeMap<String, f64>>,
}

impl BestEnergyTable {
    pub fn from_records(records: &[RunRecord]) -> Self {
        let mut table = Self::default();
        for record in records {
            table.insert(&record.instance, &record.solver, record.energy);
        }
        table
    }

    /// Record an energy, keeping the minimum per cell. NaN energies are
    /// skipped.
    pub fn insert(&mut self, instance: &str, solver: &str, energy: f64) {
        if energy.is_nan() {
            warn!(instance, solver, "Skipping NaN energy");
            return;
        }
        self.solvers.insert(solver.to_string());
        let row = self.rows.entry(instance.to_string()).or_default();
        row.entry(solver.to_string())
            .and_modify(|best| {
                if energy < *best {
                    *best = energy;
                }
            })
            .or_insert(energy);
    }

    /// Solver columns in sorted order.
    pub fn solvers(&self) -> impl Iterator<Item = &str> {
        self.solvers.iter().map(String::as_str)
    }

    /// Instance rows in sorted order.
    pub fn instances(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    pub fn get(&self, instance: &str, solver: &str) -> Option<f64> {
        self.rows.get(instance)?.get(solver).copied()
    }

    /// Best energy across all solvers for an instance.
    pub fn best_energy(&self, instance: &str) -> Option<f64> {
        self.rows
            .get(instance)?
            .values()
            .copied()
            .fold(None, |best, e| match best {
                Some(b) if b <= e => Some(b),
                _ => Some(e),
            })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write the table as CSV.
    ///
    /// Header is `instance,<solver>...,best_energy`; a solver with no run on
    /// an instance leaves an empty cell.
    pub fn write_csv<W: Write>(&self, mut w: W) -> Result<()> {
        let mut header = vec!["instance".to_string()];
        header.extend(self.solvers.iter().map(|s| csv_field(s)));
        header.push("best_energy".to_string());
        writeln!(w, "{}", header.join(","))?;

        for (instance, row) in &self.rows {
            let mut cells = vec![csv_field(instance)];
            for solver in &self.solvers {
                cells.push(row.get(solver).map(|e| format_float(*e)).unwrap_or_default());
            }
            cells.push(
                self.best_energy(instance)
                    .map(format_float)
                    .unwrap_or_default(),
            );
            writeln!(w, "{}", cells.join(","))?;
        }

        Ok(())
    }

    /// Write the table to `path`, creating parent directories.
    pub fn write_csv_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = fs::File::create(path)?;
        self.write_csv(std::io::BufWriter::new(file))?;

        info!(
            path = %path.display(),
            instances = self.len(),
            solvers = self.solvers.len(),
            "Wrote best-energy table"
        );
        Ok(())
    }
}

/// Write the flat record list as CSV, one row per solver run.
pub fn write_records_csv<W: Write>(records: &[RunRecord], mut w: W) -> Result<()> {
    writeln!(
        w,
        "instance,solver,time_group,energy,solve_time,total_time,lattice_size"
    )?;
    for r in records {
        writeln!(
            w,
            "{},{},{},{},{},{},{}",
            csv_field(&r.instance),
            csv_field(&r.solver),
            csv_field(&r.time_group),
            format_float(r.energy),
            format_float(r.solve_time),
            format_float(r.total_time),
            r.lattice_size.map(|s| s.to_string()).unwrap_or_default(),
        )?;
    }
    Ok(())
}

/// Floats always carry a decimal point (`-12.0`, not `-12`).
fn format_float(value: f64) -> String {
    format!("{:?}", value)
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
