// Copyright 2026 Ising Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Shared test fixtures.

use std::io::Write;
use std::path::Path;

use tempfile::{NamedTempFile, TempDir};

use crate::bqpjson::BqpModel;
use crate::energy::{compute_energy, Assignment};

/// Three spins in a chain: `h_0 = 0.5`, `J_01 = -1`, `J_12 = 1`.
///
/// Ground state is `(-1, -1, +1)` with energy `-2.5`.
pub fn spin_chain_json() -> String {
    r#"{
    "version": "1.0.0",
    "id": 0,
    "metadata": {"generator": "fixture"},
    "variable_ids": [0, 1, 2],
    "variable_domain": "spin",
    "scale": 1.0,
    "offset": 0.0,
    "linear_terms": [
        {"id": 0, "coeff": 0.5}
    ],
    "quadratic_terms": [
        {"id_tail": 0, "id_head": 1, "coeff": -1.0},
        {"id_tail": 1, "id_head": 2, "coeff": 1.0}
    ]
}"#
    .to_string()
}

pub fn spin_chain() -> BqpModel {
    BqpModel::from_json_str(&spin_chain_json()).unwrap()
}

/// Exhaustive minimum over all spin assignments. Small models only.
pub fn brute_force_ground_energy(model: &BqpModel) -> f64 {
    let n = model.variable_ids.len();
    assert!(n <= 20, "brute force over {} variables", n);

    (0u32..(1 << n))
        .map(|bits| {
            let assignment: Assignment = model
                .variable_ids
                .iter()
                .enumerate()
                .map(|(k, id)| (*id, if bits & (1 << k) != 0 { 1.0 } else { -1.0 }))
                .collect();
            compute_energy(model, &assignment).unwrap()
        })
        .fold(f64::INFINITY, f64::min)
}

pub fn write_temp_file(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// A `BQP_DATA` line with energy at field 3 and solve time at field 7,
/// plus a trailing total time when given.
pub fn data_line(energy: f64, solve_time: f64, total_time: Option<f64>) -> String {
    let mut line = format!(
        "BQP_DATA, 3, 2, {e}, {e}, {e}, {e}, {s}, 0, 0",
        e = energy,
        s = solve_time
    );
    if let Some(total) = total_time {
        line.push_str(&format!(", {}", total));
    }
    line
}

/// Full solver output around a data line, with a solution line when
/// `solution` is non-empty.
pub fn solver_log(
    energy: f64,
    solve_time: f64,
    total_time: Option<f64>,
    solution: &[f64],
) -> String {
    let mut text = String::from("loading instance\nrunning solver\n");
    text.push_str(&data_line(energy, solve_time, total_time));
    text.push('\n');
    if !solution.is_empty() {
        let values: Vec<String> = solution.iter().map(|v| v.to_string()).collect();
        text.push_str(&format!(
            "BQP_SOLUTION, {}, 2, {}, {}, {}\n",
            solution.len(),
            energy,
            solve_time,
            values.join(", ")
        ));
    }
    text
}

/// Temporary experiment directory laid out as
/// `<run>/<lattice>/<instance>.stdout`.
pub struct ExperimentTree {
    dir: TempDir,
}

impl ExperimentTree {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn add_log(&self, run: &str, lattice: &str, instance: &str, text: &str) {
        self.add_file(&format!("{}/{}/{}.stdout", run, lattice, instance), text);
    }

    pub fn add_file(&self, rel_path: &str, text: &str) {
        let path = self.dir.path().join(rel_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, text).unwrap();
    }

    pub fn add_dir(&self, rel_path: &str) {
        std::fs::create_dir_all(self.dir.path().join(rel_path)).unwrap();
    }
}
