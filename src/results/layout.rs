// Copyright 2026 Ising Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Naming conventions of the results tree.
//!
//! ```text
//! <experiment_dir>/<solver_prefix>_<limit_suffix>/<lattice_dir>/<instance_id>.stdout
//! ```

use std::path::Path;

/// Solver identity and budget parsed from a run directory name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverRun {
    /// Everything before the last `_`; may itself contain `_`
    pub solver: String,
    /// Time or iteration budget, the text after the last `_`
    pub time_group: String,
}

impl SolverRun {
    /// Split `<solver_prefix>_<limit_suffix>`.
    ///
    /// A name without `_` has an empty solver and is used whole as the
    /// time group.
    pub fn from_dir_name(name: &str) -> Self {
        match name.rsplit_once('_') {
            Some((solver, time_group)) => Self {
                solver: solver.to_string(),
                time_group: time_group.to_string(),
            },
            None => Self {
                solver: String::new(),
                time_group: name.to_string(),
            },
        }
    }
}

/// Parts of an instance name such as `Pegasus-Lattice_Size-16_00027`.
///
/// Every part is optional; names that do not follow the pattern keep only
/// `raw`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceName {
    pub raw: String,
    /// Hardware graph family, e.g. `Pegasus`
    pub topology: Option<String>,
    pub lattice_size: Option<u32>,
    /// Instance number within the lattice size
    pub index: Option<u32>,
}

const LATTICE_SIZE_KEY: &str = "Lattice_Size-";

impl InstanceName {
    pub fn parse(name: &str) -> Self {
        let topology = name
            .split_once('-')
            .map(|(head, _)| head)
            .filter(|head| !head.is_empty() && !head.contains('_'))
            .map(str::to_string);

        let lattice_size = name.find(LATTICE_SIZE_KEY).and_then(|start| {
            let rest = &name[start + LATTICE_SIZE_KEY.len()..];
            let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
            digits.parse().ok()
        });

        let index = name
            .rsplit_once('_')
            .map(|(_, tail)| tail)
            .filter(|tail| !tail.is_empty() && tail.chars().all(|c| c.is_ascii_digit()))
            .and_then(|tail| tail.parse().ok());

        Self {
            raw: name.to_string(),
            topology,
            lattice_size,
            index,
        }
    }
}

/// Instance id of a log file: its file name with `extension` removed.
pub fn instance_id_from_path(path: &Path, extension: &str) -> Option<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().replace(extension, ""))
}
