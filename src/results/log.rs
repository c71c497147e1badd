// Copyright 2026 Ising Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Parsing of solver `.stdout` logs.
//!
//! Solvers print comma-separated summary lines prefixed with a tag:
//!
//! ```text
//! BQP_DATA, <n>, <m>, <energy>, <..>, <..>, <..>, <solve_time>, ..., [<total_time>]
//! BQP_SOLUTION, <n>, <m>, <..>, <..>, <x_0>, <x_1>, ...
//! ```
//!
//! Only the positions read below are interpreted. Quantum annealer runs
//! append the total API wall-clock time as the last `BQP_DATA` field; for
//! every other solver the solve time doubles as the total time.

use std::path::Path;

use crate::config::ResultsConfig;
use crate::error::{Error, Result, ResultLogError};

/// Position of the best energy in a `BQP_DATA` line.
pub const ENERGY_FIELD: usize = 3;
/// Position of the solve time in a `BQP_DATA` line.
pub const SOLVE_TIME_FIELD: usize = 7;
/// Position of the first assignment value in a `BQP_SOLUTION` line.
pub const SOLUTION_VALUES_START: usize = 5;

/// Energy and timing summary of one solver run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataEntry {
    /// Best energy found
    pub energy: f64,
    /// Solver-reported solve time in seconds
    pub solve_time: f64,
    /// Total wall-clock time in seconds
    pub total_time: f64,
}

impl DataEntry {
    /// Parse a tagged data line.
    ///
    /// For annealer runs the total time is the last field, otherwise it is
    /// the solve time.
    pub fn parse(line: &str, tag: &str, is_annealer: bool) -> std::result::Result<Self, ResultLogError> {
        let fields = split_fields(line);

        let energy = numeric_field(&fields, ENERGY_FIELD, tag)?;
        let solve_time = numeric_field(&fields, SOLVE_TIME_FIELD, tag)?;
        let total_time = if is_annealer {
            numeric_field(&fields, fields.len() - 1, tag)?
        } else {
            solve_time
        };

        Ok(Self {
            energy,
            solve_time,
            total_time,
        })
    }

    /// The total time includes API overhead and can never be shorter than
    /// the solve time.
    pub fn check_time_order(&self, path: &Path) -> std::result::Result<(), ResultLogError> {
        if self.total_time < self.solve_time {
            return Err(ResultLogError::TimeOrder {
                path: path.to_path_buf(),
                solve_time: self.solve_time,
                total_time: self.total_time,
            });
        }
        Ok(())
    }
}

/// Find the first line containing `tag`, sliced from the tag onward.
pub fn find_entry<'a>(text: &'a str, tag: &str) -> Option<&'a str> {
    text.lines()
        .find_map(|line| line.find(tag).map(|start| &line[start..]))
}

fn split_fields(line: &str) -> Vec<&str> {
    line.split(',').map(str::trim).collect()
}

fn numeric_field(
    fields: &[&str],
    index: usize,
    tag: &str,
) -> std::result::Result<f64, ResultLogError> {
    let raw = fields.get(index).ok_or_else(|| ResultLogError::MissingField {
        tag: tag.to_string(),
        index,
    })?;
    raw.parse().map_err(|_| ResultLogError::MalformedField {
        tag: tag.to_string(),
        index,
        value: raw.to_string(),
    })
}

/// Assignment values of a tagged solution line.
///
/// Values start at [`SOLUTION_VALUES_START`]; embedded spaces are ignored.
pub fn parse_solution_values(line: &str, tag: &str) -> std::result::Result<Vec<f64>, ResultLogError> {
    line.split(',')
        .enumerate()
        .skip(SOLUTION_VALUES_START)
        .map(|(index, raw)| {
            let cleaned = raw.trim().replace(' ', "");
            cleaned.parse().map_err(|_| ResultLogError::MalformedField {
                tag: tag.to_string(),
                index,
                value: cleaned,
            })
        })
        .collect()
}

/// Whether the log at `path` belongs to a quantum annealer run.
///
/// Decided from the path alone: both the QA marker and the annealer marker
/// must appear in it.
pub fn is_annealer_log(path: &Path, cfg: &ResultsConfig) -> bool {
    let path = path.to_string_lossy();
    path.contains(&cfg.qa_marker) && path.contains(&cfg.annealer_marker)
}

/// Parse the data entry out of full log text.
pub fn parse_data_entry(text: &str, path: &Path, cfg: &ResultsConfig) -> Result<DataEntry> {
    let line = find_entry(text, &cfg.data_tag).ok_or_else(|| ResultLogError::MissingEntry {
        tag: cfg.data_tag.clone(),
        path: path.to_path_buf(),
    })?;

    let entry = DataEntry::parse(line, &cfg.data_tag, is_annealer_log(path, cfg))?;
    entry.check_time_order(path)?;
    Ok(entry)
}

fn read_log(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Read the energy and timing summary from a log file.
pub fn read_data_entry(path: &Path, cfg: &ResultsConfig) -> Result<DataEntry> {
    let text = read_log(path)?;
    parse_data_entry(&text, path, cfg)
}

/// Read the assignment of spins from a log file.
pub fn read_solution_values(path: &Path, cfg: &ResultsConfig) -> Result<Vec<f64>> {
    let text = read_log(path)?;
    let line = find_entry(&text, &cfg.solution_tag).ok_or_else(|| ResultLogError::MissingEntry {
        tag: cfg.solution_tag.clone(),
        path: path.to_path_buf(),
    })?;
    Ok(parse_solution_values(line, &cfg.solution_tag)?)
}

/// Whether the file exists and contains a data entry.
pub fn has_data_entry(path: &Path, tag: &str) -> bool {
    std::fs::read_to_string(path)
        .map(|text| text.contains(tag))
        .unwrap_or(false)
}
