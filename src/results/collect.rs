// Copyright 2026 Ising Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Discovery of run records in an experiment directory.

use std::path::{Path, PathBuf};

use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use super::layout::{instance_id_from_path, InstanceName, SolverRun};
use super::log::parse_data_entry;
use super::RunRecord;
use crate::config::ResultsConfig;
use crate::error::{Error, Result};

/// Collect every run record below `experiment_dir`.
///
/// Each subdirectory is one solver run named `<solver>_<time_group>`, and
/// each directory inside it holds the logs of one lattice. Logs without a
/// data entry (crashed or timed-out runs) are skipped. Solver runs are
/// scanned concurrently; the result is sorted by solver, time group and
/// instance so it does not depend on scan order.
pub async fn collect_records(experiment_dir: &Path, cfg: &ResultsConfig) -> Result<Vec<RunRecord>> {
    if !experiment_dir.exists() {
        return Err(Error::FileNotFound(experiment_dir.to_path_buf()));
    }

    let run_dirs = list_dirs(experiment_dir).await?;
    info!(
        directory = %experiment_dir.display(),
        runs = run_dirs.len(),
        "Scanning solver runs"
    );

    let mut tasks = JoinSet::new();
    for dir in run_dirs {
        let cfg = cfg.clone();
        tasks.spawn(async move { scan_solver_run(dir, cfg).await });
    }

    let mut records = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let run_records =
            joined.map_err(|e| Error::Task(format!("solver run scan failed: {}", e)))??;
        records.extend(run_records);
    }

    records.sort_by(|a, b| {
        (&a.solver, &a.time_group, &a.instance).cmp(&(&b.solver, &b.time_group, &b.instance))
    });

    info!(records = records.len(), "Collected run records");
    Ok(records)
}

async fn scan_solver_run(dir: PathBuf, cfg: ResultsConfig) -> Result<Vec<RunRecord>> {
    let dir_name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let run = SolverRun::from_dir_name(&dir_name);

    let lattice_dirs = list_dirs(&dir).await?;
    if lattice_dirs.is_empty() {
        warn!(run = %dir_name, "Solver run has no lattice directory");
    }

    let mut records = Vec::new();
    for lattice_dir in lattice_dirs {
        for path in list_logs(&lattice_dir, &cfg.extension).await? {
            let text = tokio::fs::read_to_string(&path).await?;
            if !text.contains(&cfg.data_tag) {
                debug!(path = %path.display(), "Skipping log without data entry");
                continue;
            }

            let entry = parse_data_entry(&text, &path, &cfg)?;
            let instance = instance_id_from_path(&path, &cfg.extension).unwrap_or_default();
            let lattice_size = InstanceName::parse(&instance).lattice_size;

            records.push(RunRecord {
                instance,
                solver: run.solver.clone(),
                time_group: run.time_group.clone(),
                energy: entry.energy,
                solve_time: entry.solve_time,
                total_time: entry.total_time,
                lattice_size,
            });
        }
    }

    debug!(
        solver = %run.solver,
        time_group = %run.time_group,
        records = records.len(),
        "Scanned solver run"
    );
    Ok(records)
}

async fn list_dirs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut dirs = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        // metadata follows symlinks, file_type does not
        if tokio::fs::metadata(entry.path()).await?.is_dir() {
            dirs.push(entry.path());
        }
    }
    dirs.sort();
    Ok(dirs)
}

async fn list_logs(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut logs = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let matches = entry.file_name().to_string_lossy().contains(extension);
        if matches && tokio::fs::metadata(entry.path()).await?.is_file() {
            logs.push(entry.path());
        }
    }
    logs.sort();
    Ok(logs)
}
