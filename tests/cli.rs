// Copyright 2026 Ising Bench Contributors
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

const SPIN_CHAIN: &str = r#"{
    "version": "1.0.0",
    "id": 0,
    "metadata": {},
    "variable_ids": [0, 1, 2],
    "variable_domain": "spin",
    "scale": 2.0,
    "offset": 1.0,
    "linear_terms": [{"id": 0, "coeff": 0.5}],
    "quadratic_terms": [
        {"id_tail": 0, "id_head": 1, "coeff": -1.0},
        {"id_tail": 1, "id_head": 2, "coeff": 1.0}
    ]
}"#;

/// Runs from an empty directory so no local config file is picked up.
fn cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ising-bench").unwrap();
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

fn write(dir: &Path, rel: &str, text: &str) -> std::path::PathBuf {
    let path = dir.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, text).unwrap();
    path
}

fn solver_log(energy: f64, solve_time: f64, solution: &str) -> String {
    format!(
        "starting\nBQP_DATA, 3, 2, {e}, {e}, 0, 0, {t}, 0, 0\nBQP_SOLUTION, 3, 2, {e}, {t}, {s}\n",
        e = energy,
        t = solve_time,
        s = solution
    )
}

#[test]
fn help_lists_commands() {
    let dir = TempDir::new().unwrap();
    cmd(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("evaluate").and(contains("tabulate")).and(contains("sample")));
}

#[test]
fn evaluate_reports_energy() {
    let dir = TempDir::new().unwrap();
    let instance = write(dir.path(), "instance.json", SPIN_CHAIN);
    let log = write(dir.path(), "run.stdout", &solver_log(-2.5, 0.1, "-1, -1, 1"));

    cmd(dir.path())
        .args(["evaluate", "-i"])
        .arg(&instance)
        .arg("-r")
        .arg(&log)
        .arg("--scaled")
        .assert()
        .success()
        .stdout(contains("Energy of assignment: -2.5"))
        .stdout(contains("Scaled objective: -3.0"));
}

#[test]
fn evaluate_rejects_short_solution() {
    let dir = TempDir::new().unwrap();
    let instance = write(dir.path(), "instance.json", SPIN_CHAIN);
    let log = write(dir.path(), "run.stdout", &solver_log(-1.0, 0.1, "1, 1"));

    cmd(dir.path())
        .args(["evaluate", "-i"])
        .arg(&instance)
        .arg("-r")
        .arg(&log)
        .assert()
        .failure();
}

#[test]
fn random_with_seed_is_reproducible() {
    let dir = TempDir::new().unwrap();
    let instance = write(dir.path(), "instance.json", SPIN_CHAIN);

    let run = || {
        cmd(dir.path())
            .args(["random", "--seed", "11", "-i"])
            .arg(&instance)
            .assert()
            .success()
            .stdout(contains("Energy: "))
            .get_output()
            .stdout
            .clone()
    };
    assert_eq!(run(), run());
}

#[test]
fn sample_finds_ground_state() {
    let dir = TempDir::new().unwrap();
    let instance = write(dir.path(), "instance.json", SPIN_CHAIN);

    cmd(dir.path())
        .args(["sample", "-n", "500", "--seed", "3", "--workers", "2", "-i"])
        .arg(&instance)
        .assert()
        .success()
        .stdout(contains("Best energy found: -2.5"));
}

#[test]
fn sample_rejects_zero_workers() {
    let dir = TempDir::new().unwrap();
    let instance = write(dir.path(), "instance.json", SPIN_CHAIN);

    cmd(dir.path())
        .args(["sample", "-n", "10", "--workers", "0", "-i"])
        .arg(&instance)
        .assert()
        .failure();
}

#[test]
fn random_rejects_boolean_instance() {
    let dir = TempDir::new().unwrap();
    let instance = write(
        dir.path(),
        "instance.json",
        &SPIN_CHAIN.replace("\"spin\"", "\"boolean\""),
    );

    cmd(dir.path())
        .args(["random", "-i"])
        .arg(&instance)
        .assert()
        .failure();
}

#[test]
fn validate_accepts_consistent_instance() {
    let dir = TempDir::new().unwrap();
    let instance = write(dir.path(), "instance.json", SPIN_CHAIN);

    cmd(dir.path())
        .args(["validate", "-i"])
        .arg(&instance)
        .assert()
        .success()
        .stdout(contains("Instance is valid: 3 variables"));
}

#[test]
fn validate_rejects_undeclared_variable() {
    let dir = TempDir::new().unwrap();
    let instance = write(
        dir.path(),
        "instance.json",
        &SPIN_CHAIN.replace("\"id_head\": 2", "\"id_head\": 7"),
    );

    cmd(dir.path())
        .args(["validate", "-i"])
        .arg(&instance)
        .assert()
        .code(1)
        .stderr(contains("Instance is invalid"));
}

#[test]
fn tabulate_writes_best_energy_table() {
    let dir = TempDir::new().unwrap();
    let results = dir.path().join("results");
    write(&results, "sa_1s/p16/inst_a.stdout", &solver_log(-10.0, 1.0, "1"));
    write(&results, "sa_10s/p16/inst_a.stdout", &solver_log(-12.0, 9.0, "1"));
    write(&results, "gurobi_60s/p16/inst_a.stdout", &solver_log(-11.0, 30.0, "1"));
    write(&results, "gurobi_60s/p16/inst_b.stdout", &solver_log(-4.0, 30.0, "1"));
    write(&results, "gurobi_60s/p16/inst_c.stdout", "out of memory\n");

    let output = dir.path().join("tables").join("best.csv");
    cmd(dir.path())
        .args(["tabulate", "-i"])
        .arg(&results)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let csv = fs::read_to_string(&output).unwrap();
    assert_eq!(
        csv,
        "instance,gurobi,sa,best_energy\n\
         inst_a,-11.0,-12.0,-12.0\n\
         inst_b,-4.0,,-4.0\n"
    );
}

#[test]
fn records_prints_to_stdout() {
    let dir = TempDir::new().unwrap();
    let results = dir.path().join("results");
    write(&results, "sa_1s/p16/inst_a.stdout", &solver_log(-10.0, 1.5, "1"));

    cmd(dir.path())
        .args(["records", "-i"])
        .arg(&results)
        .assert()
        .success()
        .stdout(contains(
            "instance,solver,time_group,energy,solve_time,total_time,lattice_size",
        ))
        .stdout(contains("inst_a,sa,1s,-10.0,1.5,1.5,"));
}

#[test]
fn tabulate_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    cmd(dir.path())
        .args(["tabulate", "-i", "does-not-exist", "-o", "out.csv"])
        .assert()
        .failure();
}

#[test]
fn config_prints_effective_yaml() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "ising-bench.yaml", "sampling:\n  num_reads: 42\n");

    cmd(dir.path())
        .env_remove("ISING_BENCH_NUM_READS")
        .arg("config")
        .assert()
        .success()
        .stdout(contains("num_reads: 42"))
        .stdout(contains("data_tag: BQP_DATA"));
}

#[test]
fn missing_config_file_fails() {
    let dir = TempDir::new().unwrap();
    cmd(dir.path())
        .args(["--config", "missing.yaml", "config"])
        .assert()
        .failure()
        .stderr(contains("missing.yaml"));
}
