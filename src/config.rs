// Copyright 2026 Ising Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Configuration management.
//!
//! Configuration is loaded from multiple sources with the following priority
//! (later sources override earlier ones):
//!
//! 1. Built-in defaults
//! 2. ising-bench.yaml file
//! 3. Environment variables (ISING_BENCH_*)
//! 4. CLI arguments

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use crate::error::{Error, Result};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Random sampling settings
    #[serde(default)]
    pub sampling: SamplingConfig,

    /// Solver log layout settings
    #[serde(default)]
    pub results: ResultsConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Validation settings
    #[serde(default)]
    pub validation: ValidationConfig,
}

impl Config {
    /// Load configuration from file and environment.
    ///
    /// An explicit `config_path` must exist; without one, the default file
    /// names are tried and defaults are used if none is present.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut config = Config::default();

        if let Some(path) = config_path {
            if !path.exists() {
                return Err(Error::FileNotFound(path.to_path_buf()));
            }
            let content = std::fs::read_to_string(path)?;
            config = serde_yml::from_str(&content)?;
        } else {
            for path in &["ising-bench.yaml", "ising-bench.yml"] {
                let path = Path::new(path);
                if path.exists() {
                    let content = std::fs::read_to_string(path)?;
                    config = serde_yml::from_str(&content)?;
                    break;
                }
            }
        }

        config.apply_env_overrides();

        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    /// Apply `ISING_BENCH_*` overrides from an arbitrary key lookup.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("ISING_BENCH_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Some(val) = lookup("ISING_BENCH_LOG_FORMAT") {
            self.logging.format = val;
        }
        if let Some(val) = lookup("ISING_BENCH_NUM_READS") {
            if let Ok(n) = val.parse() {
                self.sampling.num_reads = n;
            }
        }
        if let Some(val) = lookup("ISING_BENCH_SEED") {
            if let Ok(seed) = val.parse() {
                self.sampling.seed = Some(seed);
            }
        }
        if let Some(val) = lookup("ISING_BENCH_WORKERS") {
            if let Ok(n) = val.parse() {
                self.sampling.workers = n;
            }
        }
        if let Some(val) = lookup("ISING_BENCH_STRICT_VALIDATION") {
            self.validation.strict = val.to_lowercase() == "true" || val == "1";
        }
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        if self.sampling.workers == 0 {
            return Err(Error::Config("sampling.workers must be > 0".into()));
        }
        if self.results.extension.is_empty() {
            return Err(Error::Config("results.extension cannot be empty".into()));
        }
        if self.results.data_tag.is_empty() || self.results.solution_tag.is_empty() {
            return Err(Error::Config("results tags cannot be empty".into()));
        }
        if self.results.qa_marker.is_empty() || self.results.annealer_marker.is_empty() {
            return Err(Error::Config("results markers cannot be empty".into()));
        }
        if !matches!(self.logging.format.as_str(), "json" | "pretty") {
            return Err(Error::Config(format!(
                "logging.format must be 'json' or 'pretty', got '{}'",
                self.logging.format
            )));
        }
        if self.sampling.num_reads > self.validation.limits.max_num_reads {
            tracing::warn!(
                num_reads = self.sampling.num_reads,
                limit = self.validation.limits.max_num_reads,
                "Default num_reads exceeds the configured limit"
            );
        }
        Ok(())
    }
}

/// Random sampling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Number of random assignments drawn by `sample`
    #[serde(default = "default_num_reads")]
    pub num_reads: u64,

    /// Base RNG seed; entropy-seeded when absent
    #[serde(default)]
    pub seed: Option<u64>,

    /// Number of blocking workers used for sampling
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            num_reads: default_num_reads(),
            seed: None,
            workers: default_workers(),
        }
    }
}

fn default_num_reads() -> u64 {
    1_000
}

fn default_workers() -> usize {
    1
}

/// Layout of solver result logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsConfig {
    /// Substring identifying solver output files
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Tag of the summary line (energy and timings)
    #[serde(default = "default_data_tag")]
    pub data_tag: String,

    /// Tag of the line carrying the spin assignment
    #[serde(default = "default_solution_tag")]
    pub solution_tag: String,

    /// Path marker for runs submitted to the annealer API
    #[serde(default = "default_annealer_marker")]
    pub annealer_marker: String,

    /// Path marker for quantum annealing runs
    #[serde(default = "default_qa_marker")]
    pub qa_marker: String,
}

impl Default for ResultsConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            data_tag: default_data_tag(),
            solution_tag: default_solution_tag(),
            annealer_marker: default_annealer_marker(),
            qa_marker: default_qa_marker(),
        }
    }
}

fn default_extension() -> String {
    ".stdout".into()
}

fn default_data_tag() -> String {
    "BQP_DATA".into()
}

fn default_solution_tag() -> String {
    "BQP_SOLUTION".into()
}

fn default_annealer_marker() -> String {
    "_dwave_".into()
}

fn default_qa_marker() -> String {
    "qa".into()
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json, pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

/// Validation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Strict validation mode
    #[serde(default = "default_true")]
    pub strict: bool,

    /// Resource limits
    #[serde(default)]
    pub limits: ResourceLimits,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            strict: true,
            limits: ResourceLimits::default(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Resource limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceLimits {
    /// Maximum number of declared variables
    #[serde(default = "default_max_variables")]
    pub max_variables: u64,

    /// Maximum number of quadratic terms
    #[serde(default = "default_max_quadratic_terms")]
    pub max_quadratic_terms: u64,

    /// Maximum reads per sampling run
    #[serde(default = "default_max_num_reads")]
    pub max_num_reads: u64,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            max_variables: default_max_variables(),
            max_quadratic_terms: default_max_quadratic_terms(),
            max_num_reads: default_max_num_reads(),
        }
    }
}

fn default_max_variables() -> u64 {
    1_000_000
}

fn default_max_quadratic_terms() -> u64 {
    50_000_000
}

fn default_max_num_reads() -> u64 {
    1_000_000_000
}
