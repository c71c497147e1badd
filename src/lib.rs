// Copyright 2026 Ising Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Ising Bench
//!
//! Tools for benchmarking Ising model solvers on bqpjson instances:
//! energy evaluation of assignments, a random-sampling baseline, and
//! tabulation of solver result logs.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              ising-bench CLI             │
//! ├──────────────────┬──────────────────────┤
//! │   Evaluation     │   Result tabulation  │
//! │   (energy,       │   (results::log,     │
//! │    sampling)     │    collect, table)   │
//! ├──────────────────┴──────────────────────┤
//! │        bqpjson model + validation        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration management
//! - [`bqpjson`]: Instance format and loading
//! - [`validation`]: Input validation utilities
//! - [`energy`]: Ising energy of assignments
//! - [`sampling`]: Random-assignment baseline
//! - [`results`]: Solver log parsing and best-energy tables
//! - [`error`]: Error types

pub mod bqpjson;
pub mod config;
pub mod energy;
pub mod error;
pub mod results;
pub mod sampling;
pub mod validation;

pub use config::Config;
pub use error::{Error, Result};

#[cfg(test)]
pub mod test_utils;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
