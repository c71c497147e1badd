// Copyright 2026 Ising Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! bqpjson instance model and loading.
//!
//! Instances are JSON encodings of binary quadratic programs. A file is
//! parsed into a [`BqpModel`] and then checked by
//! [`crate::validation::validate_model`] before any energy is computed.

pub mod types;

pub use types::{
    BqpModel, LinearTerm, QuadraticTerm, Solution, SolutionValue, VariableDomain,
};

use std::path::Path;

use tracing::debug;

use crate::config::ResourceLimits;
use crate::error::{Error, Result};
use crate::results::layout::InstanceName;
use crate::validation::validate_model;

impl BqpModel {
    /// Parse a bqpjson document without validating it.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn num_variables(&self) -> usize {
        self.variable_ids.len()
    }

    pub fn is_spin(&self) -> bool {
        self.variable_domain == VariableDomain::Spin
    }

    /// Lattice size of the hardware embedding.
    ///
    /// Read from `metadata.lattice_size` when present, otherwise parsed
    /// from `metadata.instance_name` (e.g. `Pegasus-Lattice_Size-16_00027`).
    pub fn lattice_size(&self) -> Option<u32> {
        if let Some(size) = self.metadata.get("lattice_size").and_then(|v| v.as_u64()) {
            return u32::try_from(size).ok();
        }
        self.metadata
            .get("instance_name")
            .and_then(|v| v.as_str())
            .and_then(|name| InstanceName::parse(name).lattice_size)
    }
}

/// Load and validate a bqpjson instance from disk.
pub fn load_instance(path: &Path, limits: &ResourceLimits) -> Result<BqpModel> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let text = std::fs::read_to_string(path)?;
    let model = BqpModel::from_json_str(&text)?;

    validate_model(&model, limits)?;

    debug!(
        path = %path.display(),
        id = model.id,
        variables = model.num_variables(),
        quadratic_terms = model.quadratic_terms.len(),
        domain = %model.variable_domain,
        "Loaded instance"
    );

    Ok(model)
}
