// Copyright 2026 Ising Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! bqpjson document types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Domain of the decision variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableDomain {
    /// Ising spins, values in {-1, +1}
    Spin,
    /// Binary variables, values in {0, 1}
    Boolean,
}

impl VariableDomain {
    /// Whether `value` is a legal assignment in this domain.
    pub fn admits(&self, value: f64) -> bool {
        match self {
            VariableDomain::Spin => value == 1.0 || value == -1.0,
            VariableDomain::Boolean => value == 0.0 || value == 1.0,
        }
    }
}

impl std::fmt::Display for VariableDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VariableDomain::Spin => write!(f, "spin"),
            VariableDomain::Boolean => write!(f, "boolean"),
        }
    }
}

/// Field on a single variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearTerm {
    pub id: i64,
    pub coeff: f64,
}

/// Coupling between two variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuadraticTerm {
    pub id_tail: i64,
    pub id_head: i64,
    pub coeff: f64,
}

impl QuadraticTerm {
    /// Endpoints ordered as (min, max), used to detect duplicate couplings.
    pub fn unordered_pair(&self) -> (i64, i64) {
        if self.id_tail <= self.id_head {
            (self.id_tail, self.id_head)
        } else {
            (self.id_head, self.id_tail)
        }
    }
}

/// One variable value inside an embedded solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionValue {
    pub id: i64,
    pub value: f64,
}

/// A known solution shipped with the instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub id: i64,
    pub assignment: Vec<SolutionValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<f64>,
}

/// A binary quadratic program in bqpjson form.
///
/// The objective is `scale * (Σ linear + Σ quadratic + offset)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BqpModel {
    pub version: String,
    pub id: i64,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    pub variable_ids: Vec<i64>,
    pub variable_domain: VariableDomain,
    pub scale: f64,
    pub offset: f64,
    pub linear_terms: Vec<LinearTerm>,
    pub quadratic_terms: Vec<QuadraticTerm>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solutions: Option<Vec<Solution>>,
}
