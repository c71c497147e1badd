// Copyright 2026 Ising Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Ising energy evaluation.
//!
//! The energy of an assignment `x` is
//!
//! ```text
//! E(x) = Σ_i h_i x_i + Σ_(i,j) J_ij x_i x_j
//! ```
//!
//! taken directly from the bqpjson linear and quadratic terms. The bqpjson
//! objective additionally applies `scale * (E + offset)`; see
//! [`scaled_energy`].
//!
//! [`compute_energy`] works on id-keyed [`Assignment`]s and is used for
//! one-off evaluations. [`CompiledModel`] resolves ids to positions once
//! and is used by the samplers, which evaluate many assignments of the
//! same instance.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::bqpjson::BqpModel;
use crate::error::{Result, ValidationError};

/// Variable values keyed by bqpjson variable id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    values: BTreeMap<i64, f64>,
}

impl Assignment {
    /// Build an assignment from values listed in `variable_ids` order.
    ///
    /// Values beyond the number of declared variables are ignored.
    pub fn from_positional(model: &BqpModel, values: &[f64]) -> Result<Self> {
        if values.len() < model.variable_ids.len() {
            return Err(ValidationError::AssignmentLength {
                expected: model.variable_ids.len(),
                actual: values.len(),
            }
            .into());
        }
        let values = model
            .variable_ids
            .iter()
            .copied()
            .zip(values.iter().copied())
            .collect();
        Ok(Self { values })
    }

    /// Assign the same value to every declared variable.
    pub fn uniform(model: &BqpModel, value: f64) -> Self {
        Self {
            values: model.variable_ids.iter().map(|id| (*id, value)).collect(),
        }
    }

    pub fn get(&self, id: i64) -> Option<f64> {
        self.values.get(&id).copied()
    }

    pub fn insert(&mut self, id: i64, value: f64) {
        self.values.insert(id, value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(id, value)` pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.values.iter().map(|(id, value)| (*id, *value))
    }
}

impl FromIterator<(i64, f64)> for Assignment {
    fn from_iter<T: IntoIterator<Item = (i64, f64)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

fn lookup(assignment: &Assignment, id: i64, context: &str) -> Result<f64> {
    assignment.get(id).ok_or_else(|| {
        ValidationError::UnknownVariable {
            context: context.into(),
            id,
        }
        .into()
    })
}

/// Compute the energy of an assignment for a given Ising instance.
///
/// Every variable referenced by a term must be present in `assignment`.
pub fn compute_energy(model: &BqpModel, assignment: &Assignment) -> Result<f64> {
    let mut energy = 0.0;

    for term in &model.linear_terms {
        energy += term.coeff * lookup(assignment, term.id, "assignment")?;
    }

    for term in &model.quadratic_terms {
        let tail = lookup(assignment, term.id_tail, "assignment")?;
        let head = lookup(assignment, term.id_head, "assignment")?;
        energy += term.coeff * tail * head;
    }

    Ok(energy)
}

/// Apply the bqpjson objective convention `scale * (energy + offset)`.
pub fn scaled_energy(model: &BqpModel, energy: f64) -> f64 {
    model.scale * (energy + model.offset)
}

/// Position-indexed form of a model for repeated evaluation.
///
/// Position `k` corresponds to `variable_ids[k]`.
#[derive(Debug, Clone)]
pub struct CompiledModel {
    variable_ids: Vec<i64>,
    linear: Vec<(usize, f64)>,
    quadratic: Vec<(usize, usize, f64)>,
}

impl CompiledModel {
    /// Resolve term ids to positions.
    ///
    /// Fails if a term references an undeclared variable.
    pub fn new(model: &BqpModel) -> Result<Self> {
        let index: HashMap<i64, usize> = model
            .variable_ids
            .iter()
            .enumerate()
            .map(|(pos, id)| (*id, pos))
            .collect();

        let position = |id: i64, context: &str| -> Result<usize> {
            index.get(&id).copied().ok_or_else(|| {
                ValidationError::UnknownVariable {
                    context: context.into(),
                    id,
                }
                .into()
            })
        };

        let linear = model
            .linear_terms
            .iter()
            .map(|t| Ok((position(t.id, "linear term")?, t.coeff)))
            .collect::<Result<Vec<_>>>()?;

        let quadratic = model
            .quadratic_terms
            .iter()
            .map(|t| {
                Ok((
                    position(t.id_tail, "quadratic term")?,
                    position(t.id_head, "quadratic term")?,
                    t.coeff,
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            variable_ids: model.variable_ids.clone(),
            linear,
            quadratic,
        })
    }

    pub fn num_variables(&self) -> usize {
        self.variable_ids.len()
    }

    /// Energy of positional values. `values.len()` must equal
    /// [`num_variables`](Self::num_variables).
    pub fn energy(&self, values: &[f64]) -> f64 {
        debug_assert_eq!(values.len(), self.variable_ids.len());

        let linear: f64 = self.linear.iter().map(|&(i, h)| h * values[i]).sum();
        let quadratic: f64 = self
            .quadratic
            .iter()
            .map(|&(i, j, coupling)| coupling * values[i] * values[j])
            .sum();

        linear + quadratic
    }

    /// Convert positional values back to an id-keyed assignment.
    pub fn to_assignment(&self, values: &[f64]) -> Assignment {
        self.variable_ids
            .iter()
            .copied()
            .zip(values.iter().copied())
            .collect()
    }
}
