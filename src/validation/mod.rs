// Copyright 2026 Ising Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Consistency checks for bqpjson instances and spin assignments.

use std::collections::HashSet;

use tracing::warn;

use crate::bqpjson::{BqpModel, VariableDomain};
use crate::config::ResourceLimits;
use crate::error::{Result, ValidationError};

/// Validate a parsed bqpjson instance.
///
/// Checks the structural rules of the format: declared ids are unique,
/// every term references a declared variable, couplings are not self loops
/// or duplicates, coefficients are finite, and embedded solutions use
/// values from the declared domain.
pub fn validate_model(model: &BqpModel, limits: &ResourceLimits) -> Result<()> {
    if model.version.trim().is_empty() {
        return Err(field_error("version", "cannot be empty"));
    }

    if !model.scale.is_finite() || model.scale < 0.0 {
        return Err(field_error(
            "scale",
            &format!("must be finite and non-negative, got {}", model.scale),
        ));
    }

    if !model.offset.is_finite() {
        return Err(field_error(
            "offset",
            &format!("must be finite, got {}", model.offset),
        ));
    }

    if model.variable_ids.len() as u64 > limits.max_variables {
        return Err(ValidationError::ResourceLimit {
            resource: "variable_ids".into(),
            limit: limits.max_variables,
            requested: model.variable_ids.len() as u64,
        }
        .into());
    }

    if model.quadratic_terms.len() as u64 > limits.max_quadratic_terms {
        return Err(ValidationError::ResourceLimit {
            resource: "quadratic_terms".into(),
            limit: limits.max_quadratic_terms,
            requested: model.quadratic_terms.len() as u64,
        }
        .into());
    }

    let mut declared = HashSet::with_capacity(model.variable_ids.len());
    for id in &model.variable_ids {
        if !declared.insert(*id) {
            return Err(ValidationError::Duplicate {
                context: "variable id".into(),
                detail: id.to_string(),
            }
            .into());
        }
    }

    let mut seen_linear = HashSet::with_capacity(model.linear_terms.len());
    for (i, term) in model.linear_terms.iter().enumerate() {
        if !declared.contains(&term.id) {
            return Err(ValidationError::UnknownVariable {
                context: "linear term".into(),
                id: term.id,
            }
            .into());
        }
        if !seen_linear.insert(term.id) {
            return Err(ValidationError::Duplicate {
                context: "linear term".into(),
                detail: term.id.to_string(),
            }
            .into());
        }
        if !term.coeff.is_finite() {
            return Err(field_error(
                "linear_terms",
                &format!("non-finite coefficient at index {}", i),
            ));
        }
    }

    let mut seen_pairs = HashSet::with_capacity(model.quadratic_terms.len());
    for (i, term) in model.quadratic_terms.iter().enumerate() {
        for id in [term.id_tail, term.id_head] {
            if !declared.contains(&id) {
                return Err(ValidationError::UnknownVariable {
                    context: "quadratic term".into(),
                    id,
                }
                .into());
            }
        }
        if term.id_tail == term.id_head {
            return Err(field_error(
                "quadratic_terms",
                &format!("self loop on variable {} at index {}", term.id_tail, i),
            ));
        }
        let pair = term.unordered_pair();
        if !seen_pairs.insert(pair) {
            return Err(ValidationError::Duplicate {
                context: "quadratic term".into(),
                detail: format!("({}, {})", pair.0, pair.1),
            }
            .into());
        }
        if !term.coeff.is_finite() {
            return Err(field_error(
                "quadratic_terms",
                &format!("non-finite coefficient at index {}", i),
            ));
        }
    }

    if let Some(solutions) = &model.solutions {
        for solution in solutions {
            for value in &solution.assignment {
                if !declared.contains(&value.id) {
                    return Err(ValidationError::UnknownVariable {
                        context: format!("solution {}", solution.id),
                        id: value.id,
                    }
                    .into());
                }
                if !model.variable_domain.admits(value.value) {
                    return Err(field_error(
                        "solutions",
                        &format!(
                            "solution {} assigns {} to variable {}, outside the {} domain",
                            solution.id, value.value, value.id, model.variable_domain
                        ),
                    ));
                }
            }
        }
    }

    Ok(())
}

/// Require the model to be an Ising (spin) instance.
pub fn require_spin_domain(model: &BqpModel) -> Result<()> {
    if model.variable_domain != VariableDomain::Spin {
        return Err(ValidationError::Domain {
            expected: VariableDomain::Spin.to_string(),
            actual: model.variable_domain.to_string(),
        }
        .into());
    }
    Ok(())
}

/// Validate the number of reads requested from a sampler.
pub fn validate_num_reads(num_reads: u64, limits: &ResourceLimits) -> Result<()> {
    if num_reads > limits.max_num_reads {
        return Err(ValidationError::ResourceLimit {
            resource: "num_reads".into(),
            limit: limits.max_num_reads,
            requested: num_reads,
        }
        .into());
    }
    Ok(())
}

/// Validate positional assignment values read from a solver log.
///
/// Too few values is always an error. In strict mode extra trailing values
/// and values outside the model's domain are errors; otherwise trailing
/// values are ignored with a warning.
pub fn validate_assignment_values(model: &BqpModel, values: &[f64], strict: bool) -> Result<()> {
    let expected = model.num_variables();
    if values.len() < expected || (strict && values.len() != expected) {
        return Err(ValidationError::AssignmentLength {
            expected,
            actual: values.len(),
        }
        .into());
    }
    if values.len() > expected {
        warn!(
            expected,
            actual = values.len(),
            "Ignoring trailing assignment values"
        );
    }

    if !strict {
        return Ok(());
    }

    for (i, value) in values.iter().enumerate() {
        if !model.variable_domain.admits(*value) {
            return Err(field_error(
                "assignment",
                &format!(
                    "value {} at position {} is outside the {} domain",
                    value, i, model.variable_domain
                ),
            ));
        }
    }

    Ok(())
}

fn field_error(field: &str, message: &str) -> crate::error::Error {
    ValidationError::Field {
        field: field.into(),
        message: message.into(),
    }
    .into()
}
