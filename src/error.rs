// Copyright 2026 Ising Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for instance loading, energy evaluation and log tabulation.

use std::fmt;
use std::path::PathBuf;

/// Result type alias for crate operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Crate error types.
#[derive(Debug)]
pub enum Error {
    /// Configuration error
    Config(String),
    /// Input file does not exist
    FileNotFound(PathBuf),
    /// Instance or assignment failed validation
    Validation(ValidationError),
    /// Solver log could not be interpreted
    ResultLog(ResultLogError),
    /// IO error
    Io(std::io::Error),
    /// Serialization error
    Serialization(String),
    /// Background task failed or was cancelled
    Task(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::FileNotFound(path) => write!(f, "File not found: {}", path.display()),
            Error::Validation(e) => write!(f, "Validation error: {}", e),
            Error::ResultLog(e) => write!(f, "Result log error: {}", e),
            Error::Io(e) => write!(f, "IO error: {}", e),
            Error::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            Error::Task(msg) => write!(f, "Task error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Validation(e) => Some(e),
            Error::ResultLog(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<ValidationError> for Error {
    fn from(e: ValidationError) -> Self {
        Error::Validation(e)
    }
}

impl From<ResultLogError> for Error {
    fn from(e: ResultLogError) -> Self {
        Error::ResultLog(e)
    }
}

impl From<serde_yml::Error> for Error {
    fn from(e: serde_yml::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

/// Validation errors for bqpjson instances and spin assignments.
#[derive(Debug)]
pub enum ValidationError {
    /// Field validation failed
    Field { field: String, message: String },
    /// A term or solution references a variable that is not declared
    UnknownVariable { context: String, id: i64 },
    /// The same variable or coupling is listed more than once
    Duplicate { context: String, detail: String },
    /// Model is in the wrong variable domain for the operation
    Domain { expected: String, actual: String },
    /// Number of assignment values does not match the number of variables
    AssignmentLength { expected: usize, actual: usize },
    /// Resource limit exceeded
    ResourceLimit {
        resource: String,
        limit: u64,
        requested: u64,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Field { field, message } => {
                write!(f, "Field '{}': {}", field, message)
            }
            ValidationError::UnknownVariable { context, id } => {
                write!(f, "{} references undeclared variable {}", context, id)
            }
            ValidationError::Duplicate { context, detail } => {
                write!(f, "Duplicate {}: {}", context, detail)
            }
            ValidationError::Domain { expected, actual } => {
                write!(
                    f,
                    "Model must be in the {} domain, found {}",
                    expected, actual
                )
            }
            ValidationError::AssignmentLength { expected, actual } => {
                write!(
                    f,
                    "Assignment has {} values but the model declares {} variables",
                    actual, expected
                )
            }
            ValidationError::ResourceLimit {
                resource,
                limit,
                requested,
            } => {
                write!(
                    f,
                    "Resource limit exceeded for {}: limit={}, requested={}",
                    resource, limit, requested
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors raised while reading solver `.stdout` logs.
#[derive(Debug)]
pub enum ResultLogError {
    /// The log has no line carrying the tag
    MissingEntry { tag: String, path: PathBuf },
    /// The tagged line has too few comma-separated fields
    MissingField { tag: String, index: usize },
    /// A field could not be parsed as a number
    MalformedField {
        tag: String,
        index: usize,
        value: String,
    },
    /// Total wall-clock time is smaller than the solve time
    TimeOrder {
        path: PathBuf,
        solve_time: f64,
        total_time: f64,
    },
}

impl fmt::Display for ResultLogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultLogError::MissingEntry { tag, path } => {
                write!(f, "No `{}` entry found in file: {}", tag, path.display())
            }
            ResultLogError::MissingField { tag, index } => {
                write!(f, "`{}` entry has no field at index {}", tag, index)
            }
            ResultLogError::MalformedField { tag, index, value } => {
                write!(
                    f,
                    "`{}` field {} is not a number: '{}'",
                    tag, index, value
                )
            }
            ResultLogError::TimeOrder {
                path,
                solve_time,
                total_time,
            } => {
                write!(
                    f,
                    "Total time {} is less than solve time {} in {}",
                    total_time,
                    solve_time,
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for ResultLogError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    // =========================================================================
    // Error Display tests
    // =========================================================================

    #[test]
    fn test_error_display_config() {
        let e = Error::Config("workers must be > 0".into());
        assert_eq!(e.to_string(), "Configuration error: workers must be > 0");
    }

    #[test]
    fn test_error_display_file_not_found() {
        let e = Error::FileNotFound(PathBuf::from("data/missing.json"));
        assert_eq!(e.to_string(), "File not found: data/missing.json");
    }

    #[test]
    fn test_error_display_validation() {
        let e = Error::Validation(ValidationError::Domain {
            expected: "spin".into(),
            actual: "boolean".into(),
        });
        assert_eq!(
            e.to_string(),
            "Validation error: Model must be in the spin domain, found boolean"
        );
    }

    #[test]
    fn test_error_display_result_log() {
        let e = Error::ResultLog(ResultLogError::MissingEntry {
            tag: "BQP_DATA".into(),
            path: PathBuf::from("run/a.stdout"),
        });
        assert_eq!(
            e.to_string(),
            "Result log error: No `BQP_DATA` entry found in file: run/a.stdout"
        );
    }

    #[test]
    fn test_error_display_io() {
        let e = Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(e.to_string(), "IO error: gone");
    }

    #[test]
    fn test_error_display_serialization() {
        let e = Error::Serialization("invalid json".into());
        assert_eq!(e.to_string(), "Serialization error: invalid json");
    }

    #[test]
    fn test_error_display_task() {
        let e = Error::Task("worker panicked".into());
        assert_eq!(e.to_string(), "Task error: worker panicked");
    }

    // =========================================================================
    // ValidationError Display tests
    // =========================================================================

    #[test]
    fn test_validation_error_display_unknown_variable() {
        let e = ValidationError::UnknownVariable {
            context: "linear term".into(),
            id: 42,
        };
        assert_eq!(e.to_string(), "linear term references undeclared variable 42");
    }

    #[test]
    fn test_validation_error_display_duplicate() {
        let e = ValidationError::Duplicate {
            context: "quadratic term".into(),
            detail: "(1, 2)".into(),
        };
        assert_eq!(e.to_string(), "Duplicate quadratic term: (1, 2)");
    }

    #[test]
    fn test_validation_error_display_assignment_length() {
        let e = ValidationError::AssignmentLength {
            expected: 4,
            actual: 3,
        };
        assert_eq!(
            e.to_string(),
            "Assignment has 3 values but the model declares 4 variables"
        );
    }

    #[test]
    fn test_validation_error_display_resource_limit() {
        let e = ValidationError::ResourceLimit {
            resource: "num_reads".into(),
            limit: 1000,
            requested: 2000,
        };
        assert_eq!(
            e.to_string(),
            "Resource limit exceeded for num_reads: limit=1000, requested=2000"
        );
    }

    // =========================================================================
    // ResultLogError Display tests
    // =========================================================================

    #[test]
    fn test_result_log_error_display_malformed() {
        let e = ResultLogError::MalformedField {
            tag: "BQP_DATA".into(),
            index: 3,
            value: "nan?".into(),
        };
        assert_eq!(e.to_string(), "`BQP_DATA` field 3 is not a number: 'nan?'");
    }

    #[test]
    fn test_result_log_error_display_time_order() {
        let e = ResultLogError::TimeOrder {
            path: PathBuf::from("x.stdout"),
            solve_time: 2.0,
            total_time: 1.5,
        };
        assert_eq!(
            e.to_string(),
            "Total time 1.5 is less than solve time 2 in x.stdout"
        );
    }

    // =========================================================================
    // Error::source() and From impls
    // =========================================================================

    #[test]
    fn test_error_source() {
        assert!(Error::Io(std::io::Error::other("disk")).source().is_some());
        assert!(Error::Validation(ValidationError::AssignmentLength {
            expected: 1,
            actual: 0
        })
        .source()
        .is_some());
        assert!(Error::Config("x".into()).source().is_none());
        assert!(Error::FileNotFound(PathBuf::from("x")).source().is_none());
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{bad}").unwrap_err();
        let e: Error = json_err.into();
        assert!(matches!(e, Error::Serialization(_)));
    }

    #[test]
    fn test_from_serde_yaml_error() {
        let yaml_err = serde_yml::from_str::<serde_yml::Value>("{{{{").unwrap_err();
        let e: Error = yaml_err.into();
        assert!(matches!(e, Error::Serialization(_)));
    }

    #[test]
    fn test_from_result_log_error() {
        let le = ResultLogError::MissingField {
            tag: "BQP_DATA".into(),
            index: 7,
        };
        let e: Error = le.into();
        assert!(matches!(e, Error::ResultLog(ResultLogError::MissingField { .. })));
    }
}
