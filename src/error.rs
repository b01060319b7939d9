//! Crate-level error types

use std::fmt;

use thiserror::Error;

use crate::sql::error::SqlError;

/// Errors surfaced by models, the manager and the transport seam
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Invalid record id '{0}': expected 15 or 18 alphanumeric characters")]
    InvalidId(String),

    #[error("{0} record has no id")]
    MissingId(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Sql(#[from] SqlError),

    #[error("Failed to decode {object} row: {source}")]
    Decode {
        object: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("{object} query stopped after {received} of {total} records with no next batch")]
    IncompleteResult {
        object: String,
        received: usize,
        total: u64,
    },
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// What is wrong with a single field value
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldErrorKind {
    #[error("value is required")]
    Required,

    #[error("expected a {expected} value")]
    WrongType { expected: &'static str },

    #[error("length {actual} exceeds maximum {max}")]
    TooLong { max: u32, actual: usize },

    #[error("'{0}' is not a valid choice")]
    InvalidChoice(String),

    #[error("unknown field")]
    UnknownField,
}

/// A validation failure on one field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn new(field: impl Into<String>, kind: FieldErrorKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.kind)
    }
}

/// All field failures found on one record
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{object} failed validation: {}", join_errors(.errors))]
pub struct ValidationError {
    pub object: String,
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// Errors reported for `field`
    pub fn for_field(&self, field: &str) -> Vec<&FieldErrorKind> {
        self.errors
            .iter()
            .filter(|e| e.field == field)
            .map(|e| &e.kind)
            .collect()
    }
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
