//! Error types for SQL template rendering and query construction

use thiserror::Error;

use super::dialect::SqlDialect;

/// Errors raised while rendering SQL fragments
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SqlError {
    #[error("Malformed template '{template}' at byte {position}")]
    MalformedTemplate { template: String, position: usize },

    #[error("No value for placeholder '{name}' in template '{template}'")]
    MissingParameter { name: String, template: String },

    #[error("Template parameter '{0}' bound more than once")]
    ConflictingParameter(String),

    #[error("Query on '{0}' selects nothing")]
    EmptySelect(String),

    #[error("Value cannot be rendered as a {dialect:?} literal: {value}")]
    UnsupportedValue { dialect: SqlDialect, value: String },
}

/// Result type for SQL rendering operations
pub type SqlResult<T> = Result<T, SqlError>;
