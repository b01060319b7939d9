//! Backend configuration

use serde::Deserialize;

use crate::error::BackendResult;
use crate::sql::dialect::SqlDialect;

/// Configuration shared by the manager and router
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackendConfig {
    /// Connection alias the router hands out for remote objects
    pub database_alias: String,
    /// Dialect used to render queries
    pub dialect: SqlDialect,
    /// Validate records against their describe metadata before create/update
    pub validate_before_write: bool,
    /// LIMIT applied to `all`/`filter` queries that set none
    pub default_query_limit: Option<u32>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            database_alias: "salesforce".to_string(),
            dialect: SqlDialect::Soql,
            validate_before_write: true,
            default_query_limit: None,
        }
    }
}

impl BackendConfig {
    /// Parse a JSON document; missing keys take their defaults
    pub fn from_json(source: &str) -> BackendResult<Self> {
        Ok(serde_json::from_str(source)?)
    }
}
