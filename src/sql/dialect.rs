//! Query dialect abstraction for the remote query language and plain SQL

use serde::Deserialize;
use serde_json::Value;

use super::error::{SqlError, SqlResult};

/// Supported query dialects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SqlDialect {
    /// The remote platform's query language (no `COUNT(*)`, no quoting)
    #[default]
    Soql,
    /// Conventional SQL, used for comparison and local tooling
    Ansi,
}

/// Trait for dialect-specific rendering
pub trait SqlDialectImpl {
    /// Get the dialect type
    fn dialect(&self) -> SqlDialect;

    /// Column text that replaces the `*` wildcard inside COUNT
    fn count_all_column(&self) -> &str;

    /// Quote an identifier (object/field name)
    fn quote_identifier(&self, name: &str) -> String;

    /// Render a string literal
    fn string_literal(&self, value: &str) -> String;

    /// Boolean literal
    fn boolean_literal(&self, value: bool) -> &str;

    fn null_literal(&self) -> &str {
        "NULL"
    }

    /// Render a JSON scalar as a literal
    fn literal(&self, value: &Value) -> SqlResult<String> {
        match value {
            Value::Null => Ok(self.null_literal().to_string()),
            Value::Bool(b) => Ok(self.boolean_literal(*b).to_string()),
            Value::Number(n) => Ok(n.to_string()),
            Value::String(s) => Ok(self.string_literal(s)),
            Value::Array(_) | Value::Object(_) => Err(SqlError::UnsupportedValue {
                dialect: self.dialect(),
                value: value.to_string(),
            }),
        }
    }

    /// LIMIT/OFFSET syntax
    fn limit_offset(&self, limit: Option<u32>, offset: Option<u32>) -> String {
        let mut result = String::new();
        if let Some(l) = limit {
            result.push_str(&format!("LIMIT {}", l));
        }
        if let Some(o) = offset {
            if !result.is_empty() {
                result.push(' ');
            }
            result.push_str(&format!("OFFSET {}", o));
        }
        result
    }
}

/// Remote query language dialect
#[derive(Debug, Clone, Copy, Default)]
pub struct SoqlDialect;

impl SqlDialectImpl for SoqlDialect {
    fn dialect(&self) -> SqlDialect {
        SqlDialect::Soql
    }

    fn count_all_column(&self) -> &str {
        // COUNT(*) is rejected; bare COUNT() counts rows
        ""
    }

    fn quote_identifier(&self, name: &str) -> String {
        name.to_string()
    }

    fn string_literal(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len() + 2);
        out.push('\'');
        for c in value.chars() {
            match c {
                '\'' => out.push_str("\\'"),
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                _ => out.push(c),
            }
        }
        out.push('\'');
        out
    }

    fn boolean_literal(&self, value: bool) -> &str {
        if value {
            "true"
        } else {
            "false"
        }
    }

    fn null_literal(&self) -> &str {
        "null"
    }
}

/// Conventional SQL dialect
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiDialect;

impl SqlDialectImpl for AnsiDialect {
    fn dialect(&self) -> SqlDialect {
        SqlDialect::Ansi
    }

    fn count_all_column(&self) -> &str {
        "*"
    }

    fn quote_identifier(&self, name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    fn string_literal(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }

    fn boolean_literal(&self, value: bool) -> &str {
        if value {
            "TRUE"
        } else {
            "FALSE"
        }
    }
}

/// Get dialect implementation for a given dialect type
pub fn get_dialect(dialect: SqlDialect) -> Box<dyn SqlDialectImpl> {
    match dialect {
        SqlDialect::Soql => Box::new(SoqlDialect),
        SqlDialect::Ansi => Box::new(AnsiDialect),
    }
}
