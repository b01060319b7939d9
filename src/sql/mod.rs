//! Query rendering for the remote query language
//!
//! This module renders the query text the manager sends to the remote API and
//! holds the object/field metadata used to validate record values.
//!
//! # Overview
//!
//! - [`aggregates`]: COUNT and the other aggregate functions. The remote
//!   dialect has no `COUNT(*)`; counting all rows is written `COUNT()`.
//! - [`dialect`]: literal, identifier and wildcard rules per dialect.
//! - [`query`]: single-object SELECT statements with equality filters.
//! - [`schema`]: object and field describes with local value validation.
//!
//! # Example
//!
//! ```rust
//! use sfbackend::sql::{Count, SelectQuery, SqlDialect};
//!
//! assert_eq!(Count::new("*").as_sql().unwrap(), "COUNT()");
//! assert_eq!(
//!     Count::new("Industry").distinct(true).as_sql().unwrap(),
//!     "COUNT(DISTINCT Industry)"
//! );
//!
//! let soql = SelectQuery::new("Lead")
//!     .count(Count::new("*"))
//!     .filter("Email", "ada@example.com")
//!     .to_sql(SqlDialect::Soql)
//!     .unwrap();
//! assert_eq!(soql, "SELECT COUNT() FROM Lead WHERE Email = 'ada@example.com'");
//! ```

pub mod aggregates;
pub mod dialect;
pub mod error;
pub mod query;
pub mod schema;

// Re-export main types
pub use aggregates::{count_sql, Aggregate, AggregateFunction, Count};
pub use dialect::{get_dialect, AnsiDialect, SoqlDialect, SqlDialect, SqlDialectImpl};
pub use error::{SqlError, SqlResult};
pub use query::{SelectItem, SelectQuery};
pub use schema::{FieldDescribe, SObjectDescribe, SalesforceFieldType, SalesforceSchema};
