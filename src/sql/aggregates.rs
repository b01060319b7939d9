//! Aggregate functions (COUNT, SUM, AVG, MIN, MAX)
//!
//! The remote query language has no `COUNT(*)`. Counting every row is written
//! `COUNT()`, and counting a column is `COUNT(column)`, optionally
//! `COUNT(DISTINCT column)`. [`Count`] takes care of that rewrite; the other
//! aggregates render in the usual `FUNCTION(column)` form.
//!
//! Rendering goes through the placeholder templates in [`crate::template`],
//! so a bad template or a parameter collision is reported from there.

use tracing::{debug, warn};

use crate::template::{render_template, TemplateParams};

use super::dialect::{get_dialect, SqlDialect};
use super::error::SqlResult;

/// Aggregate functions understood by the query layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFunction {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl AggregateFunction {
    pub fn sql_function(&self) -> &'static str {
        match self {
            AggregateFunction::Count => "COUNT",
            AggregateFunction::Sum => "SUM",
            AggregateFunction::Avg => "AVG",
            AggregateFunction::Min => "MIN",
            AggregateFunction::Max => "MAX",
        }
    }

    /// Result is always an integer
    pub fn is_ordinal(&self) -> bool {
        matches!(self, AggregateFunction::Count)
    }

    /// Result is always a float
    pub fn is_computed(&self) -> bool {
        matches!(self, AggregateFunction::Avg)
    }
}

/// COUNT aggregate for the remote dialect
#[derive(Debug, Clone, PartialEq)]
pub struct Count {
    column: String,
    distinct: bool,
    alias: Option<String>,
    extra: Vec<(String, String)>,
}

impl Count {
    pub const SQL_FUNCTION: &'static str = "COUNT";
    pub const SQL_TEMPLATE: &'static str = "%(function)s(%(distinct)s%(field)s)";

    /// Count `col`, where `"*"` means every row
    pub fn new(col: impl Into<String>) -> Self {
        Self::for_dialect(col, SqlDialect::Soql)
    }

    /// Count `col`, rewriting the wildcard the way `dialect` requires
    pub fn for_dialect(col: impl Into<String>, dialect: SqlDialect) -> Self {
        let col = col.into();
        let column = if col == "*" {
            get_dialect(dialect).count_all_column().to_string()
        } else {
            col
        };
        Self {
            column,
            distinct: false,
            alias: None,
            extra: Vec::new(),
        }
    }

    pub fn distinct(mut self, distinct: bool) -> Self {
        self.distinct = distinct;
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Add a free-form template parameter
    pub fn with_extra(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((name.into(), value.into()));
        self
    }

    /// Column reference after wildcard rewriting (empty for "all rows")
    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn function(&self) -> AggregateFunction {
        AggregateFunction::Count
    }

    /// Parameters handed to the template renderer
    pub fn params(&self) -> SqlResult<TemplateParams> {
        let mut params = TemplateParams::new();
        params.insert_unique("function", Self::SQL_FUNCTION)?;
        params.insert_unique("field", self.column.as_str())?;
        params.insert_unique("distinct", if self.distinct { "DISTINCT " } else { "" })?;
        for (name, value) in &self.extra {
            params.insert_unique(name.as_str(), value.as_str())?;
        }
        Ok(params)
    }

    pub fn as_sql(&self) -> SqlResult<String> {
        self.as_sql_with_template(Self::SQL_TEMPLATE)
    }

    /// Render with a template supplied by the caller
    pub fn as_sql_with_template(&self, template: &str) -> SqlResult<String> {
        if self.distinct && self.column.is_empty() {
            warn!("distinct count over all rows renders without a column");
        }
        let sql = render_template(template, &self.params()?)?;
        let sql = with_alias(sql, self.alias.as_deref());
        debug!(sql = %sql, "rendered count aggregate");
        Ok(sql)
    }

    /// Render for `dialect`: the wildcard becomes that dialect's
    /// count-all column and any other column is quoted
    pub fn to_sql(&self, dialect: SqlDialect) -> SqlResult<String> {
        let d = get_dialect(dialect);
        let column = if self.column.is_empty() || self.column == "*" {
            d.count_all_column().to_string()
        } else {
            d.quote_identifier(&self.column)
        };
        Count {
            column,
            ..self.clone()
        }
        .as_sql()
    }
}

/// Render a COUNT expression from its parts
///
/// `count_sql("*", false, &TemplateParams::new())` is `COUNT()`.
pub fn count_sql(column: &str, distinct: bool, extra: &TemplateParams) -> SqlResult<String> {
    let mut count = Count::new(column).distinct(distinct);
    for (name, value) in extra.iter() {
        count = count.with_extra(name, value);
    }
    count.as_sql()
}

/// Non-COUNT aggregate, rendered as `FUNCTION(column)`
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    function: AggregateFunction,
    column: String,
    alias: Option<String>,
}

impl Aggregate {
    pub const SQL_TEMPLATE: &'static str = "%(function)s(%(field)s)";

    pub fn new(function: AggregateFunction, column: impl Into<String>) -> Self {
        Self {
            function,
            column: column.into(),
            alias: None,
        }
    }

    pub fn sum(column: impl Into<String>) -> Self {
        Self::new(AggregateFunction::Sum, column)
    }

    pub fn avg(column: impl Into<String>) -> Self {
        Self::new(AggregateFunction::Avg, column)
    }

    pub fn min(column: impl Into<String>) -> Self {
        Self::new(AggregateFunction::Min, column)
    }

    pub fn max(column: impl Into<String>) -> Self {
        Self::new(AggregateFunction::Max, column)
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn function(&self) -> AggregateFunction {
        self.function
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn as_sql(&self) -> SqlResult<String> {
        let mut params = TemplateParams::new();
        params.insert_unique("function", self.function.sql_function())?;
        params.insert_unique("field", self.column.as_str())?;
        let sql = render_template(Self::SQL_TEMPLATE, &params)?;
        Ok(with_alias(sql, self.alias.as_deref()))
    }

    /// Render for `dialect`, quoting the column (`*` is left alone)
    pub fn to_sql(&self, dialect: SqlDialect) -> SqlResult<String> {
        if self.column == "*" {
            return self.as_sql();
        }
        Aggregate {
            column: get_dialect(dialect).quote_identifier(&self.column),
            ..self.clone()
        }
        .as_sql()
    }
}

fn with_alias(sql: String, alias: Option<&str>) -> String {
    match alias {
        Some(alias) => format!("{} {}", sql, alias),
        None => sql,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::error::SqlError;

    #[test]
    fn test_count_column() {
        assert_eq!(Count::new("Id").as_sql().unwrap(), "COUNT(Id)");
    }

    #[test]
    fn test_count_wildcard_is_empty() {
        let count = Count::new("*");
        assert_eq!(count.column(), "");
        assert_eq!(count.as_sql().unwrap(), "COUNT()");
    }

    #[test]
    fn test_count_distinct() {
        assert_eq!(
            Count::new("Industry").distinct(true).as_sql().unwrap(),
            "COUNT(DISTINCT Industry)"
        );
        assert_eq!(
            Count::new("Industry").distinct(false).as_sql().unwrap(),
            "COUNT(Industry)"
        );
    }

    #[test]
    fn test_distinct_wildcard_preserved_literally() {
        assert_eq!(
            Count::new("*").distinct(true).as_sql().unwrap(),
            "COUNT(DISTINCT )"
        );
    }

    #[test]
    fn test_ansi_keeps_wildcard() {
        assert_eq!(
            Count::for_dialect("*", SqlDialect::Ansi).as_sql().unwrap(),
            "COUNT(*)"
        );
    }

    #[test]
    fn test_wildcard_resolved_at_render() {
        let count = Count::new("*");
        assert_eq!(count.to_sql(SqlDialect::Ansi).unwrap(), "COUNT(*)");
        assert_eq!(count.to_sql(SqlDialect::Soql).unwrap(), "COUNT()");

        let ansi = Count::for_dialect("*", SqlDialect::Ansi);
        assert_eq!(ansi.to_sql(SqlDialect::Soql).unwrap(), "COUNT()");
    }

    #[test]
    fn test_render_quotes_column() {
        let count = Count::new("Name").distinct(true);
        assert_eq!(count.to_sql(SqlDialect::Ansi).unwrap(), "COUNT(DISTINCT \"Name\")");
        assert_eq!(count.to_sql(SqlDialect::Soql).unwrap(), "COUNT(DISTINCT Name)");
        assert_eq!(
            Aggregate::sum("AnnualRevenue").to_sql(SqlDialect::Ansi).unwrap(),
            "SUM(\"AnnualRevenue\")"
        );
    }

    #[test]
    fn test_alias() {
        assert_eq!(
            Count::new("Id").with_alias("cnt").as_sql().unwrap(),
            "COUNT(Id) cnt"
        );
    }

    #[test]
    fn test_extra_params_feed_custom_template() {
        let sql = Count::new("Id")
            .with_extra("suffix", " /* hint */")
            .as_sql_with_template("%(function)s(%(field)s)%(suffix)s")
            .unwrap();
        assert_eq!(sql, "COUNT(Id) /* hint */");
    }

    #[test]
    fn test_extra_colliding_with_builtin_fails() {
        let err = Count::new("Id")
            .with_extra("distinct", "DISTINCT ")
            .as_sql()
            .unwrap_err();
        assert_eq!(err, SqlError::ConflictingParameter("distinct".to_string()));
    }

    #[test]
    fn test_template_missing_placeholder_fails() {
        let err = Count::new("Id")
            .as_sql_with_template("%(function)s(%(expr)s)")
            .unwrap_err();
        assert!(matches!(err, SqlError::MissingParameter { ref name, .. } if name == "expr"));
    }

    #[test]
    fn test_count_sql_function() {
        let extra = TemplateParams::new();
        assert_eq!(count_sql("*", false, &extra).unwrap(), "COUNT()");
        assert_eq!(count_sql("Name", true, &extra).unwrap(), "COUNT(DISTINCT Name)");
    }

    #[test]
    fn test_other_aggregates() {
        assert_eq!(Aggregate::sum("AnnualRevenue").as_sql().unwrap(), "SUM(AnnualRevenue)");
        assert_eq!(
            Aggregate::max("CreatedDate").with_alias("latest").as_sql().unwrap(),
            "MAX(CreatedDate) latest"
        );
        assert_eq!(Aggregate::min("*").as_sql().unwrap(), "MIN(*)");
    }

    #[test]
    fn test_result_typing() {
        assert!(AggregateFunction::Count.is_ordinal());
        assert!(!AggregateFunction::Sum.is_ordinal());
        assert!(AggregateFunction::Avg.is_computed());
        assert!(!AggregateFunction::Max.is_computed());
    }
}
