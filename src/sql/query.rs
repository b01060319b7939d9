//! SELECT statement rendering

use serde_json::Value;
use tracing::debug;

use super::aggregates::{Aggregate, Count};
use super::dialect::{get_dialect, SqlDialect};
use super::error::{SqlError, SqlResult};

/// One entry of the select list
#[derive(Debug, Clone, PartialEq)]
pub enum SelectItem {
    Field(String),
    Count(Count),
    Aggregate(Aggregate),
}

/// A single-object SELECT with equality filters
#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    object: String,
    select: Vec<SelectItem>,
    filters: Vec<(String, Value)>,
    order_by: Vec<(String, bool)>,
    limit: Option<u32>,
    offset: Option<u32>,
}

impl SelectQuery {
    pub fn new(object: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            select: Vec::new(),
            filters: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.select.push(SelectItem::Field(name.into()));
        self
    }

    pub fn fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select
            .extend(names.into_iter().map(|n| SelectItem::Field(n.into())));
        self
    }

    pub fn count(mut self, count: Count) -> Self {
        self.select.push(SelectItem::Count(count));
        self
    }

    pub fn aggregate(mut self, aggregate: Aggregate) -> Self {
        self.select.push(SelectItem::Aggregate(aggregate));
        self
    }

    /// Add `field = value`; filters are joined with AND
    pub fn filter(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, descending: bool) -> Self {
        self.order_by.push((field.into(), descending));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn object(&self) -> &str {
        &self.object
    }

    pub fn has_limit(&self) -> bool {
        self.limit.is_some()
    }

    pub fn to_sql(&self, dialect: SqlDialect) -> SqlResult<String> {
        if self.select.is_empty() {
            return Err(SqlError::EmptySelect(self.object.clone()));
        }
        let d = get_dialect(dialect);

        let mut columns = Vec::with_capacity(self.select.len());
        for item in &self.select {
            columns.push(match item {
                SelectItem::Field(name) => d.quote_identifier(name),
                SelectItem::Count(count) => count.to_sql(dialect)?,
                SelectItem::Aggregate(aggregate) => aggregate.to_sql(dialect)?,
            });
        }

        let mut sql = format!(
            "SELECT {} FROM {}",
            columns.join(", "),
            d.quote_identifier(&self.object)
        );

        if !self.filters.is_empty() {
            let mut conditions = Vec::with_capacity(self.filters.len());
            for (field, value) in &self.filters {
                conditions.push(format!(
                    "{} = {}",
                    d.quote_identifier(field),
                    d.literal(value)?
                ));
            }
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }

        if !self.order_by.is_empty() {
            let order: Vec<String> = self
                .order_by
                .iter()
                .map(|(field, desc)| {
                    format!(
                        "{} {}",
                        d.quote_identifier(field),
                        if *desc { "DESC" } else { "ASC" }
                    )
                })
                .collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&order.join(", "));
        }

        let paging = d.limit_offset(self.limit, self.offset);
        if !paging.is_empty() {
            sql.push(' ');
            sql.push_str(&paging);
        }

        debug!(object = %self.object, sql = %sql, "rendered select");
        Ok(sql)
    }
}
