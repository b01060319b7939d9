//! Record manager
//!
//! [`SalesforceManager`] is the explicit access point for reading and writing
//! records. It renders queries, hands them to a [`Transport`], and turns the
//! result rows back into record values. The transport is the seam to the
//! remote API client (authentication, HTTP, retries); nothing here performs
//! I/O itself.
//!
//! ```rust,ignore
//! let manager = SalesforceManager::new(&client, BackendConfig::default());
//! let total = manager.count::<Account>()?;
//! let banks = manager.filter::<Account>("Industry", "Banking")?;
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::BackendConfig;
use crate::error::{BackendError, BackendResult};
use crate::fields::SalesforceId;
use crate::models::SalesforceModel;
use crate::sql::aggregates::Count;
use crate::sql::query::SelectQuery;

/// Result of a query call, in the remote REST API's shape
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    pub total_size: u64,
    pub done: bool,
    /// Locator of the next batch while `done` is false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_records_url: Option<String>,
    #[serde(default)]
    pub records: Vec<Value>,
}

/// Calls into the remote API
pub trait Transport {
    /// Run a query and return its first batch of rows
    fn query(&self, soql: &str) -> BackendResult<QueryResponse>;

    /// Fetch the batch a previous response pointed to with `next_records_url`
    fn query_more(&self, next_records_url: &str) -> BackendResult<QueryResponse>;

    /// Insert a record, returning the id the remote side assigned
    fn create(&self, object: &str, fields: &Map<String, Value>) -> BackendResult<SalesforceId>;

    fn update(
        &self,
        object: &str,
        id: &SalesforceId,
        fields: &Map<String, Value>,
    ) -> BackendResult<()>;

    fn delete(&self, object: &str, id: &SalesforceId) -> BackendResult<()>;
}

/// Reads and writes records of any [`SalesforceModel`] type through a transport
pub struct SalesforceManager<'t, T: Transport + ?Sized> {
    transport: &'t T,
    config: BackendConfig,
}

impl<'t, T: Transport + ?Sized> SalesforceManager<'t, T> {
    pub fn new(transport: &'t T, config: BackendConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Query selecting every described field of `M`
    pub fn query<M: SalesforceModel>(&self) -> SelectQuery {
        SelectQuery::new(M::OBJECT_NAME).fields(M::describe().field_names())
    }

    /// Run `query` and decode each row as `M`
    pub fn fetch<M: SalesforceModel>(&self, query: SelectQuery) -> BackendResult<Vec<M>> {
        let query = match self.config.default_query_limit {
            Some(limit) if !query.has_limit() => query.limit(limit),
            _ => query,
        };
        let rows = self.run_all(&query)?;
        rows.into_iter().map(M::from_row).collect()
    }

    pub fn all<M: SalesforceModel>(&self) -> BackendResult<Vec<M>> {
        self.fetch(self.query::<M>())
    }

    /// Records whose `field` equals `value`
    pub fn filter<M: SalesforceModel>(
        &self,
        field: &str,
        value: impl Into<Value>,
    ) -> BackendResult<Vec<M>> {
        self.fetch(self.query::<M>().filter(field, value))
    }

    /// Record with the given id, if it exists
    pub fn get<M: SalesforceModel>(&self, id: &SalesforceId) -> BackendResult<Option<M>> {
        let query = self.query::<M>().filter("Id", id.as_str()).limit(1);
        let mut records = self.fetch::<M>(query)?;
        Ok(if records.is_empty() {
            None
        } else {
            Some(records.swap_remove(0))
        })
    }

    /// Number of `M` records
    pub fn count<M: SalesforceModel>(&self) -> BackendResult<u64> {
        let query =
            SelectQuery::new(M::OBJECT_NAME).count(Count::for_dialect("*", self.config.dialect));
        let response = self.run(&query)?;
        // COUNT() reports through totalSize; a transport answering with a
        // row is read the same way as a column count
        match response.records.first() {
            None => Ok(response.total_size),
            Some(row) => read_count(M::OBJECT_NAME, row),
        }
    }

    /// Number of distinct non-null values of `field`
    pub fn count_distinct<M: SalesforceModel>(&self, field: &str) -> BackendResult<u64> {
        let query = SelectQuery::new(M::OBJECT_NAME).count(Count::new(field).distinct(true));
        let response = self.run(&query)?;
        match response.records.first() {
            Some(row) => read_count(M::OBJECT_NAME, row),
            None => Ok(0),
        }
    }

    /// Insert `record` and store the assigned id on it
    pub fn create<M: SalesforceModel>(&self, record: &mut M) -> BackendResult<SalesforceId> {
        let fields = self.writable_fields(record)?;
        debug!(object = M::OBJECT_NAME, fields = fields.len(), "creating record");
        let id = self.transport.create(M::OBJECT_NAME, &fields)?;
        record.set_id(id.clone());
        Ok(id)
    }

    pub fn update<M: SalesforceModel>(&self, record: &M) -> BackendResult<()> {
        let id = record
            .id()
            .ok_or_else(|| BackendError::MissingId(M::OBJECT_NAME.to_string()))?;
        let fields = self.writable_fields(record)?;
        debug!(object = M::OBJECT_NAME, id = %id, "updating record");
        self.transport.update(M::OBJECT_NAME, id, &fields)
    }

    pub fn delete<M: SalesforceModel>(&self, record: &M) -> BackendResult<()> {
        let id = record
            .id()
            .ok_or_else(|| BackendError::MissingId(M::OBJECT_NAME.to_string()))?;
        self.delete_by_id::<M>(id)
    }

    pub fn delete_by_id<M: SalesforceModel>(&self, id: &SalesforceId) -> BackendResult<()> {
        debug!(object = M::OBJECT_NAME, id = %id, "deleting record");
        self.transport.delete(M::OBJECT_NAME, id)
    }

    fn run(&self, query: &SelectQuery) -> BackendResult<QueryResponse> {
        let soql = query.to_sql(self.config.dialect)?;
        debug!(object = query.object(), soql = %soql, "running query");
        self.transport.query(&soql)
    }

    /// Run `query` and collect the rows of every batch
    fn run_all(&self, query: &SelectQuery) -> BackendResult<Vec<Value>> {
        let mut response = self.run(query)?;
        let total = response.total_size;
        let mut rows = std::mem::take(&mut response.records);

        while !response.done {
            let Some(url) = response.next_records_url.take() else {
                return Err(BackendError::IncompleteResult {
                    object: query.object().to_string(),
                    received: rows.len(),
                    total,
                });
            };
            debug!(
                object = query.object(),
                next = %url,
                received = rows.len(),
                "fetching next batch"
            );
            response = self.transport.query_more(&url)?;
            rows.append(&mut response.records);
        }

        Ok(rows)
    }

    /// Serialized fields minus the identity field
    fn writable_fields<M: SalesforceModel>(&self, record: &M) -> BackendResult<Map<String, Value>> {
        if self.config.validate_before_write {
            record.validate()?;
        }
        let mut fields = record.to_fields()?;
        fields.remove("Id");
        Ok(fields)
    }
}

/// Read the unaliased aggregate column of an aggregate result row
fn read_count(object: &str, row: &Value) -> BackendResult<u64> {
    row.get("expr0")
        .and_then(Value::as_u64)
        .ok_or_else(|| BackendError::Decode {
            object: object.to_string(),
            source: <serde_json::Error as serde::de::Error>::custom(format!(
                "aggregate row has no integer expr0: {}",
                row
            )),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_response_shape() {
        let response: QueryResponse = serde_json::from_value(json!({
            "totalSize": 3,
            "done": true,
            "records": []
        }))
        .unwrap();
        assert_eq!(response.total_size, 3);
        assert!(response.done);
        assert_eq!(response.next_records_url, None);
        assert!(response.records.is_empty());
    }

    #[test]
    fn test_query_response_next_batch() {
        let response: QueryResponse = serde_json::from_value(json!({
            "totalSize": 2500,
            "done": false,
            "nextRecordsUrl": "/services/data/v20.0/query/01gD0000002HU6KIAW-2000",
            "records": [{ "Id": "00Q000000000001" }]
        }))
        .unwrap();
        assert!(!response.done);
        assert_eq!(
            response.next_records_url.as_deref(),
            Some("/services/data/v20.0/query/01gD0000002HU6KIAW-2000")
        );
    }

    #[test]
    fn test_read_count() {
        assert_eq!(read_count("Account", &json!({ "expr0": 7 })).unwrap(), 7);
        assert!(matches!(
            read_count("Account", &json!({ "cnt": 7 })),
            Err(BackendError::Decode { .. })
        ));
    }
}
