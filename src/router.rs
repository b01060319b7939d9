//! Connection routing for remote objects

use tracing::debug;

use crate::config::BackendConfig;
use crate::sql::schema::{SObjectDescribe, SalesforceSchema};

/// Routes remote objects to the configured connection alias
#[derive(Debug, Clone)]
pub struct ModelRouter {
    alias: String,
    schema: SalesforceSchema,
}

impl ModelRouter {
    pub fn new(config: &BackendConfig, schema: SalesforceSchema) -> Self {
        Self {
            alias: config.database_alias.clone(),
            schema,
        }
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Alias for reads, or `None` when the object is not a remote object
    pub fn db_for_read(&self, object: &SObjectDescribe) -> Option<&str> {
        self.route(object)
    }

    /// Alias for writes, or `None` when the object is not a remote object
    pub fn db_for_write(&self, object: &SObjectDescribe) -> Option<&str> {
        self.route(object)
    }

    /// Whether local schema tooling may create or alter the object's storage
    pub fn allow_migrate(&self, object: &SObjectDescribe) -> bool {
        if self.schema.has_object(&object.name) {
            return false;
        }
        object.managed
    }

    fn route(&self, object: &SObjectDescribe) -> Option<&str> {
        if self.schema.has_object(&object.name) {
            debug!(object = %object.name, alias = %self.alias, "routing to remote connection");
            Some(self.alias.as_str())
        } else {
            None
        }
    }
}
