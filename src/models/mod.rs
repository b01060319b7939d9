//! Record types for remote objects
//!
//! Each record type is a plain struct whose field names follow the remote
//! platform's CamelCase API names. Records carry their identity value but no
//! persistence behaviour; reading and writing them is the job of
//! [`crate::manager::SalesforceManager`], which is handed a record type at
//! each call site.

mod account;
mod lead;

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{BackendError, BackendResult};
use crate::fields::SalesforceId;
use crate::sql::schema::{SObjectDescribe, SalesforceSchema};

pub use account::Account;
pub use lead::Lead;

/// A record type backed by a remote object
pub trait SalesforceModel: Serialize + DeserializeOwned + fmt::Display {
    /// Remote object API name
    const OBJECT_NAME: &'static str;

    /// Field metadata; always includes the `Id` primary key and is unmanaged
    fn describe() -> SObjectDescribe;

    fn id(&self) -> Option<&SalesforceId>;

    fn set_id(&mut self, id: SalesforceId);

    /// Field values as sent to the remote API (unset fields are omitted)
    fn to_fields(&self) -> BackendResult<Map<String, Value>> {
        let decode = |source: serde_json::Error| BackendError::Decode {
            object: Self::OBJECT_NAME.to_string(),
            source,
        };
        match serde_json::to_value(self).map_err(decode)? {
            Value::Object(map) => Ok(map),
            other => Err(decode(<serde_json::Error as serde::ser::Error>::custom(
                format!("expected an object, got {}", other),
            ))),
        }
    }

    /// Build a record from one result row
    fn from_row(row: Value) -> BackendResult<Self> {
        serde_json::from_value(row).map_err(|source| BackendError::Decode {
            object: Self::OBJECT_NAME.to_string(),
            source,
        })
    }

    /// Check this record's values against [`SalesforceModel::describe`]
    fn validate(&self) -> BackendResult<()> {
        let fields = self.to_fields()?;
        Self::describe().validate_record(&fields)?;
        Ok(())
    }
}

/// Schema holding every bundled record type
pub fn standard_schema() -> SalesforceSchema {
    let mut schema = SalesforceSchema::new();
    schema.add_object(Account::describe());
    schema.add_object(Lead::describe());
    schema
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_schema() {
        let schema = standard_schema();
        assert!(schema.has_object("Account"));
        assert!(schema.has_object("lead"));
        assert_eq!(schema.objects().count(), 2);
    }

    #[test]
    fn test_every_object_has_one_identity_field() {
        for object in standard_schema().objects() {
            let keys: Vec<_> = object.fields().filter(|f| f.primary_key).collect();
            assert_eq!(keys.len(), 1, "{}", object.name);
            assert_eq!(keys[0].name, "Id");
            assert!(!object.managed);
        }
    }
}
