//! Lead record - potential customers

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::fields::{id_field, SalesforceId};
use crate::sql::schema::{FieldDescribe, SObjectDescribe, SalesforceFieldType};

use super::SalesforceModel;

/// Default Lead record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Lead {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<SalesforceId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Lead {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            ..Self::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

impl SalesforceModel for Lead {
    const OBJECT_NAME: &'static str = "Lead";

    fn describe() -> SObjectDescribe {
        let mut obj = SObjectDescribe::new(Self::OBJECT_NAME);
        obj.add_field(id_field());
        obj.add_field(
            FieldDescribe::new("FirstName", SalesforceFieldType::String).with_max_length(100),
        );
        obj.add_field(
            FieldDescribe::new("LastName", SalesforceFieldType::String).with_max_length(100),
        );
        obj.add_field(
            FieldDescribe::new("Email", SalesforceFieldType::Email).with_max_length(100),
        );
        obj
    }

    fn id(&self) -> Option<&SalesforceId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: SalesforceId) {
        self.id = Some(id);
    }
}

impl fmt::Display for Lead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_names() {
        assert_eq!(Lead::new("Ada", "Lovelace").to_string(), "Ada Lovelace");
    }

    #[test]
    fn test_display_missing_first_name() {
        let lead = Lead {
            last_name: Some("Hopper".to_string()),
            ..Lead::default()
        };
        assert_eq!(lead.to_string(), " Hopper");
    }

    #[test]
    fn test_validate_lengths() {
        let lead = Lead::new("Ada", "Lovelace").with_email("ada@example.com");
        assert!(lead.validate().is_ok());

        let long = Lead::new("A".repeat(101), "Lovelace");
        assert!(long.validate().is_err());
    }
}
