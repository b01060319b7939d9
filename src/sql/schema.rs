//! Object and field metadata for remote record types
//!
//! Describes carry what the query and persistence layers need to know about a
//! record type: field names, types, lengths and picklist choices. They are a
//! local mirror of the remote platform's describe data; the remote side stays
//! authoritative and objects described here are never created or altered
//! locally (`managed` is `false` unless explicitly set).

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::error::{FieldError, FieldErrorKind, ValidationError};

/// Set of object descriptions
#[derive(Debug, Clone, Default)]
pub struct SalesforceSchema {
    /// Map from object API name (case-insensitive key) to object description
    objects: HashMap<String, SObjectDescribe>,
}

impl SalesforceSchema {
    /// Create a new empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to the schema
    pub fn add_object(&mut self, object: SObjectDescribe) {
        self.objects.insert(object.name.to_lowercase(), object);
    }

    /// Get an object by API name (case-insensitive)
    pub fn get_object(&self, name: &str) -> Option<&SObjectDescribe> {
        self.objects.get(&name.to_lowercase())
    }

    /// Get all objects
    pub fn objects(&self) -> impl Iterator<Item = &SObjectDescribe> {
        self.objects.values()
    }

    /// Check if an object exists
    pub fn has_object(&self, name: &str) -> bool {
        self.objects.contains_key(&name.to_lowercase())
    }
}

/// Description of a remote record type
#[derive(Debug, Clone)]
pub struct SObjectDescribe {
    /// API name (e.g., "Account", "Custom_Object__c")
    pub name: String,
    /// Label for display
    pub label: String,
    /// Whether local tooling may create or alter this object's storage
    pub managed: bool,
    /// Fields in declaration order
    fields: Vec<FieldDescribe>,
}

impl SObjectDescribe {
    /// Create a new, unmanaged object description
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            managed: false,
            fields: Vec::new(),
        }
    }

    /// Set the label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Add a field, replacing any field with the same (case-insensitive) name
    pub fn add_field(&mut self, field: FieldDescribe) {
        let lower = field.name.to_lowercase();
        match self
            .fields
            .iter_mut()
            .find(|f| f.name.to_lowercase() == lower)
        {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }

    /// Get a field by API name (case-insensitive)
    pub fn get_field(&self, name: &str) -> Option<&FieldDescribe> {
        let lower = name.to_lowercase();
        self.fields.iter().find(|f| f.name.to_lowercase() == lower)
    }

    /// Get all fields in declaration order
    pub fn fields(&self) -> impl Iterator<Item = &FieldDescribe> {
        self.fields.iter()
    }

    /// Field API names in declaration order
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Check if a field exists
    pub fn has_field(&self, name: &str) -> bool {
        self.get_field(name).is_some()
    }

    /// The identity field, if one is declared
    pub fn primary_key(&self) -> Option<&FieldDescribe> {
        self.fields.iter().find(|f| f.primary_key)
    }

    /// Validate a serialized record against this description
    ///
    /// Every present field is checked, unknown fields are rejected and
    /// non-nillable fields other than the primary key must be present.
    /// All failures are collected into one error.
    pub fn validate_record(&self, record: &Map<String, Value>) -> Result<(), ValidationError> {
        let mut errors = Vec::new();

        for (name, value) in record {
            match self.get_field(name) {
                Some(field) => {
                    if let Err(kind) = field.validate(value) {
                        errors.push(FieldError::new(field.name.as_str(), kind));
                    }
                }
                None => errors.push(FieldError::new(name.as_str(), FieldErrorKind::UnknownField)),
            }
        }

        for field in &self.fields {
            if field.primary_key || field.nillable {
                continue;
            }
            let present = record
                .keys()
                .any(|k| k.eq_ignore_ascii_case(&field.name));
            if !present {
                errors.push(FieldError::new(field.name.as_str(), FieldErrorKind::Required));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                object: self.name.clone(),
                errors,
            })
        }
    }
}

/// Description of a field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescribe {
    /// API name (e.g., "BillingCity", "Custom_Field__c")
    pub name: String,
    /// Remote field type
    pub field_type: SalesforceFieldType,
    /// Maximum length in characters for text fields
    pub max_length: Option<u32>,
    /// Whether this is the record's identity field
    pub primary_key: bool,
    /// Whether the field can be null
    pub nillable: bool,
    /// For picklists: locally cached valid values
    pub picklist_values: Option<Vec<String>>,
}

impl FieldDescribe {
    /// Create a new field description
    pub fn new(name: impl Into<String>, field_type: SalesforceFieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            max_length: None,
            primary_key: false,
            nillable: true,
            picklist_values: None,
        }
    }

    /// Set the maximum length
    pub fn with_max_length(mut self, max_length: u32) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Mark as the identity field; identity fields are never null
    pub fn with_primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nillable = false;
        self
    }

    /// Set whether the field is nillable
    pub fn with_nillable(mut self, nillable: bool) -> Self {
        self.nillable = nillable;
        self
    }

    /// Set picklist values
    pub fn with_picklist_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.picklist_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Check if `value` is one of the declared choices (true when unconstrained)
    pub fn is_valid_choice(&self, value: &str) -> bool {
        match &self.picklist_values {
            Some(values) => values.iter().any(|v| v == value),
            None => true,
        }
    }

    /// Validate one value for this field
    pub fn validate(&self, value: &Value) -> Result<(), FieldErrorKind> {
        if value.is_null() {
            return if self.nillable {
                Ok(())
            } else {
                Err(FieldErrorKind::Required)
            };
        }

        if self.field_type.is_text() {
            let Some(text) = value.as_str() else {
                return Err(FieldErrorKind::WrongType {
                    expected: self.field_type.as_str(),
                });
            };
            if text.is_empty() && !self.nillable {
                return Err(FieldErrorKind::Required);
            }
            if let Some(max) = self.max_length {
                let actual = text.chars().count();
                if actual > max as usize {
                    return Err(FieldErrorKind::TooLong { max, actual });
                }
            }
            if !self.is_valid_choice(text) {
                return Err(FieldErrorKind::InvalidChoice(text.to_string()));
            }
            return Ok(());
        }

        let type_ok = match self.field_type {
            SalesforceFieldType::Boolean => value.is_boolean(),
            SalesforceFieldType::Integer => value.is_i64() || value.is_u64(),
            SalesforceFieldType::Double | SalesforceFieldType::Currency => value.is_number(),
            _ => true,
        };
        if type_ok {
            Ok(())
        } else {
            Err(FieldErrorKind::WrongType {
                expected: self.field_type.as_str(),
            })
        }
    }
}

/// Remote field types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalesforceFieldType {
    Id,
    String,
    TextArea,
    Email,
    Phone,
    Url,
    Picklist,
    Boolean,
    Integer,
    Double,
    Currency,
    Date,
    DateTime,
}

impl SalesforceFieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SalesforceFieldType::Id => "id",
            SalesforceFieldType::String => "string",
            SalesforceFieldType::TextArea => "textarea",
            SalesforceFieldType::Email => "email",
            SalesforceFieldType::Phone => "phone",
            SalesforceFieldType::Url => "url",
            SalesforceFieldType::Picklist => "picklist",
            SalesforceFieldType::Boolean => "boolean",
            SalesforceFieldType::Integer => "int",
            SalesforceFieldType::Double => "double",
            SalesforceFieldType::Currency => "currency",
            SalesforceFieldType::Date => "date",
            SalesforceFieldType::DateTime => "datetime",
        }
    }

    /// Values travel as JSON strings
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            SalesforceFieldType::Id
                | SalesforceFieldType::String
                | SalesforceFieldType::TextArea
                | SalesforceFieldType::Email
                | SalesforceFieldType::Phone
                | SalesforceFieldType::Url
                | SalesforceFieldType::Picklist
                | SalesforceFieldType::Date
                | SalesforceFieldType::DateTime
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_object() -> SObjectDescribe {
        let mut obj = SObjectDescribe::new("Account");
        obj.add_field(FieldDescribe::new("Id", SalesforceFieldType::Id).with_primary_key());
        obj.add_field(
            FieldDescribe::new("Name", SalesforceFieldType::String)
                .with_max_length(10)
                .with_nillable(false),
        );
        obj.add_field(
            FieldDescribe::new("Type", SalesforceFieldType::Picklist)
                .with_picklist_values(["Customer", "Partner"]),
        );
        obj.add_field(FieldDescribe::new("NumberOfEmployees", SalesforceFieldType::Integer));
        obj
    }

    #[test]
    fn test_schema_lookup() {
        let mut schema = SalesforceSchema::new();
        schema.add_object(sample_object());

        // Case-insensitive lookup
        assert!(schema.get_object("Account").is_some());
        assert!(schema.get_object("ACCOUNT").is_some());
        assert!(!schema.has_object("Lead"));

        let obj = schema.get_object("account").unwrap();
        assert!(!obj.managed);
        assert!(obj.get_field("name").is_some());
        assert_eq!(obj.field_names(), vec!["Id", "Name", "Type", "NumberOfEmployees"]);
        assert_eq!(obj.primary_key().unwrap().name, "Id");
    }

    #[test]
    fn test_add_field_replaces_same_name() {
        let mut obj = sample_object();
        obj.add_field(FieldDescribe::new("name", SalesforceFieldType::TextArea));
        assert_eq!(obj.fields().count(), 4);
        assert_eq!(
            obj.get_field("Name").unwrap().field_type,
            SalesforceFieldType::TextArea
        );
    }

    #[test]
    fn test_field_validation() {
        let obj = sample_object();
        let name = obj.get_field("Name").unwrap();
        assert_eq!(name.validate(&json!("Acme")), Ok(()));
        assert_eq!(
            name.validate(&json!("Acme Corporation")),
            Err(FieldErrorKind::TooLong { max: 10, actual: 16 })
        );
        assert_eq!(name.validate(&json!(null)), Err(FieldErrorKind::Required));
        assert_eq!(name.validate(&json!("")), Err(FieldErrorKind::Required));
        assert_eq!(
            name.validate(&json!(5)),
            Err(FieldErrorKind::WrongType { expected: "string" })
        );

        let kind = obj.get_field("Type").unwrap();
        assert_eq!(kind.validate(&json!("Partner")), Ok(()));
        assert_eq!(
            kind.validate(&json!("Vendor")),
            Err(FieldErrorKind::InvalidChoice("Vendor".to_string()))
        );

        let employees = obj.get_field("NumberOfEmployees").unwrap();
        assert_eq!(employees.validate(&json!(40)), Ok(()));
        assert!(employees.validate(&json!("40")).is_err());
    }

    #[test]
    fn test_length_counts_characters() {
        let field = FieldDescribe::new("City", SalesforceFieldType::String).with_max_length(5);
        let too_long = Err(FieldErrorKind::TooLong { max: 5, actual: 6 });
        assert_eq!(field.validate(&json!("Zürich")), too_long);
        assert_eq!(field.validate(&json!("Genève")), too_long);
        assert_eq!(field.validate(&json!("Köln")), Ok(()));
    }

    #[test]
    fn test_validate_record_collects_errors() {
        let obj = sample_object();
        let record = json!({ "Type": "Vendor", "Colour": "red" });
        let err = obj.validate_record(record.as_object().unwrap()).unwrap_err();

        assert_eq!(err.object, "Account");
        assert_eq!(err.errors.len(), 3);
        assert_eq!(
            err.for_field("Type"),
            vec![&FieldErrorKind::InvalidChoice("Vendor".to_string())]
        );
        assert_eq!(err.for_field("Colour"), vec![&FieldErrorKind::UnknownField]);
        assert_eq!(err.for_field("Name"), vec![&FieldErrorKind::Required]);
    }

    #[test]
    fn test_validate_record_without_id() {
        let obj = sample_object();
        let record = json!({ "Name": "Acme" });
        assert!(obj.validate_record(record.as_object().unwrap()).is_ok());
    }
}
