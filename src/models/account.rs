//! Account record - companies and organizations

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::fields::{id_field, SalesforceId};
use crate::sql::schema::{FieldDescribe, SObjectDescribe, SalesforceFieldType};

use super::SalesforceModel;

/// Default Account record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Account {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<SalesforceId>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salutation: Option<String>,
    #[serde(rename = "Type", skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_country: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_country: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_email: Option<String>,
}

impl Account {
    pub const SALUTATIONS: &'static [&'static str] = &["Mr.", "Ms.", "Mrs.", "Dr.", "Prof."];

    pub const TYPES: &'static [&'static str] = &[
        "Analyst",
        "Competitor",
        "Customer",
        "Integrator",
        "Investor",
        "Partner",
        "Press",
        "Prospect",
        "Reseller",
        "Other",
    ];

    pub const INDUSTRIES: &'static [&'static str] = &[
        "Agriculture",
        "Apparel",
        "Banking",
        "Biotechnology",
        "Chemicals",
        "Communications",
        "Construction",
        "Consulting",
        "Education",
        "Electronics",
        "Energy",
        "Engineering",
        "Entertainment",
        "Environmental",
        "Finance",
        "Food & Beverage",
        "Government",
        "Healthcare",
        "Hospitality",
        "Insurance",
        "Machinery",
        "Manufacturing",
        "Media",
        "Not For Profit",
        "Other",
        "Recreation",
        "Retail",
        "Shipping",
        "Technology",
        "Telecommunications",
        "Transportation",
        "Utilities",
    ];

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Missing and null both decode as an empty string
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn text(name: &str, max_length: u32) -> FieldDescribe {
    FieldDescribe::new(name, SalesforceFieldType::String).with_max_length(max_length)
}

fn picklist(name: &str, values: &[&str]) -> FieldDescribe {
    FieldDescribe::new(name, SalesforceFieldType::Picklist)
        .with_max_length(100)
        .with_picklist_values(values.iter().copied())
}

impl SalesforceModel for Account {
    const OBJECT_NAME: &'static str = "Account";

    fn describe() -> SObjectDescribe {
        let mut obj = SObjectDescribe::new(Self::OBJECT_NAME);
        obj.add_field(id_field());

        // Name fields
        obj.add_field(text("Name", 255).with_nillable(false));
        obj.add_field(text("LastName", 80));
        obj.add_field(text("FirstName", 40));
        obj.add_field(picklist("Salutation", Self::SALUTATIONS));
        obj.add_field(picklist("Type", Self::TYPES));

        // Billing address
        obj.add_field(text("BillingStreet", 255));
        obj.add_field(text("BillingCity", 40));
        obj.add_field(text("BillingState", 20));
        obj.add_field(text("BillingPostalCode", 20));
        obj.add_field(text("BillingCountry", 40));

        // Shipping address
        obj.add_field(text("ShippingStreet", 255));
        obj.add_field(text("ShippingCity", 40));
        obj.add_field(text("ShippingState", 20));
        obj.add_field(text("ShippingPostalCode", 20));
        obj.add_field(text("ShippingCountry", 40));

        obj.add_field(
            FieldDescribe::new("Phone", SalesforceFieldType::Phone).with_max_length(255),
        );
        obj.add_field(FieldDescribe::new("Fax", SalesforceFieldType::Phone).with_max_length(255));
        obj.add_field(
            FieldDescribe::new("Website", SalesforceFieldType::Url).with_max_length(255),
        );
        obj.add_field(picklist("Industry", Self::INDUSTRIES));

        obj.add_field(
            FieldDescribe::new("PersonEmail", SalesforceFieldType::Email).with_max_length(100),
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

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_is_name() {
        assert_eq!(Account::new("Acme Corp").to_string(), "Acme Corp");
    }

    #[test]
    fn test_describe_lengths() {
        let obj = Account::describe();
        assert_eq!(obj.get_field("Name").unwrap().max_length, Some(255));
        assert_eq!(obj.get_field("LastName").unwrap().max_length, Some(80));
        assert_eq!(obj.get_field("FirstName").unwrap().max_length, Some(40));
        assert_eq!(obj.get_field("BillingState").unwrap().max_length, Some(20));
        assert_eq!(obj.get_field("ShippingCountry").unwrap().max_length, Some(40));
        assert_eq!(obj.get_field("PersonEmail").unwrap().max_length, Some(100));
        assert_eq!(obj.fields().count(), 21);
    }

    #[test]
    fn test_row_decoding_ignores_attributes() {
        let row = json!({
            "attributes": {
                "type": "Account",
                "url": "/services/data/v20.0/sobjects/Account/001000000000001AAA"
            },
            "Id": "001000000000001AAA",
            "Name": "Acme",
            "Type": "Customer",
            "BillingCity": null
        });
        let account = Account::from_row(row).unwrap();
        assert_eq!(account.name, "Acme");
        assert_eq!(account.account_type.as_deref(), Some("Customer"));
        assert_eq!(account.billing_city, None);
        assert_eq!(account.id.unwrap().as_str(), "001000000000001AAA");
    }

    #[test]
    fn test_to_fields_omits_unset() {
        let mut account = Account::new("Acme");
        account.industry = Some("Banking".to_string());
        let fields = account.to_fields().unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields["Name"], json!("Acme"));
        assert_eq!(fields["Industry"], json!("Banking"));
    }

    #[test]
    fn test_validate_choices() {
        let mut account = Account::new("Acme");
        account.salutation = Some("Dr.".to_string());
        account.account_type = Some("Partner".to_string());
        account.industry = Some("Food & Beverage".to_string());
        assert!(account.validate().is_ok());

        account.industry = Some("Mining".to_string());
        assert!(account.validate().is_err());
    }
}
