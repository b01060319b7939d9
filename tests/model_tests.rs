//! Record types, describe metadata and choice validation

use pretty_assertions::assert_eq;
use serde_json::json;
use sfbackend::{
    standard_schema, Account, BackendError, FieldErrorKind, Lead, SalesforceId, SalesforceModel,
};

#[test]
fn test_account_display_is_name_verbatim() {
    let account = Account::new("  Acme & Sons, Ltd.  ");
    assert_eq!(account.to_string(), "  Acme & Sons, Ltd.  ");
}

#[test]
fn test_lead_display_joins_first_and_last() {
    let lead = Lead::new("Grace", "Hopper");
    assert_eq!(format!("{}", lead), "Grace Hopper");
}

#[test]
fn test_choice_fields_accept_declared_values() {
    for salutation in Account::SALUTATIONS {
        let mut account = Account::new("Acme");
        account.salutation = Some(salutation.to_string());
        assert!(account.validate().is_ok(), "{}", salutation);
    }
    for kind in Account::TYPES {
        let mut account = Account::new("Acme");
        account.account_type = Some(kind.to_string());
        assert!(account.validate().is_ok(), "{}", kind);
    }
    for industry in Account::INDUSTRIES {
        let mut account = Account::new("Acme");
        account.industry = Some(industry.to_string());
        assert!(account.validate().is_ok(), "{}", industry);
    }
}

#[test]
fn test_choice_fields_reject_other_values() {
    let mut account = Account::new("Acme");
    account.salutation = Some("Sir".to_string());
    account.account_type = Some("customer".to_string());
    account.industry = Some("Mining".to_string());

    let err = match account.validate() {
        Err(BackendError::Validation(err)) => err,
        other => panic!("expected validation error, got {:?}", other),
    };
    assert_eq!(
        err.for_field("Salutation"),
        vec![&FieldErrorKind::InvalidChoice("Sir".to_string())]
    );
    assert_eq!(
        err.for_field("Type"),
        vec![&FieldErrorKind::InvalidChoice("customer".to_string())]
    );
    assert_eq!(
        err.for_field("Industry"),
        vec![&FieldErrorKind::InvalidChoice("Mining".to_string())]
    );
}

#[test]
fn test_choice_lists_match_picklists() {
    let describe = Account::describe();
    let industry = describe.get_field("Industry").unwrap();
    assert_eq!(
        industry.picklist_values.as_ref().unwrap().len(),
        Account::INDUSTRIES.len()
    );
    assert_eq!(Account::SALUTATIONS.len(), 5);
    assert_eq!(Account::TYPES.len(), 10);
    assert_eq!(Account::INDUSTRIES.len(), 32);
}

#[test]
fn test_unvalidated_rows_keep_unknown_choices() {
    // Remote picklists may have grown since the local lists were written
    let account = Account::from_row(json!({ "Name": "Acme", "Industry": "Aerospace" })).unwrap();
    assert_eq!(account.industry.as_deref(), Some("Aerospace"));
}

#[test]
fn test_account_name_null_or_missing_decodes_empty() {
    let account = Account::from_row(json!({ "Id": "001000000000001", "Name": null })).unwrap();
    assert_eq!(account.name, "");
    let account = Account::from_row(json!({ "Id": "001000000000001" })).unwrap();
    assert_eq!(account.name, "");
    // Decoded but still invalid for writing
    assert!(account.validate().is_err());
}

#[test]
fn test_account_requires_name() {
    let err = match Account::default().validate() {
        Err(BackendError::Validation(err)) => err,
        other => panic!("expected validation error, got {:?}", other),
    };
    assert_eq!(err.for_field("Name"), vec![&FieldErrorKind::Required]);
}

#[test]
fn test_length_limits() {
    let mut account = Account::new("Acme");
    account.billing_state = Some("x".repeat(21));
    assert!(account.validate().is_err());
    account.billing_state = Some("x".repeat(20));
    assert!(account.validate().is_ok());
}

#[test]
fn test_lead_round_trip_through_row() {
    let row = json!({
        "attributes": { "type": "Lead" },
        "Id": "00Q000000000001",
        "FirstName": "Ada",
        "LastName": "Lovelace",
        "Email": "ada@example.com"
    });
    let lead = Lead::from_row(row).unwrap();
    assert_eq!(lead.id, Some(SalesforceId::new("00Q000000000001").unwrap()));
    assert_eq!(lead.to_string(), "Ada Lovelace");
}

#[test]
fn test_bad_id_in_row_is_decode_error() {
    let err = Lead::from_row(json!({ "Id": "nope", "LastName": "X" })).unwrap_err();
    assert!(matches!(err, BackendError::Decode { ref object, .. } if object == "Lead"));
}

#[test]
fn test_schema_is_unmanaged() {
    for object in standard_schema().objects() {
        assert!(!object.managed, "{} must not be managed locally", object.name);
        assert_eq!(object.primary_key().map(|f| f.name.as_str()), Some("Id"));
    }
}
