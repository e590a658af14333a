use contacts_core::{Contact, ContactPatch, ContactValidationError, NewContact};
use serde_json::json;

fn stored() -> Contact {
    NewContact::new("Ada", "Lovelace", "ada@example.com").into_contact(1)
}

#[test]
fn contact_serializes_with_camel_case_wire_fields() {
    let value = serde_json::to_value(stored()).unwrap();

    assert_eq!(
        value,
        json!({
            "id": 1,
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com"
        })
    );
}

#[test]
fn validate_reports_first_missing_field() {
    let missing_first = NewContact::new("", "", "ada@example.com");
    assert_eq!(
        missing_first.validate(),
        Err(ContactValidationError::MissingField("first_name"))
    );

    let missing_email = NewContact::new("Ada", "Lovelace", "");
    assert_eq!(
        missing_email.validate(),
        Err(ContactValidationError::MissingField("email"))
    );
    assert_eq!(
        ContactValidationError::MissingField("email").to_string(),
        "email is required"
    );

    assert!(NewContact::new("Ada", "Lovelace", "ada@example.com")
        .validate()
        .is_ok());
}

#[test]
fn patch_keeps_absent_fields_and_overwrites_supplied_ones() {
    let patch = ContactPatch {
        first_name: Some(String::new()),
        email: Some("ada@analytic.eng".to_string()),
        ..ContactPatch::default()
    };

    let updated = patch.apply(&stored());
    assert_eq!(updated.id, 1);
    assert_eq!(updated.first_name, "");
    assert_eq!(updated.last_name, "Lovelace");
    assert_eq!(updated.email, "ada@analytic.eng");
}

#[test]
fn default_patch_is_empty() {
    assert!(ContactPatch::default().is_empty());
    assert!(!ContactPatch {
        last_name: Some("King".to_string()),
        ..ContactPatch::default()
    }
    .is_empty());
}
