//! Integration tests for enums and discriminated unions.

use jsonvalidator::{ErrorKind, Validator};
use serde_json::{json, Value};

fn validator(raw: Value) -> Validator {
    Validator::from_json(&raw).unwrap()
}

fn union_schema() -> Value {
    json!({
        "type": {
            "#type": "enum",
            "#default": "one",
            "#options": {
                "one": {
                    "sub_one": {"#type": "string", "#max_length": 200, "#required": true}
                },
                "two": {
                    "sub_two_string": {"#type": "string", "#max_length": 255},
                    "sub_two_integer": {"#type": "string", "#max_length": 20}
                },
                "three": {
                    "thing": {"#type": "string", "#default": "someday"}
                }
            }
        },
        "one": {"#type": "placeholder"},
        "two": {"#type": "placeholder"}
    })
}

#[test]
fn test_enum_list() {
    let mut v = validator(json!({
        "content": {"#type": "enum", "#options": ["one", "two"], "#default": "one"}
    }));

    assert!(v.validate(&json!({"content": "one"})).is_ok());
    assert!(v.validate(&json!({"content": "two"})).is_ok());

    let error = v.validate(&json!({"content": "three"})).unwrap_err();
    assert_eq!(error.kind, ErrorKind::InvalidOption);
    assert_eq!(error.to_string(), "content: 'three' is not a valid value");
}

#[test]
fn test_enum_list_of_numbers() {
    let mut v = validator(json!({"level": {"#type": "enum", "#options": [1, 2, 3]}}));

    assert!(v.validate(&json!({"level": 2})).is_ok());
    assert!(v.validate(&json!({"level": "2"})).is_err());
}

#[test]
fn test_enum_list_numbers_match_by_value() {
    let mut v = validator(json!({"ratio": {"#type": "enum", "#options": [1.0, 2.5]}}));

    assert!(v.validate(&json!({"ratio": 1})).is_ok());
    assert!(v.validate(&json!({"ratio": 2.5})).is_ok());

    let error = v.validate(&json!({"ratio": 2})).unwrap_err();
    assert_eq!(error.kind, ErrorKind::InvalidOption);
    assert!(v.validate(&json!({"ratio": true})).is_err());
}

#[test]
fn test_union_valid_branch() {
    let mut v = validator(union_schema());

    assert!(v
        .validate(&json!({"type": "one", "one": {"sub_one": "something"}}))
        .is_ok());
    assert!(v.validate(&json!({"type": "two", "two": {}})).is_ok());
}

#[test]
fn test_union_branch_required_field() {
    let mut v = validator(union_schema());

    let error = v.validate(&json!({"type": "one", "one": {}})).unwrap_err();
    assert_eq!(error.kind, ErrorKind::MissingRequiredField);
    assert_eq!(error.path.to_string(), "one.sub_one");
}

#[test]
fn test_union_missing_payload() {
    let mut v = validator(union_schema());

    let error = v.validate(&json!({"type": "one"})).unwrap_err();
    assert_eq!(error.kind, ErrorKind::MissingDependentKey);
    assert_eq!(error.path.to_string(), "one");
    assert_eq!(
        error.message,
        "is a required key when 'type' is set to option 'one'"
    );
}

#[test]
fn test_union_option_without_schema_entry_needs_payload_key() {
    // "three" has no placeholder, so its payload key can never be supplied.
    let mut v = validator(union_schema());

    let error = v.validate(&json!({"type": "three"})).unwrap_err();
    assert_eq!(error.kind, ErrorKind::MissingDependentKey);

    let error = v
        .validate(&json!({"type": "three", "three": {}}))
        .unwrap_err();
    assert_eq!(error.kind, ErrorKind::UnknownField);
}

#[test]
fn test_union_unknown_option() {
    let mut v = validator(union_schema());

    let error = v.validate(&json!({"type": "four"})).unwrap_err();
    assert_eq!(error.kind, ErrorKind::InvalidOption);
    assert_eq!(error.path.to_string(), "type");

    let error = v.validate(&json!({"type": 1})).unwrap_err();
    assert_eq!(error.kind, ErrorKind::InvalidOption);
}

#[test]
fn test_union_payload_constraint_path() {
    let mut v = validator(union_schema());

    let error = v
        .validate(&json!({"type": "two", "two": {"sub_two_integer": "x".repeat(21)}}))
        .unwrap_err();
    assert_eq!(error.kind, ErrorKind::ConstraintViolation);
    assert_eq!(error.path.to_string(), "two.sub_two_integer");
}

#[test]
fn test_union_payload_must_be_mapping() {
    let mut v = validator(union_schema());

    let error = v.validate(&json!({"type": "one", "one": "text"})).unwrap_err();
    assert_eq!(error.kind, ErrorKind::TypeMismatch);
    assert_eq!(error.path.to_string(), "one");
}

#[test]
fn test_union_inside_fieldset_rewrites_last_segment() {
    let mut v = validator(json!({
        "storage": {
            "#type": "fieldset",
            "kind": {
                "#type": "enum",
                "#options": {"disk": {"size": {"#type": "integer", "#min_value": 1}}}
            },
            "disk": {"#type": "placeholder"}
        }
    }));

    assert!(v
        .validate(&json!({"storage": {"kind": "disk", "disk": {"size": 10}}}))
        .is_ok());

    let error = v
        .validate(&json!({"storage": {"kind": "disk", "disk": {"size": 0}}}))
        .unwrap_err();
    assert_eq!(error.path.to_string(), "storage.disk.size");
}

#[test]
fn test_unsupported_options_shape_is_a_diagnostic() {
    let mut v = validator(json!({"mode": {"#type": "enum", "#options": "fast"}}));

    assert!(v.validate(&json!({"mode": "anything"})).is_ok());
    assert_eq!(
        v.diagnostics(),
        &["No way to parse element enum with type 'string'".to_string()]
    );
}
