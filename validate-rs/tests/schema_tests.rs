//! Tests for the default schema registry and bound validators

use serde_json::json;
use serial_test::serial;
use validate_rs::prelude::*;
use validate_rs::{create_schema_validator, get_schema, update_schema};

fn list_definition() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "items": {
                "type": "array",
                "arraySchema": { "type": "number" },
                "minItems": 1,
                "maxItems": 3
            }
        }
    })
}

#[test]
#[serial]
fn test_item_list_constraints() {
    let schema = Schema::from_value(&list_definition()).unwrap();
    let validator = create_schema_validator("itemList", &schema).unwrap();

    assert!(validator.validate(&json!({ "items": [1, 2] })).valid);

    let result = validator.validate(&json!({ "items": [] }));
    assert!(!result.valid);
    assert_eq!(result.errors, vec!["items: Array must contain at least 1 items"]);

    let result = validator.validate(&json!({ "items": [1, 2, 3, 4] }));
    assert_eq!(result.errors, vec!["items: Array must contain at most 3 items"]);

    let result = validator.validate(&json!({ "items": "x" }));
    assert_eq!(result.errors, vec!["items: Expected array, got string"]);
}

#[test]
#[serial]
fn test_registry_isolation() {
    let schema = Schema::object().property("name", Schema::string().required().min_length(2));
    update_schema("isolated", &schema).unwrap();

    let mut snapshot = get_schema("isolated").unwrap();
    assert_eq!(snapshot, schema);

    if let Some(properties) = snapshot.properties.as_mut() {
        properties["name"].min_length = Some(50);
    }
    assert_eq!(get_schema("isolated"), Some(schema));
}

#[test]
#[serial]
fn test_facade_validator_follows_updates() {
    let validator = (VALIDATE.create_schema_validator)("evolving", &Schema::string()).unwrap();
    assert!(validator.validate(&json!("text")).valid);

    (VALIDATE.update_schema)("evolving", &Schema::string().min_length(10)).unwrap();
    let result = validator.validate(&json!("text"));
    assert_eq!(result.errors, vec!["String length must be at least 10"]);
}

#[test]
fn test_usage_errors() {
    let err = create_schema_validator("", &Schema::string()).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidName(_)));

    let registry = SchemaRegistry::new();
    let err = registry
        .create_validator_from_value("notAnObject", &json!(null))
        .unwrap_err();
    assert!(matches!(err, ValidationError::InvalidType(_)));
    assert!(err.is_usage_error());
}

#[test]
fn test_depth_bound_through_registry() {
    let registry = SchemaRegistry::new();

    // Twelve nested objects with a violation at the innermost level
    let schema = (0..12).fold(Schema::number(), |inner, _| Schema::object().property("n", inner));
    let value = (0..12).fold(json!("NaN"), |inner, _| json!({ "n": inner }));
    let validator = registry.create_validator("deep", &schema).unwrap();
    assert!(validator.validate(&value).valid);

    // Same violation within reach
    let schema = (0..5).fold(Schema::number(), |inner, _| Schema::object().property("n", inner));
    let value = (0..5).fold(json!("NaN"), |inner, _| json!({ "n": inner }));
    let validator = registry.create_validator("shallow", &schema).unwrap();
    assert_eq!(
        validator.validate(&value).errors,
        vec!["n: n: n: n: n: Expected number, got string"]
    );
}

#[test]
fn test_custom_predicates_survive_registration() {
    let registry = SchemaRegistry::new();
    let schema = Schema::object().property(
        "host",
        Schema::string().with_validator(|v| v.as_str().map_or(false, |s| validators::validate_domain(s, false))),
    );
    let validator = registry.create_validator("hosts", &schema).unwrap();

    assert!(validator.validate(&json!({ "host": "example.com" })).valid);
    assert_eq!(
        validator.validate(&json!({ "host": "not a host" })).errors,
        vec!["host: Custom validation failed"]
    );
    assert_eq!(registry.get("hosts"), Some(schema));
}

#[test]
fn test_result_conversion() {
    let registry = SchemaRegistry::new();
    let validator = registry.create_validator("flag", &Schema::boolean().required()).unwrap();

    assert!(validator.validate(&json!(true)).into_result().is_ok());
    let err = validator.validate(&json!(null)).into_result().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Schema validation failed: Expected boolean, got null; Value is required"
    );
}
