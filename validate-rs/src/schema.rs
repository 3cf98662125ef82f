//! Schema-based validation
//!
//! A [`Schema`] is a declarative, recursive description of a JSON value:
//! an optional type, scalar constraints, and child schemas for object
//! properties and array elements. Validation walks the value and the schema
//! together and collects one message per failed check, prefixed with the
//! property name or element index when the failure is nested.
//!
//! Recursion into children stops silently at the configured maximum depth;
//! anything nested deeper is treated as valid.

use crate::errors::{ValidationError, ValidationResult};
use crate::validators::utils::{ascii_classes, get_regex};
use crate::DEFAULT_MAX_DEPTH;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Supported value types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Boolean,
    Array,
    Object,
}

impl SchemaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::String => "string",
            SchemaType::Number => "number",
            SchemaType::Boolean => "boolean",
            SchemaType::Array => "array",
            SchemaType::Object => "object",
        }
    }

    /// Whether `value` has this type
    pub fn matches(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (SchemaType::String, Value::String(_))
                | (SchemaType::Number, Value::Number(_))
                | (SchemaType::Boolean, Value::Bool(_))
                | (SchemaType::Array, Value::Array(_))
                | (SchemaType::Object, Value::Object(_))
        )
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name of the runtime type of a value; `undefined` when it is absent
pub fn type_name(value: Option<&Value>) -> &'static str {
    match value {
        None => "undefined",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}

/// Caller-supplied check attached to a schema node
///
/// Cloning a schema shares the predicate instead of copying it.
#[derive(Clone)]
pub struct SchemaPredicate(Arc<dyn Fn(&Value) -> bool + Send + Sync>);

impl SchemaPredicate {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(predicate))
    }

    pub fn test(&self, value: &Value) -> bool {
        (self.0)(value)
    }
}

impl fmt::Debug for SchemaPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SchemaPredicate(..)")
    }
}

impl PartialEq for SchemaPredicate {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Declarative description of an expected value
///
/// A node without a type accepts any type and only applies its
/// constraints. Deserializes from JSON using camelCase keys (`minLength`,
/// `arraySchema`, ...); the `validate` predicate can only be attached in code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Schema {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
    /// Closed set of allowed values; an empty list allows anything
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip)]
    pub validate: Option<SchemaPredicate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, Schema>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub array_schema: Option<Box<Schema>>,
}

impl Schema {
    /// Create a schema that accepts any value
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a schema of the given type
    pub fn of_type(schema_type: SchemaType) -> Self {
        Self {
            schema_type: Some(schema_type),
            ..Self::default()
        }
    }

    pub fn string() -> Self {
        Self::of_type(SchemaType::String)
    }

    pub fn number() -> Self {
        Self::of_type(SchemaType::Number)
    }

    pub fn boolean() -> Self {
        Self::of_type(SchemaType::Boolean)
    }

    pub fn object() -> Self {
        Self::of_type(SchemaType::Object)
    }

    /// Create an array schema whose elements must match `items`
    pub fn array(items: Schema) -> Self {
        Self::of_type(SchemaType::Array).items(items)
    }

    /// Parse a schema from a JSON definition
    ///
    /// The definition must be a JSON object.
    pub fn from_value(definition: &Value) -> ValidationResult<Self> {
        if !definition.is_object() {
            return Err(ValidationError::InvalidType(format!(
                "schema definition must be an object, got {}",
                type_name(Some(definition))
            )));
        }

        serde_json::from_value(definition.clone())
            .map_err(|e| ValidationError::SchemaError(e.to_string()))
    }

    /// Mark the value as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set minimum length for strings
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Set maximum length for strings
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Set minimum value for numbers
    pub fn minimum(mut self, min: f64) -> Self {
        self.minimum = Some(min);
        self
    }

    /// Set maximum value for numbers
    pub fn maximum(mut self, max: f64) -> Self {
        self.maximum = Some(max);
        self
    }

    /// Set minimum element count for arrays
    pub fn min_items(mut self, min: usize) -> Self {
        self.min_items = Some(min);
        self
    }

    /// Set maximum element count for arrays
    pub fn max_items(mut self, max: usize) -> Self {
        self.max_items = Some(max);
        self
    }

    /// Restrict the value to a closed set
    pub fn options(mut self, values: Vec<Value>) -> Self {
        self.options = Some(values);
        self
    }

    /// Set a regular expression that string values must match
    pub fn pattern(mut self, pattern: &str) -> Self {
        self.pattern = Some(pattern.to_string());
        self
    }

    /// Attach a custom predicate
    pub fn with_validator<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.validate = Some(SchemaPredicate::new(predicate));
        self
    }

    /// Declare an object property
    pub fn property(mut self, name: &str, schema: Schema) -> Self {
        self.properties
            .get_or_insert_with(IndexMap::new)
            .insert(name.to_string(), schema);
        self
    }

    /// Set the schema applied to every array element
    pub fn items(mut self, schema: Schema) -> Self {
        self.array_schema = Some(Box::new(schema));
        self
    }

    /// Validate a value with the default depth bound
    pub fn validate(&self, value: &Value) -> SchemaValidationResult {
        self.validate_with_depth(value, DEFAULT_MAX_DEPTH)
    }

    /// Validate a value, descending into children at most `max_depth` levels
    pub fn validate_with_depth(&self, value: &Value, max_depth: usize) -> SchemaValidationResult {
        SchemaValidationResult::from_errors(self.check(Some(value), 0, max_depth))
    }

    /// Run every check of this node against `value` and return the failures
    pub(crate) fn check(&self, value: Option<&Value>, depth: usize, max_depth: usize) -> Vec<String> {
        let mut errors = Vec::new();

        // Absence is only reported through `required`
        if let (Some(expected), Some(actual)) = (self.schema_type, value) {
            if !expected.matches(actual) {
                errors.push(format!("Expected {}, got {}", expected, type_name(value)));
            }
        }

        if depth < max_depth {
            self.check_children(value, depth, max_depth, &mut errors);
        }

        if self.required && value.map_or(true, Value::is_null) {
            errors.push("Value is required".to_string());
        }

        let Some(value) = value else {
            return errors;
        };

        match value {
            Value::String(s) => {
                let length = s.chars().count();
                if let Some(min) = self.min_length {
                    if length < min {
                        errors.push(format!("String length must be at least {}", min));
                    }
                }
                if let Some(max) = self.max_length {
                    if length > max {
                        errors.push(format!("String length must be at most {}", max));
                    }
                }
            }
            Value::Number(n) => {
                if let Some(num) = n.as_f64() {
                    if let Some(min) = self.minimum {
                        if num < min {
                            errors.push(format!("Value must be at least {}", min));
                        }
                    }
                    if let Some(max) = self.maximum {
                        if num > max {
                            errors.push(format!("Value must be at most {}", max));
                        }
                    }
                }
            }
            Value::Array(items) => {
                if let Some(min) = self.min_items {
                    if items.len() < min {
                        errors.push(format!("Array must contain at least {} items", min));
                    }
                }
                if let Some(max) = self.max_items {
                    if items.len() > max {
                        errors.push(format!("Array must contain at most {} items", max));
                    }
                }
            }
            _ => {}
        }

        if let Some(options) = self.options.as_ref().filter(|o| !o.is_empty()) {
            if !options.iter().any(|option| same_value(option, value)) {
                let allowed: Vec<String> = options.iter().map(Value::to_string).collect();
                errors.push(format!("Value must be one of: {}", allowed.join(", ")));
            }
        }

        if let Some(predicate) = &self.validate {
            if !predicate.test(value) {
                errors.push("Custom validation failed".to_string());
            }
        }

        if let (Some(pattern), Value::String(s)) = (&self.pattern, value) {
            match get_regex(&ascii_classes(pattern)) {
                Ok(re) => {
                    if !re.is_match(s) {
                        errors.push(format!("Value does not match pattern {}", pattern));
                    }
                }
                Err(e) => {
                    log::warn!("Schema pattern '{}' failed to compile: {}", pattern, e);
                    errors.push(format!("Invalid pattern {}", pattern));
                }
            }
        }

        errors
    }

    /// Recurse into array elements or object properties when the value
    /// actually has the declared container type
    fn check_children(
        &self,
        value: Option<&Value>,
        depth: usize,
        max_depth: usize,
        errors: &mut Vec<String>,
    ) {
        match (self.schema_type, value) {
            (Some(SchemaType::Array), Some(Value::Array(items))) => {
                let Some(item_schema) = &self.array_schema else {
                    return;
                };
                for (index, item) in items.iter().enumerate() {
                    errors.extend(
                        item_schema
                            .check(Some(item), depth + 1, max_depth)
                            .into_iter()
                            .map(|e| format!("[{}]: {}", index, e)),
                    );
                }
            }
            (Some(SchemaType::Object), Some(Value::Object(fields))) => {
                let Some(properties) = &self.properties else {
                    return;
                };
                for (name, property_schema) in properties {
                    errors.extend(
                        property_schema
                            .check(fields.get(name), depth + 1, max_depth)
                            .into_iter()
                            .map(|e| format!("{}: {}", name, e)),
                    );
                }
            }
            _ => {}
        }
    }
}

/// Numbers compare by value, so `1` and `1.0` are the same option
fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        _ => a == b,
    }
}

/// Outcome of validating a value against a schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl SchemaValidationResult {
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Convert into a `Result`, joining the messages on failure
    pub fn into_result(self) -> ValidationResult<()> {
        if self.valid {
            Ok(())
        } else {
            Err(ValidationError::SchemaError(self.errors.join("; ")))
        }
    }
}
