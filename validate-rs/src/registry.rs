//! Named schema registry and bound validators
//!
//! Schemas are stored by value: registering clones the caller's schema and
//! every lookup hands out a fresh clone, so nobody outside the registry can
//! reach the stored entries. A [`SchemaValidator`] remembers only the name it
//! was created for and looks the schema up again on every call.

use crate::errors::{ValidationError, ValidationResult};
use crate::schema::{Schema, SchemaValidationResult};
use crate::ValidationConfig;
use lazy_static::lazy_static;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Shared mapping from schema name to schema definition
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: Arc<RwLock<HashMap<String, Schema>>>,
    config: ValidationConfig,
}

impl SchemaRegistry {
    /// Create an empty registry with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with a custom configuration
    pub fn with_config(config: ValidationConfig) -> Self {
        Self {
            schemas: Arc::default(),
            config,
        }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Store a copy of `schema` under `name`, replacing any previous entry
    pub fn update(&self, name: &str, schema: &Schema) -> ValidationResult<()> {
        check_name(name)?;

        log::debug!("Registering schema '{}'", name);
        self.schemas
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), schema.clone());
        Ok(())
    }

    /// Return a copy of the schema stored under `name`
    pub fn get(&self, name: &str) -> Option<Schema> {
        self.schemas
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Whether a schema is stored under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.schemas
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Register `schema` under `name` and return a validator bound to that name
    pub fn create_validator(&self, name: &str, schema: &Schema) -> ValidationResult<SchemaValidator> {
        self.update(name, schema)?;
        Ok(SchemaValidator {
            registry: self.clone(),
            name: name.to_string(),
        })
    }

    /// Like [`create_validator`](Self::create_validator), parsing the schema
    /// from a JSON definition first
    pub fn create_validator_from_value(
        &self,
        name: &str,
        definition: &Value,
    ) -> ValidationResult<SchemaValidator> {
        check_name(name)?;
        let schema = Schema::from_value(definition)?;
        self.create_validator(name, &schema)
    }

    /// Validate `value` against the schema currently stored under `name`
    pub fn validate(&self, name: &str, value: &Value) -> SchemaValidationResult {
        let schema = self
            .schemas
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned();

        match schema {
            Some(schema) => schema.validate_with_depth(value, self.config.max_depth),
            None => SchemaValidationResult::from_errors(vec![format!(
                "Schema '{}' is not registered",
                name
            )]),
        }
    }
}

fn check_name(name: &str) -> ValidationResult<()> {
    if name.is_empty() {
        return Err(ValidationError::InvalidName(
            "schema name must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validator bound to a registry entry by name
#[derive(Debug, Clone)]
pub struct SchemaValidator {
    registry: SchemaRegistry,
    name: String,
}

impl SchemaValidator {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Validate `value` against the current definition of the bound schema
    pub fn validate(&self, value: &Value) -> SchemaValidationResult {
        self.registry.validate(&self.name, value)
    }
}

lazy_static! {
    static ref DEFAULT_REGISTRY: SchemaRegistry = SchemaRegistry::new();
}

/// The process-wide registry used by the free functions below
pub fn default_registry() -> &'static SchemaRegistry {
    &DEFAULT_REGISTRY
}

/// Return a copy of the schema registered under `name` in the default registry
pub fn get_schema(name: &str) -> Option<Schema> {
    DEFAULT_REGISTRY.get(name)
}

/// Store a copy of `schema` under `name` in the default registry
pub fn update_schema(name: &str, schema: &Schema) -> ValidationResult<()> {
    DEFAULT_REGISTRY.update(name, schema)
}

/// Register `schema` in the default registry and return a bound validator
pub fn create_schema_validator(name: &str, schema: &Schema) -> ValidationResult<SchemaValidator> {
    DEFAULT_REGISTRY.create_validator(name, schema)
}
