//! Form validation engine
//!
//! Forms declare a [`Schema`] and a typed output. [`validate`] checks raw
//! [`FormValues`] against the schema and only builds the typed value when
//! every rule passes.

mod errors;
mod schema;
mod values;

pub use errors::{FieldError, ValidationErrors};
pub use schema::{Schema, SchemaBuilder};
pub use values::FormValues;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use tracing::debug;

/// A form with a schema and a typed, validated representation
pub trait Form: DeserializeOwned {
    /// The schema every submission is checked against
    fn schema() -> &'static Schema;
}

/// Validate raw values into a typed form
pub fn validate<F: Form>(values: &FormValues) -> Result<F, ValidationErrors> {
    let schema = F::schema();
    let errors = schema.check(values);
    if !errors.is_empty() {
        debug!(form = schema.name(), count = errors.len(), "validation failed");
        return Err(errors);
    }

    serde_json::from_value(values.to_value()).map_err(|e| {
        let mut errors = ValidationErrors::new();
        errors.push(schema.name(), e.to_string());
        errors
    })
}

/// Values and current errors of one form on a page
#[derive(Debug, Clone, Default)]
pub struct FormState {
    values: FormValues,
    errors: ValidationErrors,
}

impl FormState {
    /// Empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Form pre-filled with values
    pub fn with_values(values: FormValues) -> Self {
        Self {
            values,
            errors: ValidationErrors::new(),
        }
    }

    /// Set one field
    pub fn set(&mut self, field: &str, value: impl Into<serde_json::Value>) {
        self.values.set(field, value);
    }

    /// Replace every value
    pub fn fill(&mut self, values: FormValues) {
        self.values = values;
    }

    /// Current raw values
    pub const fn values(&self) -> &FormValues {
        &self.values
    }

    /// Errors from the last validation
    pub const fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// First error shown under a field
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field)
    }

    /// Validate the current values
    pub fn validate<F: Form>(&mut self) -> Result<F, ValidationErrors> {
        let values = self.values.clone();
        self.validate_values(&values)
    }

    /// Validate the given values, recording the outcome in this form
    ///
    /// Failure replaces the stored errors; success clears them.
    pub fn validate_values<F: Form>(&mut self, values: &FormValues) -> Result<F, ValidationErrors> {
        match validate::<F>(values) {
            Ok(form) => {
                self.errors = ValidationErrors::new();
                Ok(form)
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(errors)
            }
        }
    }

    /// Clear values and errors
    pub fn reset(&mut self) {
        self.values.clear();
        self.errors = ValidationErrors::new();
    }
}

/// Deserialize blank text as `None`
pub(crate) fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
