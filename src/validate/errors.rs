//! Field-level validation errors

use serde::Serialize;
use std::fmt;

/// A single violated rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Field path (`email`, `variants.0.color`)
    pub field: String,
    /// User-facing message
    pub message: String,
}

/// Every rule violation found in one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Empty error set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Whether no rule was violated
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of violations
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// First message recorded for a field
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// All messages recorded for a field
    pub fn all(&self, field: &str) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.message.as_str())
            .collect()
    }

    /// Whether a field has at least one violation
    pub fn contains(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Iterate over violations in discovery order
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_field() {
        let mut errors = ValidationErrors::new();
        errors.push("email", "Please enter a valid email address");
        errors.push("variants.0.color", "Color is required");
        errors.push("variants.0.color", "second");

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get("variants.0.color"), Some("Color is required"));
        assert_eq!(errors.all("variants.0.color").len(), 2);
        assert!(errors.contains("email"));
        assert!(!errors.contains("phone"));
    }

    #[test]
    fn test_display() {
        let mut errors = ValidationErrors::new();
        errors.push("password", "Password must be at least 8 characters");
        errors.push("confirmPassword", "Passwords don't match");

        insta::assert_snapshot!(
            errors.to_string(),
            @"password: Password must be at least 8 characters; confirmPassword: Passwords don't match"
        );
    }
}
