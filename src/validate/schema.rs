//! Declarative form schemas
//!
//! A [`Schema`] lists every field of a form with its expected type and rules,
//! plus cross-field refinements that only run once every field is valid.

use crate::error::{Error, Result};
use crate::validate::{FormValues, ValidationErrors};
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::sync::LazyLock;

const REQUIRED: &str = "Required";
const EXPECTED_TEXT: &str = "Expected text";
const EXPECTED_NUMBER: &str = "Expected number";
const EXPECTED_LIST: &str = "Expected a list";
const EXPECTED_RECORD: &str = "Expected a record";

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Expected value type of a field
#[derive(Debug, Clone)]
enum FieldKind {
    Text,
    OptionalText,
    Number,
    TextList,
    Records(Box<Schema>),
}

impl FieldKind {
    const fn type_message(&self) -> &'static str {
        match self {
            Self::Text | Self::OptionalText => EXPECTED_TEXT,
            Self::Number => EXPECTED_NUMBER,
            Self::TextList | Self::Records(_) => EXPECTED_LIST,
        }
    }

    const fn label(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::OptionalText => "optional text",
            Self::Number => "number",
            Self::TextList => "text list",
            Self::Records(_) => "record list",
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Check {
    MinLength(usize),
    Email,
    Min(f64),
    Integer,
    MinItems(usize),
}

impl Check {
    const fn applies_to(self, kind: &FieldKind) -> bool {
        match self {
            Self::MinLength(_) | Self::Email => {
                matches!(kind, FieldKind::Text | FieldKind::OptionalText)
            }
            Self::Min(_) | Self::Integer => matches!(kind, FieldKind::Number),
            Self::MinItems(_) => matches!(kind, FieldKind::TextList | FieldKind::Records(_)),
        }
    }

    fn passes(self, value: &Value) -> bool {
        match (self, value) {
            (Self::MinLength(min), Value::String(s)) => s.chars().count() >= min,
            (Self::Email, Value::String(s)) => EMAIL.is_match(s),
            (Self::Min(min), Value::Number(n)) => n.as_f64().is_some_and(|v| v >= min),
            (Self::Integer, Value::Number(n)) => n.is_i64() || n.is_u64(),
            (Self::MinItems(min), Value::Array(items)) => items.len() >= min,
            _ => true,
        }
    }
}

#[derive(Debug, Clone)]
struct Rule {
    check: Check,
    message: &'static str,
}

#[derive(Debug, Clone)]
struct FieldSpec {
    name: &'static str,
    kind: FieldKind,
    rules: Vec<Rule>,
}

impl FieldSpec {
    fn check(&self, value: Option<&Value>, path: &str, errors: &mut ValidationErrors) {
        let value = match value {
            None | Some(Value::Null) => {
                if !matches!(self.kind, FieldKind::OptionalText) {
                    errors.push(path, REQUIRED);
                }
                return;
            }
            Some(v) => v,
        };

        match (&self.kind, value) {
            (FieldKind::Text | FieldKind::OptionalText, Value::String(_))
            | (FieldKind::Number, Value::Number(_)) => {}
            (FieldKind::TextList, Value::Array(items)) => {
                for (i, item) in items.iter().enumerate() {
                    if !item.is_string() {
                        errors.push(format!("{path}.{i}"), EXPECTED_TEXT);
                    }
                }
            }
            (FieldKind::Records(schema), Value::Array(items)) => {
                for (i, item) in items.iter().enumerate() {
                    let item_path = format!("{path}.{i}");
                    match item {
                        Value::Object(map) => schema.check_map(map, &item_path, errors),
                        _ => errors.push(item_path, EXPECTED_RECORD),
                    }
                }
            }
            (kind, _) => {
                errors.push(path, kind.type_message());
                return;
            }
        }

        for rule in &self.rules {
            if !rule.check.passes(value) {
                errors.push(path, rule.message);
            }
        }
    }
}

/// Equality between two fields, reported on `right`
#[derive(Debug, Clone)]
struct Refinement {
    left: &'static str,
    right: &'static str,
    message: &'static str,
}

/// Validation rules for one form
#[derive(Debug, Clone)]
pub struct Schema {
    name: &'static str,
    fields: Vec<FieldSpec>,
    refinements: Vec<Refinement>,
}

impl Schema {
    /// Start building a schema
    pub const fn builder(name: &'static str) -> SchemaBuilder {
        SchemaBuilder {
            name,
            fields: Vec::new(),
            refinements: Vec::new(),
            problems: Vec::new(),
        }
    }

    /// Form name used in logs and feedback
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Declared field names, in declaration order
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }

    /// Whether the schema declares a field
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    /// Check values against every rule
    ///
    /// Refinements run only when no field rule failed.
    pub fn check(&self, values: &FormValues) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        self.check_map(values.as_map(), "", &mut errors);
        errors
    }

    fn check_map(&self, map: &Map<String, Value>, prefix: &str, errors: &mut ValidationErrors) {
        let before = errors.len();

        for field in &self.fields {
            field.check(map.get(field.name), &join(prefix, field.name), errors);
        }

        if errors.len() > before {
            return;
        }

        for refinement in &self.refinements {
            if map.get(refinement.left) != map.get(refinement.right) {
                errors.push(join(prefix, refinement.right), refinement.message);
            }
        }
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

/// Fluent builder for [`Schema`]
///
/// Rule methods apply to the most recently declared field.
#[derive(Debug)]
pub struct SchemaBuilder {
    name: &'static str,
    fields: Vec<FieldSpec>,
    refinements: Vec<Refinement>,
    problems: Vec<String>,
}

impl SchemaBuilder {
    fn field(mut self, name: &'static str, kind: FieldKind) -> Self {
        if self.fields.iter().any(|f| f.name == name) {
            self.problems.push(format!("field `{name}` declared twice"));
        }
        self.fields.push(FieldSpec {
            name,
            kind,
            rules: Vec::new(),
        });
        self
    }

    fn rule(mut self, check: Check, message: &'static str) -> Self {
        match self.fields.last_mut() {
            Some(field) if check.applies_to(&field.kind) => {
                field.rules.push(Rule { check, message });
            }
            Some(field) => {
                let problem = format!(
                    "rule {check:?} does not apply to {} field `{}`",
                    field.kind.label(),
                    field.name
                );
                self.problems.push(problem);
            }
            None => self
                .problems
                .push(format!("rule {check:?} declared before any field")),
        }
        self
    }

    /// Declare a required text field
    #[must_use]
    pub fn text(self, name: &'static str) -> Self {
        self.field(name, FieldKind::Text)
    }

    /// Declare a text field that may be absent
    #[must_use]
    pub fn optional_text(self, name: &'static str) -> Self {
        self.field(name, FieldKind::OptionalText)
    }

    /// Declare a required numeric field
    #[must_use]
    pub fn number(self, name: &'static str) -> Self {
        self.field(name, FieldKind::Number)
    }

    /// Declare a list of text values
    #[must_use]
    pub fn text_list(self, name: &'static str) -> Self {
        self.field(name, FieldKind::TextList)
    }

    /// Declare a list of nested records, each checked against `item`
    #[must_use]
    pub fn records(self, name: &'static str, item: Schema) -> Self {
        self.field(name, FieldKind::Records(Box::new(item)))
    }

    /// Text must have at least `min` characters
    #[must_use]
    pub fn min_length(self, min: usize, message: &'static str) -> Self {
        self.rule(Check::MinLength(min), message)
    }

    /// Text must look like an email address
    #[must_use]
    pub fn email(self, message: &'static str) -> Self {
        self.rule(Check::Email, message)
    }

    /// Number must be at least `min`
    #[must_use]
    pub fn min(self, min: f64, message: &'static str) -> Self {
        self.rule(Check::Min(min), message)
    }

    /// Number must be a whole number
    #[must_use]
    pub fn whole_number(self, message: &'static str) -> Self {
        self.rule(Check::Integer, message)
    }

    /// List must have at least `min` items
    #[must_use]
    pub fn min_items(self, min: usize, message: &'static str) -> Self {
        self.rule(Check::MinItems(min), message)
    }

    /// Two fields must hold the same value; the error lands on `right`
    #[must_use]
    pub fn equal(mut self, left: &'static str, right: &'static str, message: &'static str) -> Self {
        self.refinements.push(Refinement {
            left,
            right,
            message,
        });
        self
    }

    /// Finish the schema
    pub fn build(self) -> Result<Schema> {
        let names: HashSet<&str> = self.fields.iter().map(|f| f.name).collect();
        let mut problems = self.problems;

        for r in &self.refinements {
            for side in [r.left, r.right] {
                if !names.contains(side) {
                    problems.push(format!("refinement names unknown field `{side}`"));
                }
            }
        }

        if !problems.is_empty() {
            return Err(Error::Schema(format!("{}: {}", self.name, problems.join(", "))));
        }

        Ok(Schema {
            name: self.name,
            fields: self.fields,
            refinements: self.refinements,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn password_schema() -> Schema {
        Schema::builder("password")
            .text("password")
            .min_length(8, "too short")
            .text("confirm")
            .equal("password", "confirm", "Passwords don't match")
            .build()
            .unwrap()
    }

    #[test]
    fn test_missing_text_is_required() {
        let errors = password_schema().check(&FormValues::new());
        assert_eq!(errors.get("password"), Some("Required"));
        assert_eq!(errors.get("confirm"), Some("Required"));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_refinement_waits_for_field_rules() {
        let values = FormValues::new()
            .with("password", "short")
            .with("confirm", "different");
        let errors = password_schema().check(&values);

        assert_eq!(errors.get("password"), Some("too short"));
        assert!(!errors.contains("confirm"));
    }

    #[test]
    fn test_refinement_error_on_right_field() {
        let values = FormValues::new()
            .with("password", "long enough")
            .with("confirm", "not the same");
        let errors = password_schema().check(&values);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("confirm"), Some("Passwords don't match"));
    }

    #[test]
    fn test_wrong_types() {
        let schema = Schema::builder("t")
            .text("name")
            .number("amount")
            .build()
            .unwrap();
        let values = FormValues::new().with("name", 5).with("amount", "lots");
        let errors = schema.check(&values);

        assert_eq!(errors.get("name"), Some("Expected text"));
        assert_eq!(errors.get("amount"), Some("Expected number"));
    }

    #[test]
    fn test_optional_text_may_be_absent() {
        let schema = Schema::builder("t").optional_text("cac").build().unwrap();
        assert!(schema.check(&FormValues::new()).is_empty());
        assert!(schema
            .check(&FormValues::new().with("cac", json!(null)))
            .is_empty());
        assert_eq!(
            schema.check(&FormValues::new().with("cac", 12)).get("cac"),
            Some("Expected text")
        );
    }

    #[test]
    fn test_email_rule() {
        let schema = Schema::builder("t")
            .text("email")
            .email("bad email")
            .build()
            .unwrap();

        for good in ["user@test.com", "a.b@c.ng"] {
            assert!(schema.check(&FormValues::new().with("email", good)).is_empty());
        }
        for bad in ["", "user@", "user test@x.com", "@x.com", "user@x"] {
            let errors = schema.check(&FormValues::new().with("email", bad));
            assert_eq!(errors.get("email"), Some("bad email"), "{bad}");
        }
    }

    #[test]
    fn test_nested_records_use_indexed_paths() {
        let item = Schema::builder("item")
            .text("color")
            .min_length(1, "Color is required")
            .number("price")
            .min(1.0, "Price must be greater than 0")
            .build()
            .unwrap();
        let schema = Schema::builder("t")
            .records("variants", item)
            .min_items(1, "At least one variant is required")
            .build()
            .unwrap();

        let values = FormValues::new().with(
            "variants",
            json!([{"color": "Red", "price": 10}, {"color": "", "price": 0}, 7]),
        );
        let errors = schema.check(&values);

        assert_eq!(errors.get("variants.1.color"), Some("Color is required"));
        assert_eq!(errors.get("variants.1.price"), Some("Price must be greater than 0"));
        assert_eq!(errors.get("variants.2"), Some("Expected a record"));
        assert!(!errors.contains("variants.0.color"));

        let empty = schema.check(&FormValues::new().with("variants", json!([])));
        assert_eq!(empty.get("variants"), Some("At least one variant is required"));
    }

    #[test]
    fn test_whole_number_rule() {
        let schema = Schema::builder("t")
            .number("stock")
            .min(0.0, "Stock cannot be negative")
            .whole_number("Stock must be a whole number")
            .build()
            .unwrap();

        assert!(schema.check(&FormValues::new().with("stock", 12)).is_empty());

        let errors = schema.check(&FormValues::new().with("stock", 2.5));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("stock"), Some("Stock must be a whole number"));

        let errors = schema.check(&FormValues::new().with("stock", -1.5));
        assert_eq!(
            errors.all("stock"),
            vec!["Stock cannot be negative", "Stock must be a whole number"]
        );

        let err = Schema::builder("t")
            .text("name")
            .whole_number("nope")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("does not apply"));
    }

    #[test]
    fn test_text_list_items() {
        let schema = Schema::builder("t")
            .text_list("categories")
            .min_items(1, "pick one")
            .build()
            .unwrap();

        let errors = schema.check(&FormValues::new().with("categories", json!(["Men", 3])));
        assert_eq!(errors.get("categories.1"), Some("Expected text"));
        assert!(schema
            .check(&FormValues::new().with("categories", json!(["Men"])))
            .is_empty());
    }

    #[test]
    fn test_builder_rejects_duplicate_field() {
        let err = Schema::builder("dup")
            .text("email")
            .text("email")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("declared twice"));
    }

    #[test]
    fn test_builder_rejects_misapplied_rule() {
        let err = Schema::builder("t")
            .number("amount")
            .min_length(3, "nope")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("does not apply"));

        let err = Schema::builder("t").min(1.0, "nope").build().unwrap_err();
        assert!(err.to_string().contains("before any field"));
    }

    #[test]
    fn test_builder_rejects_unknown_refinement_field() {
        let err = Schema::builder("t")
            .text("password")
            .equal("password", "confirm", "x")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("unknown field `confirm`"));
    }

    #[test]
    fn test_field_names_in_order() {
        let schema = password_schema();
        assert_eq!(schema.field_names(), vec!["password", "confirm"]);
        assert!(schema.has_field("confirm"));
        assert_eq!(schema.name(), "password");
    }
}
