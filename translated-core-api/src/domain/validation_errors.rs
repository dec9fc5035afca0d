use serde::{Deserialize, Serialize};
use std::fmt;

/// Field name used for errors that concern the entity as a whole.
pub const BASE_FIELD: &str = "base";

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// # Documentation
/// Accumulated field-level validation errors of one entity.
///
/// Errors keep the order in which they were added. A field may carry several messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add an error on the `base` field.
    pub fn add_base(&mut self, message: impl Into<String>) {
        self.add(BASE_FIELD, message);
    }

    /// Messages recorded for one field, in insertion order.
    pub fn get(&self, field: &str) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.message.as_str())
            .collect()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn count(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn merge(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Full messages in the `"<field> <message>"` form, `base` messages unprefixed.
    pub fn full_messages(&self) -> Vec<String> {
        self.errors
            .iter()
            .map(|e| {
                if e.field == BASE_FIELD {
                    e.message.clone()
                } else {
                    format!("{} {}", e.field, e.message)
                }
            })
            .collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_messages().join(", "))
    }
}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}
